// Domain layer: value types and ports (capability traits). Entities live in `core`.

pub mod model;
pub mod ports;
