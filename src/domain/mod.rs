// Domain layer: models and ports (interfaces). No scanning logic here.

pub mod model;
pub mod ports;
