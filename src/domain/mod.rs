// Domain layer: core models and the pipeline port. Adapters live under src/adapters.

pub mod model;
pub mod ports;
