// Domain layer: catalog models and the ports the traversal talks through.

pub mod model;
pub mod ports;
