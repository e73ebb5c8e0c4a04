// Domain layer: boundary values and collaborator ports. No process or locale access here.

pub mod model;
pub mod ports;
