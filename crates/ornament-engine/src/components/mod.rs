pub mod kind;
pub mod layer;
pub mod particle;
pub mod transform;
