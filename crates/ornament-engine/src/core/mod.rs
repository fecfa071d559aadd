pub mod distribution;
pub mod graph;
pub mod pool;
pub mod reparent;
pub mod resolver;
pub mod rng;
