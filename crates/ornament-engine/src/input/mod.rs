pub mod gesture;
pub mod policy;
pub mod sample;
