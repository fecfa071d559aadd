pub mod lighting;
pub mod render;
pub mod starfield;
