pub mod manifest;
pub mod placeholder;
pub mod registry;
