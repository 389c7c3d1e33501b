pub mod provision;
pub mod render;
pub mod resolve;
pub mod validate;
