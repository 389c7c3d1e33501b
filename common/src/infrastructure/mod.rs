pub mod blueprints;
pub mod store;
