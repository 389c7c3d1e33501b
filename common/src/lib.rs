mod domain;
mod infrastructure;

pub mod test_utils;

// Locale keys used inside stored bilingual values

pub const EN_LOCALE_KEY: &str = "en";
pub const AR_LOCALE_KEY: &str = "ar";

// expose domain module

pub use domain::*;

// expose infrastructure

pub use infrastructure::blueprints::{from_json_str, load as load_blueprints};
pub use infrastructure::store::BlueprintStore;
