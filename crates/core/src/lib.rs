pub mod config;
pub mod error;
pub mod types;

pub use config::{load_theme_or_default, parse_theme_toml, parse_theme_toml_str};
pub use error::{Error, Result};
pub use types::*;
