pub mod category;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod fs;
pub mod output;
pub mod picker;
pub mod search;
pub mod theme;

pub use error::{Error, Result};
