pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{CoordinateError, Result};
