pub mod args;
pub mod commands;

pub use args::{Cli, Commands, QueryArgs};
pub use commands::run;
