//! Command-line interface module.

mod args;
pub mod compile;
pub mod index;

pub use args::{Cli, Commands, CompileArgs, IndexArgs};
