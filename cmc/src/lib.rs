pub mod ast;
pub mod builder;
pub mod compile;
pub mod config;
pub mod emit;
pub mod error;
pub mod grammer;
pub mod label;
pub mod msg;
pub mod output;
pub mod render;

pub use compile::{compile, compile_with, Compiled};
pub use config::Config;
pub use error::Error;
