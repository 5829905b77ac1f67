pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod input;
pub mod lint;
pub mod logging;
pub mod options;
pub mod options_file;
pub mod output;
pub mod recipes;
pub mod schema;
pub mod session;
