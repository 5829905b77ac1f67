use thiserror::Error;

use crate::options::OptionError;
use crate::options_file::OptionsFileError;
use crate::output::OutputError;
use crate::schema::SchemaError;

#[derive(Error, Debug)]
pub enum TcgenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid option schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Option(#[from] OptionError),

    #[error("Options file error: {0}")]
    OptionsFile(#[from] OptionsFileError),

    #[error("{0}")]
    Output(#[from] OutputError),
}
