use serde_json::error::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::Display;
use thiserror::Error;
use toml::ser::Error as TomlError;

#[derive(Error, Debug)]
pub enum IOEntry<'a> {
    #[error("Failed to read file {0}: {1}")]
    ReadFileError(Display<'a>, IoError),
    #[error("Failed to write file {0}: {1}")]
    WriteFileError(Display<'a>, IoError),
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerializeError(TomlError),
    #[error("Failed to deserialize data: {0}")]
    SerdeDeserializeError(SerdeJsonError),
}

impl From<IOEntry<'_>> for String {
    #[inline(always)]
    fn from(value: IOEntry) -> Self {
        value.to_string()
    }
}
