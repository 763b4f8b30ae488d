//! Error types for field and fieldset operations

use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Invalid field: {0}")]
	InvalidField(String),
	#[error("Fieldset hierarchy error: {0}")]
	Hierarchy(String),
	#[error("Unknown field: {0}")]
	UnknownField(String),
	#[error("Unknown fieldset: {0}")]
	UnknownFieldset(String),
	#[error("Select element \"{0}\" is missing the \"options\" mapping")]
	MissingOptions(String),
	#[error("\"{0}\" is not a valid input type")]
	InvalidInputType(String),
	#[error("Template error: {0}")]
	Template(#[from] TemplateError),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type FormResult<T> = Result<T, FormError>;
