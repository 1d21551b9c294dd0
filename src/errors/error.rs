use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading the raw donation dataset
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Malformed(String),

    #[error("Dataset source unavailable: {0}")]
    Unavailable(String),
}

impl serde::Serialize for DataLoadError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DataLoadError", 2)?;
        match self {
            DataLoadError::Io(err) => {
                state.serialize_field("type", "Io")?;
                state.serialize_field("message", &err.to_string())?;
            }
            DataLoadError::Malformed(s) => {
                state.serialize_field("type", "Malformed")?;
                state.serialize_field("message", s)?;
            }
            DataLoadError::Unavailable(s) => {
                state.serialize_field("type", "Unavailable")?;
                state.serialize_field("message", s)?;
            }
        }
        state.end()
    }
}

/// Manual Clone implementation for DataLoadError
impl Clone for DataLoadError {
    fn clone(&self) -> Self {
        match self {
            DataLoadError::Io(err) => DataLoadError::Unavailable(format!("I/O error: {}", err)),
            DataLoadError::Malformed(s) => DataLoadError::Malformed(s.clone()),
            DataLoadError::Unavailable(s) => DataLoadError::Unavailable(s.clone()),
        }
    }
}

/// Domain-level errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, Serialize)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Domain(DomainError::Validation(error))
    }
}

impl From<DataLoadError> for ServiceError {
    fn from(error: DataLoadError) -> Self {
        ServiceError::Domain(DomainError::DataLoad(error))
    }
}

/// Validation errors
#[derive(Debug, Error, Clone, Serialize)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required {
        field: String,
    },

    #[error("Field '{field}' contains invalid format: {reason}")]
    Format {
        field: String,
        reason: String,
    },

    #[error("Field '{field}' contains an invalid value: {reason}")]
    InvalidValue {
        field: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn format(field: &str, reason: &str) -> Self {
        Self::Format {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn custom(message: &str) -> Self {
        Self::Custom(message.to_string())
    }
}
