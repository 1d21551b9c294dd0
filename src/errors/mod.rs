mod error;

pub use error::{DataLoadError, DomainError, ServiceError, ValidationError};

/// Result type for dataset load operations
pub type DataLoadResult<T> = Result<T, DataLoadError>;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
