use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Virtue registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A virtue named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("No custom virtue with id '{virtue_id}'")]
    NotFound { virtue_id: String },

    #[error("Virtue name cannot be empty")]
    EmptyName,

    #[error("Failed to persist custom virtues: {0}")]
    Store(#[from] StorageError),
}

/// Local store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store document is unreadable: {message}")]
    Corrupt { message: String },
}

/// Backend API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type alias for local store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for backend API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::DuplicateName {
            name: "Patience".to_string(),
        };
        assert_eq!(err.to_string(), "A virtue named 'Patience' already exists");

        let err = RegistryError::NotFound {
            virtue_id: "custom-123".to_string(),
        };
        assert_eq!(err.to_string(), "No custom virtue with id 'custom-123'");

        let err = RegistryError::EmptyName;
        assert_eq!(err.to_string(), "Virtue name cannot be empty");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Corrupt {
            message: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Store document is unreadable: expected value at line 1"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.to_string(), "Unauthorized");

        let err = ApiError::Api {
            status: 404,
            message: "Goals not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Goals not found");

        let err = ApiError::InvalidResponse {
            message: "malformed JSON".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid response: malformed JSON");

        let err = ApiError::Timeout { timeout_ms: 10000 };
        assert_eq!(err.to_string(), "Request timeout after 10000ms");
    }

    #[test]
    fn test_registry_error_conversion_to_app_error() {
        let reg_err = RegistryError::EmptyName;
        let app_err: AppError = reg_err.into();
        assert!(matches!(app_err, AppError::Registry(_)));
    }

    #[test]
    fn test_storage_error_conversion_to_app_error() {
        let storage_err = StorageError::Corrupt {
            message: "truncated".to_string(),
        };
        let app_err: AppError = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));
        assert!(app_err.to_string().contains("unreadable"));
    }

    #[test]
    fn test_api_error_conversion_to_app_error() {
        let api_err = ApiError::Timeout { timeout_ms: 1000 };
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(_)));
    }
}
