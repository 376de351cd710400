use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Maximum number of priority virtues a user may select.
pub const MAX_PRIORITY_VIRTUES: usize = 3;

/// Score assigned to a virtue with no data (newly created custom virtues,
/// or virtues missing from a server payload).
pub const DEFAULT_SCORE: f64 = 0.0;

/// Lower bound of the score scale.
pub const SCORE_MIN: f64 = 0.0;

/// Upper bound of the score scale.
pub const SCORE_MAX: f64 = 100.0;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub history: HistoryConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

/// Local store configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub custom_virtues_path: PathBuf,
}

/// Trend history configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Number of week buckets in a synthesized trend series. Always >= 1.
    pub weeks: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = ApiConfig {
            base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            timeout_ms: env::var("API_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
        };

        let storage = StorageConfig {
            custom_virtues_path: PathBuf::from(
                env::var("CUSTOM_VIRTUES_PATH")
                    .unwrap_or_else(|_| "./data/custom_virtues.json".to_string()),
            ),
        };

        let weeks: usize = env::var("HISTORY_WEEKS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        if weeks == 0 {
            return Err(AppError::Config {
                message: "HISTORY_WEEKS must be at least 1".to_string(),
            });
        }
        let history = HistoryConfig { weeks };

        Ok(Config {
            api,
            storage,
            history,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_ms: 10000,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { weeks: 5 }
    }
}
