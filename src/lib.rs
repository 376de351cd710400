//! # Virtue Compass
//!
//! Client-side domain core for a character development companion. The view
//! layer renders what this crate derives:
//!
//! - **Virtue Registry**: merges the predefined virtue catalog with
//!   user-defined custom virtues persisted locally
//! - **Score Normalizer**: turns sparse server score payloads into complete
//!   vectors aligned with the registry
//! - **Synthetic History**: simulated trend series for visualization when no
//!   measured history exists
//! - **Insight & Challenge Derivation**: deterministic fallback feeds that
//!   exercise the UI without backend analytics
//! - **API Client**: typed access to the REST backend
//!
//! ## Architecture
//!
//! ```text
//! Registry -> Normalizer -> History / Insights / Challenges -> Views
//!     |                                                          |
//! Local store (JSON document)                      Backend (REST, reqwest)
//! ```
//!
//! The registry is the only piece with mutable persisted state; everything
//! downstream is a pure function over its inputs, recomputed on demand.
//!
//! ## Example
//!
//! ```ignore
//! use virtue_compass::{
//!     scores, synthetic, ApiClient, Config, JsonFileStore, VirtueRegistry,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let mut registry =
//!         VirtueRegistry::new(JsonFileStore::new(&config.storage.custom_virtues_path))?;
//!     registry.add("Patience", "Calm endurance under strain.")?;
//!
//!     let mut api = ApiClient::new(&config.api)?;
//!     api.login("user@example.com", "secret").await?;
//!
//!     let stats = api.get_dashboard_stats().await?;
//!     let goals = api.get_goals().await?;
//!     let vector = scores::normalize(&stats.current_scores, &registry.get_all());
//!     let trend = synthetic::synthesize(
//!         &registry.get_all(),
//!         &vector,
//!         &goals.priority_virtues,
//!         config.history.weeks,
//!     );
//!     println!("{} weeks of trend data", trend.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Backend REST client and wire records.
pub mod api;
/// Configuration and domain constants.
pub mod config;
/// Error types and result aliases.
pub mod error;
/// Score vector normalization.
pub mod scores;
/// Local persistence for user-defined virtues.
pub mod storage;
/// Synthetic demo data: trend history, insights, challenges.
pub mod synthetic;
/// Virtue domain model and registry.
pub mod virtues;

pub use api::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use storage::{JsonFileStore, MemoryStore, VirtueStore};
pub use virtues::{CharacterMoment, UserGoals, Virtue, VirtueRegistry, VirtueScore};
