//! Backend REST collaborator.
//!
//! The views fetch scores, goals, moments, challenges, and news through
//! [`ApiClient`]; this crate's derivations consume the decoded results.
//! Wire records tolerate unknown and missing fields and are decoded into
//! validated internal types before anything else touches them.

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Assessment, DashboardStats, NewsArticle, WeeklyReflection};
