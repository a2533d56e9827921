//! Crop Advisor
//!
//! Recommends a crop from soil and weather measurements and enriches the
//! answer with soil diagnostics, similar crops and market outlook.
//!
//! Pipeline (leaf modules first):
//! - `knowledge/`: Static crop catalogue and market trends
//! - `soil_health`: N/P/K/pH diagnosis
//! - `model/`: Trained artifacts and the live/fallback `Mode`
//! - `inference`: Crop label prediction
//! - `similarity`: Agronomically similar crops
//! - `recommender`: Orchestrates one request end to end
//! - `api_server` (feature `api`): Axum REST surface

pub mod error;
pub mod features;
pub mod config;
pub mod knowledge;
pub mod soil_health;
pub mod model;
pub mod inference;
pub mod similarity;
pub mod recommender;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ArtifactLoadError, ValidationError};
pub use features::{Feature, FeatureVector, ModelChoice};
pub use model::{Mode, SearchPaths, TrainedArtifacts};
pub use recommender::{RecommendationResult, Recommender};
pub use soil_health::{SoilHealthVerdict, SoilStatus};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
