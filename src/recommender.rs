//! Recommendation Orchestrator
//!
//! Runs the full pipeline for one request:
//! parse -> predict -> catalogue lookup -> soil health + similar crops -> market trend
//!
//! Only parsing can fail. Every later step degrades to a safe default
//! (Unknown Crop, title-cased stand-in record, empty list, empty trend).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::features::{FeatureVector, ModelChoice};
use crate::inference;
use crate::knowledge::{self, CropRecord, MarketTrend};
use crate::model::Mode;
use crate::similarity::{self, SimilarCrops};
use crate::soil_health::{self, SoilHealthVerdict};

/// Orchestrated output for one request
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    /// Display name of the predicted crop
    pub crop: String,
    /// Raw classifier / rule label
    pub label: String,
    pub crop_info: CropRecord,
    pub similar_crops: SimilarCrops,
    pub soil_health: SoilHealthVerdict,
    #[serde(serialize_with = "empty_object_when_none")]
    pub market_trends: Option<&'static MarketTrend>,
    pub conditions: FeatureVector,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'static str>,
}

fn empty_object_when_none<S: Serializer>(
    trend: &Option<&'static MarketTrend>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match trend {
        Some(t) => t.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}

/// Pipeline entry point; holds the startup-time mode
#[derive(Debug, Clone)]
pub struct Recommender {
    mode: Mode,
}

impl Recommender {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Validate a raw request and build the recommendation
    pub fn recommend(&self, raw: &Map<String, Value>) -> Result<RecommendationResult, ValidationError> {
        let features = FeatureVector::from_raw(raw)?;
        let choice = ModelChoice::from_raw(raw);
        Ok(self.recommend_features(features, choice))
    }

    /// Model choice that will actually serve a request
    pub fn effective_choice(&self, choice: ModelChoice) -> Option<ModelChoice> {
        match &self.mode {
            Mode::Live(artifacts) => Some(artifacts.effective_choice(choice)),
            Mode::Fallback => None,
        }
    }

    /// Build the recommendation for already-parsed measurements
    pub fn recommend_features(&self, features: FeatureVector, choice: ModelChoice) -> RecommendationResult {
        let label = inference::predict(&self.mode, &features, choice);
        let crop_info = knowledge::lookup(&label);

        let soil_health = soil_health::evaluate(
            features.nitrogen,
            features.phosphorus,
            features.potassium,
            features.ph,
        );
        let similar_crops = similarity::similar(&self.mode, &features);

        let market_trends = knowledge::lookup_trend(crop_info.name());

        RecommendationResult {
            crop: crop_info.name().to_string(),
            label,
            crop_info,
            similar_crops,
            soil_health,
            market_trends,
            conditions: features,
            mode: self.mode.name(),
            model: self.effective_choice(choice).map(|c| c.as_str()),
        }
    }
}
