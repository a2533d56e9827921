//! Feature Vector and Request Parsing
//!
//! Turns a raw field mapping (JSON object) into the seven-element feature
//! vector consumed by every model. Each logical field accepts several
//! historical spellings, tried in a fixed priority order; the first alias
//! with a non-empty value wins.
//!
//! No range validation is applied: out-of-range values are passed through
//! and the downstream rules degrade on their own.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Number of model input features
pub const N_FEATURES: usize = 7;

/// One logical input field, in model column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Feature {
    /// All features in model column order
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Canonical request field name
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "nitrogen",
            Feature::Phosphorus => "phosphorus",
            Feature::Potassium => "potassium",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Accepted input keys, highest priority first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Feature::Nitrogen => &["nitrogen", "Nitrogen", "N", "n"],
            Feature::Phosphorus => &["phosphorus", "Phosphorus", "P", "p"],
            Feature::Potassium => &["potassium", "Potassium", "K", "k"],
            Feature::Temperature => &["temperature", "Temperature", "temp"],
            Feature::Humidity => &["humidity", "Humidity"],
            Feature::Ph => &["ph", "pH", "PH", "Ph"],
            Feature::Rainfall => &["rainfall", "Rainfall", "rain"],
        }
    }

    /// Column name in the reference dataset CSV
    pub fn dataset_column(&self) -> &'static str {
        match self {
            Feature::Nitrogen => "N",
            Feature::Phosphorus => "P",
            Feature::Potassium => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }
}

/// Parsed soil and weather measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl FeatureVector {
    pub fn from_array(values: [f64; N_FEATURES]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Values in model column order
    pub fn to_array(&self) -> [f64; N_FEATURES] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Parse all seven fields from a raw request mapping
    ///
    /// Fails on the first field (in column order) that is missing or not a
    /// finite number.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut values = [0.0; N_FEATURES];
        for (slot, feature) in values.iter_mut().zip(Feature::ALL) {
            *slot = parse_field(raw, feature)?;
        }
        Ok(Self::from_array(values))
    }

    /// Stable textual key, used for response caching
    pub fn cache_key(&self) -> String {
        self.to_array()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// First non-empty value among a feature's aliases
fn first_present<'a>(raw: &'a Map<String, Value>, feature: Feature) -> Option<&'a Value> {
    feature
        .aliases()
        .iter()
        .filter_map(|alias| raw.get(*alias))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn parse_field(raw: &Map<String, Value>, feature: Feature) -> Result<f64, ValidationError> {
    let field = feature.name();
    let value = first_present(raw, feature).ok_or(ValidationError::MissingField { field })?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotNumeric {
            field,
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }),
    }
}

/// Which trained classifier a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelChoice {
    /// Primary random forest
    #[default]
    RandomForest,
    /// Secondary gradient-boosted trees
    BoostedTrees,
}

impl ModelChoice {
    const ALIASES: [&'static str; 3] = ["model", "modelChoice", "model_choice"];

    /// Read the optional model hint; anything unrecognised selects the primary
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let hint = Self::ALIASES
            .iter()
            .filter_map(|alias| raw.get(*alias))
            .find_map(|v| v.as_str());

        match hint.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("xgb") | Some("xgboost") => ModelChoice::BoostedTrees,
            _ => ModelChoice::RandomForest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::RandomForest => "rf",
            ModelChoice::BoostedTrees => "xgb",
        }
    }
}
