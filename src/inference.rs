//! Crop Inference
//!
//! Live mode scales the measurements, runs the chosen classifier, and maps
//! the class index into the reference dataset's label set. An index outside
//! that set degrades to `UNKNOWN_CROP`.
//!
//! Fallback mode is an ordered decision list, first match wins:
//! 1. rainfall >= 150 and humidity >= 70 -> rice
//! 2. 18 <= temperature <= 26 and 6.0 <= pH <= 7.5 -> chickpea
//! 3. temperature >= 24 and rainfall >= 100 -> maize
//! 4. otherwise -> mungbean

use crate::features::{FeatureVector, ModelChoice};
use crate::model::{Classifier, Mode, TrainedArtifacts};

/// Label returned when the classifier index has no matching crop
pub const UNKNOWN_CROP: &str = "Unknown Crop";

/// Predict a crop label for one request
pub fn predict(mode: &Mode, features: &FeatureVector, choice: ModelChoice) -> String {
    match mode {
        Mode::Live(artifacts) => predict_live(artifacts, features, choice),
        Mode::Fallback => fallback_crop(features).to_string(),
    }
}

fn predict_live(artifacts: &TrainedArtifacts, features: &FeatureVector, choice: ModelChoice) -> String {
    let scaled = artifacts.scale(features);
    let index = artifacts.classifier(choice).predict_index(&scaled);

    match artifacts.reference().classes().get(index) {
        Some(label) => label.clone(),
        None => {
            tracing::debug!(
                "Classifier index {} outside {} known labels",
                index,
                artifacts.reference().classes().len()
            );
            UNKNOWN_CROP.to_string()
        }
    }
}

/// Rule-based prediction used without trained artifacts
pub fn fallback_crop(f: &FeatureVector) -> &'static str {
    if f.rainfall >= 150.0 && f.humidity >= 70.0 {
        "rice"
    } else if (18.0..=26.0).contains(&f.temperature) && (6.0..=7.5).contains(&f.ph) {
        "chickpea"
    } else if f.temperature >= 24.0 && f.rainfall >= 100.0 {
        "maize"
    } else {
        "mungbean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{live_mode, rain_stump, row, sample_artifacts};

    fn fv(temperature: f64, humidity: f64, ph: f64, rainfall: f64) -> FeatureVector {
        FeatureVector {
            nitrogen: 80.0,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    #[test]
    fn test_rule_one_wins_over_rule_two() {
        // Satisfies both rule 1 and rule 2
        let f = fv(20.0, 75.0, 6.8, 160.0);
        assert_eq!(predict(&Mode::Fallback, &f, ModelChoice::default()), "rice");
    }

    #[test]
    fn test_rule_one_boundaries() {
        assert_eq!(fallback_crop(&fv(30.0, 70.0, 5.0, 150.0)), "rice");
        assert_ne!(fallback_crop(&fv(30.0, 69.9, 5.0, 150.0)), "rice");
        assert_ne!(fallback_crop(&fv(30.0, 70.0, 5.0, 149.9)), "rice");
    }

    #[test]
    fn test_chickpea_band() {
        assert_eq!(fallback_crop(&fv(18.0, 50.0, 6.0, 50.0)), "chickpea");
        assert_eq!(fallback_crop(&fv(26.0, 50.0, 7.5, 50.0)), "chickpea");
        assert_eq!(fallback_crop(&fv(17.9, 50.0, 6.5, 50.0)), "mungbean");
        assert_eq!(fallback_crop(&fv(22.0, 50.0, 7.6, 50.0)), "mungbean");
    }

    #[test]
    fn test_rule_two_before_rule_three() {
        // 24-26C with neutral pH and 100mm+ rain matches both 2 and 3
        assert_eq!(fallback_crop(&fv(25.0, 50.0, 6.5, 120.0)), "chickpea");
    }

    #[test]
    fn test_maize_and_default() {
        assert_eq!(fallback_crop(&fv(30.0, 50.0, 8.0, 100.0)), "maize");
        assert_eq!(fallback_crop(&fv(30.0, 50.0, 8.0, 99.9)), "mungbean");
        assert_eq!(fallback_crop(&fv(-40.0, 0.0, 14.0, 0.0)), "mungbean");
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let f = fv(27.3, 64.0, 5.9, 131.0);
        let first = predict(&Mode::Fallback, &f, ModelChoice::default());
        for _ in 0..10 {
            assert_eq!(predict(&Mode::Fallback, &f, ModelChoice::default()), first);
        }
    }

    #[test]
    fn test_live_maps_index_to_label() {
        let mode = live_mode();
        let wet = FeatureVector::from_array(row(200.0));
        let dry = FeatureVector::from_array(row(60.0));
        assert_eq!(predict(&mode, &wet, ModelChoice::RandomForest), "rice");
        assert_eq!(predict(&mode, &dry, ModelChoice::RandomForest), "maize");
    }

    #[test]
    fn test_live_unknown_index_degrades() {
        // Six classes but only four distinct labels in the reference data
        let mode = sample_artifacts(rain_stump(6, 5, 0), None);
        let dry = FeatureVector::from_array(row(60.0));
        assert_eq!(predict(&mode, &dry, ModelChoice::RandomForest), UNKNOWN_CROP);
    }

    #[test]
    fn test_model_choice_selects_secondary() {
        // Secondary predicts chickpea (3) for wet rows
        let mode = sample_artifacts(rain_stump(4, 2, 0), Some(rain_stump(4, 2, 3)));
        let wet = FeatureVector::from_array(row(200.0));
        assert_eq!(predict(&mode, &wet, ModelChoice::RandomForest), "rice");
        assert_eq!(predict(&mode, &wet, ModelChoice::BoostedTrees), "chickpea");
    }

    #[test]
    fn test_missing_secondary_uses_primary() {
        let wet = FeatureVector::from_array(row(200.0));
        assert_eq!(predict(&live_mode(), &wet, ModelChoice::BoostedTrees), "rice");
    }
}
