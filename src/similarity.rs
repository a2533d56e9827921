//! Similar Crop Finder
//!
//! Live mode: crops whose reference rows fall in the same cluster as the
//! request, in first-seen row order, reported by catalogue display name.
//!
//! Fallback mode: each matching condition contributes its candidates, in
//! this order (conditions are independent, not exclusive):
//! - rainfall >= 150 -> Rice, Jute, Coconut
//! - 18 <= temperature <= 28 -> Wheat, Maize, Papaya
//! - 6.0 <= pH <= 7.5 -> Cotton, Maize
//!
//! Both paths dedupe keeping first occurrence and return at most
//! `MAX_SIMILAR` names. An empty list is a valid answer.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::features::FeatureVector;
use crate::knowledge;
use crate::model::{ClusterModel, Mode, TrainedArtifacts};

pub const MAX_SIMILAR: usize = 5;

pub type SimilarCrops = SmallVec<[String; MAX_SIMILAR]>;

/// Condition and the crops it suggests
struct Heuristic {
    applies: fn(&FeatureVector) -> bool,
    candidates: &'static [&'static str],
}

fn high_rainfall(f: &FeatureVector) -> bool {
    f.rainfall >= 150.0
}

fn temperate(f: &FeatureVector) -> bool {
    (18.0..=28.0).contains(&f.temperature)
}

fn neutral_ph(f: &FeatureVector) -> bool {
    (6.0..=7.5).contains(&f.ph)
}

static HEURISTICS: &[Heuristic] = &[
    Heuristic { applies: high_rainfall, candidates: &["Rice", "Jute", "Coconut"] },
    Heuristic { applies: temperate, candidates: &["Wheat", "Maize", "Papaya"] },
    Heuristic { applies: neutral_ph, candidates: &["Cotton", "Maize"] },
];

/// Up to `MAX_SIMILAR` crops agronomically close to the request
pub fn similar(mode: &Mode, features: &FeatureVector) -> SimilarCrops {
    let crops = match mode {
        Mode::Live(artifacts) => similar_live(artifacts, features),
        Mode::Fallback => similar_fallback(features),
    };
    if crops.is_empty() {
        tracing::debug!("No similar crops for {:?}", features);
    }
    crops
}

fn similar_live(artifacts: &TrainedArtifacts, features: &FeatureVector) -> SimilarCrops {
    let cluster = artifacts.clusters().assign(&artifacts.scale(features));

    let labels = artifacts
        .reference()
        .labels()
        .iter()
        .zip(artifacts.reference_clusters())
        .filter(|(_, c)| **c == cluster)
        .map(|(label, _)| label.as_str());

    take_distinct(labels)
        .into_iter()
        .map(|label| knowledge::lookup(&label).name().to_string())
        .collect()
}

fn similar_fallback(features: &FeatureVector) -> SimilarCrops {
    let candidates = HEURISTICS
        .iter()
        .filter(|h| (h.applies)(features))
        .flat_map(|h| h.candidates.iter().copied());

    take_distinct(candidates)
}

fn take_distinct<'a>(names: impl Iterator<Item = &'a str>) -> SimilarCrops {
    let mut seen = FxHashSet::default();
    names
        .filter(|name| seen.insert(*name))
        .take(MAX_SIMILAR)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::{live_mode, row};

    fn fv(temperature: f64, ph: f64, rainfall: f64) -> FeatureVector {
        FeatureVector {
            nitrogen: 80.0,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature,
            humidity: 60.0,
            ph,
            rainfall,
        }
    }

    #[test]
    fn test_rain_and_temperature_dedupes_and_truncates() {
        let crops = similar(&Mode::Fallback, &fv(20.0, 8.0, 160.0));
        assert_eq!(crops.as_slice(), &["Rice", "Jute", "Coconut", "Wheat", "Maize"]);
    }

    #[test]
    fn test_maize_listed_once() {
        let crops = similar(&Mode::Fallback, &fv(20.0, 6.5, 50.0));
        assert_eq!(crops.as_slice(), &["Wheat", "Maize", "Papaya", "Cotton"]);
    }

    #[test]
    fn test_all_conditions_no_duplicates() {
        let crops = similar(&Mode::Fallback, &fv(25.0, 6.5, 200.0));
        assert_eq!(crops.len(), MAX_SIMILAR);
        let unique: FxHashSet<_> = crops.iter().collect();
        assert_eq!(unique.len(), crops.len());
    }

    #[test]
    fn test_no_condition_is_empty() {
        assert!(similar(&Mode::Fallback, &fv(35.0, 4.0, 20.0)).is_empty());
    }

    #[test]
    fn test_boundaries_inclusive() {
        assert_eq!(similar(&Mode::Fallback, &fv(28.0, 8.0, 0.0)).len(), 3);
        assert_eq!(similar(&Mode::Fallback, &fv(35.0, 7.5, 0.0)).as_slice(), &["Cotton", "Maize"]);
        assert_eq!(similar(&Mode::Fallback, &fv(35.0, 8.0, 150.0))[0], "Rice");
    }

    #[test]
    fn test_live_returns_cluster_members() {
        let mode = live_mode();
        let wet = similar(&mode, &FeatureVector::from_array(row(195.0)));
        assert_eq!(wet.as_slice(), &["Rice", "Jute"]);

        let dry = similar(&mode, &FeatureVector::from_array(row(65.0)));
        assert_eq!(dry.as_slice(), &["Maize", "Chickpea"]);
    }

    #[test]
    fn test_live_and_fallback_share_display_names() {
        let wet = FeatureVector::from_array(row(195.0));
        let live = similar(&live_mode(), &wet);
        let fallback = similar(&Mode::Fallback, &wet);

        // Both modes spell a crop the same way
        assert_eq!(&live[..], &fallback[..2]);
    }
}
