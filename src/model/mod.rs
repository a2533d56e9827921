//! Trained Models and Operating Mode
//!
//! - `scaler.rs` - two-stage feature scaling
//! - `forest.rs` - tree-ensemble classifiers
//! - `cluster.rs` - k-means cluster assignment
//! - `reference.rs` - historical training rows (Polars CSV)
//! - `artifacts.rs` - discovery and loading of the trained bundle
//!
//! `Mode` is decided once at startup and never re-evaluated: either the full
//! trained bundle loaded (`Live`) or the process runs on fixed rules
//! (`Fallback`).

pub mod scaler;
pub mod forest;
pub mod cluster;
pub mod reference;
pub mod artifacts;

use std::sync::Arc;

pub use artifacts::{ArtifactPaths, SearchPaths, TrainedArtifacts};
pub use cluster::{ClusterModel, KMeans};
pub use forest::{BoostedTrees, Classifier, ClassifierModel, DecisionTree, Node, RandomForest};
pub use reference::ReferenceDataset;
pub use scaler::{MinMaxScaler, ScalerPipeline, StandardScaler};

#[derive(Debug, Clone)]
pub enum Mode {
    Live(Arc<TrainedArtifacts>),
    Fallback,
}

impl Mode {
    /// Look for trained artifacts and pick the process-wide mode
    ///
    /// Missing files and unreadable files both end in `Fallback`; neither
    /// stops the process.
    pub fn from_startup(search: &SearchPaths) -> Self {
        let paths = match search.discover() {
            Ok(paths) => paths,
            Err(missing) => {
                tracing::info!("Trained artifact not found ({}), running in fallback mode", missing);
                return Mode::Fallback;
            }
        };

        match TrainedArtifacts::load(&paths) {
            Ok(artifacts) => {
                tracing::info!("Running in live mode");
                Mode::Live(Arc::new(artifacts))
            }
            Err(e) => {
                tracing::warn!("{}; running in fallback mode", e);
                Mode::Fallback
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Live(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Live(_) => "live",
            Mode::Fallback => "fallback",
        }
    }
}


/// In-memory bundle for unit tests
///
/// Identity scaling; reference rows differ only in rainfall, so the two
/// clusters split wet (rice, jute) from dry (maize, chickpea) rows.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::features::N_FEATURES;

    pub fn row(rainfall: f64) -> [f64; N_FEATURES] {
        [50.0, 50.0, 50.0, 25.0, 70.0, 6.5, rainfall]
    }

    /// Stump on rainfall: <= 120 votes `dry_class`, above votes `wet_class`
    pub fn rain_stump(n_classes: usize, dry_class: usize, wet_class: usize) -> ClassifierModel {
        let votes = |class: usize| {
            let mut v = vec![0.0; n_classes];
            v[class] = 1.0;
            v
        };
        ClassifierModel::RandomForest(RandomForest {
            n_classes,
            trees: vec![DecisionTree {
                nodes: vec![
                    Node::Split { feature: 6, threshold: 120.0, left: 1, right: 2 },
                    Node::Leaf { value: votes(dry_class) },
                    Node::Leaf { value: votes(wet_class) },
                ],
            }],
        })
    }

    pub fn identity_scaler() -> ScalerPipeline {
        ScalerPipeline {
            minmax: MinMaxScaler {
                data_min: vec![0.0; N_FEATURES],
                data_range: vec![1.0; N_FEATURES],
                feature_range: (0.0, 1.0),
            },
            standard: StandardScaler {
                mean: vec![0.0; N_FEATURES],
                scale: vec![1.0; N_FEATURES],
            },
        }
    }

    /// Classes in order: rice, jute, maize, chickpea
    pub fn sample_artifacts(primary: ClassifierModel, secondary: Option<ClassifierModel>) -> Mode {
        let reference = ReferenceDataset::from_rows(
            vec![row(200.0), row(180.0), row(80.0), row(210.0), row(70.0), row(60.0)],
            ["rice", "jute", "maize", "rice", "chickpea", "maize"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let clusters = KMeans {
            centers: vec![row(190.0).to_vec(), row(70.0).to_vec()],
        };
        Mode::Live(Arc::new(TrainedArtifacts::from_parts(
            primary,
            secondary,
            identity_scaler(),
            clusters,
            reference,
        )))
    }

    /// Default live bundle: dry -> maize (2), wet -> rice (0)
    pub fn live_mode() -> Mode {
        sample_artifacts(rain_stump(4, 2, 0), None)
    }
}
