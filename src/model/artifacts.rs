//! Trained Artifact Loading
//!
//! Locates and loads the trained bundle once at startup:
//! - `rf_model.json` - primary classifier (required)
//! - `scaler.json` - min-max + standard scaler (required)
//! - `kmeans_model.json` - cluster model (required)
//! - reference dataset CSV (required)
//! - `xgb_model.json` - secondary classifier (optional)
//!
//! Model directory search order: `$MODEL_DIR`, `models`,
//! `Machine learning/models`, `../models`. The first directory holding the
//! primary classifier is used for the other model files.
//!
//! Dataset search order: `$DATASET_PATH`, `<model dir>/Crop_recommendation.csv`,
//! `data/Crop_recommendation.csv`, `Crop_recommendation.csv`.
//!
//! `SearchPaths::in_dir` drops the built-in relative locations from both lists.

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::cluster::{ClusterModel, KMeans};
use super::forest::ClassifierModel;
use super::reference::ReferenceDataset;
use super::scaler::ScalerPipeline;
use crate::error::ArtifactLoadError;
use crate::features::{FeatureVector, ModelChoice, N_FEATURES};

pub const PRIMARY_MODEL_FILE: &str = "rf_model.json";
pub const SECONDARY_MODEL_FILE: &str = "xgb_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const CLUSTER_FILE: &str = "kmeans_model.json";
pub const DATASET_FILE: &str = "Crop_recommendation.csv";

const DEFAULT_MODEL_DIRS: [&str; 3] = ["models", "Machine learning/models", "../models"];
const DEFAULT_DATASET_PATHS: [&str; 2] = ["data/Crop_recommendation.csv", "Crop_recommendation.csv"];

/// Where to look for trained artifacts
#[derive(Debug, Clone)]
pub struct SearchPaths {
    pub model_dir: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    /// Also try the built-in relative locations after the overrides
    pub include_defaults: bool,
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self {
            model_dir: None,
            dataset: None,
            include_defaults: true,
        }
    }
}

impl SearchPaths {
    /// Search only `dir`, ignoring the built-in locations (used by tests and tools)
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            dataset: Some(dir.join(DATASET_FILE)),
            model_dir: Some(dir),
            include_defaults: false,
        }
    }

    fn defaults<'a>(&self, paths: &'a [&'a str]) -> impl Iterator<Item = PathBuf> + 'a {
        let paths: &'a [&'a str] = if self.include_defaults { paths } else { &[] };
        paths.iter().map(PathBuf::from)
    }

    pub fn model_dirs(&self) -> Vec<PathBuf> {
        self.model_dir
            .iter()
            .cloned()
            .chain(self.defaults(&DEFAULT_MODEL_DIRS))
            .collect()
    }

    pub fn dataset_candidates(&self, model_dir: &Path) -> Vec<PathBuf> {
        self.dataset
            .iter()
            .cloned()
            .chain(std::iter::once(model_dir.join(DATASET_FILE)))
            .chain(self.defaults(&DEFAULT_DATASET_PATHS))
            .collect()
    }

    /// Resolve every required file, or name the first one that is missing
    pub fn discover(&self) -> Result<ArtifactPaths, String> {
        let model_dir = self
            .model_dirs()
            .into_iter()
            .find(|dir| dir.join(PRIMARY_MODEL_FILE).is_file())
            .ok_or_else(|| PRIMARY_MODEL_FILE.to_string())?;

        for required in [SCALER_FILE, CLUSTER_FILE] {
            if !model_dir.join(required).is_file() {
                return Err(model_dir.join(required).display().to_string());
            }
        }

        let dataset = self
            .dataset_candidates(&model_dir)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DATASET_FILE.to_string())?;

        Ok(ArtifactPaths { model_dir, dataset })
    }
}

/// Resolved artifact locations
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model_dir: PathBuf,
    pub dataset: PathBuf,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_classifier(path: &Path) -> Result<ClassifierModel, ArtifactLoadError> {
    let model: ClassifierModel = read_json(path)?;
    model.validate(path)?;
    Ok(model)
}

/// Immutable trained bundle shared by all requests
#[derive(Debug)]
pub struct TrainedArtifacts {
    primary: ClassifierModel,
    secondary: Option<ClassifierModel>,
    scaler: ScalerPipeline,
    clusters: KMeans,
    reference: ReferenceDataset,
    /// Cluster id of each scaled reference row
    reference_clusters: Vec<usize>,
}

impl TrainedArtifacts {
    /// Assemble from already-loaded parts and cluster the reference rows
    pub fn from_parts(
        primary: ClassifierModel,
        secondary: Option<ClassifierModel>,
        scaler: ScalerPipeline,
        clusters: KMeans,
        reference: ReferenceDataset,
    ) -> Self {
        let reference_clusters = reference
            .rows()
            .par_iter()
            .map(|row| clusters.assign(&scaler.transform(row)))
            .collect();

        Self {
            primary,
            secondary,
            scaler,
            clusters,
            reference,
            reference_clusters,
        }
    }

    /// Load every file named by `paths`
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        let primary = load_classifier(&paths.model_dir.join(PRIMARY_MODEL_FILE))?;

        let secondary_path = paths.model_dir.join(SECONDARY_MODEL_FILE);
        let secondary = if secondary_path.is_file() {
            match load_classifier(&secondary_path) {
                Ok(model) => Some(model),
                Err(e) => {
                    tracing::warn!("Secondary classifier unusable, primary will serve all requests: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let scaler_path = paths.model_dir.join(SCALER_FILE);
        let scaler: ScalerPipeline = read_json(&scaler_path)?;
        scaler.validate(&scaler_path)?;

        let cluster_path = paths.model_dir.join(CLUSTER_FILE);
        let clusters: KMeans = read_json(&cluster_path)?;
        clusters.validate(&cluster_path)?;

        let reference = ReferenceDataset::load(&paths.dataset)?;

        let artifacts = Self::from_parts(primary, secondary, scaler, clusters, reference);
        tracing::info!(
            "Loaded trained artifacts from {:?}: {} reference rows, {} crop classes, {} clusters{}",
            paths.model_dir,
            artifacts.reference.len(),
            artifacts.reference.classes().len(),
            artifacts.clusters.centers.len(),
            if artifacts.secondary.is_some() { ", secondary classifier" } else { "" },
        );
        Ok(artifacts)
    }

    /// Classifier for a request; the primary stands in for a missing secondary
    pub fn classifier(&self, choice: ModelChoice) -> &ClassifierModel {
        match choice {
            ModelChoice::BoostedTrees => self.secondary.as_ref().unwrap_or(&self.primary),
            ModelChoice::RandomForest => &self.primary,
        }
    }

    /// Model choice actually used for a request
    pub fn effective_choice(&self, choice: ModelChoice) -> ModelChoice {
        match choice {
            ModelChoice::BoostedTrees if self.secondary.is_some() => ModelChoice::BoostedTrees,
            _ => ModelChoice::RandomForest,
        }
    }

    /// Apply the min-max then standard scaling
    pub fn scale(&self, features: &FeatureVector) -> [f64; N_FEATURES] {
        self.scaler.transform(&features.to_array())
    }

    pub fn clusters(&self) -> &KMeans {
        &self.clusters
    }

    pub fn reference(&self) -> &ReferenceDataset {
        &self.reference
    }

    pub fn reference_clusters(&self) -> &[usize] {
        &self.reference_clusters
    }
}
