//! Cluster Assignment
//!
//! K-means centroids fitted on scaled training rows. Assignment is the
//! nearest centroid by squared Euclidean distance; ties go to the lower id.

use serde::Deserialize;
use std::path::Path;

use crate::error::ArtifactLoadError;
use crate::features::N_FEATURES;

pub trait ClusterModel: Send + Sync {
    fn assign(&self, x: &[f64; N_FEATURES]) -> usize;
}

#[derive(Debug, Clone, Deserialize)]
pub struct KMeans {
    pub centers: Vec<Vec<f64>>,
}

impl KMeans {
    pub fn validate(&self, path: &Path) -> Result<(), ArtifactLoadError> {
        if self.centers.is_empty() {
            return Err(ArtifactLoadError::shape(path, "no cluster centers"));
        }
        if let Some((i, c)) = self.centers.iter().enumerate().find(|(_, c)| c.len() != N_FEATURES) {
            return Err(ArtifactLoadError::shape(
                path,
                format!("center {} has {} values, expected {}", i, c.len(), N_FEATURES),
            ));
        }
        Ok(())
    }
}

impl ClusterModel for KMeans {
    fn assign(&self, x: &[f64; N_FEATURES]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (id, center) in self.centers.iter().enumerate() {
            let dist: f64 = center.iter().zip(x).map(|(c, v)| (c - v) * (c - v)).sum();
            if dist < best_dist {
                best = id;
                best_dist = dist;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> KMeans {
        KMeans {
            centers: vec![vec![0.0; N_FEATURES], vec![1.0; N_FEATURES]],
        }
    }

    #[test]
    fn test_nearest_center() {
        let m = model();
        assert_eq!(m.assign(&[0.1; N_FEATURES]), 0);
        assert_eq!(m.assign(&[0.9; N_FEATURES]), 1);
    }

    #[test]
    fn test_tie_goes_to_lower_id() {
        assert_eq!(model().assign(&[0.5; N_FEATURES]), 0);
    }

    #[test]
    fn test_validate() {
        let mut m = model();
        assert!(m.validate(Path::new("kmeans_model.json")).is_ok());
        m.centers.push(vec![0.0; 3]);
        assert!(m.validate(Path::new("kmeans_model.json")).is_err());
        assert!(KMeans { centers: vec![] }.validate(Path::new("k.json")).is_err());
    }
}
