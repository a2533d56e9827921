//! Reference Dataset
//!
//! Historical (measurements -> crop label) rows the models were trained on.
//! Loaded once with Polars from the standard crop-recommendation CSV
//! (`N,P,K,temperature,humidity,ph,rainfall,label`).
//!
//! The distinct labels, in first-seen row order, define the class index
//! space the classifier predicts into.

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashSet;
use std::path::Path;

use crate::error::ArtifactLoadError;
use crate::features::{Feature, N_FEATURES};

const LABEL_COLUMN: &str = "label";

#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    rows: Vec<[f64; N_FEATURES]>,
    labels: Vec<String>,
    classes: Vec<String>,
}

impl ReferenceDataset {
    /// Build from in-memory rows; `rows` and `labels` must be the same length
    pub fn from_rows(rows: Vec<[f64; N_FEATURES]>, labels: Vec<String>) -> Self {
        debug_assert_eq!(rows.len(), labels.len());
        let classes = distinct_in_order(&labels);
        Self { rows, labels, classes }
    }

    /// Load the reference CSV
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        Self::read_csv(path).map_err(|e| ArtifactLoadError::Dataset {
            path: path.to_path_buf(),
            message: format!("{:#}", e),
        })
    }

    fn read_csv(path: &Path) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .context("Failed to create CSV reader")?
            .finish()
            .context("Failed to parse CSV")?;

        if df.height() == 0 {
            return Err(anyhow!("dataset has no rows"));
        }

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(N_FEATURES);
        for feature in Feature::ALL {
            columns.push(numeric_column(&df, feature.dataset_column())?);
        }

        let rows = (0..df.height())
            .map(|r| {
                let mut row = [0.0; N_FEATURES];
                for (c, values) in columns.iter().enumerate() {
                    row[c] = values[r];
                }
                row
            })
            .collect();

        let labels = df
            .column(LABEL_COLUMN)
            .with_context(|| format!("Missing column '{}'", LABEL_COLUMN))?
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|v| {
                v.map(|s| s.trim().to_string())
                    .ok_or_else(|| anyhow!("Null value in column '{}'", LABEL_COLUMN))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_rows(rows, labels))
    }

    pub fn rows(&self) -> &[[f64; N_FEATURES]] {
        &self.rows
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct labels in first-seen order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    df.column(name)
        .with_context(|| format!("Missing column '{}'", name))?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|v| v.ok_or_else(|| anyhow!("Null or non-numeric value in column '{}'", name)))
        .collect()
}

/// Deduplicate while keeping first occurrence order
pub(crate) fn distinct_in_order<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_classes_keep_first_seen_order() {
        let ds = ReferenceDataset::from_rows(
            vec![[0.0; N_FEATURES]; 4],
            vec!["rice".into(), "maize".into(), "rice".into(), "chickpea".into()],
        );
        assert_eq!(ds.classes(), &["rice", "maize", "chickpea"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "N,P,K,temperature,humidity,ph,rainfall,label").unwrap();
        writeln!(file, "90,42,43,20.8,82.0,6.5,202.9,rice").unwrap();
        writeln!(file, "71,54,16,22.6,63.6,5.7,87.7,maize").unwrap();
        writeln!(file, "40,72,77,17.0,16.9,7.4,88.5,chickpea").unwrap();

        let ds = ReferenceDataset::load(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows()[1], [71.0, 54.0, 16.0, 22.6, 63.6, 5.7, 87.7]);
        assert_eq!(ds.classes(), &["rice", "maize", "chickpea"]);
    }

    #[test]
    fn test_missing_column_is_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "N,P,K,temperature,humidity,ph,label").unwrap();
        writeln!(file, "90,42,43,20.8,82.0,6.5,rice").unwrap();

        let err = ReferenceDataset::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Dataset { .. }));
        assert!(err.to_string().contains("rainfall"));
    }
}
