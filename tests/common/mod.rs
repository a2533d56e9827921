// Shared fixtures for integration tests
//
// Writes a small trained bundle (forest, scaler, k-means, reference CSV)
// into a temp directory so the real loading path is exercised.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;

/// Scaled rainfall threshold equivalent to 150 mm
pub const RAIN_150_SCALED: f64 = -0.142857;

pub const REFERENCE_CSV: &str = "\
N,P,K,temperature,humidity,ph,rainfall,label
90,42,43,20.8,82.0,6.5,202.9,rice
85,58,41,21.7,80.3,7.0,226.6,rice
71,54,16,22.6,63.6,5.7,87.7,maize
40,72,77,17.0,16.9,7.4,88.5,chickpea
78,46,42,25.3,82.5,7.2,187.0,jute
60,48,20,26.0,65.0,6.2,95.0,maize
";

pub fn scaler() -> Value {
    json!({
        "minmax": {
            "data_min": [0.0, 5.0, 5.0, 8.0, 14.0, 3.5, 20.0],
            "data_range": [140.0, 140.0, 200.0, 36.0, 86.0, 6.5, 280.0],
            "feature_range": [0.0, 1.0]
        },
        "standard": {
            "mean": [0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5],
            "scale": [0.25, 0.25, 0.25, 0.25, 0.25, 0.25, 0.25]
        }
    })
}

/// Centroids of the wet (rice, jute) and dry (maize, chickpea) rows
pub fn kmeans() -> Value {
    json!({
        "centers": [
            [0.4095, -0.7524, -1.26, -0.3778, 1.1442, 0.0923, 0.65],
            [-0.3714, -0.4857, -1.3467, -0.4593, -0.3953, -0.1949, -0.9943]
        ]
    })
}

fn one_hot(n_classes: usize, class: usize) -> Vec<f64> {
    let mut v = vec![0.0; n_classes];
    v[class] = 1.0;
    v
}

/// Rainfall stump forest; class order follows the CSV: rice, maize, chickpea, jute
pub fn forest(n_classes: usize, dry_class: usize, wet_class: usize) -> Value {
    json!({
        "kind": "random_forest",
        "n_classes": n_classes,
        "trees": [{
            "nodes": [
                { "feature": 6, "threshold": RAIN_150_SCALED, "left": 1, "right": 2 },
                { "value": one_hot(n_classes, dry_class) },
                { "value": one_hot(n_classes, wet_class) }
            ]
        }]
    })
}

/// Boosted trees favouring jute (class 3) on wet input
pub fn boosted() -> Value {
    let zero = json!({ "nodes": [{ "value": [0.0] }] });
    json!({
        "kind": "boosted_trees",
        "n_classes": 4,
        "base_score": 0.0,
        "trees": [
            zero.clone(),
            zero.clone(),
            zero,
            { "nodes": [
                { "feature": 6, "threshold": RAIN_150_SCALED, "left": 1, "right": 2 },
                { "value": [-1.0] },
                { "value": [1.0] }
            ]}
        ]
    })
}

pub fn write_json(dir: &Path, file: &str, value: &Value) {
    std::fs::write(dir.join(file), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Full bundle: dry -> maize, wet -> rice
pub fn write_bundle(dir: &Path) {
    write_json(dir, "rf_model.json", &forest(4, 1, 0));
    write_json(dir, "scaler.json", &scaler());
    write_json(dir, "kmeans_model.json", &kmeans());
    std::fs::write(dir.join("Crop_recommendation.csv"), REFERENCE_CSV).unwrap();
}

pub fn request(n: f64, p: f64, k: f64, temperature: f64, humidity: f64, ph: f64, rainfall: f64) -> Value {
    json!({
        "nitrogen": n, "phosphorus": p, "potassium": k,
        "temperature": temperature, "humidity": humidity, "ph": ph, "rainfall": rainfall
    })
}
