//! Soil Health Evaluation
//!
//! Scores N/P/K and pH against fixed agronomic bands. Each nutrient is
//! checked independently; every out-of-band reading adds one diagnostic
//! message and one remediation action. Band edges are inclusive (a value
//! exactly on the edge is healthy).
//!
//! Status: 0 messages = Good, 1-2 = Fair, more than 2 = Poor.

use serde::Serialize;

/// Healthy band for one soil measurement
#[derive(Debug, Clone, Copy)]
struct Band {
    low: f64,
    high: f64,
    low_message: &'static str,
    low_advice: &'static str,
    high_message: &'static str,
    high_advice: &'static str,
}

const NITROGEN: Band = Band {
    low: 50.0,
    high: 140.0,
    low_message: "Low Nitrogen",
    low_advice: "Add nitrogen-rich fertilizer (urea) or organic matter such as compost or green manure",
    high_message: "High Nitrogen",
    high_advice: "Reduce nitrogen fertilization and grow nitrogen-consuming cover crops",
};

const PHOSPHORUS: Band = Band {
    low: 30.0,
    high: 100.0,
    low_message: "Low Phosphorus",
    low_advice: "Apply phosphate fertilizer (DAP or single super phosphate) or bone meal",
    high_message: "High Phosphorus",
    high_advice: "Avoid phosphate fertilizers and limit manure application",
};

const POTASSIUM: Band = Band {
    low: 30.0,
    high: 100.0,
    low_message: "Low Potassium",
    low_advice: "Apply potash (muriate of potash) or wood ash",
    high_message: "High Potassium",
    high_advice: "Skip potash fertilizers and irrigate to leach excess potassium",
};

const PH: Band = Band {
    low: 5.5,
    high: 7.5,
    low_message: "Acidic soil",
    low_advice: "Add agricultural lime to raise soil pH",
    high_message: "Alkaline soil",
    high_advice: "Add sulfur or organic matter to lower soil pH",
};

/// More than this many findings makes the soil Poor
const FAIR_MAX_MESSAGES: usize = 2;

/// Overall soil verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoilStatus {
    Good,
    Fair,
    Poor,
}

impl SoilStatus {
    fn from_message_count(count: usize) -> Self {
        match count {
            0 => SoilStatus::Good,
            n if n <= FAIR_MAX_MESSAGES => SoilStatus::Fair,
            _ => SoilStatus::Poor,
        }
    }
}

/// Per-request soil diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilHealthVerdict {
    pub status: SoilStatus,
    pub messages: Vec<String>,
    pub improvements: Vec<String>,
}

/// Evaluate soil nutrients and pH
pub fn evaluate(nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64) -> SoilHealthVerdict {
    let mut messages = Vec::new();
    let mut improvements = Vec::new();

    for (value, band) in [
        (nitrogen, &NITROGEN),
        (phosphorus, &PHOSPHORUS),
        (potassium, &POTASSIUM),
        (ph, &PH),
    ] {
        if value < band.low {
            messages.push(band.low_message.to_string());
            improvements.push(band.low_advice.to_string());
        } else if value > band.high {
            messages.push(band.high_message.to_string());
            improvements.push(band.high_advice.to_string());
        }
    }

    SoilHealthVerdict {
        status: SoilStatus::from_message_count(messages.len()),
        messages,
        improvements,
    }
}
