//! Market Trends
//!
//! Simulated price outlook per crop, keyed by display name (not label).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Stable,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketTrend {
    #[serde(skip)]
    pub crop: &'static str,
    pub trend: TrendDirection,
    pub forecast: &'static str,
    pub demand: Demand,
}

static TRENDS: &[MarketTrend] = &[
    MarketTrend {
        crop: "Rice",
        trend: TrendDirection::Rising,
        forecast: "Prices expected to rise 5-8% on strong export demand",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Wheat",
        trend: TrendDirection::Falling,
        forecast: "Slight dip of 3-4% after record procurement",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Maize",
        trend: TrendDirection::Rising,
        forecast: "Feed and ethanol demand pushing prices up 6-9%",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Cotton",
        trend: TrendDirection::Rising,
        forecast: "Textile recovery supports 4-6% gains",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Chickpea",
        trend: TrendDirection::Stable,
        forecast: "Steady prices with adequate buffer stocks",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Mung Bean",
        trend: TrendDirection::Rising,
        forecast: "Lower acreage keeps prices firm",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Lentil",
        trend: TrendDirection::Stable,
        forecast: "Imports cap upside; prices flat",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Jute",
        trend: TrendDirection::Stable,
        forecast: "Packaging mandates keep demand steady",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Coffee",
        trend: TrendDirection::Rising,
        forecast: "Global supply shortfall lifting prices 10%+",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Banana",
        trend: TrendDirection::Stable,
        forecast: "Year-round supply keeps prices stable",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Mango",
        trend: TrendDirection::Rising,
        forecast: "Export season demand up 5-7%",
        demand: Demand::High,
    },
    MarketTrend {
        crop: "Coconut",
        trend: TrendDirection::Falling,
        forecast: "Copra glut pushing prices down 2-3%",
        demand: Demand::Medium,
    },
    MarketTrend {
        crop: "Papaya",
        trend: TrendDirection::Stable,
        forecast: "Local demand steady",
        demand: Demand::Low,
    },
];

/// Trend for a display name; `None` when no data exists
pub fn lookup_trend(display_name: &str) -> Option<&'static MarketTrend> {
    let trend = TRENDS.iter().find(|t| t.crop == display_name);
    if trend.is_none() {
        tracing::debug!("No market trend for '{}'", display_name);
    }
    trend
}
