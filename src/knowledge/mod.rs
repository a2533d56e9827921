//! Crop Knowledge Base
//!
//! Static, read-only reference tables shared by every request:
//! - `crops.rs` - descriptive record per crop label
//! - `market.rs` - simulated market trend per display name

pub mod crops;
pub mod market;

pub use crops::{lookup, title_case, CropInfo, CropRecord, WaterNeed};
pub use market::{lookup_trend, Demand, MarketTrend, TrendDirection};
