//! Crop Catalogue
//!
//! Descriptive records for the crops the classifier can emit, keyed by the
//! lowercase label used in the reference dataset. Lookups are
//! case-insensitive and never fail: an unlisted label resolves to a minimal
//! record carrying only its title-cased name.

use serde::Serialize;

/// Irrigation demand tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterNeed {
    Low,
    Medium,
    High,
}

/// Static descriptive record for one crop
#[derive(Debug, Clone, Serialize)]
pub struct CropInfo {
    #[serde(skip)]
    pub key: &'static str,
    pub name: &'static str,
    pub season: &'static str,
    pub water_requirement: WaterNeed,
    pub growing_time: &'static str,
    pub tips: &'static str,
    pub soil_type: &'static str,
    pub market_price: &'static str,
    pub diseases: &'static [&'static str],
    pub nutrients: &'static str,
}

// ============================================================================
// EMBEDDED CROP DATA
// ============================================================================

static CROPS: &[CropInfo] = &[
    CropInfo {
        key: "rice",
        name: "Rice",
        season: "Kharif",
        water_requirement: WaterNeed::High,
        growing_time: "120-150 days",
        tips: "Keep fields flooded 5-10 cm during vegetative growth; drain two weeks before harvest",
        soil_type: "Clay or clay loam with good water retention",
        market_price: "₹1,900-2,800 per quintal",
        diseases: &["Blast", "Bacterial leaf blight", "Sheath blight"],
        nutrients: "High nitrogen demand; split urea into three doses",
    },
    CropInfo {
        key: "wheat",
        name: "Wheat",
        season: "Rabi",
        water_requirement: WaterNeed::Medium,
        growing_time: "100-130 days",
        tips: "Irrigate at crown root initiation, tillering, flowering and grain filling",
        soil_type: "Well-drained loam or sandy loam",
        market_price: "₹2,000-2,300 per quintal",
        diseases: &["Rust", "Loose smut", "Karnal bunt"],
        nutrients: "Balanced NPK with extra nitrogen at tillering",
    },
    CropInfo {
        key: "maize",
        name: "Maize",
        season: "Kharif",
        water_requirement: WaterNeed::Medium,
        growing_time: "90-120 days",
        tips: "Avoid waterlogging; critical irrigation at tasseling and silking",
        soil_type: "Deep, well-drained fertile loam",
        market_price: "₹1,800-2,100 per quintal",
        diseases: &["Turcicum leaf blight", "Downy mildew", "Stalk rot"],
        nutrients: "Heavy nitrogen feeder; zinc deficiency common on alkaline soils",
    },
    CropInfo {
        key: "chickpea",
        name: "Chickpea",
        season: "Rabi",
        water_requirement: WaterNeed::Low,
        growing_time: "90-110 days",
        tips: "Sow on residual moisture; one light irrigation at pod filling is enough",
        soil_type: "Sandy loam to clay loam, well drained",
        market_price: "₹4,800-5,500 per quintal",
        diseases: &["Fusarium wilt", "Ascochyta blight", "Dry root rot"],
        nutrients: "Fixes nitrogen; responds to phosphorus and sulfur",
    },
    CropInfo {
        key: "kidneybeans",
        name: "Kidney Beans",
        season: "Rabi",
        water_requirement: WaterNeed::Medium,
        growing_time: "90-120 days",
        tips: "Sensitive to frost and waterlogging; stake climbing varieties",
        soil_type: "Light, well-drained loam",
        market_price: "₹6,000-9,000 per quintal",
        diseases: &["Anthracnose", "Bean common mosaic", "Angular leaf spot"],
        nutrients: "Poor nodulation; needs starter nitrogen",
    },
    CropInfo {
        key: "pigeonpeas",
        name: "Pigeon Peas",
        season: "Kharif",
        water_requirement: WaterNeed::Low,
        growing_time: "150-180 days",
        tips: "Intercrop with sorghum or cotton; tolerates drought once established",
        soil_type: "Deep loam, intolerant of salinity",
        market_price: "₹6,000-7,000 per quintal",
        diseases: &["Fusarium wilt", "Sterility mosaic", "Phytophthora blight"],
        nutrients: "Fixes nitrogen; phosphorus improves pod set",
    },
    CropInfo {
        key: "mothbeans",
        name: "Moth Beans",
        season: "Kharif",
        water_requirement: WaterNeed::Low,
        growing_time: "75-90 days",
        tips: "Suited to arid zones; sow after first monsoon showers",
        soil_type: "Sandy, light soils",
        market_price: "₹5,000-6,500 per quintal",
        diseases: &["Yellow mosaic", "Cercospora leaf spot"],
        nutrients: "Low input crop; small phosphorus dose at sowing",
    },
    CropInfo {
        key: "mungbean",
        name: "Mung Bean",
        season: "Zaid",
        water_requirement: WaterNeed::Low,
        growing_time: "60-75 days",
        tips: "Short duration; fits between rabi harvest and kharif sowing",
        soil_type: "Well-drained loam or sandy loam",
        market_price: "₹7,000-8,500 per quintal",
        diseases: &["Yellow mosaic", "Powdery mildew", "Cercospora leaf spot"],
        nutrients: "Fixes nitrogen; apply phosphorus at sowing",
    },
    CropInfo {
        key: "blackgram",
        name: "Black Gram",
        season: "Kharif",
        water_requirement: WaterNeed::Low,
        growing_time: "70-90 days",
        tips: "Avoid waterlogged fields; harvest when 70% of pods turn black",
        soil_type: "Heavy clay to loam",
        market_price: "₹6,500-8,000 per quintal",
        diseases: &["Yellow mosaic", "Leaf crinkle", "Powdery mildew"],
        nutrients: "Fixes nitrogen; responds to phosphorus and potassium",
    },
    CropInfo {
        key: "lentil",
        name: "Lentil",
        season: "Rabi",
        water_requirement: WaterNeed::Low,
        growing_time: "100-120 days",
        tips: "Grown on residual moisture; avoid irrigation at flowering",
        soil_type: "Loam to clay loam, neutral pH",
        market_price: "₹5,500-6,500 per quintal",
        diseases: &["Rust", "Wilt", "Stemphylium blight"],
        nutrients: "Fixes nitrogen; sulfur and zinc improve yield",
    },
    CropInfo {
        key: "pomegranate",
        name: "Pomegranate",
        season: "Perennial",
        water_requirement: WaterNeed::Low,
        growing_time: "5-7 months from flowering",
        tips: "Regulate flowering by withholding water (bahar treatment)",
        soil_type: "Well-drained loam, tolerates mild salinity",
        market_price: "₹6,000-12,000 per quintal",
        diseases: &["Bacterial blight", "Wilt", "Fruit rot"],
        nutrients: "Potassium improves fruit quality",
    },
    CropInfo {
        key: "banana",
        name: "Banana",
        season: "Perennial",
        water_requirement: WaterNeed::High,
        growing_time: "11-14 months",
        tips: "Desucker regularly and prop bunches against wind",
        soil_type: "Deep, rich loam with good drainage",
        market_price: "₹1,200-2,000 per quintal",
        diseases: &["Panama wilt", "Sigatoka leaf spot", "Bunchy top"],
        nutrients: "Very high potassium demand",
    },
    CropInfo {
        key: "mango",
        name: "Mango",
        season: "Perennial",
        water_requirement: WaterNeed::Medium,
        growing_time: "3-5 months from flowering",
        tips: "Stop irrigation 2-3 months before flowering to induce blossoms",
        soil_type: "Deep, well-drained alluvial or laterite soil",
        market_price: "₹3,000-8,000 per quintal",
        diseases: &["Powdery mildew", "Anthracnose", "Mango malformation"],
        nutrients: "Annual NPK with farmyard manure after harvest",
    },
    CropInfo {
        key: "grapes",
        name: "Grapes",
        season: "Perennial",
        water_requirement: WaterNeed::Medium,
        growing_time: "4-5 months from pruning",
        tips: "Train on trellis; prune twice a year in tropical regions",
        soil_type: "Sandy loam to red loam, well drained",
        market_price: "₹4,000-8,000 per quintal",
        diseases: &["Downy mildew", "Powdery mildew", "Anthracnose"],
        nutrients: "Potassium and magnesium at berry development",
    },
    CropInfo {
        key: "watermelon",
        name: "Watermelon",
        season: "Zaid",
        water_requirement: WaterNeed::Medium,
        growing_time: "80-100 days",
        tips: "Reduce irrigation at ripening to improve sweetness",
        soil_type: "Sandy loam, riverbed soils",
        market_price: "₹800-1,500 per quintal",
        diseases: &["Fusarium wilt", "Anthracnose", "Downy mildew"],
        nutrients: "Moderate nitrogen, higher potassium at fruiting",
    },
    CropInfo {
        key: "muskmelon",
        name: "Muskmelon",
        season: "Zaid",
        water_requirement: WaterNeed::Medium,
        growing_time: "85-100 days",
        tips: "Mulch to keep fruit off wet soil",
        soil_type: "Sandy loam, well drained",
        market_price: "₹1,000-2,000 per quintal",
        diseases: &["Powdery mildew", "Downy mildew", "Fruit fly"],
        nutrients: "Balanced NPK with potassium at fruit set",
    },
    CropInfo {
        key: "apple",
        name: "Apple",
        season: "Perennial",
        water_requirement: WaterNeed::Medium,
        growing_time: "5-6 months from flowering",
        tips: "Needs winter chilling; plant pollinizer varieties nearby",
        soil_type: "Deep, well-drained loam, slightly acidic",
        market_price: "₹5,000-10,000 per quintal",
        diseases: &["Apple scab", "Powdery mildew", "Fire blight"],
        nutrients: "Calcium sprays reduce bitter pit",
    },
    CropInfo {
        key: "orange",
        name: "Orange",
        season: "Perennial",
        water_requirement: WaterNeed::Medium,
        growing_time: "8-10 months from flowering",
        tips: "Avoid water stress at fruit set; basin irrigation around trunk",
        soil_type: "Light loam, well drained",
        market_price: "₹2,500-5,000 per quintal",
        diseases: &["Citrus canker", "Greening", "Gummosis"],
        nutrients: "Zinc and manganese micronutrient sprays",
    },
    CropInfo {
        key: "papaya",
        name: "Papaya",
        season: "Perennial",
        water_requirement: WaterNeed::Medium,
        growing_time: "9-11 months",
        tips: "Plant on raised beds; keep one male plant per ten females",
        soil_type: "Light, well-drained loam",
        market_price: "₹1,000-2,500 per quintal",
        diseases: &["Papaya ring spot virus", "Damping off", "Powdery mildew"],
        nutrients: "Frequent small doses of NPK every two months",
    },
    CropInfo {
        key: "coconut",
        name: "Coconut",
        season: "Perennial",
        water_requirement: WaterNeed::High,
        growing_time: "12 months from flowering",
        tips: "Mulch basins with husks to conserve moisture",
        soil_type: "Sandy loam, coastal alluvium",
        market_price: "₹2,500-3,500 per quintal (copra)",
        diseases: &["Bud rot", "Root wilt", "Leaf blight"],
        nutrients: "High potassium and chloride demand",
    },
    CropInfo {
        key: "cotton",
        name: "Cotton",
        season: "Kharif",
        water_requirement: WaterNeed::High,
        growing_time: "180-200 days",
        tips: "Monitor for bollworm weekly; avoid excess nitrogen late in season",
        soil_type: "Black cotton soil (deep clay)",
        market_price: "₹6,000-7,000 per quintal",
        diseases: &["Bacterial blight", "Root rot", "Leaf curl virus"],
        nutrients: "Nitrogen in splits; boron at flowering",
    },
    CropInfo {
        key: "jute",
        name: "Jute",
        season: "Kharif",
        water_requirement: WaterNeed::High,
        growing_time: "120-150 days",
        tips: "Ret stems in slow-moving clean water for quality fibre",
        soil_type: "Alluvial loam in flood plains",
        market_price: "₹4,500-5,500 per quintal",
        diseases: &["Stem rot", "Anthracnose", "Root rot"],
        nutrients: "Nitrogen boosts fibre yield",
    },
    CropInfo {
        key: "coffee",
        name: "Coffee",
        season: "Perennial",
        water_requirement: WaterNeed::High,
        growing_time: "8-9 months from flowering",
        tips: "Grow under shade trees; blossom showers trigger flowering",
        soil_type: "Deep, rich forest loam, slightly acidic",
        market_price: "₹15,000-30,000 per quintal",
        diseases: &["Leaf rust", "Berry borer", "Black rot"],
        nutrients: "Regular NPK with lime on acidic soils",
    },
];

/// Resolved crop description
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CropRecord {
    /// Full catalogue entry
    Known(&'static CropInfo),
    /// Label with no catalogue entry; carries only a display name
    Unlisted { name: String },
}

impl CropRecord {
    /// Display name used for market-trend lookup and responses
    pub fn name(&self) -> &str {
        match self {
            CropRecord::Known(info) => info.name,
            CropRecord::Unlisted { name } => name,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CropRecord::Known(_))
    }
}

/// Case-insensitive catalogue lookup
pub fn lookup(label: &str) -> CropRecord {
    let key = label.trim();
    match CROPS.iter().find(|c| c.key.eq_ignore_ascii_case(key)) {
        Some(info) => CropRecord::Known(info),
        None => {
            tracing::debug!("No catalogue entry for crop label '{}'", label);
            CropRecord::Unlisted {
                name: title_case(key),
            }
        }
    }
}

/// Upper-case the first letter of each word, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
