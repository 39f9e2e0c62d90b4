//! AQI severity tiers
//!
//! Five fixed buckets with inclusive upper bounds: a score sitting exactly
//! on a breakpoint belongs to the lower tier.

use serde::Serialize;

use crate::prediction::PredictionResult;

/// Severity bucket derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// (−∞, 50]
    Good,
    /// (50, 100]
    Satisfactory,
    /// (100, 200]
    Moderate,
    /// (200, 300]
    Poor,
    /// (300, ∞)
    Severe,
}

/// Visual tokens applied to the result card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub accent: &'static str,
    pub border_class: &'static str,
    pub badge_class: &'static str,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Good,
        Tier::Satisfactory,
        Tier::Moderate,
        Tier::Poor,
        Tier::Severe,
    ];

    /// Map a score to its tier. NaN falls through to `Good`.
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi > 50.0 && aqi <= 100.0 {
            Tier::Satisfactory
        } else if aqi > 100.0 && aqi <= 200.0 {
            Tier::Moderate
        } else if aqi > 200.0 && aqi <= 300.0 {
            Tier::Poor
        } else if aqi > 300.0 {
            Tier::Severe
        } else {
            Tier::Good
        }
    }

    /// 1-based position, lowest severity first
    pub fn level(&self) -> u8 {
        match self {
            Tier::Good => 1,
            Tier::Satisfactory => 2,
            Tier::Moderate => 3,
            Tier::Poor => 4,
            Tier::Severe => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Good => "Good",
            Tier::Satisfactory => "Satisfactory",
            Tier::Moderate => "Moderate",
            Tier::Poor => "Poor",
            Tier::Severe => "Severe",
        }
    }

    pub fn style(&self) -> TierStyle {
        match self {
            Tier::Good => TierStyle {
                accent: "#39ff14",
                border_class: "border-green-500",
                badge_class: "bg-green-500/20 text-green-400",
            },
            Tier::Satisfactory => TierStyle {
                accent: "#facc15",
                border_class: "border-yellow-400",
                badge_class: "bg-yellow-400/20 text-yellow-400",
            },
            Tier::Moderate => TierStyle {
                accent: "#fb923c",
                border_class: "border-orange-400",
                badge_class: "bg-orange-400/20 text-orange-400",
            },
            Tier::Poor => TierStyle {
                accent: "#ef4444",
                border_class: "border-red-500",
                badge_class: "bg-red-500/20 text-red-400",
            },
            Tier::Severe => TierStyle {
                accent: "#7c3aed",
                border_class: "border-purple-600",
                badge_class: "bg-purple-600/20 text-purple-400",
            },
        }
    }
}

/// Everything the result card needs to render one prediction
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub aqi: f64,
    pub category: String,
    pub health_advice: String,
    pub tier: Tier,
}

impl ResultView {
    pub fn new(result: &PredictionResult) -> Self {
        Self {
            aqi: result.aqi,
            category: result.category.clone(),
            health_advice: result.health_advice.clone(),
            tier: Tier::from_aqi(result.aqi),
        }
    }

    pub fn style(&self) -> TierStyle {
        self.tier.style()
    }

    /// Score formatted without a trailing `.0` for whole numbers
    pub fn score_text(&self) -> String {
        format_score(self.aqi)
    }
}

/// Format a score the way it is displayed: `155`, `42.37`
pub fn format_score(aqi: f64) -> String {
    if aqi.fract() == 0.0 && aqi.is_finite() {
        format!("{:.0}", aqi)
    } else {
        format!("{}", aqi)
    }
}
