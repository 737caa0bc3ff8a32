use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating a food against a set of health conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub advice: String,
    /// Always within `0..=100`.
    pub risk_score: u32,
    /// One entry per fired rule, in evaluation order.
    pub flags: Vec<String>,
}

impl AdviceResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=30 => RiskLevel::Low,
            31..=70 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Display form shown by clients.
    pub fn badge(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢 Low Risk",
            RiskLevel::Medium => "🟡 Medium Risk",
            RiskLevel::High => "🔴 High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
