//! Subscription plan tiers and pricing.
//!
//! Prices are fixed integers in the currency's minor unit and use a single
//! scale everywhere: the amount stored on an order is the amount sent to the
//! payment gateway, with no re-scaling at any call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plan tiers offered by the platform.
///
/// Wire names (`basicPlan`, `premiumPlan`) match what the frontend submits
/// and what referral codes list in their accepted plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    #[serde(rename = "basicPlan")]
    Basic,
    #[serde(rename = "premiumPlan")]
    Premium,
}

impl PlanType {
    /// Base price in minor currency units.
    pub fn base_price(&self) -> i64 {
        match self {
            PlanType::Basic => 1800,
            PlanType::Premium => 5000,
        }
    }

    /// Wire/storage name of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Basic => "basicPlan",
            PlanType::Premium => "premiumPlan",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for unrecognized plan names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlan(pub String);

impl fmt::Display for UnknownPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown plan type: {}", self.0)
    }
}

impl std::error::Error for UnknownPlan {}

impl FromStr for PlanType {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basicPlan" => Ok(PlanType::Basic),
            "premiumPlan" => Ok(PlanType::Premium),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}
