//! Referral code table and discount resolution.
//!
//! The table is static and read-only at request time. A code applies only if
//! it is active, not expired, and accepts the requested plan. Resolution is a
//! pure function of its inputs and the calendar date.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use super::plan::PlanType;

/// A referral code entry in the static table.
#[derive(Debug, Clone)]
pub struct ReferralCode {
    /// Code string, matched case-sensitively.
    pub code: &'static str,
    /// Discount in whole percent, 0..=100.
    pub discount_percent: u8,
    /// Expiry date in day-month-year form, e.g. "28-04-2026".
    pub expiry_date: &'static str,
    /// Inactive codes never match.
    pub is_active: bool,
    /// Plans this code may be applied to.
    pub accepted_plans: &'static [PlanType],
}

/// The fixed referral table.
pub static REFERRAL_CODES: Lazy<Vec<ReferralCode>> = Lazy::new(|| {
    vec![
        ReferralCode {
            code: "OFF75",
            discount_percent: 75,
            expiry_date: "28-04-2026",
            is_active: true,
            accepted_plans: &[PlanType::Premium, PlanType::Basic],
        },
        ReferralCode {
            code: "OFF99",
            discount_percent: 99,
            expiry_date: "28-04-2026",
            is_active: true,
            accepted_plans: &[PlanType::Premium, PlanType::Basic],
        },
    ]
});

/// Why a referral code did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralRejection {
    /// Not in the table, or present but inactive. The two are merged so
    /// callers cannot probe which codes exist.
    UnknownOrInactive,
    /// Today is strictly after the expiry date.
    Expired,
    /// The requested plan is not in the code's accepted set.
    PlanNotAccepted,
}

impl ReferralRejection {
    /// Human-readable reason, used verbatim in API responses.
    pub fn message(&self) -> &'static str {
        match self {
            ReferralRejection::UnknownOrInactive => "Invalid referral code",
            ReferralRejection::Expired => "Referral code has expired",
            ReferralRejection::PlanNotAccepted => {
                "This referral code is not valid for the selected plan"
            }
        }
    }
}

/// Outcome of resolving a referral code against a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralVerdict {
    Accepted {
        discount_percent: u8,
        /// Discounted price in minor units, rounded half-up.
        amount_to_pay: i64,
    },
    Rejected(ReferralRejection),
}

impl ReferralVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ReferralVerdict::Accepted { .. })
    }
}

/// Resolves `code` for `plan_type` as of `today` (local calendar date,
/// day granularity).
pub fn resolve_referral(code: &str, plan_type: PlanType, today: NaiveDate) -> ReferralVerdict {
    let referral = match REFERRAL_CODES
        .iter()
        .find(|r| r.code == code && r.is_active)
    {
        Some(r) => r,
        None => return ReferralVerdict::Rejected(ReferralRejection::UnknownOrInactive),
    };

    // A table entry with an unparseable date is unusable, same as unknown.
    let expiry = match parse_expiry(referral.expiry_date) {
        Some(d) => d,
        None => return ReferralVerdict::Rejected(ReferralRejection::UnknownOrInactive),
    };

    if today > expiry {
        return ReferralVerdict::Rejected(ReferralRejection::Expired);
    }

    if !referral.accepted_plans.contains(&plan_type) {
        return ReferralVerdict::Rejected(ReferralRejection::PlanNotAccepted);
    }

    ReferralVerdict::Accepted {
        discount_percent: referral.discount_percent,
        amount_to_pay: discounted_amount(plan_type.base_price(), referral.discount_percent),
    }
}

/// Resolves against today's local calendar date.
pub fn resolve_referral_now(code: &str, plan_type: PlanType) -> ReferralVerdict {
    resolve_referral(code, plan_type, chrono::Local::now().date_naive())
}

/// Payable amount after discount, in minor units, rounded half-up.
fn discounted_amount(base: i64, discount_percent: u8) -> i64 {
    let remainder_pct = i64::from(100 - discount_percent.min(100));
    (base * remainder_pct + 50) / 100
}

fn parse_expiry(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
}
