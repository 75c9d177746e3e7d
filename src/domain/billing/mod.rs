//! Billing domain: plans, referral discounts, purchase orders, payment
//! callback signatures, purchase history, and membership state.

mod errors;
mod membership;
mod order;
mod plan;
mod purchase;
mod referral;
mod signature;

pub use errors::BillingError;
pub use membership::MembershipActivation;
pub use order::{CallbackStatus, NewOrder, Order, OrderStatus};
pub use plan::PlanType;
pub use purchase::PurchaseRecord;
pub use referral::{
    resolve_referral, resolve_referral_now, ReferralCode, ReferralRejection, ReferralVerdict,
};
pub use signature::CallbackSigner;
