//! ReconcilePaymentHandler - verifies a payment completion callback and
//! promotes the order to its terminal state exactly once.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::billing::{
    BillingError, CallbackSigner, CallbackStatus, MembershipActivation, Order, PurchaseRecord,
};
use crate::domain::foundation::{OrderId, UserId};
use crate::ports::{OrderRepository, ProfileStore, PurchaseLedger};

/// Command carrying a gateway payment callback.
#[derive(Debug, Clone)]
pub struct ReconcilePaymentCommand {
    pub caller: UserId,
    pub external_order_id: String,
    pub payment_id: Option<String>,
    /// Requested status as submitted; only terminal values are accepted.
    pub status: String,
    pub signature: Option<String>,
}

/// Outcome of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Order completed; purchase recorded and membership activated.
    Completed { order_id: OrderId },
    /// Order marked failed; no further side effects.
    Failed { order_id: OrderId },
    /// Replay of a callback already applied; side effects re-asserted
    /// idempotently, nothing new written.
    AlreadyProcessed { order_id: OrderId },
}

/// Handler for payment completion callbacks.
///
/// Gateways may deliver the same completion more than once, and two
/// deliveries can race. The terminal transition is a compare-and-swap on
/// `pending`, the purchase record is keyed by order id, and the membership
/// upsert snapshots order fields, so any number of identical callbacks is
/// equivalent to one.
pub struct ReconcilePaymentHandler {
    orders: Arc<dyn OrderRepository>,
    purchases: Arc<dyn PurchaseLedger>,
    profiles: Arc<dyn ProfileStore>,
    signer: Arc<CallbackSigner>,
}

impl ReconcilePaymentHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        purchases: Arc<dyn PurchaseLedger>,
        profiles: Arc<dyn ProfileStore>,
        signer: Arc<CallbackSigner>,
    ) -> Self {
        Self {
            orders,
            purchases,
            profiles,
            signer,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcilePaymentCommand,
    ) -> Result<ReconcileOutcome, BillingError> {
        let status: CallbackStatus = cmd.status.parse().map_err(|_| {
            BillingError::validation("Status must be 'completed' or 'failed'")
        })?;

        // Scoping the lookup to the caller merges "does not exist" and
        // "not yours" into one answer.
        let order = self
            .orders
            .find_by_external_id_for_user(&cmd.external_order_id, &cmd.caller)
            .await?
            .ok_or(BillingError::NotFoundOrUnauthorized)?;

        if status == CallbackStatus::Completed {
            let payment_id = cmd
                .payment_id
                .as_deref()
                .ok_or_else(|| BillingError::validation("paymentId is required for completion"))?;
            let signature = cmd
                .signature
                .as_deref()
                .ok_or_else(|| BillingError::validation("signature is required for completion"))?;

            if !self
                .signer
                .verify(&cmd.external_order_id, payment_id, signature)
            {
                tracing::warn!(
                    external_order_id = %cmd.external_order_id,
                    "payment callback signature mismatch"
                );
                return Err(BillingError::InvalidSignature);
            }
        }

        let now = Utc::now();
        let transitioned = self
            .orders
            .transition_if_pending(
                &order.id,
                status.as_order_status(),
                cmd.payment_id.as_deref(),
                cmd.signature.as_deref(),
                now,
            )
            .await?;

        if !transitioned {
            // Someone got there first. A replay of the same outcome is
            // idempotent; a different outcome is a conflict.
            let current = self
                .orders
                .find_by_external_id_for_user(&cmd.external_order_id, &cmd.caller)
                .await?
                .ok_or(BillingError::NotFoundOrUnauthorized)?;

            let same_outcome = current.status == status.as_order_status()
                && current.payment_id.as_deref() == cmd.payment_id.as_deref();
            if !same_outcome {
                tracing::warn!(
                    external_order_id = %cmd.external_order_id,
                    current_status = %current.status,
                    requested = %status.as_order_status(),
                    "conflicting duplicate payment callback"
                );
                return Err(BillingError::AlreadyFinalized);
            }

            if status == CallbackStatus::Completed {
                // Re-assert the completion side effects; both writes are
                // idempotent, so a crash between the original transition
                // and these writes heals on replay.
                self.apply_completion_effects(&order, &cmd, now).await?;
            }
            return Ok(ReconcileOutcome::AlreadyProcessed { order_id: order.id });
        }

        match status {
            CallbackStatus::Completed => {
                self.apply_completion_effects(&order, &cmd, now).await?;
                tracing::info!(
                    order_id = %order.id,
                    external_order_id = %cmd.external_order_id,
                    "order completed and membership activated"
                );
                Ok(ReconcileOutcome::Completed { order_id: order.id })
            }
            CallbackStatus::Failed => {
                tracing::info!(
                    order_id = %order.id,
                    external_order_id = %cmd.external_order_id,
                    "order marked failed"
                );
                Ok(ReconcileOutcome::Failed { order_id: order.id })
            }
        }
    }

    /// Purchase history append and membership activation, both keyed so
    /// repetition is a no-op. Values come from the order as created, never
    /// re-derived from the current price table.
    async fn apply_completion_effects(
        &self,
        order: &Order,
        cmd: &ReconcilePaymentCommand,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), BillingError> {
        let payment_id = cmd
            .payment_id
            .as_deref()
            .ok_or_else(|| BillingError::validation("paymentId is required for completion"))?;

        let record = PurchaseRecord {
            order_id: order.id,
            user_id: order.user_id.clone(),
            external_order_id: cmd.external_order_id.clone(),
            payment_id: payment_id.to_string(),
            plan_type: order.plan_type,
            amount: order.amount,
            currency: order.currency.clone(),
            payment_date: now,
            created_at: now,
        };
        let appended = self.purchases.append_once(&record).await?;
        if !appended {
            tracing::debug!(order_id = %order.id, "purchase record already present");
        }

        self.profiles
            .activate_membership(&MembershipActivation {
                user_id: order.user_id.clone(),
                plan_type: order.plan_type,
                amount_paid: order.amount,
                currency: order.currency.clone(),
                subscription_start: now,
                last_payment: now,
            })
            .await?;

        Ok(())
    }
}
