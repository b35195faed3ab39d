// SPDX-License-Identifier: BUSL-1.1
//! # Post-Commit Notification Dispatch
//!
//! Order confirmations (email, analytics) are dispatched *after* the
//! transactional write commits and the response is on its way back.
//! Dispatch is fire-and-forget: the task logs its own failures and can
//! never change the already-returned success response or re-trigger order
//! creation.
//!
//! The transactional email and analytics providers are external services;
//! this module is the seam where their clients plug in. The default
//! dispatcher records the confirmation as a structured tracing event,
//! which doubles as the audit trail in in-memory deployments.

use bazaar_checkout::OrderConfirmation;

/// Dispatch confirmations for one committed placement.
///
/// Spawned onto the runtime; callers do not await delivery.
pub fn dispatch(confirmations: Vec<OrderConfirmation>) {
    if confirmations.is_empty() {
        return;
    }
    tokio::spawn(async move {
        for confirmation in confirmations {
            if let Err(err) = deliver(&confirmation).await {
                // Logged and dropped: a failed email must never roll back
                // a committed order.
                tracing::error!(
                    order = %confirmation.order_id,
                    error = %err,
                    "order confirmation delivery failed"
                );
            }
        }
    });
}

/// Deliver one confirmation to the configured channels.
async fn deliver(confirmation: &OrderConfirmation) -> Result<(), DeliveryError> {
    tracing::info!(
        order = %confirmation.order_id,
        customer = %confirmation.customer_id,
        store = %confirmation.store_id,
        total = %confirmation.total,
        lines = confirmation.line_count,
        "order confirmation dispatched"
    );
    Ok(())
}

/// Failure to hand a confirmation to a delivery channel.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The downstream provider rejected or timed out on the event.
    #[error("provider error: {0}")]
    Provider(String),
}
