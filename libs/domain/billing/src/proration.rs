// [libs/domain/billing/src/proration.rs]
//! Upgrade proration: the user pays only for the unused remainder of the
//! current billing cycle at the price delta between the two plans.

use chrono::{DateTime, Utc};

pub struct ProrationInput {
    pub current_price: i64,
    pub new_price: i64,
    pub cycle_started_at: DateTime<Utc>,
    pub next_billing_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Returns the integer minor-unit amount to charge immediately for an
/// upgrade taking effect now. Never negative: downgrades are not prorated
/// here, they take effect at the next renewal (see `spec.md` §4.7).
pub fn prorated_upgrade_cost(input: &ProrationInput) -> i64 {
    let cycle_length = (input.next_billing_at - input.cycle_started_at).num_seconds();
    if cycle_length <= 0 {
        return (input.new_price - input.current_price).max(0);
    }

    let remaining = (input.next_billing_at - input.now).num_seconds().max(0);
    let price_delta = (input.new_price - input.current_price).max(0);

    let prorated = (price_delta as i128 * remaining as i128) / cycle_length as i128;
    prorated.clamp(0, i64::MAX as i128) as i64
}
