// [apps/control-plane/src/services/coupon_resolver.rs]
//! Coupon resolver (`spec.md` §4.9, peripheral). This schema's `Coupon`
//! only distinguishes `FixedCredit` / `PercentOff`, so the wider
//! `SUBSCRIPTION_DISCOUNT` / `FREE_SERVICE` / `CREDIT_TOPUP` taxonomy from
//! `spec.md` collapses onto it: a discount coupon reduces a charge amount,
//! a credit coupon tops up the wallet directly.

use crate::errors::EngineError;
use crate::state::AppState;
use gridkeep_domain_models::{Coupon, CouponKind, CouponRedemption};
use tracing::instrument;

/// Looks up a coupon by code and confirms it is currently redeemable.
/// Does not mutate state or check per-user usage beyond the
/// `UNIQUE(coupon_id, user_id)` constraint enforced at redemption time.
#[instrument(skip(state))]
pub async fn validate(state: &AppState, code: &str) -> Result<Coupon, EngineError> {
    let coupon = state.coupons.find_by_code(code).await?;
    if !coupon.is_redeemable(chrono::Utc::now()) {
        return Err(EngineError::CouponNotRedeemable);
    }
    Ok(coupon)
}

/// Reduces a subscription charge by the coupon's discount, never below
/// zero. `PercentOff` treats `value` as whole percentage points.
pub fn discounted_charge(coupon: &Coupon, charge_amount: i64) -> i64 {
    let discount = match coupon.kind {
        CouponKind::FixedCredit => coupon.value,
        CouponKind::PercentOff => (charge_amount as i128 * coupon.value as i128 / 100) as i64,
    };
    (charge_amount - discount).max(0)
}

/// Redeems a `FixedCredit` coupon directly into the user's wallet (the
/// `CREDIT_TOPUP` / `WELCOME_BONUS` flows from `spec.md` §4.9).
#[instrument(skip(state))]
pub async fn redeem_for_topup(state: &AppState, code: &str, user_id: &str) -> Result<CouponRedemption, EngineError> {
    let coupon = validate(state, code).await?;
    if coupon.kind != CouponKind::FixedCredit {
        return Err(EngineError::BadRequest("coupon is not a credit top-up coupon".into()));
    }
    state
        .coupons
        .redeem(&coupon.id, user_id, coupon.value)
        .await
        .map_err(Into::into)
}

/// Records redemption of a discount coupon against a subscription
/// purchase, without crediting the wallet again (the discount was already
/// netted out of the charge by `discounted_charge`).
#[instrument(skip(state))]
pub async fn record_subscription_discount(state: &AppState, code: &str, user_id: &str) -> Result<CouponRedemption, EngineError> {
    let coupon = validate(state, code).await?;
    state.coupons.redeem(&coupon.id, user_id, 0).await.map_err(Into::into)
}
