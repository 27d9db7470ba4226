// [libs/domain/models-rs/src/coupon.rs]
//! Promotional credit codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CouponKind {
    FixedCredit,
    PercentOff,
}

#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub kind: CouponKind,
    pub value: i64,
    pub max_redemptions: Option<i32>,
    pub redemption_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl Coupon {
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if let Some(expires_at) = self.expires_at {
            if now >= expires_at {
                return false;
            }
        }
        match self.max_redemptions {
            Some(max) => self.redemption_count < max,
            None => true,
        }
    }
}

/// Records that a given user consumed a coupon exactly once; the
/// `(coupon_id, user_id)` pair is unique at the persistence layer.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponRedemption {
    pub id: String,
    pub coupon_id: String,
    pub user_id: String,
    pub transaction_id: String,
    pub redeemed_at: DateTime<Utc>,
}
