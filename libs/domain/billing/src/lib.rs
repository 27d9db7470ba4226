// [libs/domain/billing/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BILLING CORE ENGINE (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: GOBERNANZA FINANCIERA Y PRORRATEO DE PLANES
 *
 * Pure, synchronous math: no I/O, no persistence. Every amount is an
 * integer count of minor currency units, never a float, so proration
 * and balance arithmetic stay exact.
 * =================================================================
 */

use gridkeep_domain_models::{ServicePlan, User};
use typeshare::typeshare;

pub mod proration;

pub use proration::{prorated_upgrade_cost, ProrationInput};

/// Outcome of a balance check ahead of a charge, reused by the wallet
/// repository and the subscription engine so both apply the identical rule.
#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditCheck {
    Sufficient,
    Insufficient { shortfall: i64 },
}

pub fn check_credit(user: &User, amount: i64) -> CreditCheck {
    if user.credit_balance >= amount {
        CreditCheck::Sufficient
    } else {
        CreditCheck::Insufficient {
            shortfall: amount - user.credit_balance,
        }
    }
}

/// A subscription is eligible for the low-credit notification when its
/// owner's balance would not cover the next renewal charge.
pub fn is_low_credit(user: &User, plan: &ServicePlan) -> bool {
    user.credit_balance < plan.price
}
