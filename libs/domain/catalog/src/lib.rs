// [libs/domain/catalog/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CATALOG & QUOTA CONTROLLER (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: REGLAS DE CUOTA Y COMPATIBILIDAD DE PLANES
 *
 * Pure rules over `ServicePlan`/`Subscription` shapes (C3). The actual
 * quota counters live in `gridkeep-infra-db`, guarded by a transaction;
 * this crate only decides whether a move is legal, never mutates state.
 * =================================================================
 */

use gridkeep_domain_models::{PlanType, ServicePlan};

/// Direction of a plan change, decided purely from the `PlanType` ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanChange {
    Upgrade,
    Downgrade,
    Lateral,
}

pub fn classify_plan_change(from: &ServicePlan, to: &ServicePlan) -> PlanChange {
    match to.plan_type.cmp(&from.plan_type) {
        std::cmp::Ordering::Greater => PlanChange::Upgrade,
        std::cmp::Ordering::Less => PlanChange::Downgrade,
        std::cmp::Ordering::Equal => PlanChange::Lateral,
    }
}

/// The user path only ever calls `upgrade`; downgrades require the admin
/// `allow_downgrade` flag (`spec.md` §9 open question, resolved in
/// `SPEC_FULL.md` §A.2).
pub fn is_change_allowed(from: &ServicePlan, to: &ServicePlan, allow_downgrade: bool) -> bool {
    match classify_plan_change(from, to) {
        PlanChange::Upgrade | PlanChange::Lateral => true,
        PlanChange::Downgrade => allow_downgrade,
    }
}

pub fn plan_has_quota_for(plan: &ServicePlan, requested_units: i64) -> bool {
    plan.has_capacity(requested_units)
}

/// Invariant: a user may not hold more than `max_instances_per_user` live
/// instances against a single plan. `existing_instance_count` is the count
/// read inside the same transaction that will insert the new instance.
pub fn within_instance_limit(plan: &ServicePlan, existing_instance_count: i64) -> bool {
    existing_instance_count < plan.max_instances_per_user as i64
}

pub const PLAN_ORDER: [PlanType; 5] = [
    PlanType::Free,
    PlanType::Basic,
    PlanType::Pro,
    PlanType::Premium,
    PlanType::Enterprise,
];
