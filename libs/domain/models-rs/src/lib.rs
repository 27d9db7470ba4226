// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GRIDKEEP DOMAIN MODELS (V1.0)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ENTIDADES COMPARTIDAS DEL CONTROL PLANE
 *
 * Single source of truth for the shapes that cross every component
 * boundary in the control plane: identity, catalog, subscription,
 * instance, and ledger. Kept free of any persistence or network
 * concern so every other crate can depend on it without pulling in
 * libsql or reqwest.
 * =================================================================
 */

pub mod user;
pub mod catalog;
pub mod subscription;
pub mod instance;
pub mod transaction;
pub mod coupon;

pub use catalog::{PlanType, Service, ServiceCategory, ServicePlan};
pub use coupon::{Coupon, CouponKind, CouponRedemption};
pub use instance::{InstanceStatus, ServiceInstance};
pub use subscription::{Subscription, SubscriptionStatus};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use user::{User, UserRole};
