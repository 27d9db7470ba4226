// [apps/control-plane/src/routes.rs]
//! HTTP surface (`spec.md` §6). Everything under `/api/v1` requires a
//! bearer token and a healthy database connection except the payment
//! gateway webhook, which authenticates itself via shared secret instead.

use crate::handlers::{admin, catalog, instances, subscriptions, wallet, webhook};
use crate::middleware::{auth_guard, health_guard};
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let catalog_routes = Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{category_id}/services", get(catalog::list_services))
        .route("/services/{service_id}", get(catalog::get_service))
        .route("/plans/{plan_id}", get(catalog::get_plan));

    let subscription_routes = Router::new()
        .route("/", post(subscriptions::create))
        .route("/{subscription_id}", get(subscriptions::get))
        .route("/{subscription_id}/upgrade", post(subscriptions::upgrade))
        .route("/{subscription_id}/cancel", post(subscriptions::cancel))
        .route("/{subscription_id}/retry", post(subscriptions::retry_provisioning))
        .route("/{subscription_id}/auto-renew", patch(subscriptions::set_auto_renew))
        .route("/{subscription_id}/stop", post(subscriptions::stop))
        .route("/{subscription_id}/start", post(subscriptions::start))
        .route("/{subscription_id}/restart", post(subscriptions::restart))
        .route("/{subscription_id}/billing", get(subscriptions::billing_info));

    let instance_routes = Router::new()
        .route("/{instance_id}", get(instances::get))
        .route("/{instance_id}/restart", post(instances::restart))
        .route("/{instance_id}/stop", post(instances::stop))
        .route("/{instance_id}/start", post(instances::start))
        .route("/{instance_id}/logs", get(instances::logs));

    let wallet_routes = Router::new()
        .route("/info", get(wallet::info))
        .route("/transactions", get(wallet::transactions))
        .route("/topup", post(wallet::topup))
        .route("/statistics", get(wallet::statistics))
        .route("/check-credit", post(wallet::check_credit_handler));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{user_id}", get(admin::get_user))
        .route("/users/{user_id}/active", patch(admin::set_user_active))
        .route("/users/{user_id}/wallet", get(admin::get_wallet))
        .route("/users/{user_id}/subscriptions", get(admin::list_subscriptions_for_user))
        .route("/credit", post(admin::adjust_credit))
        .route("/quota/{plan_id}", patch(admin::adjust_quota))
        .route("/subscriptions/{subscription_id}/force-cancel", post(admin::force_cancel_subscription))
        .route("/subscriptions/{subscription_id}/force-expire", post(admin::force_expire_subscription));

    let authenticated = Router::new()
        .nest("/catalog", catalog_routes)
        .nest("/subscriptions", subscription_routes)
        .nest("/instances", instance_routes)
        .nest("/wallet", wallet_routes)
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn(auth_guard));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api/v1",
            Router::new()
                .merge(authenticated)
                .route("/wallet/webhook/midtrans", post(webhook::midtrans))
                .layer(middleware::from_fn_with_state(state.clone(), health_guard)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
