// [apps/control-plane/src/handlers/catalog.rs]
//! Read-only catalog browsing (`spec.md` §6: `/catalog/*`). No auth
//! required beyond the passthrough middleware.

use crate::errors::EngineError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Value>, EngineError> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(json!({ "categories": categories })))
}

pub async fn list_services(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let services = state.catalog.list_services(&category_id).await?;
    Ok(Json(json!({ "services": services })))
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let service = state.catalog.find_service(&service_id).await?;
    let plans = state.catalog.list_plans_for_service(&service_id).await?;
    Ok(Json(json!({ "service": service, "plans": plans })))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<Value>, EngineError> {
    let plan = state.catalog.find_plan(&plan_id).await?;
    Ok(Json(json!({ "plan": plan })))
}
