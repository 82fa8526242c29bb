use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalog;
use crate::mock_client::MockApiClient;
use crate::models::{ReviewAction, SubscriptionTier};
use crate::query::ListParams;
use crate::services::{ApiResult, DisputeResolution, InMemoryService, NewPlan, NewUser};

#[derive(Clone)]
pub struct AppState {
    pub client: MockApiClient<InMemoryService>,
}

impl AppState {
    pub fn new(client: MockApiClient<InMemoryService>) -> Self {
        Self { client }
    }
}

type Pairs = Query<Vec<(String, String)>>;

#[derive(Debug, Deserialize)]
struct BulkUpdate {
    ids: Vec<String>,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct BulkDelete {
    ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WalletRequest {
    amount: i64,
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct RejectRequest {
    reason: String,
}

#[derive(Debug, Deserialize)]
struct ModerateRequest {
    action: ReviewAction,
}

#[derive(Debug, Deserialize)]
struct UpgradeRequest {
    plan: SubscriptionTier,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/bulk-update", post(bulk_update_users))
        .route("/users/bulk-delete", post(bulk_delete_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/wallet", post(adjust_wallet))
        .route("/plans", get(list_plans).post(create_plan))
        .route(
            "/plans/:id",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .route("/applications", get(list_applications))
        .route(
            "/applications/:id",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .route("/transactions", get(list_transactions))
        .route("/transactions/:id", get(get_transaction))
        .route("/verifications", get(list_verifications))
        .route("/verifications/:id/approve", post(approve_verification))
        .route("/verifications/:id/reject", post(reject_verification))
        .route("/chats", get(list_chats))
        .route("/reviews", get(list_reviews))
        .route("/reviews/:id/moderate", post(moderate_review))
        .route("/disputes", get(list_disputes))
        .route("/disputes/:id/resolve", post(resolve_dispute))
        .route("/subscriptions", get(list_subscriptions))
        .route("/subscriptions/:user_id/upgrade", post(upgrade_subscription))
        .route("/config", get(platform_config))
        .route("/config/reset", post(reset_platform_config))
        .route("/config/:section", put(update_platform_config))
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/analytics", get(analytics))
        .route("/options", get(options))
        .route("/action-logs", get(action_logs));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.client.settings();
    (
        StatusCode::OK,
        Json(json!({
            "service": "ok",
            "mock": {
                "delay_ms": settings.delay.as_millis() as u64,
                "error_rate": settings.error_rate,
            },
            "timestamp": Utc::now()
        })),
    )
}

async fn list_users(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_users(&params).await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_user(&id).await?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.client.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.update_user(&id, &patch).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.delete_user(&id).await?))
}

async fn bulk_update_users(
    State(state): State<AppState>,
    Json(body): Json<BulkUpdate>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state.client.bulk_update_users(&body.ids, &body.data).await?,
    ))
}

async fn bulk_delete_users(
    State(state): State<AppState>,
    Json(body): Json<BulkDelete>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.bulk_delete_users(&body.ids).await?))
}

async fn adjust_wallet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<WalletRequest>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state
            .client
            .adjust_user_wallet(&id, body.amount, &body.reason)
            .await?,
    ))
}

async fn list_plans(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_plans(&params).await?))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_plan(&id).await?))
}

async fn create_plan(
    State(state): State<AppState>,
    Json(input): Json<NewPlan>,
) -> ApiResult<impl IntoResponse> {
    let plan = state.client.create_plan(input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.update_plan(&id, &patch).await?))
}

async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.delete_plan(&id).await?))
}

async fn list_applications(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_applications(&params).await?))
}

async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_application(&id).await?))
}

async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.update_application(&id, &patch).await?))
}

async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.delete_application(&id).await?))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_transactions(&params).await?))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_transaction(&id).await?))
}

async fn list_verifications(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_verifications(&params).await?))
}

async fn approve_verification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.approve_verification(&id).await?))
}

async fn reject_verification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RejectRequest>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state.client.reject_verification(&id, &body.reason).await?,
    ))
}

async fn list_chats(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_chats(&params).await?))
}

async fn list_reviews(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_reviews(&params).await?))
}

async fn moderate_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ModerateRequest>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.moderate_review(&id, body.action).await?))
}

async fn list_disputes(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_disputes(&params).await?))
}

async fn resolve_dispute(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(resolution): Json<DisputeResolution>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.resolve_dispute(&id, &resolution).await?))
}

async fn list_subscriptions(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> ApiResult<impl IntoResponse> {
    let params = ListParams::from_pairs(pairs)?;
    Ok(Json(state.client.get_subscriptions(&params).await?))
}

async fn upgrade_subscription(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpgradeRequest>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state
            .client
            .upgrade_subscription(&user_id, body.plan)
            .await?,
    ))
}

async fn platform_config(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_platform_config().await?))
}

async fn update_platform_config(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(values): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(
        state
            .client
            .update_platform_config(&section, &values)
            .await?,
    ))
}

async fn reset_platform_config(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.reset_platform_config().await?))
}

async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_dashboard_stats().await?))
}

async fn analytics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_analytics_data().await?))
}

async fn options() -> Json<Value> {
    Json(catalog::all_options())
}

async fn action_logs(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.client.get_action_logs().await?))
}
