//! HTTP handlers for pricing rule management.

use crate::{
    AppState,
    api::models::pricing_rules::{PricingRuleCreate, PricingRuleResponse, PricingRuleUpdate},
    api::models::users::CurrentUser,
    auth::permissions,
    db::{
        errors::DbError,
        handlers::PricingRules,
        models::pricing_rules::{PricingRuleCreateDBRequest, PricingRuleUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{Operation, PricingRuleId, Resource},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;

/// List pricing rules, active and inactive (admin)
#[utoipa::path(
    get,
    path = "/pricing-rules",
    tag = "pricing-rules",
    summary = "List pricing rules",
    responses(
        (status = 200, description = "All pricing rules in evaluation order", body = [PricingRuleResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_pricing_rules(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<Vec<PricingRuleResponse>>> {
    permissions::require(&current_user, Resource::PricingRules, Operation::ReadAll)?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let rules = PricingRules::new(&mut conn).list_all().await?;

    Ok(Json(rules.into_iter().map(PricingRuleResponse::from).collect()))
}

/// Add a pricing rule (admin)
#[utoipa::path(
    post,
    path = "/pricing-rules",
    tag = "pricing-rules",
    summary = "Create a pricing rule",
    request_body = PricingRuleCreate,
    responses(
        (status = 201, description = "Rule created", body = PricingRuleResponse),
        (status = 400, description = "Invalid multiplier"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_pricing_rule(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(data): Json<PricingRuleCreate>,
) -> Result<(StatusCode, Json<PricingRuleResponse>)> {
    permissions::require(&current_user, Resource::PricingRules, Operation::CreateAll)?;

    if data.multiplier <= Decimal::ZERO {
        return Err(Error::Validation {
            message: "Multiplier must be greater than zero".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let rule = PricingRules::new(&mut conn).create(&PricingRuleCreateDBRequest::from(data)).await?;

    Ok((StatusCode::CREATED, Json(PricingRuleResponse::from(rule))))
}

/// Update a pricing rule's multiplier or active flag (admin)
#[utoipa::path(
    patch,
    path = "/pricing-rules/{id}",
    tag = "pricing-rules",
    summary = "Update a pricing rule",
    params(("id" = String, Path, description = "Pricing rule ID")),
    request_body = PricingRuleUpdate,
    responses(
        (status = 200, description = "Updated rule", body = PricingRuleResponse),
        (status = 400, description = "Invalid multiplier"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Rule not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_pricing_rule(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<PricingRuleId>,
    Json(data): Json<PricingRuleUpdate>,
) -> Result<Json<PricingRuleResponse>> {
    permissions::require(&current_user, Resource::PricingRules, Operation::UpdateAll)?;

    if data.multiplier.is_some_and(|multiplier| multiplier <= Decimal::ZERO) {
        return Err(Error::Validation {
            message: "Multiplier must be greater than zero".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let rule = PricingRules::new(&mut conn)
        .update(id, &PricingRuleUpdateDBRequest::from(data))
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Pricing rule".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(PricingRuleResponse::from(rule)))
}
