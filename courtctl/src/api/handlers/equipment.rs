//! HTTP handlers for the equipment catalog.

use crate::{
    AppState,
    api::models::equipment::{EquipmentResponse, EquipmentUpdate},
    api::models::users::CurrentUser,
    auth::permissions,
    db::{errors::DbError, handlers::Equipment, models::equipment::EquipmentUpdateDBRequest},
    errors::{Error, Result},
    types::{EquipmentId, Operation, Resource},
};
use axum::{
    extract::{Path, State},
    response::Json,
};

/// List equipment (public)
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    summary = "List equipment",
    responses(
        (status = 200, description = "Equipment types, ordered by name", body = [EquipmentResponse]),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_equipment(State(state): State<AppState>) -> Result<Json<Vec<EquipmentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let equipment = Equipment::new(&mut conn).list().await?;

    Ok(Json(equipment.into_iter().map(EquipmentResponse::from).collect()))
}

/// Update an equipment type's stock or hourly price (admin)
#[utoipa::path(
    patch,
    path = "/equipment/{id}",
    tag = "equipment",
    summary = "Update equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = EquipmentUpdate,
    responses(
        (status = 200, description = "Updated equipment", body = EquipmentResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Equipment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_equipment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<EquipmentId>,
    Json(data): Json<EquipmentUpdate>,
) -> Result<Json<EquipmentResponse>> {
    permissions::require(&current_user, Resource::Equipment, Operation::UpdateAll)?;

    if data.total_quantity.is_some_and(|quantity| quantity < 0) {
        return Err(Error::Validation {
            message: "totalQuantity must not be negative".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;
    let equipment = Equipment::new(&mut conn)
        .update(id, &EquipmentUpdateDBRequest::from(data))
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Equipment".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(EquipmentResponse::from(equipment)))
}
