use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::{
        auth::AdminUser,
        menu::{CreateMenuItemRequest, MenuQuery, UpdateMenuItemRequest},
    },
    services::menu::MenuService,
    AppState,
};

/// GET /menu — public; `?grouped=1` returns category groups computed at
/// read time.
pub async fn list_menu(
    State(state): State<AppState>,
    Query(params): Query<MenuQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let value = if params.grouped.unwrap_or(0) != 0 {
        let groups = MenuService::list_grouped(&state.db).await.map_err(internal)?;
        serde_json::to_value(groups).unwrap()
    } else {
        let items = MenuService::list(&state.db).await.map_err(internal)?;
        serde_json::to_value(items).unwrap()
    };
    Ok(Json(value))
}

/// POST /menu — admin only.
pub async fn create_menu_item(
    State(state): State<AppState>,
    _user: AdminUser,
    Json(body): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if body.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Name is required" })),
        ));
    }
    let item = MenuService::create(&state.db, &body).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(serde_json::to_value(item).unwrap())))
}

/// PUT /menu/{id} — admin only; partial update.
pub async fn update_menu_item(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMenuItemRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let item = MenuService::update(&state.db, id, &body)
        .await
        .map_err(internal)?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Menu item not found" })),
        ))?;
    Ok(Json(serde_json::to_value(item).unwrap()))
}

/// DELETE /menu/{id} — admin only.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    _user: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let deleted = MenuService::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Menu item not found" })),
        ));
    }
    Ok(Json(json!({ "success": true })))
}

fn internal(e: anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}
