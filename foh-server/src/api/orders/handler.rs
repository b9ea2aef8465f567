//! Restaurant Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::allocations::{AllocationTarget, CreateAllocation, NewItem};
use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::models::{
    AllocationItem, AllocationKind, AllocationStatus, AllocationStatusUpdate, AllocationView,
    ItemQuantityUpdate, OrderCreate, OrderItemCreate,
};

/// Everything under /api/orders speaks table orders only; bookings live
/// under their own routes.
fn ensure_order(view: AllocationView) -> AppResult<AllocationView> {
    if view.allocation.kind != AllocationKind::TableOrder {
        return Err(AppError::not_found(format!(
            "Order {} not found",
            view.allocation.id
        )));
    }
    Ok(view)
}

fn to_new_item(item: OrderItemCreate) -> NewItem {
    NewItem {
        menu_item_id: item.menu_item_id,
        quantity: item.quantity,
        special_requests: item.special_requests,
    }
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AllocationView>> {
    validate_optional_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(
        &payload.special_instructions,
        "special_instructions",
        MAX_NOTE_LEN,
    )?;
    for item in &payload.items {
        validate_optional_text(&item.special_requests, "special_requests", MAX_NOTE_LEN)?;
    }

    let view = state
        .allocations
        .create(CreateAllocation {
            target: AllocationTarget::Table {
                table_id: payload.table_id,
            },
            customer_name: payload.customer_name,
            party_size: payload.number_of_guests,
            special_instructions: payload.special_instructions,
            items: payload.items.into_iter().map(to_new_item).collect(),
        })
        .await?;
    Ok(Json(view))
}

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AllocationView>>> {
    let orders = state
        .allocations
        .list(AllocationKind::TableOrder, None, None)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AllocationView>> {
    let view = ensure_order(state.allocations.get(id).await?)?;
    Ok(Json(view))
}

/// GET /api/orders/reference/{reference}
pub async fn get_by_reference(
    State(state): State<ServerState>,
    Path(reference): Path<String>,
) -> AppResult<Json<AllocationView>> {
    let view = ensure_order(state.allocations.get_by_reference(&reference).await?)?;
    Ok(Json(view))
}

/// GET /api/orders/status/{status}
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<AllocationView>>> {
    let status: AllocationStatus = status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown order status: {status}")))?;
    let orders = state
        .allocations
        .list(AllocationKind::TableOrder, Some(status), None)
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/table/{table_id}
pub async fn list_by_table(
    State(state): State<ServerState>,
    Path(table_id): Path<i64>,
) -> AppResult<Json<Vec<AllocationView>>> {
    let orders = state
        .allocations
        .list(AllocationKind::TableOrder, None, Some(table_id))
        .await?;
    Ok(Json(orders))
}

/// PATCH /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AllocationStatusUpdate>,
) -> AppResult<Json<AllocationView>> {
    ensure_order(state.allocations.get(id).await?)?;
    let view = state.allocations.change_status(id, payload.status).await?;
    Ok(Json(view))
}

/// GET /api/orders/{id}/items
pub async fn list_items(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<AllocationItem>>> {
    let view = ensure_order(state.allocations.get(id).await?)?;
    Ok(Json(view.items))
}

/// POST /api/orders/{id}/items
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemCreate>,
) -> AppResult<Json<AllocationItem>> {
    validate_optional_text(&payload.special_requests, "special_requests", MAX_NOTE_LEN)?;
    ensure_order(state.allocations.get(id).await?)?;
    let item = state.allocations.add_item(id, to_new_item(payload)).await?;
    Ok(Json(item))
}

/// PATCH /api/order-items/{id}/quantity
pub async fn update_item_quantity(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemQuantityUpdate>,
) -> AppResult<Json<AllocationItem>> {
    let item = state
        .allocations
        .update_item_quantity(id, payload.quantity)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/order-items/{id}
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.allocations.remove_item(id).await?;
    Ok(Json(true))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    ensure_order(state.allocations.get(id).await?)?;
    state.allocations.delete(id).await?;
    Ok(Json(true))
}
