//! Kitchen route handlers: status-filtered order lists and status advance.
//!
//! Chef pages see only what needs cooking; order processor pages also see
//! who the order is for and when it will be picked up.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use sun_devil_pizza_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{Result, add_breadcrumb};
use crate::models::{ChefOrderView, ProcessorOrderView};
use crate::services::lifecycle::LifecycleService;
use crate::state::AppState;

/// Body of `POST /incrementStatus`.
#[derive(Debug, Deserialize)]
pub struct IncrementStatusRequest {
    pub id: OrderId,
}

async fn chef_view(state: &AppState, status: OrderStatus) -> Result<Json<Vec<ChefOrderView>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_status(status)
        .await?;
    Ok(Json(orders.into_iter().map(ChefOrderView::from).collect()))
}

async fn processor_view(
    state: &AppState,
    status: OrderStatus,
) -> Result<Json<Vec<ProcessorOrderView>>> {
    let orders = OrderRepository::new(state.pool())
        .list_by_status(status)
        .await?;
    Ok(Json(
        orders.into_iter().map(ProcessorOrderView::from).collect(),
    ))
}

/// Orders accepted by an order processor, waiting for the chef.
#[instrument(skip(state))]
pub async fn ready_to_cook(State(state): State<AppState>) -> Result<Json<Vec<ChefOrderView>>> {
    chef_view(&state, OrderStatus::ReadyToCook).await
}

/// Orders in the oven.
#[instrument(skip(state))]
pub async fn cooking(State(state): State<AppState>) -> Result<Json<Vec<ChefOrderView>>> {
    chef_view(&state, OrderStatus::Cooking).await
}

/// New orders waiting for an order processor.
#[instrument(skip(state))]
pub async fn accepted(State(state): State<AppState>) -> Result<Json<Vec<ProcessorOrderView>>> {
    processor_view(&state, OrderStatus::Accepted).await
}

/// Orders ready for pickup.
#[instrument(skip(state))]
pub async fn finished(State(state): State<AppState>) -> Result<Json<Vec<ProcessorOrderView>>> {
    processor_view(&state, OrderStatus::Finished).await
}

/// Move an order to its next status.
///
/// 400 if the order is unknown or already finished.
#[instrument(skip(state, body))]
pub async fn increment_status(
    State(state): State<AppState>,
    body: std::result::Result<Json<IncrementStatusRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(body) = body?;

    let transition = LifecycleService::new(state.pool(), state.events())
        .advance(body.id)
        .await?;

    let order_id = transition.order.id.to_string();
    let status = transition.order.status.to_string();
    add_breadcrumb(
        "order",
        "Order advanced",
        Some(&[("order_id", order_id.as_str()), ("status", status.as_str())]),
    );
    Ok(StatusCode::OK)
}
