//! Inventory and product handlers.
//!
//! Each handler makes exactly one engine call under the request's
//! [`RequestContext`]; failures render through [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use tracing::debug;
use warehouse_core::{Inventory, Products};
use warehouse_db::RequestContext;

use crate::dto::ResponseProduct;
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult = Result<Json<ResponseProduct>, ApiError>;

pub async fn get_inventory(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult {
    debug!(rid = %ctx.request_id(), "get_inventory request");

    let stocks = state.engine.get_inventory(&ctx).await?;
    Ok(Json(ResponseProduct::inventory(stocks)))
}

pub async fn get_product_stock(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult {
    debug!(rid = %ctx.request_id(), "get_product_stock request");

    let stocks = state.engine.get_product_stock(&ctx).await?;
    Ok(Json(ResponseProduct::product_stocks(stocks)))
}

pub async fn upload_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<Products>, JsonRejection>,
) -> ApiResult {
    debug!(rid = %ctx.request_id(), "upload_products request");

    let Json(products) = payload?;
    let inserted = state.engine.upload_products(&ctx, &products).await?;
    Ok(Json(ResponseProduct::message(format!(
        "{} product inserted",
        inserted
    ))))
}

pub async fn upload_inventory(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<Inventory>, JsonRejection>,
) -> ApiResult {
    debug!(rid = %ctx.request_id(), "upload_inventory request");

    let Json(inventory) = payload?;
    let inserted = state.engine.upload_inventory(&ctx, &inventory).await?;
    Ok(Json(ResponseProduct::message(format!(
        "{} item inserted",
        inserted
    ))))
}

pub async fn sell_product(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
) -> ApiResult {
    debug!(rid = %ctx.request_id(), product = %name, "sell_product request");

    state.engine.sell_product(&ctx, &name).await?;
    Ok(Json(ResponseProduct::message(format!(
        "Product {} is sold and inventory is updated accordingly",
        name
    ))))
}
