//! Sample operations served behind the gates.

use api_gateway::{ApiGateway, OperationSpec};
use axum::Json;
use axum::extract::{Extension, Path};
use axum::routing::{get, put};
use gatekeeper_security::Identity;
use serde_json::{Value, json};

pub const PRODUCTS_UPDATE: &str = "products.update";
pub const ORDERS_LIST: &str = "orders.list";
pub const CATALOG_LIST: &str = "catalog.list";

/// Registers the sample operations. Their permission policies come from
/// the `authz.policies` section keyed by operation id.
///
/// # Errors
///
/// Fails on a duplicate route.
pub fn register(gateway: ApiGateway) -> anyhow::Result<ApiGateway> {
    gateway
        .operation(
            OperationSpec::put("/products/{id}", PRODUCTS_UPDATE),
            put(update_product),
        )?
        .operation(OperationSpec::get("/orders", ORDERS_LIST), get(list_orders))?
        .operation(
            OperationSpec::get("/catalog", CATALOG_LIST).public(),
            get(list_catalog),
        )
}

pub async fn update_product(
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Json<Value> {
    Json(json!({ "id": id, "updatedBy": identity.subject_id() }))
}

pub async fn list_orders(Extension(identity): Extension<Identity>) -> Json<Value> {
    Json(json!({ "owner": identity.subject_id(), "orders": [] }))
}

pub async fn list_catalog() -> Json<Value> {
    Json(json!({ "items": [] }))
}
