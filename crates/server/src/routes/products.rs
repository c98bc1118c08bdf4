use axum::{extract::{Query, State}, Json};
use serde::Deserialize;
use service::catalog::Product;
use tracing::error;

use crate::errors::ApiError;
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
}

/// `limit` applies when it is a finite number whose integer part is not
/// negative; fractions are truncated (`1.5` keeps one item).
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    let n = raw?.trim().parse::<f64>().ok()?.trunc();
    (n.is_finite() && n >= 0.0).then_some(n as usize)
}

/// List products, optionally truncated to `?limit=N`.
pub async fn list_products(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let mut products = state.catalog.get_all().await.map_err(|e| {
        error!(error = %e, "listing products failed");
        ApiError::new("failed to load products")
    })?;
    if let Some(limit) = parse_limit(query.limit.as_deref()) {
        products.truncate(limit);
    }
    Ok(Json(products))
}
