use std::{collections::HashMap, sync::Arc};
use axum::{extract::{Json, Query, State}, http::{StatusCode, Uri}, routing::get, Router};
use serde_json::{Value, json};

use crate::{cqrs::{GetProductByIdQuery, GetProductsQuery, QueryHandler}, dtos::ApiError, error::ProductIdError, params::{Filter, Pagination}, state::AppState};

pub const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/catalog", get(get_all_products))
        .route("/catalog/", get(get_product))
        .route("/catalog/{id}", get(get_product))
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!(ApiError{error: message.to_string()})))
}

/// The product id is the third `/`-separated segment of the decoded path, as
/// in `/catalog/42`.
pub fn product_id_from_path(path: &str) -> Result<u32, ProductIdError> {
    let path = urlencoding::decode(path).map_err(|_| ProductIdError::Format)?;
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 3 {
        return Err(ProductIdError::Missing);
    }

    let id = segments[2];
    // u32's parser tolerates a leading '+', ids never carry a sign
    if id.starts_with('+') {
        return Err(ProductIdError::Format);
    }

    id.parse::<u32>().map_err(|_| ProductIdError::Format)
}

pub async fn get_product(uri: Uri, State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let id = match product_id_from_path(uri.path()) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string())
    };

    match state.get_product_by_id_query_handler.handle(&GetProductByIdQuery{ id }).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        // not-found and store failures are reported alike
        Err(_) => error_response(StatusCode::NOT_FOUND, FETCH_PRODUCTS_FAILED)
    }
}

pub async fn get_all_products(Query(params): Query<HashMap<String, String>>, State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let input = GetProductsQuery {
        filter: Filter::from_query(&params),
        pagination: Pagination::from_query(&params)
    };

    match state.get_products_query_handler.handle(&input).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(_) => error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_PRODUCTS_FAILED)
    }
}
