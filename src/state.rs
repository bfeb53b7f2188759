use std::sync::Arc;

use crate::{
    cqrs::{GetProductByIdQueryHandler, GetProductsQueryHandler},
    repositories::ProductRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub get_products_query_handler: Arc<GetProductsQueryHandler>,
    pub get_product_by_id_query_handler: Arc<GetProductByIdQueryHandler>,
}

impl AppState {
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> AppState {
        AppState {
            get_products_query_handler: Arc::new(GetProductsQueryHandler::new(product_repository.clone())),
            get_product_by_id_query_handler: Arc::new(GetProductByIdQueryHandler::new(product_repository)),
        }
    }
}
