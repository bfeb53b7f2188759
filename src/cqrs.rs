use std::sync::Arc;

use tracing::{event, Level};

use crate::{
    dtos::{GetProductByIdResponse, GetProductsResponse, ProductDetailsResponse, ProductResponse, Response},
    error::RepositoryError,
    params::{Filter, Pagination},
    repositories::ProductRepository,
};

// traits
pub trait Query{}

pub trait QueryHandler<Q: Query, R: Response>{
    async fn handle(&self, input: &Q) -> Result<R, RepositoryError>;
}

// queries
pub struct GetProductsQuery{
    pub filter: Filter,
    pub pagination: Pagination
}
impl Query for GetProductsQuery{}

pub struct GetProductByIdQuery{
    pub id: u32
}
impl Query for GetProductByIdQuery{}

// query handlers
#[derive(Clone)]
pub struct GetProductsQueryHandler{
    product_repository: Arc<dyn ProductRepository>
}

impl GetProductsQueryHandler{
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
        GetProductsQueryHandler{
            product_repository
        }
    }
}

impl QueryHandler<GetProductsQuery, GetProductsResponse> for GetProductsQueryHandler{
    async fn handle(&self, input: &GetProductsQuery) -> Result<GetProductsResponse, RepositoryError> {
        match self.product_repository.find_by_criteria(&input.filter, &input.pagination).await {
            Ok(page) => {
                event!(Level::DEBUG, "Fetched {} of {} products", page.products.len(), page.total);

                Ok(GetProductsResponse{
                    products: page.products.iter().map(ProductResponse::from).collect(),
                    pagination: input.pagination.with_total(page.total)
                })
            },
            Err(e) => {
                event!(Level::ERROR, "Error occurred while fetching products: {}", e);
                Err(e)
            }
        }
    }
}

#[derive(Clone)]
pub struct GetProductByIdQueryHandler{
    product_repository: Arc<dyn ProductRepository>
}

impl GetProductByIdQueryHandler{
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
        GetProductByIdQueryHandler{
            product_repository
        }
    }
}

impl QueryHandler<GetProductByIdQuery, GetProductByIdResponse> for GetProductByIdQueryHandler{
    async fn handle(&self, input: &GetProductByIdQuery) -> Result<GetProductByIdResponse, RepositoryError> {
        match self.product_repository.find_by_id_with_variants(input.id).await {
            Ok(product) => Ok(GetProductByIdResponse{
                product: ProductDetailsResponse::from(&product)
            }),
            Err(e) => {
                event!(Level::ERROR, "Error occurred while fetching product {}: {}", input.id, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        domain::{Product, ProductPage},
        repositories::MockProductRepository,
    };

    fn product(id: u32) -> Product {
        Product {
            id,
            code: format!("PROD{:03}", id),
            price: Decimal::new(2999, 2),
            category: None,
            variants: Vec::new(),
        }
    }

    #[tokio::test]
    async fn list_query_passes_normalized_input_to_repository() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_find_by_criteria()
            .withf(|filter, pagination| {
                filter.category.as_deref() == Some("shoes") && pagination.offset == 4 && pagination.limit == 2
            })
            .times(1)
            .returning(|_, _| Ok(ProductPage { products: vec![product(5), product(6)], total: 12 }));

        let handler = GetProductsQueryHandler::new(Arc::new(repository));
        let query = GetProductsQuery {
            filter: Filter { category: Some("shoes".to_string()), price_less_than: 0.0 },
            pagination: Pagination { offset: 4, limit: 2, total: 0 },
        };

        let response = handler.handle(&query).await.unwrap();

        assert_eq!(response.products.len(), 2);
        assert_eq!(response.pagination, Pagination { offset: 4, limit: 2, total: 12 });
    }

    #[tokio::test]
    async fn list_query_propagates_repository_failure() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_find_by_criteria()
            .returning(|_, _| Err(RepositoryError::Database("connection reset".to_string())));

        let handler = GetProductsQueryHandler::new(Arc::new(repository));
        let query = GetProductsQuery { filter: Filter::default(), pagination: Pagination::default() };

        assert!(matches!(handler.handle(&query).await, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn by_id_query_maps_product() {
        let mut repository = MockProductRepository::new();
        repository
            .expect_find_by_id_with_variants()
            .withf(|id| *id == 5)
            .returning(|id| Ok(product(id)));

        let handler = GetProductByIdQueryHandler::new(Arc::new(repository));

        let response = handler.handle(&GetProductByIdQuery { id: 5 }).await.unwrap();

        assert_eq!(response.product.id, 5);
        assert_eq!(response.product.code, "PROD005");
        assert!(response.product.variants.is_empty());
    }
}
