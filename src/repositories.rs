use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::RwLock;
use tracing::{event, Level};
use crate::{
    domain::{Product, ProductPage},
    error::{ConfigError, RepositoryError},
    params::{Filter, Pagination},
};
use std::{collections::BTreeMap, sync::Arc};

#[derive(Debug)]
pub struct MongoDbInitializationInfo {
    pub uri: String,
    pub database: String,
    pub collection: String
}

/// Read access to the product catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns the requested window of products matching `filter` along with
    /// the number of matches across all windows.
    async fn find_by_criteria(&self, filter: &Filter, pagination: &Pagination) -> Result<ProductPage, RepositoryError>;

    async fn find_by_id_with_variants(&self, id: u32) -> Result<Product, RepositoryError>;
}

fn saturating_total(count: u64) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<u32, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        InMemoryProductRepository {
            products: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        InMemoryProductRepository {
            products: Arc::new(RwLock::new(
                products.into_iter().map(|p| (p.id, p)).collect(),
            )),
        }
    }

    /// Loads a JSON array of products.
    pub async fn from_seed_file(path: &str) -> Result<Self, ConfigError> {
        let seed_error = |reason: String| ConfigError::Seed {
            path: path.to_string(),
            reason,
        };

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| seed_error(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))?;

        event!(Level::INFO, "Seeded in-memory catalog with {} products", products.len());
        Ok(Self::with_products(products))
    }

    fn matches(filter: &Filter, product: &Product) -> bool {
        if let Some(category) = &filter.category {
            match &product.category {
                Some(c) if &c.code == category => {}
                _ => return false,
            }
        }

        if let Some(bound) = filter.price_bound() {
            match product.price.to_f64() {
                Some(price) if price < bound => {}
                _ => return false,
            }
        }

        true
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_criteria(&self, filter: &Filter, pagination: &Pagination) -> Result<ProductPage, RepositoryError> {
        let lock = self.products.read().await;

        let matching: Vec<&Product> = lock
            .values()
            .filter(|product| Self::matches(filter, product))
            .collect();

        let products = matching
            .iter()
            .skip(usize::try_from(pagination.offset).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .map(|product| (*product).clone())
            .collect();

        Ok(ProductPage {
            products,
            total: saturating_total(matching.len() as u64),
        })
    }

    async fn find_by_id_with_variants(&self, id: u32) -> Result<Product, RepositoryError> {
        let lock = self.products.read().await;
        match lock.get(&id) {
            Some(product) => Ok(product.clone()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}

#[derive(Clone)]
pub struct MongoDbProductRepository {
    product_collection: Collection<Product>
}

impl MongoDbProductRepository {
    pub fn new(info: &MongoDbInitializationInfo, client: &Client) -> Self {
        let database = client.database(&info.database);

        MongoDbProductRepository {
            product_collection: database.collection(&info.collection)
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), RepositoryError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "category.code": 1 }).build(),
            IndexModel::builder().keys(doc! { "price": 1 }).build(),
        ];

        self.product_collection.create_indexes(indexes).await?;
        event!(Level::INFO, "Product indexes created");
        Ok(())
    }

    fn build_filter(filter: &Filter) -> Document {
        let mut document = doc! {};

        if let Some(category) = &filter.category {
            document.insert("category.code", category.as_str());
        }

        if let Some(bound) = filter.price_bound() {
            document.insert("price", doc! { "$lt": bound });
        }

        document
    }
}

#[async_trait]
impl ProductRepository for MongoDbProductRepository {
    async fn find_by_criteria(&self, filter: &Filter, pagination: &Pagination) -> Result<ProductPage, RepositoryError> {
        let query = Self::build_filter(filter);

        let total = self.product_collection.count_documents(query.clone()).await?;

        let options = FindOptions::builder()
            .skip(pagination.offset)
            .limit(i64::from(pagination.limit))
            .sort(doc! { "id": 1 })
            .build();

        let cursor = self
            .product_collection
            .find(query)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(ProductPage {
            products,
            total: saturating_total(total),
        })
    }

    async fn find_by_id_with_variants(&self, id: u32) -> Result<Product, RepositoryError> {
        match self.product_collection.find_one(doc! { "id": i64::from(id) }).await? {
            Some(product) => Ok(product),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
