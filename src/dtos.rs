use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Serialize;

use crate::{
    domain::{Category, Product, Variant},
    params::Pagination,
};

pub trait Response {}

/// Best-effort conversion of a stored currency amount for the wire.
fn to_wire_price(price: Decimal) -> f64 {
    price.to_f64().unwrap_or_default()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryResponse {
    pub code: String,
    pub name: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        CategoryResponse {
            code: category.code.clone(),
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub code: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        ProductResponse {
            code: product.code.clone(),
            price: to_wire_price(product.price),
            category: product.category.as_ref().map(CategoryResponse::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VariantResponse {
    pub id: u32,
    pub name: String,
    pub sku: String,
    pub price: f64,
}

impl VariantResponse {
    /// A zero variant price stands for the parent product's price.
    pub fn new(variant: &Variant, product_price: Decimal) -> Self {
        let price = if variant.price.is_zero() {
            product_price
        } else {
            variant.price
        };

        VariantResponse {
            id: variant.id,
            name: variant.name.clone(),
            sku: variant.sku.clone(),
            price: to_wire_price(price),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductDetailsResponse {
    pub id: u32,
    pub code: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantResponse>,
}

impl From<&Product> for ProductDetailsResponse {
    fn from(product: &Product) -> Self {
        ProductDetailsResponse {
            id: product.id,
            code: product.code.clone(),
            price: to_wire_price(product.price),
            category: product.category.as_ref().map(CategoryResponse::from),
            variants: product
                .variants
                .iter()
                .map(|variant| VariantResponse::new(variant, product.price))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetProductsResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
}
impl Response for GetProductsResponse {}

#[derive(Debug, Serialize)]
pub struct GetProductByIdResponse {
    pub product: ProductDetailsResponse,
}
impl Response for GetProductByIdResponse {}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}
impl Response for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product {
            id: 7,
            code: "PROD007".to_string(),
            price: Decimal::new(4999, 2),
            category: Some(Category {
                code: "clothing".to_string(),
                name: "Clothing".to_string(),
            }),
            variants: vec![
                Variant {
                    id: 1,
                    name: "Small".to_string(),
                    sku: "PROD007-S".to_string(),
                    price: Decimal::ZERO,
                },
                Variant {
                    id: 2,
                    name: "Large".to_string(),
                    sku: "PROD007-L".to_string(),
                    price: Decimal::new(5499, 2),
                },
            ],
        }
    }

    #[test]
    fn zero_priced_variant_inherits_product_price() {
        let details = ProductDetailsResponse::from(&shirt());

        assert_eq!(details.variants[0].price, to_wire_price(Decimal::new(4999, 2)));
    }

    #[test]
    fn priced_variant_keeps_its_own_price() {
        let details = ProductDetailsResponse::from(&shirt());

        assert_eq!(details.variants[1].price, to_wire_price(Decimal::new(5499, 2)));
        assert_eq!(details.variants[1].sku, "PROD007-L");
    }

    #[test]
    fn zero_with_scale_is_still_the_sentinel() {
        let variant = Variant {
            id: 3,
            name: "Medium".to_string(),
            sku: "PROD007-M".to_string(),
            price: Decimal::new(0, 2),
        };

        assert_eq!(VariantResponse::new(&variant, Decimal::new(1250, 2)).price, 12.5);
    }

    #[test]
    fn product_without_category_omits_it_on_the_wire() {
        let mut product = shirt();
        product.category = None;

        let body = serde_json::to_value(ProductResponse::from(&product)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"code": "PROD007", "price": to_wire_price(Decimal::new(4999, 2))})
        );
    }

    #[test]
    fn product_with_category_emits_code_and_name() {
        let body = serde_json::to_value(ProductResponse::from(&shirt())).unwrap();

        assert_eq!(body["category"]["code"], "clothing");
        assert_eq!(body["category"]["name"], "Clothing");
    }

    #[test]
    fn product_details_without_variants_omit_them_on_the_wire() {
        let mut product = shirt();
        product.variants.clear();

        let body = serde_json::to_value(ProductDetailsResponse::from(&product)).unwrap();

        assert!(body.get("variants").is_none());
        assert_eq!(body["id"], 7);
    }

    #[test]
    fn product_details_keep_identity_fields() {
        let details = ProductDetailsResponse::from(&shirt());

        assert_eq!(details.id, 7);
        assert_eq!(details.code, "PROD007");
        assert_eq!(details.price, to_wire_price(Decimal::new(4999, 2)));
        assert_eq!(details.variants.len(), 2);
    }
}
