use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::nullable_patch, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade_em_estoque", default)]
    pub stock_quantity: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao", default, deserialize_with = "nullable_patch")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "quantidade_em_estoque")]
    pub stock_quantity: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
