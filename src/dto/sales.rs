use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::nullable_patch,
    models::{Sale, SaleItem},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    #[serde(rename = "cliente_id", default)]
    pub customer_id: Option<i32>,
    /// Defaults to today.
    #[serde(rename = "data_venda", default)]
    pub sale_date: Option<NaiveDate>,
    /// Defaults to 0.
    #[serde(default)]
    pub total: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSaleRequest {
    #[serde(rename = "cliente_id", default, deserialize_with = "nullable_patch")]
    #[schema(value_type = Option<i32>)]
    pub customer_id: Option<Option<i32>>,
    #[serde(rename = "data_venda")]
    pub sale_date: Option<NaiveDate>,
    pub total: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    #[serde(rename = "produtos")]
    pub items: Vec<SaleItem>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleList {
    #[schema(value_type = Vec<Sale>)]
    pub items: Vec<Sale>,
}
