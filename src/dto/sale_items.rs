use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SaleItem;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleItemRequest {
    #[serde(rename = "venda_id")]
    pub sale_id: i32,
    #[serde(rename = "produto_id")]
    pub product_id: i32,
    #[serde(rename = "quantidade", default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSaleItemRequest {
    #[serde(rename = "quantidade")]
    pub quantity: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SaleItemList {
    #[schema(value_type = Vec<SaleItem>)]
    pub items: Vec<SaleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one() {
        let req: CreateSaleItemRequest =
            serde_json::from_str(r#"{"venda_id": 1, "produto_id": 2}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }

    #[test]
    fn explicit_zero_quantity_is_kept() {
        let patch: UpdateSaleItemRequest =
            serde_json::from_str(r#"{"quantidade": 0}"#).unwrap();
        assert_eq!(patch.quantity, Some(0));

        let empty: UpdateSaleItemRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.quantity, None);
    }
}
