use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{customers, products, sale_items, sales};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "quantidade_em_estoque")]
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: i32,
    #[serde(rename = "cliente_id")]
    pub customer_id: Option<i32>,
    #[serde(rename = "data_venda")]
    pub sale_date: NaiveDate,
    pub total: f64,
}

/// A sale line. Carries only its own key fields so a sale can embed its lines
/// without a back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaleItem {
    #[serde(rename = "venda_id")]
    pub sale_id: i32,
    #[serde(rename = "produto_id")]
    pub product_id: i32,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock_quantity: model.stock_quantity,
        }
    }
}

impl From<sales::Model> for Sale {
    fn from(model: sales::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            sale_date: model.sale_date,
            total: model.total,
        }
    }
}

impl From<sale_items::Model> for SaleItem {
    fn from(model: sale_items::Model) -> Self {
        Self {
            sale_id: model.sale_id,
            product_id: model.product_id,
            quantity: model.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_serializes_with_wire_field_names() {
        let sale = Sale {
            id: 7,
            customer_id: None,
            sale_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            total: 12.5,
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "cliente_id": null,
                "data_venda": "2024-05-01",
                "total": 12.5
            })
        );
    }

    #[test]
    fn product_serializes_with_wire_field_names() {
        let product = Product {
            id: 1,
            name: "Widget".into(),
            description: None,
            price: 10.0,
            stock_quantity: 5,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["nome"], "Widget");
        assert_eq!(json["preco"], 10.0);
        assert_eq!(json["quantidade_em_estoque"], 5);
        assert!(json["descricao"].is_null());
    }
}
