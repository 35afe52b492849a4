use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::nullable_patch, models::Customer};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telefone", default, deserialize_with = "nullable_patch")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(rename = "endereco", default, deserialize_with = "nullable_patch")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerList {
    #[schema(value_type = Vec<Customer>)]
    pub items: Vec<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_and_null_fields_are_distinguished() {
        let patch: UpdateCustomerRequest =
            serde_json::from_str(r#"{"telefone": null}"#).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.email, None);
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.address, None);
    }

    #[test]
    fn present_nullable_field_carries_value() {
        let patch: UpdateCustomerRequest =
            serde_json::from_str(r#"{"endereco": "Rua A, 10"}"#).unwrap();
        assert_eq!(patch.address, Some(Some("Rua A, 10".to_string())));
        assert_eq!(patch.phone, None);
    }

    #[test]
    fn create_requires_name_and_email() {
        let err = serde_json::from_str::<CreateCustomerRequest>(r#"{"nome": "Ana"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("email"));
    }
}
