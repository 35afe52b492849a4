use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub total: Option<u64>,
}

impl Meta {
    pub fn new(skip: u64, limit: u64, total: u64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            skip: None,
            limit: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_wraps_payload_and_paging() {
        let body = ApiResponse::success("Sales", vec![1, 2], Some(Meta::new(0, 100, 2)));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Sales",
                "data": [1, 2],
                "meta": {"skip": 0, "limit": 100, "total": 2}
            })
        );
    }
}
