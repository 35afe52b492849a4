use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    error::AppResult,
    middleware::json::AppJson,
    models::Customer,
    response::ApiResponse,
    routes::params::Pagination,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    get,
    path = "/api/clientes",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip, default 0"),
        ("limit" = Option<u64>, Query, description = "Rows to return, default 100")
    ),
    responses(
        (status = 200, description = "List customers", body = ApiResponse<CustomerList>)
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::list_customers(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Get customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_customer(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/clientes",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Create customer", body = ApiResponse<Customer>),
        (status = 400, description = "Invalid body or duplicate email"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::create_customer(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::update_customer(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Deleted customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::delete_customer(&state, id).await?;
    Ok(Json(resp))
}
