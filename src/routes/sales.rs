use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::{
        sale_items::SaleItemList,
        sales::{CreateSaleRequest, SaleList, SaleWithItems, UpdateSaleRequest},
    },
    error::AppResult,
    middleware::json::AppJson,
    models::Sale,
    response::ApiResponse,
    routes::params::Pagination,
    services::{sale_item_service, sale_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/{id}", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/{id}/produtos", get(list_sale_products))
}

#[utoipa::path(
    get,
    path = "/api/vendas",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip, default 0"),
        ("limit" = Option<u64>, Query, description = "Rows to return, default 100")
    ),
    responses(
        (status = 200, description = "List sales with cached totals", body = ApiResponse<SaleList>)
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    let resp = sale_service::list_sales(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendas/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Sale with its lines; total is recalculated and stored", body = ApiResponse<SaleWithItems>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    let resp = sale_service::get_sale(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vendas",
    request_body = CreateSaleRequest,
    responses(
        (status = 200, description = "Create sale", body = ApiResponse<Sale>),
        (status = 400, description = "Invalid body or unknown customer"),
    ),
    tag = "Sales"
)]
pub async fn create_sale(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSaleRequest>,
) -> AppResult<Json<ApiResponse<Sale>>> {
    let resp = sale_service::create_sale(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/vendas/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Updated sale", body = ApiResponse<Sale>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn update_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSaleRequest>,
) -> AppResult<Json<ApiResponse<Sale>>> {
    let resp = sale_service::update_sale(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/vendas/{id}",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Deleted sale and its lines", body = ApiResponse<Sale>),
        (status = 404, description = "Sale not found"),
    ),
    tag = "Sales"
)]
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Sale>>> {
    let resp = sale_service::delete_sale(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendas/{id}/produtos",
    params(
        ("id" = i32, Path, description = "Sale ID")
    ),
    responses(
        (status = 200, description = "Lines of the sale", body = ApiResponse<SaleItemList>)
    ),
    tag = "Sales"
)]
pub async fn list_sale_products(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<SaleItemList>>> {
    let resp = sale_item_service::list_items_for_sale(&state, id).await?;
    Ok(Json(resp))
}
