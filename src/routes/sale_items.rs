use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::sale_items::{CreateSaleItemRequest, SaleItemList, UpdateSaleItemRequest},
    error::AppResult,
    middleware::json::AppJson,
    models::SaleItem,
    response::ApiResponse,
    routes::params::Pagination,
    services::sale_item_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sale_items).post(create_sale_item))
        .route(
            "/{sale_id}/{product_id}",
            get(get_sale_item)
                .put(update_sale_item)
                .delete(delete_sale_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/venda_produto",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip, default 0"),
        ("limit" = Option<u64>, Query, description = "Rows to return, default 100")
    ),
    responses(
        (status = 200, description = "List sale items", body = ApiResponse<SaleItemList>)
    ),
    tag = "Sale items"
)]
pub async fn list_sale_items(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<SaleItemList>>> {
    let resp = sale_item_service::list_sale_items(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/venda_produto/{sale_id}/{product_id}",
    params(
        ("sale_id" = i32, Path, description = "Sale ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get sale item", body = ApiResponse<SaleItem>),
        (status = 404, description = "Sale item not found"),
    ),
    tag = "Sale items"
)]
pub async fn get_sale_item(
    State(state): State<AppState>,
    Path((sale_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<SaleItem>>> {
    let resp = sale_item_service::get_sale_item(&state, sale_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/venda_produto",
    request_body = CreateSaleItemRequest,
    responses(
        (status = 200, description = "Add a product to a sale and refresh its total", body = ApiResponse<SaleItem>),
        (status = 400, description = "Invalid body or product already on the sale"),
        (status = 404, description = "Sale or product not found"),
    ),
    tag = "Sale items"
)]
pub async fn create_sale_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSaleItemRequest>,
) -> AppResult<Json<ApiResponse<SaleItem>>> {
    let resp = sale_item_service::create_sale_item(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/venda_produto/{sale_id}/{product_id}",
    params(
        ("sale_id" = i32, Path, description = "Sale ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateSaleItemRequest,
    responses(
        (status = 200, description = "Update quantity and refresh the sale total", body = ApiResponse<SaleItem>),
        (status = 404, description = "Sale or sale item not found"),
    ),
    tag = "Sale items"
)]
pub async fn update_sale_item(
    State(state): State<AppState>,
    Path((sale_id, product_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<UpdateSaleItemRequest>,
) -> AppResult<Json<ApiResponse<SaleItem>>> {
    let resp = sale_item_service::update_sale_item(&state, sale_id, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/venda_produto/{sale_id}/{product_id}",
    params(
        ("sale_id" = i32, Path, description = "Sale ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Remove the line and refresh the sale total", body = ApiResponse<SaleItem>),
        (status = 404, description = "Sale or sale item not found"),
    ),
    tag = "Sale items"
)]
pub async fn delete_sale_item(
    State(state): State<AppState>,
    Path((sale_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<SaleItem>>> {
    let resp = sale_item_service::delete_sale_item(&state, sale_id, product_id).await?;
    Ok(Json(resp))
}
