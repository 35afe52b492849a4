use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::sale_items::{CreateSaleItemRequest, SaleItemList, UpdateSaleItemRequest},
    entity::{
        products::Entity as Products,
        sale_items::{self, ActiveModel, Column, Entity as SaleItems},
        sales,
    },
    error::{AppError, AppResult},
    models::SaleItem,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::totals::{lock_sale, recalculate_total},
    state::AppState,
};

const NOT_FOUND: &str = "Sale item not found";

async fn find_item<C: ConnectionTrait>(
    conn: &C,
    sale_id: i32,
    product_id: i32,
) -> AppResult<sale_items::Model> {
    SaleItems::find_by_id((sale_id, product_id))
        .one(conn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))
}

pub async fn list_sale_items(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<SaleItemList>> {
    let (skip, limit) = pagination.normalize();
    let finder = SaleItems::find()
        .order_by_asc(Column::SaleId)
        .order_by_asc(Column::ProductId);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .offset(skip)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(SaleItem::from)
        .collect();

    let meta = Meta::new(skip, limit, total);
    Ok(ApiResponse::success("Sale items", SaleItemList { items }, Some(meta)))
}

/// Lines of one sale. An unknown sale simply has no lines.
pub async fn list_items_for_sale(
    state: &AppState,
    sale_id: i32,
) -> AppResult<ApiResponse<SaleItemList>> {
    let items = SaleItems::find()
        .filter(Column::SaleId.eq(sale_id))
        .order_by_asc(Column::ProductId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(SaleItem::from)
        .collect();

    Ok(ApiResponse::success(
        "Sale items",
        SaleItemList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_sale_item(
    state: &AppState,
    sale_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<SaleItem>> {
    let item = find_item(&state.orm, sale_id, product_id).await?;
    Ok(ApiResponse::success("Sale item", item.into(), None))
}

/// Adds a product line to a sale and refreshes the sale total.
///
/// The sale is locked first; a missing sale or product aborts before the line
/// is written. A second line for the same product is a constraint violation.
pub async fn create_sale_item(
    state: &AppState,
    payload: CreateSaleItemRequest,
) -> AppResult<ApiResponse<SaleItem>> {
    let (item, sale) = insert_line(state, payload)
        .await
        .map_err(AppError::into_create_failure)?;

    tracing::info!(
        sale_id = item.sale_id,
        product_id = item.product_id,
        quantity = item.quantity,
        total = sale.total,
        "sale item created"
    );

    Ok(ApiResponse::success(
        "Sale item created",
        item.into(),
        Some(Meta::empty()),
    ))
}

async fn insert_line(
    state: &AppState,
    payload: CreateSaleItemRequest,
) -> AppResult<(sale_items::Model, sales::Model)> {
    let txn = state.orm.begin().await?;

    let sale = lock_sale(&txn, payload.sale_id).await?;
    if Products::find_by_id(payload.product_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Product not found"));
    }

    let item = ActiveModel {
        sale_id: Set(sale.id),
        product_id: Set(payload.product_id),
        quantity: Set(payload.quantity),
    }
    .insert(&txn)
    .await?;

    let sale = recalculate_total(&txn, sale).await?;
    txn.commit().await?;

    Ok((item, sale))
}

pub async fn update_sale_item(
    state: &AppState,
    sale_id: i32,
    product_id: i32,
    payload: UpdateSaleItemRequest,
) -> AppResult<ApiResponse<SaleItem>> {
    let txn = state.orm.begin().await?;

    let sale = lock_sale(&txn, sale_id).await?;
    let existing = find_item(&txn, sale_id, product_id).await?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }

    let item = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };

    let sale = recalculate_total(&txn, sale).await?;
    txn.commit().await?;

    tracing::info!(
        sale_id,
        product_id,
        quantity = item.quantity,
        total = sale.total,
        "sale item updated"
    );

    Ok(ApiResponse::success("Updated", item.into(), Some(Meta::empty())))
}

pub async fn delete_sale_item(
    state: &AppState,
    sale_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<SaleItem>> {
    let txn = state.orm.begin().await?;

    let sale = lock_sale(&txn, sale_id).await?;
    let existing = find_item(&txn, sale_id, product_id).await?;
    SaleItems::delete_by_id((sale_id, product_id))
        .exec(&txn)
        .await?;

    let sale = recalculate_total(&txn, sale).await?;
    txn.commit().await?;

    tracing::info!(sale_id, product_id, total = sale.total, "sale item deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
