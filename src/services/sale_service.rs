use chrono::Local;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::sales::{CreateSaleRequest, SaleList, SaleWithItems, UpdateSaleRequest},
    entity::{
        sale_items::{Column as SaleItemCol, Entity as SaleItems},
        sales::{ActiveModel, Column, Entity as Sales},
    },
    error::{AppError, AppResult},
    models::{Sale, SaleItem},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::totals::{lock_sale, recalculate_total},
    state::AppState,
};

const NOT_FOUND: &str = "Sale not found";

/// Lists sales with their cached totals; no recalculation happens here.
pub async fn list_sales(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<SaleList>> {
    let (skip, limit) = pagination.normalize();
    let finder = Sales::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .offset(skip)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Sale::from)
        .collect();

    let meta = Meta::new(skip, limit, total);
    Ok(ApiResponse::success("Sales", SaleList { items }, Some(meta)))
}

/// Returns the sale with its lines after refreshing and persisting its total.
pub async fn get_sale(state: &AppState, id: i32) -> AppResult<ApiResponse<SaleWithItems>> {
    let txn = state.orm.begin().await?;

    let sale = lock_sale(&txn, id).await?;
    let sale = recalculate_total(&txn, sale).await?;

    let items = SaleItems::find()
        .filter(SaleItemCol::SaleId.eq(sale.id))
        .order_by_asc(SaleItemCol::ProductId)
        .all(&txn)
        .await?
        .into_iter()
        .map(SaleItem::from)
        .collect();

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Sale",
        SaleWithItems {
            sale: sale.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn create_sale(
    state: &AppState,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<Sale>> {
    let sale_date = payload
        .sale_date
        .unwrap_or_else(|| Local::now().date_naive());

    let sale = ActiveModel {
        id: NotSet,
        customer_id: Set(payload.customer_id),
        sale_date: Set(sale_date),
        total: Set(payload.total.unwrap_or(0.0)),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| AppError::from(err).into_create_failure())?;

    tracing::info!(
        sale_id = sale.id,
        customer_id = ?sale.customer_id,
        "sale created"
    );

    Ok(ApiResponse::success(
        "Sale created",
        sale.into(),
        Some(Meta::empty()),
    ))
}

/// A `total` supplied here is stored as given and replaced on the next
/// recalculation.
pub async fn update_sale(
    state: &AppState,
    id: i32,
    payload: UpdateSaleRequest,
) -> AppResult<ApiResponse<Sale>> {
    let txn = state.orm.begin().await?;

    let existing = lock_sale(&txn, id).await?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(customer_id) = payload.customer_id {
        active.customer_id = Set(customer_id);
    }
    if let Some(sale_date) = payload.sale_date {
        active.sale_date = Set(sale_date);
    }
    if let Some(total) = payload.total {
        active.total = Set(total);
    }

    let sale = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };
    txn.commit().await?;

    tracing::info!(sale_id = sale.id, "sale updated");

    Ok(ApiResponse::success("Updated", sale.into(), Some(Meta::empty())))
}

/// Deletes the sale; its lines go with it through the cascading foreign key.
pub async fn delete_sale(state: &AppState, id: i32) -> AppResult<ApiResponse<Sale>> {
    let txn = state.orm.begin().await?;

    let existing = Sales::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Sales::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(sale_id = id, "sale deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
