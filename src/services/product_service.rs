use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

const NOT_FOUND: &str = "Product not found";

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (skip, limit) = pagination.normalize();
    let finder = Products::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .offset(skip)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(skip, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let product = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        stock_quantity: Set(payload.stock_quantity),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = product.id, price = product.price, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Price changes do not touch existing sale totals; they pick up the new
/// price on their next recalculation.
pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let txn = state.orm.begin().await?;

    let existing = Products::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        active.stock_quantity = Set(stock_quantity);
    }

    let product = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };
    txn.commit().await?;

    tracing::info!(product_id = product.id, "product updated");

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Fails with a constraint violation while sale lines still reference the product.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let txn = state.orm.begin().await?;

    let existing = Products::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Products::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(product_id = id, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
