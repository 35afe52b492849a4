use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::customers::{ActiveModel, Column, Entity as Customers},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

const NOT_FOUND: &str = "Customer not found";

pub async fn list_customers(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<CustomerList>> {
    let (skip, limit) = pagination.normalize();
    let finder = Customers::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .offset(skip)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    let meta = Meta::new(skip, limit, total);
    Ok(ApiResponse::success("Customers", CustomerList { items }, Some(meta)))
}

pub async fn get_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(ApiResponse::success("Customer", customer.into(), None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let customer = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        address: Set(payload.address),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(customer_id = customer.id, "customer created");

    Ok(ApiResponse::success(
        "Customer created",
        customer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: i32,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let txn = state.orm.begin().await?;

    let existing = Customers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = payload.address {
        active.address = Set(address);
    }

    let customer = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };
    txn.commit().await?;

    tracing::info!(customer_id = customer.id, "customer updated");

    Ok(ApiResponse::success(
        "Updated",
        customer.into(),
        Some(Meta::empty()),
    ))
}

/// Deletes the customer; their sales stay and lose the customer reference.
pub async fn delete_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let txn = state.orm.begin().await?;

    let existing = Customers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Customers::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(customer_id = id, "customer deleted");

    Ok(ApiResponse::success(
        "Deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
