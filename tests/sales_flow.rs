mod common;

use sales_api::{
    dto::{
        customers::{CreateCustomerRequest, UpdateCustomerRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        sale_items::{CreateSaleItemRequest, UpdateSaleItemRequest},
        sales::{CreateSaleRequest, UpdateSaleRequest},
    },
    entity::sales::Entity as Sales,
    error::AppError,
    models::{Customer, Product, Sale},
    services::{customer_service, product_service, sale_item_service, sale_service},
    state::AppState,
};
use sea_orm::EntityTrait;

use common::{setup_state, unique};

async fn create_customer(state: &AppState, name: &str) -> anyhow::Result<Customer> {
    let resp = customer_service::create_customer(
        state,
        CreateCustomerRequest {
            name: name.to_string(),
            email: format!("{}@x.com", unique(name)),
            phone: Some("11 5555-0000".into()),
            address: None,
        },
    )
    .await?;
    Ok(resp.data.unwrap())
}

async fn create_product(state: &AppState, price: f64, stock: i32) -> anyhow::Result<Product> {
    let resp = product_service::create_product(
        state,
        CreateProductRequest {
            name: unique("Widget"),
            description: Some("test product".into()),
            price,
            stock_quantity: stock,
        },
    )
    .await?;
    Ok(resp.data.unwrap())
}

async fn create_sale(state: &AppState, customer_id: Option<i32>) -> anyhow::Result<Sale> {
    let resp = sale_service::create_sale(
        state,
        CreateSaleRequest {
            customer_id,
            ..Default::default()
        },
    )
    .await?;
    Ok(resp.data.unwrap())
}

async fn add_line(
    state: &AppState,
    sale_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<(), AppError> {
    sale_item_service::create_sale_item(
        state,
        CreateSaleItemRequest {
            sale_id,
            product_id,
            quantity,
        },
    )
    .await?;
    Ok(())
}

async fn fresh_total(state: &AppState, sale_id: i32) -> anyhow::Result<f64> {
    let sale = sale_service::get_sale(state, sale_id).await?.data.unwrap();
    Ok(sale.sale.total)
}

// Ana buys three widgets, then one, then none.
#[tokio::test]
async fn sale_total_follows_line_mutations() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let ana = create_customer(&state, "Ana").await?;
    let widget = create_product(&state, 10.0, 5).await?;
    let sale = create_sale(&state, Some(ana.id)).await?;
    assert_eq!(sale.total, 0.0);
    assert_eq!(sale.customer_id, Some(ana.id));

    add_line(&state, sale.id, widget.id, 3).await?;
    let detail = sale_service::get_sale(&state, sale.id).await?.data.unwrap();
    assert_eq!(detail.sale.total, 30.0);
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].quantity, 3);

    sale_item_service::update_sale_item(
        &state,
        sale.id,
        widget.id,
        UpdateSaleItemRequest { quantity: Some(1) },
    )
    .await?;
    assert_eq!(fresh_total(&state, sale.id).await?, 10.0);

    let deleted = sale_item_service::delete_sale_item(&state, sale.id, widget.id)
        .await?
        .data
        .unwrap();
    assert_eq!(deleted.quantity, 1);

    let detail = sale_service::get_sale(&state, sale.id).await?.data.unwrap();
    assert_eq!(detail.sale.total, 0.0);
    assert!(detail.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn stored_total_is_updated_by_line_writes() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let pen = create_product(&state, 2.5, 100).await?;
    let book = create_product(&state, 40.0, 10).await?;
    let sale = create_sale(&state, None).await?;

    add_line(&state, sale.id, pen.id, 4).await?;
    add_line(&state, sale.id, book.id, 2).await?;

    // read the row directly so no refresh-on-read is involved
    let stored = Sales::find_by_id(sale.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored.total, 90.0);

    Ok(())
}

#[tokio::test]
async fn sale_without_lines_reads_as_zero() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let sale = sale_service::create_sale(
        &state,
        CreateSaleRequest {
            total: Some(99.0),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(sale.total, 99.0);

    assert_eq!(fresh_total(&state, sale.id).await?, 0.0);

    // the refreshed value is persisted, not just returned
    let stored = Sales::find_by_id(sale.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored.total, 0.0);

    Ok(())
}

#[tokio::test]
async fn partial_updates_leave_other_fields() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let product = create_product(&state, 10.0, 5).await?;
    let updated = product_service::update_product(
        &state,
        product.id,
        UpdateProductRequest {
            price: Some(12.0),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.price, 12.0);
    assert_eq!(updated.name, product.name);
    assert_eq!(updated.description, product.description);
    assert_eq!(updated.stock_quantity, 5);

    let zeroed = product_service::update_product(
        &state,
        product.id,
        UpdateProductRequest {
            stock_quantity: Some(0),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(zeroed.stock_quantity, 0);
    assert_eq!(zeroed.price, 12.0);

    let customer = create_customer(&state, "Bia").await?;
    let cleared = customer_service::update_customer(
        &state,
        customer.id,
        UpdateCustomerRequest {
            phone: Some(None),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(cleared.phone, None);
    assert_eq!(cleared.name, customer.name);
    assert_eq!(cleared.email, customer.email);

    let untouched = customer_service::update_customer(
        &state,
        customer.id,
        UpdateCustomerRequest::default(),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(untouched, cleared);

    let sale = create_sale(&state, Some(customer.id)).await?;
    let moved = sale_service::update_sale(
        &state,
        sale.id,
        UpdateSaleRequest {
            total: Some(5.0),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(moved.customer_id, Some(customer.id));
    assert_eq!(moved.sale_date, sale.sale_date);
    assert_eq!(moved.total, 5.0);

    Ok(())
}

#[tokio::test]
async fn deleting_a_sale_removes_its_lines() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let a = create_product(&state, 1.0, 1).await?;
    let b = create_product(&state, 2.0, 1).await?;
    let sale = create_sale(&state, None).await?;
    add_line(&state, sale.id, a.id, 1).await?;
    add_line(&state, sale.id, b.id, 1).await?;

    let deleted = sale_service::delete_sale(&state, sale.id).await?.data.unwrap();
    assert_eq!(deleted.id, sale.id);
    assert_eq!(deleted.total, 3.0);

    let err = sale_item_service::get_sale_item(&state, sale.id, a.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let lines = sale_item_service::list_items_for_sale(&state, sale.id)
        .await?
        .data
        .unwrap();
    assert!(lines.items.is_empty());

    let err = sale_service::get_sale(&state, sale.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Sale not found")));

    // the products themselves are no longer referenced and can go
    product_service::delete_product(&state, a.id).await?;

    Ok(())
}

#[tokio::test]
async fn line_for_missing_sale_is_rejected_before_writing() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let product = create_product(&state, 10.0, 5).await?;
    let err = add_line(&state, i32::MAX, product.id, 2).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Sale not found")));

    let err = sale_item_service::get_sale_item(&state, i32::MAX, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let sale = create_sale(&state, None).await?;
    let err = add_line(&state, sale.id, i32::MAX, 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("Product not found")));
    assert_eq!(fresh_total(&state, sale.id).await?, 0.0);

    let err = sale_item_service::update_sale_item(
        &state,
        sale.id,
        product.id,
        UpdateSaleItemRequest { quantity: Some(3) },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Sale item not found")));

    Ok(())
}

#[tokio::test]
async fn storage_constraints_surface_as_constraint_errors() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let customer = create_customer(&state, "Caio").await?;
    let err = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Caio Again".into(),
            email: customer.email.clone(),
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)));

    let product = create_product(&state, 7.0, 3).await?;
    let sale = create_sale(&state, None).await?;
    add_line(&state, sale.id, product.id, 1).await?;

    let err = add_line(&state, sale.id, product.id, 2).await.unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)));
    // the failed insert rolled back; the first line still defines the total
    assert_eq!(fresh_total(&state, sale.id).await?, 7.0);

    let err = product_service::delete_product(&state, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)));
    product_service::get_product(&state, product.id).await?;

    let err = create_sale(&state, Some(i32::MAX)).await.unwrap_err();
    let err = err.downcast::<AppError>()?;
    assert!(matches!(err, AppError::Constraint(_)));

    Ok(())
}

#[tokio::test]
async fn deleting_a_customer_keeps_their_sales() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let customer = create_customer(&state, "Duda").await?;
    let sale = create_sale(&state, Some(customer.id)).await?;

    let deleted = customer_service::delete_customer(&state, customer.id)
        .await?
        .data
        .unwrap();
    assert_eq!(deleted.id, customer.id);

    let err = customer_service::get_customer(&state, customer.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Customer not found")));

    let detail = sale_service::get_sale(&state, sale.id).await?.data.unwrap();
    assert_eq!(detail.sale.customer_id, None);

    Ok(())
}

// Concurrent line inserts on one sale must leave the stored total equal to the
// sum over every line, not a stale intermediate value.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_line_inserts_keep_total_consistent() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let sale = create_sale(&state, None).await?;
    let mut products = Vec::new();
    for i in 1..=8 {
        products.push(create_product(&state, f64::from(i), 100).await?);
    }

    let mut handles = Vec::new();
    for product in &products {
        let state = state.clone();
        let (sale_id, product_id) = (sale.id, product.id);
        handles.push(tokio::spawn(async move {
            add_line(&state, sale_id, product_id, 2).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let expected: f64 = products.iter().map(|p| p.price * 2.0).sum();
    let stored = Sales::find_by_id(sale.id).one(&state.orm).await?.unwrap();
    assert_eq!(stored.total, expected);

    Ok(())
}
