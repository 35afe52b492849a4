//! Sale total maintenance.
//!
//! `sales.total` is a persisted cache of `sum(quantity * product.price)` over the
//! sale's current lines. It is rewritten after every line mutation and on every
//! single-sale read ("refresh on read"); list endpoints return the cached value.
//! Every caller holds the sale row lock (`lock_sale`) inside its transaction, so
//! concurrent line mutations on one sale serialize on that row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, sea_query::LockType,
};

use crate::{
    entity::{
        products::Column as ProductCol,
        sale_items::{self, Column as SaleItemCol, Entity as SaleItems},
        sales::{self, Entity as Sales},
    },
    error::{AppError, AppResult},
};

/// One sale line joined with its product price. `unit_price` is `None` when
/// the product row is gone.
#[derive(Debug, Clone, Copy, PartialEq, FromQueryResult)]
pub struct PricedLine {
    pub quantity: i32,
    pub unit_price: Option<f64>,
}

/// Sum of `quantity * unit_price`, skipping lines without a price.
/// No lines (or no priced lines) gives exactly `0.0`.
pub fn sale_total(lines: &[PricedLine]) -> f64 {
    lines
        .iter()
        .filter_map(|line| line.unit_price.map(|price| price * f64::from(line.quantity)))
        .fold(0.0, |acc, subtotal| acc + subtotal)
}

/// `sale_total`, refusing results that cannot be stored or serialized
/// (overflow to infinity).
pub fn checked_sale_total(lines: &[PricedLine]) -> AppResult<f64> {
    let total = sale_total(lines);
    if total.is_finite() {
        Ok(total)
    } else {
        Err(AppError::BadRequest("Sale total is out of range".into()))
    }
}

/// Fetch the sale row with `FOR UPDATE`, or fail with NotFound before any write.
pub async fn lock_sale<C: ConnectionTrait>(conn: &C, sale_id: i32) -> AppResult<sales::Model> {
    Sales::find_by_id(sale_id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound("Sale not found"))
}

pub async fn load_priced_lines<C: ConnectionTrait>(
    conn: &C,
    sale_id: i32,
) -> AppResult<Vec<PricedLine>> {
    let lines = SaleItems::find()
        .select_only()
        .column(SaleItemCol::Quantity)
        .column_as(ProductCol::Price, "unit_price")
        .join(JoinType::LeftJoin, sale_items::Relation::Products.def())
        .filter(SaleItemCol::SaleId.eq(sale_id))
        .order_by_asc(SaleItemCol::ProductId)
        .into_model::<PricedLine>()
        .all(conn)
        .await?;
    Ok(lines)
}

/// Recompute the sale's total from its current lines and persist it. An
/// out-of-range total fails the caller's transaction.
pub async fn recalculate_total<C: ConnectionTrait>(
    conn: &C,
    sale: sales::Model,
) -> AppResult<sales::Model> {
    let lines = load_priced_lines(conn, sale.id).await?;
    let total = checked_sale_total(&lines)?;

    let mut active: sales::ActiveModel = sale.into();
    active.total = Set(total);
    let sale = active.update(conn).await?;

    tracing::debug!(sale_id = sale.id, lines = lines.len(), total, "sale total recalculated");
    Ok(sale)
}
