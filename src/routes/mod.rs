use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod sale_items;
pub mod sales;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/clientes", customers::router())
        .nest("/produtos", products::router())
        .nest("/vendas", sales::router())
        .nest("/venda_produto", sale_items::router())
}
