use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        sale_items::{CreateSaleItemRequest, SaleItemList, UpdateSaleItemRequest},
        sales::{CreateSaleRequest, SaleList, SaleWithItems, UpdateSaleRequest},
    },
    models::{Customer, Product, Sale, SaleItem},
    response::{ApiResponse, Meta},
    routes::{customers, health, params, products, sale_items, sales},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::database_check,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        sales::list_sales,
        sales::get_sale,
        sales::create_sale,
        sales::update_sale,
        sales::delete_sale,
        sales::list_sale_products,
        sale_items::list_sale_items,
        sale_items::get_sale_item,
        sale_items::create_sale_item,
        sale_items::update_sale_item,
        sale_items::delete_sale_item
    ),
    components(
        schemas(
            Customer,
            Product,
            Sale,
            SaleItem,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CreateProductRequest,
            UpdateProductRequest,
            CreateSaleRequest,
            UpdateSaleRequest,
            CreateSaleItemRequest,
            UpdateSaleItemRequest,
            CustomerList,
            ProductList,
            SaleList,
            SaleItemList,
            SaleWithItems,
            params::Pagination,
            health::HealthData,
            Meta,
            ApiResponse<Customer>,
            ApiResponse<Product>,
            ApiResponse<Sale>,
            ApiResponse<SaleItem>,
            ApiResponse<SaleWithItems>,
            ApiResponse<CustomerList>,
            ApiResponse<ProductList>,
            ApiResponse<SaleList>,
            ApiResponse<SaleItemList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Sales", description = "Sale endpoints"),
        (name = "Sale items", description = "Sale line endpoints; every mutation refreshes the sale total"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_sale_item_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/venda_produto"));
        assert!(
            doc.paths
                .paths
                .contains_key("/api/venda_produto/{sale_id}/{product_id}")
        );
        assert!(doc.paths.paths.contains_key("/api/vendas/{id}/produtos"));
    }
}
