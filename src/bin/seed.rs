use sales_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let ana = ensure_customer(&pool, "Ana Souza", "ana@example.com", Some("11 99999-0001")).await?;
    let bruno = ensure_customer(&pool, "Bruno Lima", "bruno@example.com", None).await?;
    seed_products(&pool).await?;

    println!("Seed completed. Customer IDs: {ana}, {bruno}");
    Ok(())
}

async fn ensure_customer(
    pool: &DbPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO customers (name, email, phone)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_one(pool)
    .await?;

    println!("Ensured customer {email}");
    Ok(id)
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<()> {
    let products = vec![
        ("Caderno", "Caderno universitario 200 folhas", 24.9, 120),
        ("Caneta azul", "Caneta esferografica", 2.5, 500),
        ("Mochila", "Mochila escolar", 149.0, 15),
        ("Calculadora", "Calculadora cientifica", 89.9, 30),
    ];

    for (name, desc, price, stock) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price, stock_quantity)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
