use inventario_api::{
    config::AppConfig,
    db::{bootstrap_schema, create_pool},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url)?;
    bootstrap_schema(&pool).await?;
    println!("Schema bootstrap applied");
    Ok(())
}
