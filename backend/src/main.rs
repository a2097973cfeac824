use backend::config::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    backend::init_tracing();

    let config = ServiceConfig::from_env()?;
    backend::serve(config).await
}
