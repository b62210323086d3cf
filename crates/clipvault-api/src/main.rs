use clipvault_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Database, storage, upload flows and routes
    let (_state, router) = clipvault_api::setup::initialize_app(config.clone()).await?;

    clipvault_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
