use clap::Parser;
use rss_translator::config::Config;
use rss_translator::pipeline::Pipeline;
use rss_translator::translator;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = Config::parse();
    info!("Starting rss-translator for {}", config.feed_url);

    let translator = translator::from_config(&config)?;
    let pipeline = Pipeline::new(config, translator)?;

    if let Err(e) = pipeline.run().await {
        error!("Pipeline failed: {}", e);
        return Err(e.into());
    }

    info!("Done");
    Ok(())
}
