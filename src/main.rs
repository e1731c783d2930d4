use std::env;

use product_dedup::models::config::PipelineConfig;
use product_dedup::processing::embedding::FastembedEmbedder;
use product_dedup::processing::run_dedup_pipeline;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = env::var("DEDUP_CONFIG").unwrap_or_else(|_| "dedup.yaml".to_string());
    let config = match PipelineConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration from {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let mut embedder = match FastembedEmbedder::try_new() {
        Ok(embedder) => embedder,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if run_dedup_pipeline(&config, &mut embedder).is_err() {
        std::process::exit(1);
    }
}
