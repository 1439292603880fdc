use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use enrolliq_api::config::ApiConfig;
use enrolliq_api::{handlers, helpers, AppState};
use enrolliq_core::{AskService, SqlSynthesizer};
use enrolliq_store::PgExecutor;
use shared_types::SchemaDescription;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "enrolliq-api", about = "Enrollment statistics query assistant")]
struct Args {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "loading configuration");
            ApiConfig::load_from(path)?
        }
        None => {
            let (config, path) = ApiConfig::load()?;
            info!(config = %path.display(), "loaded configuration");
            config
        }
    };

    let client = helpers::llm::create_llm_client(&config)?;
    let model = helpers::llm::synthesis_model(&config);
    let synthesizer = SqlSynthesizer::new(client, model, SchemaDescription::enrollment());
    let executor = Arc::new(PgExecutor::connect(&config.store.url)?);
    let service = Arc::new(AskService::new(synthesizer, executor));
    let state = web::Data::new(AppState { service });

    let allowed_origins = config
        .cors
        .map(|cors| cors.allowed_origins)
        .unwrap_or_default();

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting enrolliq-api server at http://{}", bind_addr);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(actix_web::http::header::CONTENT_TYPE)
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(handlers::ask::ask)
            .service(handlers::schema::get_schema)
            .service(handlers::health::health)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
