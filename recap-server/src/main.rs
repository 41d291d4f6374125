use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::{Arg, Command};
use recap_server::config::AppConfig;
use recap_server::database::Database;
use recap_server::email::{EmailSender, SmtpEmailSender, UnconfiguredEmailSender};
use recap_server::handlers::AppState;
use recap_server::middleware::SessionGate;
use recap_server::routes::configure_routes;
use recap_server::summarizer::SummaryGenerator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("recap-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recap - upload transcripts, generate AI summaries and share them by email")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    let (config, config_path) = match matches.get_one::<String>("config") {
        Some(path) => {
            let path = PathBuf::from(path);
            (AppConfig::load_from_file(&path)?, path)
        }
        None => AppConfig::load()?,
    };

    let directive = config
        .logging
        .as_ref()
        .map(|l| format!("recap_server={}", l.level))
        .unwrap_or_else(|| "recap_server=info".to_string());

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    tracing::info!("Starting recap server");
    tracing::info!("Loaded configuration from {}", config_path.display());

    let database = Arc::new(Database::new(&config.database.path)?);
    tracing::info!("Database initialized at {:?}", config.database.path);

    let summarizer = Arc::new(
        SummaryGenerator::from_config(&config.llm).context("Failed to create LLM client")?,
    );
    tracing::info!("Summaries will use model {}", summarizer.model());

    let email_sender: Arc<dyn EmailSender> = match &config.smtp {
        Some(smtp) => {
            tracing::info!("Email delivery via {}:{}", smtp.host, smtp.port);
            Arc::new(SmtpEmailSender::new(smtp).context("Failed to configure SMTP")?)
        }
        None => {
            tracing::warn!("No SMTP server configured; sharing summaries will fail");
            Arc::new(UnconfiguredEmailSender)
        }
    };

    let server_addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = web::Data::new(AppState {
        database,
        start_time: SystemTime::now(),
        config: Arc::new(config),
        summarizer,
        email_sender,
    });

    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionGate)
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
