use locadora::{
    application::Locadora,
    cli,
    config::{AppConfig, DEFAULT_LOG_FILTER},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the menus on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(data_dir = %config.data_dir().display(), "starting");

    let mut shop = match Locadora::open(&config) {
        Ok(shop) => shop,
        Err(err) => {
            tracing::error!(error = ?err, "failed to load shop data");
            eprintln!("ERRO: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = cli::run(&mut shop) {
        tracing::error!(error = %err, "terminal interaction failed");
        eprintln!("ERRO: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
