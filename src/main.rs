use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use route53_dyndns::{Config, SharedConfig};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "route53-dyndns".to_string());
    let config_file = args.next();

    match config_file.as_deref() {
        Some("-h" | "--help") => {
            println!("{}", usage(&program_name));
            return Ok(());
        }
        Some("-V" | "--version") => {
            println!("{program_name} {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    tracing_init();

    let config = config_init(&program_name, config_file)?;
    let provider = config.record_provider()?;

    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = route53_dyndns::api::new(config.clone(), provider);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into())
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn usage(program_name: &str) -> String {
    format!(
        "usage: {program_name} [/path/to/config.json]\n\n\
         {program_name} is the HTTP dynamic DNS server for Route 53.\n\
         Without a path, the config is read from ${} or ~/{}.",
        route53_dyndns::config::CONFIG_ENVIRONMENT_VAR,
        route53_dyndns::config::DEFAULT_CONFIG_FILE,
    )
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route53_dyndns=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    match Config::locate(config_file) {
        None => Err(anyhow!("{}", usage(program_name))),
        Some(config_file) => {
            let config = Config::try_from_file(&config_file).map_err(|err| {
                anyhow!("failed to load config {}: {err}", config_file.display())
            })?;
            tracing::debug!("loaded config from {}", config_file.display());
            tracing::debug!("{config:?}");
            Ok(Arc::new(config))
        }
    }
}
