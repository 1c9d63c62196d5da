use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_diag::{run, DEFAULT_MODEL};
use wayfare_infra::{app_config::GOOGLE_API_KEY, GeminiModel, LanguageModel, RemoteModelConfig};
use wayfare_shared::Masked;

#[derive(Parser, Debug)]
#[command(name = "wayfare-diag", about = "Check the Google API key and make one test call to the hosted model")]
struct Args {
    /// Model as provider/model
    #[arg(long, env = "WAYFARE_DIAG_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Override the provider endpoint (proxies, emulators)
    #[arg(long)]
    base_url: Option<String>,

    /// Dotenv file loaded before reading the key; its values override the environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_diag=info,wayfare_infra=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match dotenvy::from_path_override(&args.env_file) {
        Ok(()) => tracing::debug!("Loaded {}", args.env_file.display()),
        Err(e) if e.not_found() => tracing::debug!("No {} file", args.env_file.display()),
        Err(e) => tracing::warn!("Could not read {}: {}", args.env_file.display(), e),
    }

    let api_key = std::env::var(GOOGLE_API_KEY).ok();
    let base_url = args.base_url.clone();

    let mut stdout = std::io::stdout().lock();
    let verdict = run(&mut stdout, api_key.as_deref(), &args.model, |key, model| {
        let mut config = RemoteModelConfig::new(Masked::new(key.to_string()), model);
        if let Some(url) = base_url {
            config = config.with_base_url(url);
        }
        let model: Box<dyn LanguageModel> = Box::new(GeminiModel::new(config)?);
        Ok(model)
    })
    .await?;

    Ok(verdict.exit_code())
}
