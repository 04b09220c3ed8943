use civic_app::cli::{Cli, Context, run};
use civic_app::{AppConfig, init_logger_with_file};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::from_env().with_overrides(cli.api_base_url, cli.work_dir);
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::debug!(api = %config.api_base_url, work_dir = %config.work_dir, "Configuration loaded");

    let ctx = Context::new(config)?;
    if let Err(e) = run(&ctx, cli.command).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e.into());
    }

    Ok(())
}
