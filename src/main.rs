use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use meme_vault::cli::{Cli, Commands};
use meme_vault::config::AppConfig;
use meme_vault::context::VaultContext;
use meme_vault::service::{self, add::MemeOverrides};
use meme_vault::ui::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        Output::new().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // init 不读取现有配置，损坏的配置也能重新初始化
    if !cli.command.needs_vault() {
        AppConfig::validate_scope_flags(cli.local, cli.global)?;
        return service::init::initialize(cli.local).await;
    }

    let ctx = VaultContext::open(cli.local, cli.global).await?;

    match cli.command {
        Commands::Init => service::init::initialize(cli.local).await,
        Commands::Add {
            input,
            title,
            description,
        } => service::add::add(&ctx, &input, MemeOverrides { title, description }).await,
        Commands::List { query, json } => service::list::list(&ctx, query.as_deref(), json).await,
        Commands::Browse => service::browse::browse(&ctx).await,
        Commands::Copy { id } => service::copy::copy_url(&ctx, &id).await,
        Commands::CopyImage { id } => service::copy::copy_image(&ctx, &id).await,
        Commands::Favorite { id } => service::favorite::favorite(&ctx, &id).await,
        Commands::Delete { id, force } => service::delete::delete(&ctx, &id, force).await,
        Commands::Show { id } => service::show::show(&ctx, &id).await,
        Commands::Stats => service::stats::stats(&ctx).await,
        Commands::Preview { url } => service::preview::preview(&ctx, &url).await,
    }
}
