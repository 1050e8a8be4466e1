use anyhow::Context;
use shelf_server::{ServerConfig, ShelfServer};

use crate::cli::{Cli, Command, ServeArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Config(args) => cmd_config(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args, |key| std::env::var(key).ok())?;
    ShelfServer::new(config)
        .serve()
        .await
        .context("server terminated")
}

fn cmd_config(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args, |key| std::env::var(key).ok())?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Layer defaults, config file, environment and flags, in that order.
fn resolve_config<F>(args: &ServeArgs, env: F) -> anyhow::Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config.apply_env_from(env).context("reading environment")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(uri) = &args.store_uri {
        config.store_uri = Some(uri.clone());
    }
    Ok(config)
}
