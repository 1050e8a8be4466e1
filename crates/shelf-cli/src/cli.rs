use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelf", about = "Shelf — item CRUD over HTTP", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to the store and serve the item API
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config(ServeArgs),
}

/// Configuration sources shared by `serve` and `config`.
///
/// Flags take precedence over the environment, which takes precedence over
/// the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on
    #[arg(long)]
    pub host: Option<IpAddr>,
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Store connection string (memory:// or file://<path>)
    #[arg(long)]
    pub store_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["shelf", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.port.is_none());
            assert!(args.store_uri.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "shelf",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--store-uri",
            "memory://",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.host, Some("127.0.0.1".parse().unwrap()));
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.store_uri.as_deref(), Some("memory://"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_rejects_bad_port() {
        assert!(Cli::try_parse_from(["shelf", "serve", "--port", "http"]).is_err());
    }

    #[test]
    fn parse_config_with_file() {
        let cli = Cli::try_parse_from(["shelf", "config", "-c", "shelf.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ServeArgs { config: Some(_), .. })));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["shelf", "--verbose", "serve"]).unwrap();
        assert!(cli.verbose);
    }
}
