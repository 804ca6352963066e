use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};
use shipout::ShipoutConfig;

#[derive(Parser, Debug)]
#[command(
    name = "shipout",
    version,
    about = "Command-line client for the ShipOut OMS open API"
)]
pub struct Cli {
    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List warehouses available to the account
    Warehouses(WarehousesArgs),
    /// Print the CLI version
    Version,
}

/// Credentials and connection settings, shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct AuthArgs {
    /// Application key
    #[arg(long, env = "SHIPOUT_APP_KEY", global = true, hide_env_values = true)]
    pub app_key: Option<String>,

    /// Signing secret
    #[arg(long, env = "SHIPOUT_SECRET_KEY", global = true, hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Bearer token
    #[arg(long, env = "SHIPOUT_AUTHORIZATION", global = true, hide_env_values = true)]
    pub authorization: Option<String>,

    /// Use the sandbox endpoint and log request/response detail
    #[arg(
        long,
        env = "SHIPOUT_DEBUG",
        global = true,
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SHIPOUT_TIMEOUT", global = true, default_value_t = 10)]
    pub timeout: u64,

    /// Override the API base URL
    #[arg(long, env = "SHIPOUT_ENDPOINT", global = true)]
    pub endpoint: Option<String>,
}

impl AuthArgs {
    pub fn to_config(&self) -> ShipoutConfig {
        let config = ShipoutConfig::default()
            .with_app_key(self.app_key.clone().unwrap_or_default())
            .with_secret_key(self.secret_key.clone().unwrap_or_default())
            .with_authorization(self.authorization.clone().unwrap_or_default())
            .with_debug(self.debug)
            .with_timeout_secs(self.timeout);

        match &self.endpoint {
            Some(url) => config.with_endpoint(url.as_str()),
            None => config,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct WarehousesArgs {
    /// Filter by warehouse name
    #[arg(long)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_warehouses_with_flags() {
        let cli = Cli::try_parse_from([
            "shipout",
            "--app-key",
            "app",
            "--secret-key",
            "secret",
            "--authorization",
            "token",
            "warehouses",
            "--name",
            "ABC",
            "--debug",
            "--timeout",
            "5",
        ])
        .expect("should parse");

        let Command::Warehouses(args) = &cli.cmd else {
            panic!("expected warehouses, got {:?}", cli.cmd);
        };
        assert_eq!(args.name.as_deref(), Some("ABC"));

        let config = cli.auth.to_config();
        assert_eq!(config.app_key, "app");
        assert_eq!(config.secret_key, "secret");
        assert_eq!(config.authorization, "token");
        assert!(config.debug);
        assert_eq!(config.timeout_secs, 5);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let cli = Cli::try_parse_from([
            "shipout",
            "warehouses",
            "--endpoint",
            "http://127.0.0.1:9000",
        ])
        .expect("should parse");

        assert_eq!(cli.auth.to_config().base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["shipout", "orders"]).is_err());
    }
}
