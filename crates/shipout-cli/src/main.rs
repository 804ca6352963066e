use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
pub mod exit_codes;

use cli::args::Cli;
use cli::commands::dispatch;

/// Filter used when `RUST_LOG` is unset.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,shipout=debug"
    } else {
        "info"
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.auth.debug)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Only output rendering fails here; the response was unusable.
            eprintln!("fatal: {e:?}");
            exit_codes::TRANSPORT_ERROR
        }
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_raises_library_log_level() {
        assert_eq!(default_filter(false), "info");
        assert!(default_filter(true).contains("shipout=debug"));
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
