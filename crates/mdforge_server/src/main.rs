//! Headless generation API server entrypoint.

use mdforge_server::{config::env_flag_enabled, AppState, Config, DEFAULT_PORT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" => flags.help = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mdforge=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!(
            "GROQ_API_KEY is not set - generation requests will fail with a configuration error"
        );
    }

    let state = AppState::new(config.clone());

    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }

    let bind_addr = mdforge_server::resolve_bind_address(&config, allow_public);
    if !bind_addr.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - ensure proper security measures are in place",
            bind_addr
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("mdforge running at http://{}", actual_addr);

    mdforge_server::serve_router(listener, state, allow_public, shutdown_signal()).await?;

    Ok(())
}

fn print_help() {
    println!("mdforge Server\n");
    println!("Usage: mdforge [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  PORT                    Server port (default: {})", DEFAULT_PORT);
    println!("  GROQ_API_KEY            Upstream API key (required for generation)");
    println!("  GROQ_BASE_URL           OpenAI-compatible upstream base URL");
    println!("  GENERATION_MODEL        Upstream model identifier");
    println!("  GENERATION_TEMPERATURE  Sampling temperature (default: 0.7)");
    println!("  GENERATION_MAX_TOKENS   Response token cap (default: 4096)");
    println!("  GENERATION_TOP_P        Nucleus sampling cutoff (default: 0.9)");
    println!("  RATE_LIMIT_WINDOW_SECS  Admission window in seconds (default: 60)");
    println!("  RATE_LIMIT_MAX_REQUESTS Admitted requests per window (default: 5)");
    println!("  ALLOW_PUBLIC_ACCESS     Allow CORS from any origin");
    println!("  BIND                    Override bind address (e.g. 0.0.0.0:{})", DEFAULT_PORT);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_cli_flags, CliFlags};

    #[test]
    fn parse_cli_flags_rejects_unknown_and_positional_arguments() {
        let cases = [
            (
                vec!["mdforge".to_string(), "--hlep".to_string()],
                "Unknown option",
            ),
            (
                vec!["mdforge".to_string(), "serve".to_string()],
                "Unexpected positional argument",
            ),
        ];

        for (args, expected_fragment) in cases {
            let err = parse_cli_flags(&args).expect_err("invalid args should be rejected");
            assert!(err.to_string().contains(expected_fragment));
        }
    }

    #[test]
    fn parse_cli_flags_accepts_help() {
        let args = vec!["mdforge".to_string(), "--help".to_string()];
        let flags = parse_cli_flags(&args).expect("known options should parse");
        assert_eq!(flags, CliFlags { help: true });
    }
}
