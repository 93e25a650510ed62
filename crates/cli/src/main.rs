use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Books API with token-guarded routes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the OpenAPI document as JSON
    Openapi {
        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Folio settings")?;
    folio_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(env = ?settings.environment, "folio serve");

            tokio::runtime::Runtime::new()
                .context("failed to start tokio runtime")?
                .block_on(folio_app::run(settings))
        }
        Command::Openapi { compact } => {
            let registry = folio_app::build_registry(&settings);
            let document = folio_http::openapi::document(&registry, &settings)?;
            let rendered = if compact {
                serde_json::to_string(&document)?
            } else {
                serde_json::to_string_pretty(&document)?
            };
            println!("{rendered}");
            Ok(())
        }
    }
}
