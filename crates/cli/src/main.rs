mod browse;
mod config;
mod render;
mod serve;
mod watch;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logs_viewer_core::{ClearTarget, DEFAULT_LIMIT, LogFiles, LogKind, clear_logs};

const DEFAULT_LOG_FILTER: &str = "logs_viewer=info,logs_viewer_server=info,tower_http=info";

#[derive(Parser)]
#[command(
    name = "logs-viewer",
    version,
    about = "Browse LLM payload and raw stream logs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the viewer page and its API
    Serve {
        /// Address to bind (default from config, else 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (default from config, else 8004)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List sessions and their runs
    Sessions {
        #[arg(long = "type", value_parser = ["payload", "raw"], default_value = "payload")]
        log_type: String,

        /// Number of trailing lines to read
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Print entries, optionally narrowed to one session or run
    Show {
        #[arg(long = "type", value_parser = ["payload", "raw"], default_value = "payload")]
        log_type: String,

        /// Number of trailing lines to read
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Full session key, as printed in raw entries
        #[arg(long)]
        session: Option<String>,

        /// Run id within --session
        #[arg(long, requires = "session")]
        run: Option<String>,

        /// Print history context messages instead of a count
        #[arg(long)]
        history: bool,
    },

    /// Print new entries as they are appended
    Watch {
        #[arg(long = "type", value_parser = ["payload", "raw"], default_value = "payload")]
        log_type: String,

        /// Window size per poll (default from config, else 100)
        #[arg(long)]
        limit: Option<usize>,

        /// Seconds between polls (default from config, else 5)
        #[arg(long)]
        interval: Option<u64>,

        /// Poll a running viewer instead of the local files
        #[arg(long)]
        url: Option<String>,
    },

    /// Truncate log files
    Clear {
        #[arg(long = "type", value_parser = ["payload", "raw", "all"], default_value = "payload")]
        log_type: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let files = LogFiles::default_location().context("Could not locate log directory")?;

    match command {
        Commands::Serve { bind, port } => {
            let mut settings = config::load_config()?.server;
            if let Some(bind) = bind {
                settings.bind = bind;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            serve::run_serve(files, &settings).await
        }
        Commands::Sessions { log_type, limit } => {
            browse::run_sessions(&files, LogKind::from_query(Some(log_type.as_str())), limit)
        }
        Commands::Show {
            log_type,
            limit,
            session,
            run,
            history,
        } => browse::run_show(
            &files,
            LogKind::from_query(Some(log_type.as_str())),
            limit,
            browse::Selection { session, run },
            history,
        ),
        Commands::Watch {
            log_type,
            limit,
            interval,
            url,
        } => {
            let settings = config::load_config()?.watch;
            let source = match url {
                Some(url) => watch::Source::remote(&url)?,
                None => watch::Source::Disk(files),
            };
            watch::run_watch(
                source,
                LogKind::from_query(Some(log_type.as_str())),
                limit.unwrap_or(settings.limit),
                interval.unwrap_or(settings.interval_secs),
            )
            .await
        }
        Commands::Clear { log_type } => {
            let target = ClearTarget::from_query(Some(log_type.as_str()));
            let deleted = clear_logs(&files, target).context("Failed to clear logs")?;
            println!("Cleared {deleted} log file(s)");
            Ok(())
        }
    }
}
