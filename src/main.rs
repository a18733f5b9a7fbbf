use chrono::{DateTime, Utc};
use clap::Parser;
use dual_chronos::clock::{Selection, Snapshot};
use dual_chronos::location::{self, format_coords, LOCATIONS};
use dual_chronos::ticker::ClockSession;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dual Chronos — two-location world clock
///
/// Shows the local time at two locations and the great-circle distance
/// between them. Names are matched case-insensitively, with aliases and
/// small typos accepted.
///
/// Examples:
///   dualclock Korea "New York"
///   dualclock seoul nyc --watch
///   dualclock Japan England --at 2026-01-15T06:04:05Z
///   dualclock --list
///   dualclock --serve --port 8080
#[derive(Parser)]
#[command(name = "dualclock", version, about, long_about = None)]
struct Cli {
    /// Reference location. Example: Korea
    #[arg(index = 1)]
    first: Option<String>,

    /// Location to compare. Example: "New York"
    #[arg(index = 2)]
    second: Option<String>,

    /// Render at a fixed RFC 3339 instant instead of now.
    #[arg(long, conflicts_with = "watch")]
    at: Option<String>,

    /// Refresh once per second until Ctrl+C.
    #[arg(long, short = 'w')]
    watch: bool,

    /// Stop watching after N refreshes.
    #[arg(long, requires = "watch")]
    ticks: Option<usize>,

    /// List the available locations.
    #[arg(long, short = 'l')]
    list: bool,

    /// Serve the web widget over HTTP.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

/// Directives from `RUST_LOG` win; `default_level` applies only when it is unset or empty.
fn log_filter(default_level: tracing::Level, env: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(env.unwrap_or(""))
}

fn init_logging(default_level: tracing::Level) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(default_level, env.as_deref()))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(if cli.serve { tracing::Level::INFO } else { tracing::Level::WARN });

    if let Err(e) = location::validate_table() {
        tracing::error!("Location table is inconsistent: {}", e);
        std::process::exit(1);
    }

    if cli.serve {
        dual_chronos::server::start(&cli.host, cli.port).await;
        return;
    }

    if cli.list {
        print_list();
        return;
    }

    let selection = Selection {
        first: cli.first.as_deref().map(resolve_name),
        second: cli.second.as_deref().map(resolve_name),
    };

    if !selection.is_complete() {
        eprintln!("Error: Two locations are required.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  dualclock Korea \"New York\"");
        eprintln!("  dualclock --list");
        std::process::exit(1);
    }

    if cli.watch {
        watch(selection, cli.ticks).await;
        return;
    }

    let at = match &cli.at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|e| {
                eprintln!("Error: Invalid instant '{}': {}", s, e);
                std::process::exit(1);
            }),
        None => Utc::now(),
    };

    let snapshot = Snapshot::capture(&selection, at);
    if let Some(ref snap) = snapshot {
        eprint!("{}", snap.render());
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Cannot serialize snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

/// Map typed input to a table name; unknown input is kept as typed.
fn resolve_name(query: &str) -> String {
    match location::resolve(query) {
        Some(loc) => {
            if loc.name != query {
                tracing::debug!("resolved '{}' to '{}'", query, loc.name);
            }
            loc.name.to_string()
        }
        None => {
            tracing::warn!("unknown location '{}'", query);
            query.to_string()
        }
    }
}

fn print_list() {
    let width = LOCATIONS.iter().map(|l| l.name.len()).max().unwrap_or(0);
    for loc in LOCATIONS {
        println!(
            "{:<width$}  {:<20}  {}",
            loc.name,
            loc.tz,
            format_coords(loc.lat, loc.lon),
            width = width
        );
    }
}

async fn watch(selection: Selection, ticks: Option<usize>) {
    let mut session = ClockSession::new();
    let mut rx = session.subscribe();
    session.select(selection);

    let mut seen = 0usize;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(snap) = rx.borrow_and_update().as_ref() {
                    eprint!("{}", snap.render());
                    eprintln!();
                }
                seen += 1;
                if ticks.is_some_and(|n| seen >= n) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.stop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;
    use tracing::Level;

    #[test]
    fn test_log_filter_env_level_wins() {
        let filter = log_filter(Level::WARN, Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_env_target_directive() {
        let filter = log_filter(Level::INFO, Some("dual_chronos=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_log_filter_default_when_unset() {
        assert_eq!(log_filter(Level::WARN, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Level::INFO, Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_resolve_name_keeps_unknown_as_typed() {
        assert_eq!(resolve_name("seoul"), "Korea");
        assert_eq!(resolve_name("Atlantis"), "Atlantis");
    }
}
