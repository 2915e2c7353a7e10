//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Crates whose level `-v` raises.
const CRATES: [&str; 4] = ["taskly_core", "taskly_local_db", "taskly_tui", "taskly_cli"];

const DEFAULT_FILTER: &str = "warn";

/// Filter directives for a `-v` count, or `None` to defer to `RUST_LOG`.
pub fn directives(verbosity: u8) -> Option<String> {
    let level = match verbosity {
        0 => return None,
        1 => "debug",
        _ => "trace",
    };
    let crates = CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("{DEFAULT_FILTER},{crates}"))
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(verbosity: u8) {
    let filter = match directives(verbosity) {
        Some(directives) => EnvFilter::new(directives),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flag_defers_to_environment() {
        assert_eq!(directives(0), None);
    }

    #[test]
    fn verbose_flags_raise_taskly_crates() {
        let debug = directives(1).unwrap();
        assert!(debug.starts_with("warn,"));
        assert!(debug.contains("taskly_local_db=debug"));

        let trace = directives(3).unwrap();
        assert!(trace.contains("taskly_tui=trace"));
        assert!(!trace.contains("=debug"));
    }
}
