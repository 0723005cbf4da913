use bikeshare_core::models::City;
use bikeshare_core::settings::DataSources;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto a tracing directive. Unknown names pass
/// through unchanged so `EnvFilter` can reject them.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber, writing to stderr so log
/// lines never interleave with the report on stdout.
///
/// Falls back to `"warn"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Data-source check ──────────────────────────────────────────────────────────

/// Cities whose CSV file is missing from `sources`. Each one is logged; the
/// session still starts so the remaining cities stay usable.
pub fn missing_sources(sources: &DataSources) -> Vec<City> {
    City::ALL
        .into_iter()
        .filter(|city| {
            let path = sources.path_for(*city);
            let missing = !path.is_file();
            if missing {
                warn!("No data file for {} at {}", city, path.display());
            }
            missing
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── level_directive ───────────────────────────────────────────────────────

    #[test]
    fn test_level_directive_python_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_level_directive_passes_through_unknown() {
        assert_eq!(level_directive("TRACE"), "trace");
    }

    // ── missing_sources ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_sources_all_absent() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = missing_sources(&DataSources::from_dir(tmp.path()));
        assert_eq!(missing, City::ALL.to_vec());
    }

    #[test]
    fn test_missing_sources_partial() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("chicago.csv"), "Start Time\n").expect("write");
        std::fs::write(tmp.path().join("washington.csv"), "Start Time\n").expect("write");

        let missing = missing_sources(&DataSources::from_dir(tmp.path()));
        assert_eq!(missing, vec![City::NewYorkCity]);
    }

    #[test]
    fn test_missing_sources_ignores_directories() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("chicago.csv")).expect("mkdir");

        let missing = missing_sources(&DataSources::from_dir(tmp.path()));
        assert!(missing.contains(&City::Chicago));
    }
}
