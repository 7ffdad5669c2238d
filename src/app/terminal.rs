//! Logging setup.

/// Maps `-q` / `-v` flags to a default filter. `RUST_LOG` still wins.
pub(crate) fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color_env_requested())
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::default_log_level;

    #[test]
    fn test_default_log_level_from_flags() {
        assert_eq!(default_log_level(0, false), "info");
        assert_eq!(default_log_level(1, false), "debug");
        assert_eq!(default_log_level(3, false), "trace");
    }

    #[test]
    fn test_default_log_level_quiet_wins() {
        assert_eq!(default_log_level(2, true), "error");
    }
}
