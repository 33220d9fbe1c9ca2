use std::sync::Once;

const DEFAULT_FILTER: &str = "info";

/// `filter` uses the `env_logger` directive syntax, e.g. "debug" or "experimentgl=debug,gl_wrapper=info".
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Installs the global logger on the first call.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = filter_directives(config.filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&directives)
            .format_timestamp_millis()
            .init();

        log::debug!("log filter {directives:?}");
    });
}

/// `--log` wins over `RUST_LOG`. Blank values count as unset.
fn filter_directives(flag: Option<String>, env: Option<String>) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .find(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env() {
        assert_eq!(
            filter_directives(Some("debug".into()), Some("warn".into())),
            "debug"
        );
        assert_eq!(filter_directives(None, Some("warn".into())), "warn");
    }

    #[test]
    fn blank_falls_through() {
        assert_eq!(filter_directives(Some(" ".into()), None), "info");
        assert_eq!(filter_directives(Some(String::new()), Some("trace".into())), "trace");
        assert_eq!(filter_directives(None, None), "info");
    }

    #[test]
    fn second_init_is_ignored() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            filter: Some("trace".into()),
        });
    }
}
