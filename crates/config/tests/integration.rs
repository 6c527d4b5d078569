//! Integration tests for config

#[cfg(test)]
mod tests {
    use bankers_config::*;
    use bankers_types::{ColorChoice, OutputFormat, ScanOrder};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            constants::ENV_OUTPUT,
            constants::ENV_COLOR,
            constants::ENV_SCAN_ORDER,
            constants::ENV_TRACE,
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[evaluation]
scan_order = "restart_after_grant"
trace = true

[paths]
log_dir = "/tmp/bankers-logs"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.evaluation.scan_order, ScanOrder::RestartAfterGrant);
        assert!(config.evaluation.trace);
        assert_eq!(
            config.log_dir(),
            std::path::PathBuf::from("/tmp/bankers-logs")
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Tty);
        assert_eq!(config.evaluation.scan_order, ScanOrder::Sweep);
        assert!(!config.evaluation.trace);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let result = Config::load_or_default(Some(std::path::Path::new("/nonexistent/x.toml"))).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(constants::ENV_OUTPUT, "json");
        std::env::set_var(constants::ENV_COLOR, "always");
        std::env::set_var(constants::ENV_SCAN_ORDER, "restart");
        std::env::set_var(constants::ENV_TRACE, "1");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.evaluation.scan_order, ScanOrder::RestartAfterGrant);
        assert!(config.evaluation.trace);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var(constants::ENV_SCAN_ORDER, "sideways");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(result.is_err());

        clear_env();
    }
}
