//! Fixed names used to locate configuration and logs

pub const APP_DIR: &str = "bankers";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOGS_SUBDIR: &str = "logs";

pub const ENV_OUTPUT: &str = "BANKERS_OUTPUT";
pub const ENV_COLOR: &str = "BANKERS_COLOR";
pub const ENV_SCAN_ORDER: &str = "BANKERS_SCAN_ORDER";
pub const ENV_TRACE: &str = "BANKERS_TRACE";
