use std::env;

use env_logger::{Builder, Env};

/// Installs the stderr logger. `RUST_LOG` wins; otherwise `DEBUG` (set by
/// `--debug`) selects `debug`, else `info`.
pub fn init_logging() {
    let default = if env::var_os("DEBUG").is_some() {
        "debug"
    } else {
        "info"
    };
    Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
