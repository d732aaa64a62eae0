// 🪵 Logging - tracing to a file
//
// The terminal belongs to the UI, so log lines go to a file. If the file
// cannot be opened, logging stays off.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, Once};
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "subscription_editor=info";

/// Install the global subscriber once. Returns false when no log file is available.
pub fn init_tracing(log_file: Option<&Path>) -> bool {
    let mut installed = false;

    TRACING_INIT.call_once(|| {
        let Some(path) = log_file else {
            return;
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        installed = fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .is_ok();

        if installed {
            tracing::info!(log = %path.display(), "subscription editor tracing initialized");
        }
    });

    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_does_not_panic() {
        init_tracing(None);
        // second call is a no-op
        assert!(!init_tracing(None));
    }
}
