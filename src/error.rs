use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the library. The editor itself never fails; these
/// come from the configuration and logging plumbing around it.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EditorError::Config {
            path: PathBuf::from("/tmp/config.json"),
            source,
        };
        assert!(err.to_string().starts_with("Invalid config at /tmp/config.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(EditorError::Io(_))));
    }
}
