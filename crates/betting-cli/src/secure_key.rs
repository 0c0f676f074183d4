use eyre::{Context, Result};
use std::env;
use std::io::{self, Write};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum KeySource {
    Environment(String),
    File(String),
    Interactive,
}

impl KeySource {
    pub(crate) fn from_arg(key_arg: Option<&str>) -> Self {
        let Some(key) = key_arg else {
            return Self::Interactive;
        };
        if let Some(var_name) = key.strip_prefix("env:") {
            Self::Environment(var_name.to_string())
        } else if let Some(path) = key.strip_prefix("file:") {
            Self::File(path.to_string())
        } else {
            log::warn!("Direct private key arguments are not accepted.");
            log::warn!("Use 'env:VAR_NAME' or 'file:/path/to/key' instead.");
            Self::Interactive
        }
    }

    pub(crate) fn resolve(&self) -> Result<String> {
        match self {
            Self::Environment(var_name) => env::var(var_name)
                .with_context(|| format!("Environment variable {var_name} not found")),
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read private key from file: {path}"))
                .map(|s| s.trim().to_string()),
            Self::Interactive => {
                print!("Enter private key (hidden): ");
                io::stdout().flush().context("Failed to flush stdout")?;
                rpassword::read_password().context("Failed to read private key")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_key_source_prefixes() {
        assert_eq!(
            KeySource::from_arg(Some("env:PRIVATE_KEY_USER_2")),
            KeySource::Environment("PRIVATE_KEY_USER_2".to_string())
        );
        assert_eq!(
            KeySource::from_arg(Some("file:/tmp/key")),
            KeySource::File("/tmp/key".to_string())
        );
        assert_eq!(KeySource::from_arg(None), KeySource::Interactive);
        assert_eq!(
            KeySource::from_arg(Some("0xdeadbeef")),
            KeySource::Interactive
        );
    }

    #[test]
    fn reads_trimmed_key_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  0xabc  ").unwrap();
        let source = KeySource::File(file.path().display().to_string());
        assert_eq!(source.resolve().unwrap(), "0xabc");
    }

    #[test]
    fn missing_environment_variable_is_an_error() {
        let source = KeySource::Environment("BETTING_CLI_TEST_UNSET_KEY".to_string());
        assert!(source.resolve().is_err());
    }
}
