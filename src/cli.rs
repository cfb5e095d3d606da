// CLI surface and startup validation

use std::fs;

use clap::Parser;
use thiserror::Error;

/// A console UI for interacting with Google's Gemini AI.
///
/// You can send a prompt to Gemini AI and read the response in a
/// scrollable viewport.
#[derive(Debug, Parser)]
#[command(name = "gai", version, about)]
pub struct Cli {
    /// API Key for Gemini AI
    #[arg(short = 'k', long, env = "GAI_API_KEY")]
    pub api_key: Option<String>,

    /// Model to use for Gemini AI
    #[arg(short, long, env = "GAI_MODEL", default_value = "gemini-pro")]
    pub model: String,

    /// Read prompt from file
    #[arg(short = 'f', long, value_name = "PATH")]
    pub prompt_from_file: Option<String>,

    /// Prompt text, required unless --prompt-from-file is given
    pub prompt: Option<String>,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("API Key is required. Use --api-key or set GAI_API_KEY environment variable.")]
    MissingCredential,
    #[error("Prompt is required. Use --prompt-from-file or pass it as an argument.")]
    MissingPrompt,
    #[error("Failed to read prompt file {path}: {source}")]
    FileReadFailure {
        path: String,
        source: std::io::Error,
    },
}

/// Immutable parameters for one prompt/response interaction, built once at
/// startup and handed to the controller by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

impl Cli {
    /// Resolve flags into a [`Session`], validating that a key and a prompt
    /// are available. A prompt file takes precedence over the positional
    /// argument.
    pub fn into_session(self) -> Result<Session, StartupError> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(StartupError::MissingCredential),
        };

        let prompt = match self.prompt_from_file {
            Some(path) => {
                fs::read_to_string(&path).map_err(|source| StartupError::FileReadFailure {
                    path,
                    source,
                })?
            }
            None => self.prompt.ok_or(StartupError::MissingPrompt)?,
        };

        Ok(Session {
            api_key,
            model: self.model,
            prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(api_key: Option<&str>, prompt: Option<&str>, file: Option<&str>) -> Cli {
        Cli {
            api_key: api_key.map(String::from),
            model: "gemini-pro".to_string(),
            prompt_from_file: file.map(String::from),
            prompt: prompt.map(String::from),
        }
    }

    #[test]
    fn test_session_from_positional_prompt() {
        let session = cli(Some("key"), Some("Ping"), None).into_session().unwrap();
        assert_eq!(session.api_key, "key");
        assert_eq!(session.model, "gemini-pro");
        assert_eq!(session.prompt, "Ping");
    }

    #[test]
    fn test_missing_api_key() {
        let err = cli(None, Some("Ping"), None).into_session().unwrap_err();
        assert!(matches!(err, StartupError::MissingCredential));
        assert!(err.to_string().contains("API Key is required"));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = cli(Some(""), Some("Ping"), None).into_session().unwrap_err();
        assert!(matches!(err, StartupError::MissingCredential));
    }

    #[test]
    fn test_missing_prompt() {
        let err = cli(Some("key"), None, None).into_session().unwrap_err();
        assert!(matches!(err, StartupError::MissingPrompt));
    }

    #[test]
    fn test_prompt_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Why is there higher population in Asia?").unwrap();

        let session = cli(Some("key"), None, Some(file.path().to_str().unwrap()))
            .into_session()
            .unwrap();
        assert_eq!(session.prompt, "Why is there higher population in Asia?");
    }

    #[test]
    fn test_prompt_file_wins_over_positional() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "from file").unwrap();

        let session = cli(
            Some("key"),
            Some("positional"),
            Some(file.path().to_str().unwrap()),
        )
        .into_session()
        .unwrap();
        assert_eq!(session.prompt, "from file");
    }

    #[test]
    fn test_unreadable_prompt_file() {
        let err = cli(Some("key"), None, Some("/nonexistent/prompt.txt"))
            .into_session()
            .unwrap_err();
        assert!(matches!(err, StartupError::FileReadFailure { .. }));
        assert!(err.to_string().contains("/nonexistent/prompt.txt"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["gai", "-k", "secret", "-m", "gemini-ultra", "hello"])
            .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
        assert_eq!(cli.model, "gemini-ultra");
        assert_eq!(cli.prompt.as_deref(), Some("hello"));
    }
}
