use thiserror::Error;

/// Pipeline error types.
///
/// Only two conditions are fatal for a run: an unreadable mandatory input
/// (`Io` on the primary document) and an unparsable upstream document
/// (`Config`). Everything else is per-item: callers log it and continue
/// with the remaining rule lists, providers, or rules.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Retrieval failed for {url}: {message}")]
    Retrieval { url: String, message: String },

    #[error("Rule-set compile failed for {name}: {diagnostic}")]
    Compile { name: String, diagnostic: String },

    #[error("Unsupported rule: {0}")]
    UnsupportedRule(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An unparsable upstream document is a document-level failure, not a
/// per-item one. Map it straight to `Config` so callers can treat it as
/// fatal without inspecting the YAML error.
impl From<serde_yaml::Error> for GenError {
    fn from(e: serde_yaml::Error) -> Self {
        GenError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_carries_diagnostic() {
        let err = GenError::Compile {
            name: "Ads".into(),
            diagnostic: "decode rule-set: unexpected field".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("Ads"), "got: {}", display);
        assert!(display.contains("unexpected field"), "got: {}", display);
    }

    #[test]
    fn test_yaml_error_maps_to_config() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("[ unterminated").unwrap_err();
        let err = GenError::from(yaml_err);
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_retrieval_error_is_matchable() {
        let err = GenError::Retrieval {
            url: "https://example.com/a.list".into(),
            message: "connection refused".into(),
        };
        match &err {
            GenError::Retrieval { url, .. } => assert!(url.ends_with("a.list")),
            _ => panic!("expected Retrieval"),
        }
    }
}
