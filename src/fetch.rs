//! Upstream retrieval.
//!
//! Downloads the upstream group/rule document and the rule-provider source
//! lists. Each source is fetched independently; a failed fetch is logged
//! and skipped, never retried. Only the primary document is mandatory.

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::error::{GenError, Result};
use crate::types::ClashConfig;

fn retrieval_error(url: &str, e: impl std::fmt::Display) -> GenError {
    GenError::Retrieval {
        url: url.to_string(),
        message: e.to_string(),
    }
}

/// Fetch a URL as text.
pub fn fetch_text(url: &str) -> Result<String> {
    let response = ureq::get(url).call().map_err(|e| retrieval_error(url, e))?;
    let (_, body) = response.into_parts();
    let mut text = String::new();
    body.into_reader()
        .read_to_string(&mut text)
        .map_err(GenError::Io)?;
    Ok(text)
}

/// Fetch a URL and write the raw bytes to `path`, creating parent
/// directories as needed.
pub fn fetch_to_file(url: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let response = ureq::get(url).call().map_err(|e| retrieval_error(url, e))?;
    let (_, body) = response.into_parts();
    let mut reader = body.into_reader();
    let mut file = fs::File::create(path)?;
    std::io::copy(&mut reader, &mut file)?;
    Ok(())
}

/// Load the upstream document from an `http(s)` URL or a local path.
///
/// A document that cannot be fetched or parsed is a hard error; the run
/// cannot proceed without it. When fetched remotely the raw text is also
/// written to `save_as` so later steps can re-read it locally.
pub fn load_clash_config(source: &str, save_as: Option<&Path>) -> Result<ClashConfig> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        info!("downloading upstream config from {}", source);
        let text = fetch_text(source)?;
        if let Some(path) = save_as {
            fs::write(path, &text)?;
        }
        text
    } else {
        fs::read_to_string(source).map_err(GenError::Io)?
    };

    let config: ClashConfig = serde_yaml::from_str(&text)?;
    Ok(config)
}

/// Summary of a provider refresh batch.
#[derive(Debug, Default)]
pub struct UpdateSummary {
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Refresh every rule-provider's local copy from its upstream source.
///
/// `source` is preferred over `url` (the former points at the true
/// upstream, the latter at the published copy). Providers missing either
/// a source URL or a local path are skipped with a warning. Fetch
/// failures are isolated per provider and recorded in the summary.
pub fn update_providers(config: &ClashConfig) -> UpdateSummary {
    let mut summary = UpdateSummary::default();

    for (name, provider) in &config.rule_providers {
        let url = provider.source.as_deref().or(provider.url.as_deref());
        let (Some(url), Some(path)) = (url, provider.path.as_deref()) else {
            warn!("skipping {}: missing url or path", name);
            summary.skipped.push(name.clone());
            continue;
        };

        info!("updating {} from {}", name, url);
        match fetch_to_file(url, Path::new(path)) {
            Ok(()) => summary.updated.push(name.clone()),
            Err(e) => {
                warn!("failed to update {}: {}", name, e);
                summary.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleProvider;

    #[test]
    fn test_load_clash_config_from_local_file() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("srs_gen_fetch_test");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("config.yaml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "proxy-groups:").unwrap();
        writeln!(f, "  - name: 节点选择").unwrap();
        writeln!(f, "    type: select").unwrap();
        writeln!(f, "    proxies: [DIRECT]").unwrap();
        drop(f);

        let config = load_clash_config(path.to_str().unwrap(), None).unwrap();
        assert_eq!(config.proxy_groups.len(), 1);
        assert_eq!(config.proxy_groups[0].name, "节点选择");

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_load_clash_config_missing_file_is_fatal() {
        let result = load_clash_config("/nonexistent/config.yaml", None);
        assert!(matches!(result, Err(GenError::Io(_))));
    }

    #[test]
    fn test_load_clash_config_bad_yaml_is_config_error() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("srs_gen_fetch_bad_yaml");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("broken.yaml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "proxy-groups: [unterminated").unwrap();
        drop(f);

        let result = load_clash_config(path.to_str().unwrap(), None);
        assert!(matches!(result, Err(GenError::Config(_))));

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_update_providers_skips_incomplete_entries() {
        // No network involved: every provider lacks a url or a path.
        let config = ClashConfig {
            proxy_groups: vec![],
            rule_providers: vec![
                (
                    "NoPath".to_string(),
                    RuleProvider {
                        url: Some("https://example.com/a.list".to_string()),
                        source: None,
                        path: None,
                    },
                ),
                ("Nothing".to_string(), RuleProvider::default()),
            ],
            rules: vec![],
        };
        let summary = update_providers(&config);
        assert!(summary.updated.is_empty());
        assert!(summary.failed.is_empty());
        assert_eq!(summary.skipped, vec!["NoPath", "Nothing"]);
    }
}
