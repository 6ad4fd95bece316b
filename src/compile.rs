//! Rule-set compilation.
//!
//! Serializes a parsed rule-list document into the versioned rule-set JSON
//! envelope and hands it to the external `sing-box` compiler for binary
//! (`.srs`) output. One envelope carries at most one rule entry; the target
//! engine ORs the entry's fields, so a single entry covers the whole list.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{info, warn};
use serde::Serialize;

use crate::error::{GenError, Result};
use crate::parser::parse_rule_list_file;
use crate::types::RuleSetDocument;

/// Rule-set envelope version understood by the target engine.
pub const RULE_SET_VERSION: u32 = 1;

/// Single rule entry in the envelope. Empty kind-groups are omitted from
/// the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSetEntry {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain_suffix: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domain_keyword: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_cidr: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub process_name: Vec<String>,
}

/// Versioned rule-set envelope, the external compiler's JSON input.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSetEnvelope {
    pub version: u32,
    pub rules: Vec<RuleSetEntry>,
}

impl RuleSetEnvelope {
    /// Build the envelope for a document.
    ///
    /// At most one entry is produced; an empty document yields an empty
    /// `rules` array, which callers must treat as "skip compilation".
    pub fn from_document(doc: &RuleSetDocument) -> Self {
        let mut rules = Vec::new();
        if !doc.is_empty() {
            rules.push(RuleSetEntry {
                domain: doc.domain.clone(),
                domain_suffix: doc.domain_suffix.clone(),
                domain_keyword: doc.domain_keyword.clone(),
                ip_cidr: doc.ip_cidr.clone(),
                process_name: doc.process_name.clone(),
            });
        }
        Self {
            version: RULE_SET_VERSION,
            rules,
        }
    }
}

/// Per-document compile outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Binary artifact written.
    Compiled,
    /// Document had no rules; no artifact emitted.
    SkippedEmpty,
}

/// Invokes the external binary rule-set compiler.
pub struct Compiler {
    binary: PathBuf,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("sing-box"),
        }
    }
}

impl Compiler {
    /// Use a specific compiler binary instead of `sing-box` from PATH.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Compile one document to `srs_path`.
    ///
    /// The JSON envelope is written next to the artifact, handed to the
    /// external compiler in a blocking call, and removed after a
    /// successful run. On failure the envelope is left in place for
    /// inspection and the compiler's stderr is returned in the error.
    /// No retry is attempted.
    pub fn compile_document(
        &self,
        doc: &RuleSetDocument,
        srs_path: &Path,
    ) -> Result<CompileOutcome> {
        let envelope = RuleSetEnvelope::from_document(doc);
        if envelope.rules.is_empty() {
            return Ok(CompileOutcome::SkippedEmpty);
        }

        let json_path = srs_path.with_extension("json");
        fs::write(&json_path, serde_json::to_string_pretty(&envelope)?)?;

        let output = Command::new(&self.binary)
            .arg("rule-set")
            .arg("compile")
            .arg(&json_path)
            .arg("-o")
            .arg(srs_path)
            .output()
            .map_err(GenError::Io)?;

        if !output.status.success() {
            return Err(GenError::Compile {
                name: srs_path.display().to_string(),
                diagnostic: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // The envelope is transient; only the binary artifact is durable.
        fs::remove_file(&json_path)?;
        Ok(CompileOutcome::Compiled)
    }
}

/// Summary of a directory compilation batch.
#[derive(Debug, Default)]
pub struct CompileSummary {
    pub compiled: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Compile every `.list` file under `dir` to a sibling `.srs` artifact.
///
/// Files are processed independently and sequentially; a parse or compile
/// failure of one file is logged and recorded in the summary without
/// aborting the rest. Only an unreadable directory is a hard error.
pub fn compile_dir(dir: impl AsRef<Path>, compiler: &Compiler) -> Result<CompileSummary> {
    let dir = dir.as_ref();
    let mut list_files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(GenError::Io)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "list"))
        .collect();
    // read_dir order is platform-dependent; sort for reproducible runs
    list_files.sort();

    info!("found {} list files in {}", list_files.len(), dir.display());

    let mut summary = CompileSummary::default();
    for list_path in list_files {
        let name = list_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let srs_path = list_path.with_extension("srs");

        let doc = match parse_rule_list_file(&list_path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("failed to read {}: {}", list_path.display(), e);
                summary.failed.push((name, e.to_string()));
                continue;
            }
        };

        match compiler.compile_document(&doc, &srs_path) {
            Ok(CompileOutcome::Compiled) => {
                info!("compiled {}.srs", name);
                summary.compiled.push(name);
            }
            Ok(CompileOutcome::SkippedEmpty) => {
                info!("no valid rules in {}, skipping", name);
                summary.skipped.push(name);
            }
            Err(e) => {
                warn!("compilation failed for {}: {}", name, e);
                summary.failed.push((name, e.to_string()));
            }
        }
    }

    Ok(summary)
}
