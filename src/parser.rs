//! Rule-list parser.
//!
//! Reads line-oriented rule lists in the `TYPE,VALUE[,...]` format and
//! groups recognized lines by kind. Parsing is deliberately permissive:
//! blank lines, comments, short lines, and unknown rule types are skipped
//! without error, so upstream syntax additions never break the pipeline.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{GenError, Result};
use crate::types::{RuleKind, RuleSetDocument};

/// Parse rule-list text into a document grouped by rule kind.
///
/// One rule per line, fields comma-separated: the first field is the rule
/// type keyword (case-insensitive), the second is the value, anything
/// after that is ignored. Lines that are blank, start with `#`, have
/// fewer than two fields, or carry an unrecognized keyword are discarded.
/// Never fails on malformed input.
pub fn parse_rule_list(text: &str) -> RuleSetDocument {
    let mut doc = RuleSetDocument::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',');
        let keyword = fields.next().unwrap_or_default().trim();
        let Some(value) = fields.next() else {
            continue;
        };

        match RuleKind::from_keyword(keyword) {
            Some(kind) => doc.push(kind, value.trim()),
            None => debug!("skipping unrecognized rule type: {}", line),
        }
    }

    doc
}

/// Parse a rule list from a file.
///
/// An unreadable file is the only hard error; individual malformed lines
/// are skipped as in [`parse_rule_list`].
pub fn parse_rule_list_file(path: impl AsRef<Path>) -> Result<RuleSetDocument> {
    let text = fs::read_to_string(path.as_ref()).map_err(GenError::Io)?;
    Ok(parse_rule_list(&text))
}
