//! srs-gen - rule-list compilation and routing-config translation for sing-box
//!
//! This library converts human-maintained Clash-style rule lists and a
//! declarative proxy-group/rule document into:
//! - compiled sing-box binary rule-sets (via the external `sing-box`
//!   compiler), and
//! - a full sing-box routing configuration (outbound graph, rule-set
//!   registry, ordered route rules).
//!
//! The pipeline is a single forward pass with no feedback:
//!
//! ```text
//! *.list files ──> parser ──> compile ──> *.srs artifacts
//! clash YAML   ──> translate ──────────> sing-box config document
//! ```
//!
//! The two paths share nothing in-process; they meet only through the
//! file-naming convention `<provider key>.srs`.
//!
//! # Example
//!
//! ```rust
//! use srs_gen::{parse_rule_list, translate, RuleSetEnvelope, TranslateOptions};
//!
//! // Parse a rule list and build the compiler's JSON envelope
//! let doc = parse_rule_list("DOMAIN-SUFFIX,example.com\nIP-CIDR,10.0.0.0/8,no-resolve");
//! let envelope = RuleSetEnvelope::from_document(&doc);
//! assert_eq!(envelope.rules.len(), 1);
//!
//! // Translate an upstream document into a target configuration
//! let upstream: srs_gen::ClashConfig = serde_yaml::from_str(r#"
//! proxy-groups:
//!   - { name: 节点选择, type: select, proxies: [DIRECT] }
//! rules:
//!   - RULE-SET,Ads,REJECT
//! "#).unwrap();
//!
//! let config = translate(&upstream, &TranslateOptions::default());
//! assert_eq!(config.route.final_outbound, "🚀 节点选择");
//! ```
//!
//! # Error policy
//!
//! Document-level failures (unreadable mandatory input, unparsable
//! upstream YAML) are hard errors. Everything per-item — one rule list
//! failing to compile, one provider failing to download, one rule with
//! an unsupported type — is logged and skipped so the batch completes.

pub mod compile;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod singbox;
pub mod translate;
pub mod types;

// Re-export commonly used items
pub use compile::{
    compile_dir, CompileOutcome, CompileSummary, Compiler, RuleSetEntry, RuleSetEnvelope,
    RULE_SET_VERSION,
};
pub use error::{GenError, Result};
pub use fetch::{fetch_text, fetch_to_file, load_clash_config, update_providers, UpdateSummary};
pub use parser::{parse_rule_list, parse_rule_list_file};
pub use singbox::{
    DomainResolver, OutboundSpec, OutboundType, RouteConfig, RouteRule, RuleSetRef, SingBoxConfig,
};
pub use translate::{translate, CustomDnsServer, TranslateOptions};
pub use types::{ClashConfig, ProxyGroup, RuleKind, RuleProvider, RuleSetDocument};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        // Rule-list path: parse, then build the envelope the external
        // compiler would receive.
        let list_text = r#"
# Ads payload
DOMAIN,ad.example.com
DOMAIN-SUFFIX,doubleclick.net
DOMAIN-KEYWORD,adservice
IP-CIDR,203.0.113.0/24,no-resolve
UNSUPPORTED-TYPE,whatever,REJECT
"#;
        let doc = parse_rule_list(list_text);
        assert_eq!(doc.len(), 4);

        let envelope = RuleSetEnvelope::from_document(&doc);
        assert_eq!(envelope.rules.len(), 1);
        assert_eq!(envelope.rules[0].domain_suffix, vec!["doubleclick.net"]);

        // Config path: upstream document in, full target document out.
        let yaml = r#"
proxy-groups:
  - name: 节点选择
    type: select
    proxies:
      - 自动选择
      - DIRECT
  - name: 自动选择
    type: url-test
    proxies: []
rule-providers:
  BanAD:
    url: https://example.com/BanAD.list
    path: ./ruleset/BanAD.list
rules:
  - RULE-SET,BanAD,REJECT
  - GEOIP,CN,DIRECT
  - MATCH,漏网之鱼
"#;
        let upstream: ClashConfig = serde_yaml::from_str(yaml).unwrap();
        let config = translate(&upstream, &TranslateOptions::default());

        assert_eq!(config.outbounds[0].tag, "直连");
        assert_eq!(config.outbounds[1].tag, "REJECT");
        assert_eq!(config.outbounds[2].tag, "🚀 节点选择");

        assert_eq!(config.route.rule_set.len(), 2);
        assert_eq!(config.route.final_outbound, "🚀 节点选择");

        let last = config.route.rules.last().unwrap();
        assert_eq!(last.rule_set.as_deref(), Some("geoip-cn"));
        assert_eq!(last.outbound.as_deref(), Some("直连"));
    }
}
