//! Target configuration document model (sing-box schema).
//!
//! Only the sections the translator populates dynamically get typed
//! structs; the fixed template sections (log, ntp, dns, inbounds) stay as
//! JSON values built in [`crate::translate::template`]. Absent optional
//! fields are omitted from the serialized document.

use serde::Serialize;
use serde_json::Value;

/// Outbound type in the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundType {
    Direct,
    Block,
    Selector,
    Urltest,
}

/// One outbound entry in the target graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundSpec {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: OutboundType,
    /// Member tags. `None` for the base direct/block outbounds, which
    /// carry only tag and type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbounds: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u64>,
    /// When set, the outbound additionally draws from every external
    /// node provider, not just its named members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_all_providers: Option<bool>,
}

impl OutboundSpec {
    /// A base outbound carrying only tag and type.
    pub fn base(tag: &str, kind: OutboundType) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            outbounds: None,
            interval: None,
            tolerance: None,
            use_all_providers: None,
        }
    }
}

/// Reference to a remote binary rule-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSetRef {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: String,
    pub url: String,
    pub download_detour: String,
}

impl RuleSetRef {
    pub fn remote_binary(
        tag: impl Into<String>,
        url: impl Into<String>,
        download_detour: &str,
    ) -> Self {
        Self {
            tag: tag.into(),
            kind: "remote".to_string(),
            format: "binary".to_string(),
            url: url.into(),
            download_detour: download_detour.to_string(),
        }
    }
}

/// One route rule.
///
/// Rules translated from upstream set `outbound` plus exactly one
/// discriminant among `rule_set`, `domain_suffix`, `domain_keyword` and
/// `ip_cidr`. Structural preamble rules use the `action`, `protocol`,
/// `ip_is_private` and `clash_mode` fields instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clash_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_suffix: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_keyword: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_cidr: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound: Option<String>,
}

impl RouteRule {
    /// A rule selecting `tag`, with no discriminant set yet.
    pub fn to_outbound(tag: impl Into<String>) -> Self {
        Self {
            outbound: Some(tag.into()),
            ..Default::default()
        }
    }
}

/// Default DNS resolver for route destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainResolver {
    pub server: String,
}

/// The `route` section: ordered rules, rule-set registry, and the
/// fallback outbound used when no rule matches.
#[derive(Debug, Clone, Serialize)]
pub struct RouteConfig {
    pub default_domain_resolver: DomainResolver,
    pub auto_detect_interface: bool,
    pub rules: Vec<RouteRule>,
    pub rule_set: Vec<RuleSetRef>,
    #[serde(rename = "final")]
    pub final_outbound: String,
}

/// Full target configuration document.
#[derive(Debug, Clone, Serialize)]
pub struct SingBoxConfig {
    pub log: Value,
    pub ntp: Value,
    pub experimental: Value,
    pub dns: Value,
    pub inbounds: Value,
    pub outbounds: Vec<OutboundSpec>,
    pub route: RouteConfig,
}
