use serde::Deserialize;

/// Rule kinds recognized in rule-list files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Domain,
    DomainSuffix,
    DomainKeyword,
    IpCidr,
    ProcessName,
}

impl RuleKind {
    /// Classify a rule-type keyword, case-insensitively.
    ///
    /// Returns `None` for unrecognized keywords. Callers skip those lines
    /// instead of erroring, so new upstream rule syntax never breaks the
    /// pipeline. `IP-CIDR` and `IP-CIDR6` both map to [`RuleKind::IpCidr`].
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "DOMAIN" => Some(RuleKind::Domain),
            "DOMAIN-SUFFIX" => Some(RuleKind::DomainSuffix),
            "DOMAIN-KEYWORD" => Some(RuleKind::DomainKeyword),
            "IP-CIDR" | "IP-CIDR6" => Some(RuleKind::IpCidr),
            "PROCESS-NAME" => Some(RuleKind::ProcessName),
            _ => None,
        }
    }
}

/// Parsed rule-list contents, grouped by kind.
///
/// Order within each group matches first appearance in the source file;
/// duplicates are kept as-is so the compiled artifact is reproducible
/// from the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetDocument {
    pub domain: Vec<String>,
    pub domain_suffix: Vec<String>,
    pub domain_keyword: Vec<String>,
    pub ip_cidr: Vec<String>,
    pub process_name: Vec<String>,
}

impl RuleSetDocument {
    /// Append a value to the group for `kind`.
    pub fn push(&mut self, kind: RuleKind, value: impl Into<String>) {
        let value = value.into();
        match kind {
            RuleKind::Domain => self.domain.push(value),
            RuleKind::DomainSuffix => self.domain_suffix.push(value),
            RuleKind::DomainKeyword => self.domain_keyword.push(value),
            RuleKind::IpCidr => self.ip_cidr.push(value),
            RuleKind::ProcessName => self.process_name.push(value),
        }
    }

    /// True when every kind-group is empty. Empty documents must never
    /// reach the binary compiler.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
            && self.domain_suffix.is_empty()
            && self.domain_keyword.is_empty()
            && self.ip_cidr.is_empty()
            && self.process_name.is_empty()
    }

    /// Total number of rule values across all groups.
    pub fn len(&self) -> usize {
        self.domain.len()
            + self.domain_suffix.len()
            + self.domain_keyword.len()
            + self.ip_cidr.len()
            + self.process_name.len()
    }
}

/// Upstream group/rule document (Clash dialect).
///
/// Only the three sections the translator consumes are modeled; every
/// other top-level key in the YAML is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClashConfig {
    #[serde(rename = "proxy-groups", default)]
    pub proxy_groups: Vec<ProxyGroup>,
    /// Provider entries in document order. YAML maps deserialized into a
    /// `HashMap` would lose the order the rule-set registry must preserve.
    #[serde(
        rename = "rule-providers",
        default,
        deserialize_with = "ordered_providers"
    )]
    pub rule_providers: Vec<(String, RuleProvider)>,
    #[serde(default)]
    pub rules: Vec<String>,
}

/// One upstream proxy group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(default)]
    pub interval: Option<u64>,
    #[serde(default)]
    pub tolerance: Option<u64>,
}

/// Rule-provider source metadata.
///
/// `source` points at the upstream list, `url` at the published copy,
/// `path` at the local checkout location. The translator only consumes
/// the provider key; these fields matter to the retrieval step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleProvider {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

fn ordered_providers<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, RuleProvider)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct OrderedVisitor;

    impl<'de> serde::de::Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, RuleProvider)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of rule-provider entries")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, RuleProvider>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor)
}
