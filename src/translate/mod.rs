//! Configuration translator.
//!
//! Maps the upstream group/rule document onto the target engine's
//! outbound/route model: group names and member references go through the
//! fixed name mapping, ignored region groups are dropped from the graph
//! (references to them redirected to the primary selector), and each
//! upstream match rule becomes one route rule with a single discriminant
//! field. Per-group and per-rule issues are logged and skipped; the
//! translation itself never fails.

pub mod mapping;
pub mod template;

use log::warn;

use crate::error::GenError;
use crate::singbox::{
    DomainResolver, OutboundSpec, OutboundType, RouteConfig, RouteRule, RuleSetRef, SingBoxConfig,
};
use crate::types::{ClashConfig, ProxyGroup};

use self::mapping::{
    BLOCK_TAG, DEFAULT_RULE_SET_BASE_URL, DIRECT_TAG, GEOIP_CN_TAG, GEOIP_CN_URL, MAIN_SELECTOR,
    USE_ALL_PROVIDERS,
};

/// A user-provided local DNS server (e.g. MosDNS or AdGuardHome). When
/// set, the built-in DNS split is disabled and all queries go here.
#[derive(Debug, Clone)]
pub struct CustomDnsServer {
    pub server_type: String,
    pub server: String,
    pub server_port: u16,
}

impl CustomDnsServer {
    pub fn udp(server: impl Into<String>, server_port: u16) -> Self {
        Self {
            server_type: "udp".to_string(),
            server: server.into(),
            server_port,
        }
    }
}

/// Recognized translator options. The defaults match the full-featured
/// generator variant: FakeIP on, TUN inbound on, region groups excluded.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Enable the FakeIP DNS server and its query-type rule.
    pub enable_fakeip: bool,
    /// Emit the TUN inbound alongside the mixed inbound.
    pub enable_tun: bool,
    /// Replace the built-in DNS split with one local server.
    pub custom_dns: Option<CustomDnsServer>,
    /// Keep region groups in the outbound graph instead of dropping them.
    pub include_region_groups: bool,
    /// Base URL under which compiled rule-sets are published.
    pub rule_set_base_url: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            enable_fakeip: true,
            enable_tun: true,
            custom_dns: None,
            include_region_groups: false,
            rule_set_base_url: DEFAULT_RULE_SET_BASE_URL.to_string(),
        }
    }
}

fn group_is_ignored(name: &str, opts: &TranslateOptions) -> bool {
    !opts.include_region_groups && mapping::is_ignored(name)
}

/// Translate the upstream document into a full target configuration.
pub fn translate(config: &ClashConfig, opts: &TranslateOptions) -> SingBoxConfig {
    let (dns, resolver) = template::dns_section(opts);

    SingBoxConfig {
        log: template::log_section(),
        ntp: template::ntp_section(),
        experimental: template::experimental_section(),
        dns,
        inbounds: template::inbounds_section(opts),
        outbounds: build_outbounds(&config.proxy_groups, opts),
        route: RouteConfig {
            default_domain_resolver: DomainResolver { server: resolver },
            auto_detect_interface: true,
            rules: build_route_rules(&config.rules, opts),
            rule_set: build_rule_sets(config, opts),
            final_outbound: MAIN_SELECTOR.to_string(),
        },
    }
}

/// Build the outbound graph from upstream proxy groups.
///
/// The base direct/block outbounds always come first. Groups in the
/// ignored set are skipped entirely; ignored members of kept groups are
/// dropped. A selector or urltest outbound must never end up with zero
/// members, so an empty member list falls back to the direct tag unless
/// the group draws from all providers anyway.
pub fn build_outbounds(groups: &[ProxyGroup], opts: &TranslateOptions) -> Vec<OutboundSpec> {
    let mut outbounds = vec![
        OutboundSpec::base(DIRECT_TAG, OutboundType::Direct),
        OutboundSpec::base(BLOCK_TAG, OutboundType::Block),
    ];

    for group in groups {
        if group_is_ignored(&group.name, opts) {
            continue;
        }

        let tag = mapping::map_name(&group.name).to_string();
        let kind = match group.group_type.as_str() {
            "url-test" => OutboundType::Urltest,
            // "select" and anything unrecognized both become a selector;
            // a selector is always safe to present to the user
            _ => OutboundType::Selector,
        };

        let mut members: Vec<String> = Vec::with_capacity(group.proxies.len());
        for member in &group.proxies {
            if group_is_ignored(member, opts) {
                continue;
            }
            members.push(match member.as_str() {
                "DIRECT" => DIRECT_TAG.to_string(),
                "REJECT" => BLOCK_TAG.to_string(),
                name => mapping::map_name(name).to_string(),
            });
        }

        let use_all_providers = USE_ALL_PROVIDERS.contains(tag.as_str()).then_some(true);

        if members.is_empty() && use_all_providers.is_none() {
            warn!("group {} has no usable members, falling back to {}", tag, DIRECT_TAG);
            members.push(DIRECT_TAG.to_string());
        }

        let (interval, tolerance) = if kind == OutboundType::Urltest {
            (
                Some(format!("{}s", group.interval.unwrap_or(300))),
                Some(group.tolerance.unwrap_or(50)),
            )
        } else {
            (None, None)
        };

        outbounds.push(OutboundSpec {
            tag,
            kind,
            outbounds: Some(members),
            interval,
            tolerance,
            use_all_providers,
        });
    }

    outbounds
}

/// Build the rule-set registry: one remote binary reference per upstream
/// provider key (URL derived as `<base><key>.srs`), in document order,
/// plus the baseline geolocation rule-set.
pub fn build_rule_sets(config: &ClashConfig, opts: &TranslateOptions) -> Vec<RuleSetRef> {
    let mut rule_sets: Vec<RuleSetRef> = config
        .rule_providers
        .iter()
        .map(|(name, _)| {
            RuleSetRef::remote_binary(
                name.clone(),
                format!("{}{}.srs", opts.rule_set_base_url, name),
                DIRECT_TAG,
            )
        })
        .collect();

    rule_sets.push(RuleSetRef::remote_binary(GEOIP_CN_TAG, GEOIP_CN_URL, DIRECT_TAG));
    rule_sets
}

/// Structural rules that precede every translated rule, in fixed order.
fn preamble() -> Vec<RouteRule> {
    vec![
        RouteRule {
            action: Some("sniff".to_string()),
            ..Default::default()
        },
        RouteRule {
            protocol: Some("dns".to_string()),
            action: Some("hijack-dns".to_string()),
            ..Default::default()
        },
        RouteRule {
            ip_is_private: Some(true),
            outbound: Some(DIRECT_TAG.to_string()),
            ..Default::default()
        },
        RouteRule {
            clash_mode: Some("Direct".to_string()),
            outbound: Some(DIRECT_TAG.to_string()),
            ..Default::default()
        },
        RouteRule {
            clash_mode: Some("Global".to_string()),
            outbound: Some(MAIN_SELECTOR.to_string()),
            ..Default::default()
        },
    ]
}

/// Resolve an upstream rule target to a target outbound tag.
fn resolve_target(raw: &str, opts: &TranslateOptions) -> String {
    match raw {
        "DIRECT" => DIRECT_TAG.to_string(),
        "REJECT" => BLOCK_TAG.to_string(),
        name if group_is_ignored(name, opts) => MAIN_SELECTOR.to_string(),
        name => mapping::map_name(name).to_string(),
    }
}

/// Translate upstream match rules, preserving their relative order after
/// the fixed preamble. Dropped rules leave no gap and no placeholder.
pub fn build_route_rules(rules: &[String], opts: &TranslateOptions) -> Vec<RouteRule> {
    let mut out = preamble();

    for line in rules {
        let mut fields = line.split(',').map(str::trim);
        let (Some(kind), Some(value), Some(target)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        let mut rule = RouteRule::to_outbound(resolve_target(target, opts));

        match kind {
            "RULE-SET" => rule.rule_set = Some(value.to_string()),
            "DOMAIN-SUFFIX" => rule.domain_suffix = Some(vec![value.to_string()]),
            "DOMAIN-KEYWORD" => rule.domain_keyword = Some(vec![value.to_string()]),
            "IP-CIDR" | "IP-CIDR6" => rule.ip_cidr = Some(vec![value.to_string()]),
            "GEOIP" => {
                // Only the CN geolocation rule-set exists. Emitting any
                // other country code would produce a rule with no matcher
                // that swallows all traffic.
                if value != "CN" {
                    warn!("{}", GenError::UnsupportedRule(line.clone()));
                    continue;
                }
                rule.rule_set = Some(GEOIP_CN_TAG.to_string());
            }
            // MATCH becomes the route's `final` fallback, never a rule
            "MATCH" => continue,
            _ => {
                warn!("skipping unsupported rule type: {}", line);
                continue;
            }
        }

        out.push(rule);
    }

    out
}
