//! Fixed template sections of the target configuration.
//!
//! These sections are static apart from the recognized option toggles:
//! a custom local DNS server replaces the built-in Google/Ali/FakeIP
//! split, `enable_fakeip` gates the FakeIP server and its query-type
//! rule, and `enable_tun` gates the TUN inbound.

use serde_json::{json, Value};

use super::TranslateOptions;

pub fn log_section() -> Value {
    json!({
        "level": "info",
        "timestamp": true
    })
}

pub fn ntp_section() -> Value {
    json!({
        "enabled": true,
        "server": "time.apple.com",
        "server_port": 123,
        "interval": "30m0s"
    })
}

pub fn experimental_section() -> Value {
    json!({
        "cache_file": {
            "enabled": true,
            "store_fakeip": true,
            "store_rdrc": true
        },
        "clash_api": {
            "external_controller": "127.0.0.1:9090",
            "access_control_allow_origin": [
                "http://127.0.0.1",
                "https://yacd.metacubex.one",
                "https://metacubex.github.io",
                "https://metacubexd.pages.dev",
                "https://board.zash.run.place"
            ]
        }
    })
}

/// Build the `dns` section, returning it with the default resolver tag
/// referenced by `route.default_domain_resolver`.
pub fn dns_section(opts: &TranslateOptions) -> (Value, String) {
    // A custom local DNS (e.g. MosDNS/AdGuardHome) disables the built-in
    // split entirely; every query goes to the one server.
    if let Some(custom) = &opts.custom_dns {
        let dns = json!({
            "independent_cache": true,
            "strategy": "prefer_ipv4",
            "servers": [
                {
                    "tag": "local",
                    "type": custom.server_type,
                    "server": custom.server,
                    "server_port": custom.server_port
                }
            ],
            "rules": [
                { "server": "local" }
            ]
        });
        return (dns, "local".to_string());
    }

    let mut servers = vec![
        json!({ "tag": "google", "type": "https", "server": "8.8.8.8" }),
        json!({ "tag": "ali", "type": "https", "server": "223.5.5.5" }),
    ];
    let mut rules = vec![
        json!({ "rule_set": "ProxyDNS", "server": "google" }),
        json!({ "rule_set": ["ChinaDomain", "CNDNS", "geoip-cn"], "server": "ali" }),
    ];

    if opts.enable_fakeip {
        servers.push(json!({
            "tag": "fakeip",
            "type": "fakeip",
            "inet4_range": "198.18.0.0/15",
            "inet6_range": "fc00::/18"
        }));
        rules.push(json!({ "query_type": ["A", "AAAA"], "server": "fakeip" }));
    }
    rules.push(json!({ "server": "google" }));

    let dns = json!({
        "independent_cache": true,
        "strategy": "prefer_ipv4",
        "servers": servers,
        "rules": rules
    });
    (dns, "ali".to_string())
}

pub fn inbounds_section(opts: &TranslateOptions) -> Value {
    let mut inbounds = Vec::new();

    if opts.enable_tun {
        inbounds.push(json!({
            "type": "tun",
            "tag": "tun-in",
            "interface_name": "tun0",
            "address": [
                "172.19.0.1/30",
                "fdfe:dcba:9876::1/126"
            ],
            "mtu": 9000,
            "auto_route": true,
            "strict_route": true,
            "stack": "mixed",
            "endpoint_independent_nat": true,
            "sniff": true
        }));
    }

    inbounds.push(json!({
        "type": "mixed",
        "tag": "mixed-in",
        "listen": "::",
        "listen_port": 7890,
        "sniff": true,
        "set_system_proxy": false
    }));

    Value::Array(inbounds)
}
