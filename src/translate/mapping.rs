//! Static name-mapping and policy tables.
//!
//! These lookups never change during a run: the decorated tag mapping,
//! the region groups excluded from the outbound graph, and the
//! use-all-providers allow-list. Names absent from the mapping pass
//! through unchanged.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Tag of the always-present passthrough outbound.
pub const DIRECT_TAG: &str = "直连";

/// Tag of the always-present blocking outbound.
pub const BLOCK_TAG: &str = "REJECT";

/// Primary selector: the route fallback, the clash-mode Global target,
/// and the redirect target for rules that referenced an ignored group.
pub const MAIN_SELECTOR: &str = "🚀 节点选择";

/// Tag of the baseline IP geolocation rule-set.
pub const GEOIP_CN_TAG: &str = "geoip-cn";

/// URL of the baseline IP geolocation rule-set.
pub const GEOIP_CN_URL: &str =
    "https://raw.githubusercontent.com/SagerNet/sing-geoip/rule-set/geoip-cn.srs";

/// Default base URL under which compiled binary rule-sets are published.
pub const DEFAULT_RULE_SET_BASE_URL: &str =
    "https://raw.githubusercontent.com/GotKiCry/GotKiCry_ACL_Rule_SingBox/master/ruleset/";

/// Upstream group names mapped to decorated target tags.
pub static NAME_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("节点选择", "🚀 节点选择"),
        ("手动选择", "👉 手动选择"),
        ("手动切换", "👉 手动选择"),
        ("漏网之鱼", "🐟 漏网之鱼"),
        ("自动选择", "♻️ 自动选择"),
        ("GLOBAL", "GLOBAL"),
        ("电报消息", "📲 电报消息"),
        ("OpenAi", "🤖 OpenAi"),
        ("油管视频", "📹 油管视频"),
        ("奈飞视频", "🎥 奈飞视频"),
        ("巴哈姆特", "🎮 巴哈姆特"),
        ("哔哩哔哩", "📺 哔哩哔哩"),
        ("国外媒体", "🌍 国外媒体"),
        ("国内媒体", "🌏 国内媒体"),
        ("谷歌FCM", "📢 谷歌FCM"),
        ("微软Bing", "🔍 微软Bing"),
        ("微软云盘", "☁️ 微软云盘"),
        ("微软服务", "Ⓜ️ 微软服务"),
        ("苹果服务", "🍎 苹果服务"),
        ("Steam下载", "⬇️ Steam下载"),
        ("游戏平台", "🎮 游戏平台"),
        ("网易音乐", "🎵 网易音乐"),
        ("全球直连", "🎯 全球直连"),
        ("广告拦截", "🛑 广告拦截"),
        ("应用净化", "🛡️ 应用净化"),
        ("香港节点", "🇭🇰 香港节点"),
        ("日本节点", "🇯🇵 日本节点"),
        ("美国节点", "🇺🇸 美国节点"),
        ("台湾节点", "🇹🇼 台湾节点"),
        ("狮城节点", "🇸🇬 狮城节点"),
        ("韩国节点", "🇰🇷 韩国节点"),
        ("奈飞节点", "🎥 奈飞节点"),
    ])
});

/// Region sub-groups excluded from the target outbound graph. Member
/// references to these are dropped; rule targets are redirected to
/// [`MAIN_SELECTOR`].
pub static IGNORED_GROUPS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "香港节点",
        "日本节点",
        "美国节点",
        "台湾节点",
        "狮城节点",
        "韩国节点",
        "奈飞节点",
    ])
});

/// Target tags that additionally draw from every external node provider.
/// A static policy table, not derived from input.
pub static USE_ALL_PROVIDERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "👉 手动选择",
        "🐟 漏网之鱼",
        "♻️ 自动选择",
        "GLOBAL",
        "🚀 节点选择",
    ])
});

/// Map an upstream name to its target tag. Unknown names pass through
/// unchanged, so the mapping is total.
pub fn map_name(name: &str) -> &str {
    NAME_MAPPING.get(name).copied().unwrap_or(name)
}

/// True if the name refers to an excluded region group.
pub fn is_ignored(name: &str) -> bool {
    IGNORED_GROUPS.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_name_known_and_unknown() {
        assert_eq!(map_name("节点选择"), "🚀 节点选择");
        assert_eq!(map_name("手动切换"), "👉 手动选择");
        assert_eq!(map_name("GLOBAL"), "GLOBAL");
        assert_eq!(map_name("NodeA"), "NodeA");
        assert_eq!(map_name(""), "");
    }

    #[test]
    fn test_map_name_is_idempotent() {
        // Mapping twice must equal mapping once, for every table entry
        // and for names outside the table.
        for (&from, &to) in NAME_MAPPING.iter() {
            assert_eq!(map_name(map_name(from)), to, "entry {} not idempotent", from);
        }
        assert_eq!(map_name(map_name("NodeA")), "NodeA");
    }

    #[test]
    fn test_ignored_groups_are_regions() {
        assert!(is_ignored("香港节点"));
        assert!(is_ignored("奈飞节点"));
        assert!(!is_ignored("节点选择"));
        assert!(!is_ignored("DIRECT"));
    }

    #[test]
    fn test_use_all_providers_contains_main_selector() {
        assert!(USE_ALL_PROVIDERS.contains(MAIN_SELECTOR));
        assert!(USE_ALL_PROVIDERS.contains("GLOBAL"));
        assert!(!USE_ALL_PROVIDERS.contains("🎯 全球直连"));
    }
}
