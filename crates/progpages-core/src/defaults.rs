//! Front-matter defaults.
//!
//! Fallback values for page attributes that a page does not set itself,
//! selected by the page's relative path and a scope type.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resolves fallback values for keys a page does not define.
pub trait DefaultsResolver: fmt::Debug + Send + Sync {
    /// Find the default value of `key` for the page at `path` in `scope`.
    fn find(&self, path: &str, scope: &str, key: &str) -> Option<Value>;
}

/// Where a default rule applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleScope {
    /// Path prefix the page must live under. Empty matches every page.
    #[serde(default)]
    pub path: String,

    /// Scope type the lookup must be made in. `None` matches every type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A single front-matter default rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultRule {
    /// Where the rule applies.
    #[serde(default)]
    pub scope: RuleScope,

    /// Values the rule provides.
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl DefaultRule {
    /// Create a rule for the given path prefix and scope type.
    pub fn new(path: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            scope: RuleScope {
                path: path.into(),
                kind: kind.map(str::to_string),
            },
            values: Map::new(),
        }
    }

    /// Add a value to the rule.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    fn applies(&self, path: &str, scope: &str) -> bool {
        let kind_matches = self.scope.kind.as_deref().is_none_or(|kind| kind == scope);
        kind_matches && path_has_prefix(path, &self.scope.path)
    }

    /// Number of path segments in the rule's scope, used to rank matches.
    fn specificity(&self) -> usize {
        self.scope
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .count()
    }
}

/// Check whether `prefix` covers `path` on a segment boundary.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return true;
    }

    let path = path.trim_start_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Ordered set of front-matter default rules.
#[derive(Debug, Clone, Default)]
pub struct FrontmatterDefaults {
    rules: Vec<DefaultRule>,
}

impl FrontmatterDefaults {
    /// Create a resolver from a list of rules.
    #[must_use]
    pub fn new(rules: Vec<DefaultRule>) -> Self {
        Self { rules }
    }

    /// All configured rules.
    #[must_use]
    pub fn rules(&self) -> &[DefaultRule] {
        &self.rules
    }
}

impl DefaultsResolver for FrontmatterDefaults {
    fn find(&self, path: &str, scope: &str, key: &str) -> Option<Value> {
        // Most specific path wins; later rules win ties.
        let mut best: Option<(usize, &Value)> = None;

        for rule in self.rules.iter().filter(|r| r.applies(path, scope)) {
            let Some(value) = rule.values.get(key) else {
                continue;
            };
            let specificity = rule.specificity();
            if best.is_none_or(|(current, _)| specificity >= current) {
                best = Some((specificity, value));
            }
        }

        best.map(|(_, value)| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn defaults() -> FrontmatterDefaults {
        FrontmatterDefaults::new(vec![
            DefaultRule::new("", None)
                .with_value("sidebar", false)
                .with_value("author", "Anonymous"),
            DefaultRule::new("programs", Some("categories")).with_value("sidebar", true),
            DefaultRule::new("programs/alpha", Some("categories"))
                .with_value("banner", "alpha.png"),
            DefaultRule::new("programs", Some("posts")).with_value("comments", true),
        ])
    }

    #[test]
    fn test_find_prefers_most_specific_path() {
        let defaults = defaults();
        assert_eq!(
            defaults.find("programs/alpha/index.html", "categories", "sidebar"),
            Some(json!(true))
        );
        assert_eq!(
            defaults.find("about/index.html", "categories", "sidebar"),
            Some(json!(false))
        );
    }

    #[test]
    fn test_find_falls_back_to_global_rule() {
        let defaults = defaults();
        assert_eq!(
            defaults.find("programs/alpha/index.html", "categories", "author"),
            Some(json!("Anonymous"))
        );
    }

    #[test]
    fn test_find_respects_scope_type() {
        let defaults = defaults();
        assert_eq!(
            defaults.find("programs/alpha/index.html", "categories", "comments"),
            None
        );
        assert_eq!(
            defaults.find("programs/alpha/index.html", "posts", "comments"),
            Some(json!(true))
        );
    }

    #[test]
    fn test_find_matches_whole_segments_only() {
        let defaults = defaults();
        assert_eq!(
            defaults.find("programs/alphabet/index.html", "categories", "banner"),
            None
        );
        assert_eq!(
            defaults.find("programs/alpha/index.html", "categories", "banner"),
            Some(json!("alpha.png"))
        );
        assert_eq!(
            defaults.find("programsx/index.html", "categories", "sidebar"),
            Some(json!(false))
        );
    }

    #[test]
    fn test_later_rule_wins_tie() {
        let defaults = FrontmatterDefaults::new(vec![
            DefaultRule::new("programs", None).with_value("layout", "first"),
            DefaultRule::new("programs/", None).with_value("layout", "second"),
        ]);
        assert_eq!(
            defaults.find("programs/beta/index.html", "categories", "layout"),
            Some(json!("second"))
        );
    }

    #[test]
    fn test_empty_resolver_finds_nothing() {
        let defaults = FrontmatterDefaults::default();
        assert!(defaults.rules().is_empty());
        assert_eq!(defaults.find("programs/a/index.html", "categories", "x"), None);
    }

    #[test]
    fn test_rule_deserializes_type_key() {
        let rule: DefaultRule = serde_json::from_value(json!({
            "scope": { "path": "programs", "type": "categories" },
            "values": { "sidebar": true }
        }))
        .expect("deserialize");

        assert_eq!(rule.scope.kind.as_deref(), Some("categories"));
        assert_eq!(rule.values["sidebar"], json!(true));
    }
}
