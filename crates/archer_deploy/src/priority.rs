//! Listener rule priority allocation.
//!
//! Every application in an environment shares one load balancer listener, and
//! each path rule needs a distinct priority. Rules are evaluated lowest
//! priority first, so more specific paths must come before broader ones and
//! the catch-all path must come last. Applications claiming the same path are
//! ordered by name.

use std::cmp::Ordering;

/// Lowest priority a listener rule can have.
pub const MIN_RULE_PRIORITY: u32 = 1;

/// The listener rule an application claims in an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerRule {
    pub app: String,
    pub path: String,
}

impl ListenerRule {
    pub fn new(app: impl Into<String>, path: impl AsRef<str>) -> Self {
        Self {
            app: app.into(),
            path: normalize(path.as_ref()),
        }
    }
}

/// Orders the listener rules of an environment and assigns their priorities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePriorityAllocator {
    ordered: Vec<ListenerRule>,
}

impl RulePriorityAllocator {
    /// Build the ordering for a set of rules, one per application.
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ListenerRule>,
    {
        let mut ordered: Vec<ListenerRule> = rules.into_iter().collect();
        ordered.sort_by(compare_rules);
        Self { ordered }
    }

    /// Rules from the first evaluated to the last.
    pub fn ordered(&self) -> &[ListenerRule] {
        &self.ordered
    }

    /// Priority of the rule of `app`, or `None` if it has no rule.
    pub fn priority_of(&self, app: &str) -> Option<u32> {
        self.ordered
            .iter()
            .position(|rule| rule.app == app)
            .map(|index| index as u32 + MIN_RULE_PRIORITY)
    }
}

/// Priority of `rule` among itself and the rules of the other applications in
/// the environment.
pub fn rule_priority(rule: &ListenerRule, others: &[ListenerRule]) -> u32 {
    let allocator = RulePriorityAllocator::new(
        others
            .iter()
            .filter(|other| other.app != rule.app)
            .cloned()
            .chain(std::iter::once(rule.clone())),
    );
    allocator.priority_of(&rule.app).unwrap_or(MIN_RULE_PRIORITY)
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "*".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_catch_all(path: &str) -> bool {
    path == "*"
}

fn segments(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

fn compare_specificity(a: &str, b: &str) -> Ordering {
    is_catch_all(a)
        .cmp(&is_catch_all(b))
        .then_with(|| segments(b).cmp(&segments(a)))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.cmp(b))
}

fn compare_rules(a: &ListenerRule, b: &ListenerRule) -> Ordering {
    compare_specificity(&a.path, &b.path).then_with(|| a.app.cmp(&b.app))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<ListenerRule> {
        pairs
            .iter()
            .map(|(app, path)| ListenerRule::new(*app, *path))
            .collect()
    }

    #[test]
    fn test_single_rule_gets_first_priority() {
        assert_eq!(rule_priority(&ListenerRule::new("web", "*"), &[]), 1);
        assert_eq!(rule_priority(&ListenerRule::new("api", "api"), &[]), 1);
    }

    #[test]
    fn test_catch_all_goes_last() {
        let others = rules(&[("api", "api"), ("reports", "admin/reports")]);
        assert_eq!(rule_priority(&ListenerRule::new("web", "*"), &others), 3);
        assert_eq!(rule_priority(&ListenerRule::new("web", "/"), &others), 3);
    }

    #[test]
    fn test_deeper_paths_first() {
        let allocator = RulePriorityAllocator::new(rules(&[
            ("site", "*"),
            ("api", "api"),
            ("users", "api/v2/users"),
            ("v2", "api/v2"),
            ("web", "web"),
        ]));
        let paths: Vec<_> = allocator.ordered().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["api/v2/users", "api/v2", "api", "web", "*"]);
        assert_eq!(allocator.priority_of("v2"), Some(2));
        assert_eq!(allocator.priority_of("missing"), None);
    }

    #[test]
    fn test_shared_path_gets_distinct_priorities() {
        let others = rules(&[("api", "api"), ("admin", "*"), ("frontend", "*")]);
        let frontend = rule_priority(&ListenerRule::new("frontend", "*"), &others);
        let admin = rule_priority(&ListenerRule::new("admin", "*"), &others);

        assert_eq!(admin, 2);
        assert_eq!(frontend, 3);
    }

    #[test]
    fn test_own_rule_among_others_counted_once() {
        let others = rules(&[("api", "api"), ("web", "/web/")]);
        assert_eq!(rule_priority(&ListenerRule::new("web", "web"), &others), 2);
    }

    #[test]
    fn test_ordering_is_stable_regardless_of_input_order() {
        let a = RulePriorityAllocator::new(rules(&[("b", "b"), ("a", "a"), ("s", "*"), ("c", "c/d")]));
        let b = RulePriorityAllocator::new(rules(&[("s", "*"), ("c", "c/d"), ("a", "a"), ("b", "b")]));
        assert_eq!(a, b);
    }
}
