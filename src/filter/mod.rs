//! Severity and tag filtering.
//!
//! # Design Decisions
//! - Pure predicates over the frozen configuration
//! - Evaluated before record construction, so filtered messages never pay
//!   for formatting or stack trace capture
//! - A message without a tag is never dropped by tag rules

use crate::config::{RlogConfig, TagFilter};
use crate::record::Severity;

/// True if `severity` is strictly less severe than `threshold`.
pub fn is_filtered_severity(threshold: Severity, severity: Severity) -> bool {
    severity.is_less_severe_than(threshold)
}

/// True if the tag rules reject `tag`.
pub fn is_filtered_tag(filter: Option<&TagFilter>, tag: Option<&str>) -> bool {
    match (filter, tag) {
        (Some(TagFilter::AllowExcept(tags)), Some(tag)) => tags.contains(tag),
        (Some(TagFilter::DenyExcept(tags)), Some(tag)) => !tags.contains(tag),
        _ => false,
    }
}

/// Combined drop decision for a candidate message.
pub fn should_drop(config: &RlogConfig, severity: Severity, tag: Option<&str>) -> bool {
    is_filtered_severity(config.severity, severity)
        || is_filtered_tag(config.tag_filter.as_ref(), tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundary_is_never_dropped() {
        for threshold in Severity::ALL {
            for severity in Severity::ALL {
                assert_eq!(
                    is_filtered_severity(threshold, severity),
                    (severity as u8) > (threshold as u8),
                    "threshold={threshold} severity={severity}"
                );
            }
            assert!(!is_filtered_severity(threshold, threshold));
        }
    }

    #[test]
    fn test_warning_threshold() {
        let threshold: Severity = "warn".parse().unwrap();
        assert!(is_filtered_severity(threshold, Severity::Debug));
        assert!(is_filtered_severity(threshold, Severity::Info));
        assert!(!is_filtered_severity(threshold, Severity::Warning));
        assert!(!is_filtered_severity(threshold, Severity::Error));
        assert!(!is_filtered_severity(threshold, Severity::Fatal));
    }

    #[test]
    fn test_tag_modes() {
        let mut config = RlogConfig::default();

        config.allow_tags_except(["tag1"]);
        assert!(is_filtered_tag(config.tag_filter.as_ref(), Some("tag1")));
        assert!(!is_filtered_tag(config.tag_filter.as_ref(), Some("tag2")));

        config.deny_tags_except(["tag1"]);
        assert!(!is_filtered_tag(config.tag_filter.as_ref(), Some("tag1")));
        assert!(is_filtered_tag(config.tag_filter.as_ref(), Some("tag2")));
    }

    #[test]
    fn test_untagged_messages_pass_tag_rules() {
        let mut config = RlogConfig::default();
        assert!(!is_filtered_tag(config.tag_filter.as_ref(), None));

        config.allow_tags_except(["a"]);
        assert!(!is_filtered_tag(config.tag_filter.as_ref(), None));

        config.deny_tags_except(["a"]);
        assert!(!is_filtered_tag(config.tag_filter.as_ref(), None));
    }

    #[test]
    fn test_should_drop_combines_both_checks() {
        let mut config = RlogConfig {
            severity: Severity::Info,
            ..RlogConfig::default()
        };
        config.deny_tags_except(["db"]);

        assert!(!should_drop(&config, Severity::Error, Some("db")));
        assert!(should_drop(&config, Severity::Error, Some("http")));
        assert!(should_drop(&config, Severity::Debug, Some("db")));
        assert!(!should_drop(&config, Severity::Info, None));
    }
}
