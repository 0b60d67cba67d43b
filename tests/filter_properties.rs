//! Property tests for tag filtering, prefixing and priority mapping.

use proptest::prelude::*;
use rask_syslog_forwarder::domain::LogSource;
use rask_syslog_forwarder::filter::{FilterMode, FilterSet, parse_tags};
use rask_syslog_forwarder::prefix::{PrefixConfig, normalize_prefix};
use rask_syslog_forwarder::syslog::to_priority;

fn raw_filter_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_ ,\t\r\n:]{0,40}").expect("valid regex")
}

fn tag_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_]{1,8}(:[a-z0-9]{1,6})?").expect("valid regex")
}

fn mode_strategy() -> impl Strategy<Value = FilterMode> {
    prop_oneof![Just(FilterMode::Include), Just(FilterMode::Exclude)]
}

proptest! {
    #[test]
    fn parsed_tags_are_trimmed_and_non_empty(raw in raw_filter_strategy()) {
        for tag in parse_tags(&raw) {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.as_str(), tag.trim_matches([' ', '\t', '\r', '\n']));
        }
    }

    #[test]
    fn should_pass_depends_only_on_mode_raw_and_tag(
        raw in raw_filter_strategy(),
        mode in mode_strategy(),
        tag in tag_strategy(),
    ) {
        let first = FilterSet::parse(&raw, mode);
        let second = FilterSet::parse(&raw, mode);
        prop_assert_eq!(first.should_pass(&tag), second.should_pass(&tag));
    }

    #[test]
    fn include_and_exclude_disagree_on_configured_sets(
        raw in raw_filter_strategy(),
        tag in tag_strategy(),
    ) {
        let include = FilterSet::parse(&raw, FilterMode::Include);
        let exclude = FilterSet::parse(&raw, FilterMode::Exclude);
        prop_assert_ne!(include.should_pass(&tag), exclude.should_pass(&tag));
    }

    #[test]
    fn normalize_prefix_is_idempotent(prefix in "[a-z :]{0,12}") {
        let once = normalize_prefix(&prefix);
        prop_assert_eq!(normalize_prefix(&once), once.clone());
        prop_assert!(once.is_empty() || once.ends_with(": "));
    }

    #[test]
    fn apply_is_idempotent(
        direct in "[a-z ]{0,6}",
        logger in "[a-z ]{0,6}",
        tag in tag_strategy(),
    ) {
        let prefixes = PrefixConfig::new(&direct, &logger);
        for source in [LogSource::Direct, LogSource::Logger, LogSource::Internal] {
            let once = prefixes.apply(&tag, source).into_owned();
            prop_assert_eq!(prefixes.apply(&once, source).into_owned(), once.clone());
        }
    }

    #[test]
    fn priority_is_total_and_clamped(level in any::<u8>()) {
        let priority = to_priority(level);
        prop_assert!(priority <= 7);
        if level > 7 {
            prop_assert_eq!(priority, to_priority(7));
        }
    }
}

#[test]
fn test_exclude_listed_components() {
    let filters = FilterSet::parse("wifi,api", FilterMode::Exclude);
    assert!(!filters.should_pass("wifi:connecting"));
    assert!(filters.should_pass("sensor:update"));
}

#[test]
fn test_include_with_empty_filter_passes_nothing() {
    let filters = FilterSet::parse("", FilterMode::Include);
    assert!(!filters.should_pass("anything"));
}

#[test]
fn test_exclude_all_sentinel_is_case_insensitive() {
    let filters = FilterSet::parse("ALL", FilterMode::Exclude);
    assert!(!filters.should_pass("anything"));
    assert!(filters.tags().is_empty());

    let filters = FilterSet::parse("All", FilterMode::Include);
    assert!(filters.should_pass("anything"));
}

#[test]
fn test_priority_table() {
    let priorities: Vec<u8> = (0..=7).map(to_priority).collect();
    assert_eq!(priorities, vec![0, 3, 4, 6, 5, 7, 7, 7]);
    assert_eq!(to_priority(200), 7);
}
