//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::record::{ParseSeverityError, Severity};

/// Default per-module channel capacity.
pub const DEFAULT_CHAN_CAPACITY: usize = 100;

/// Default flush acknowledgement timeout in seconds.
pub const DEFAULT_FLUSH_TIMEOUT_SECS: u64 = 2;

/// Root configuration for the logger core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RlogConfig {
    /// Bounded queue depth of each module's message channel.
    pub chan_capacity: usize,

    /// Maximum time to wait for a module to acknowledge a flush.
    /// Zero means do not wait at all.
    pub flush_timeout_secs: u64,

    /// Messages less severe than this are dropped.
    pub severity: Severity,

    /// Optional tag filter. `None` disables tag filtering.
    pub tag_filter: Option<TagFilter>,
}

impl Default for RlogConfig {
    fn default() -> Self {
        Self {
            chan_capacity: DEFAULT_CHAN_CAPACITY,
            flush_timeout_secs: DEFAULT_FLUSH_TIMEOUT_SECS,
            severity: Severity::Info,
            tag_filter: None,
        }
    }
}

impl RlogConfig {
    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.flush_timeout_secs)
    }

    /// Set the threshold from a case-insensitive level name.
    pub fn set_severity_from_str(&mut self, value: &str) -> Result<(), ParseSeverityError> {
        self.severity = value.parse()?;
        Ok(())
    }

    /// Pass every tag except the given ones. Replaces any deny-except filter.
    pub fn allow_tags_except<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_filter = Some(TagFilter::AllowExcept(collect_tags(tags)));
    }

    /// Drop every tag except the given ones. Replaces any allow-except filter.
    pub fn deny_tags_except<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_filter = Some(TagFilter::DenyExcept(collect_tags(tags)));
    }

    pub fn clear_tag_filter(&mut self) {
        self.tag_filter = None;
    }
}

fn collect_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter().map(Into::into).collect()
}

/// Tag filter mode. The two modes are mutually exclusive.
///
/// In TOML: `tag_filter = { mode = "deny_except", tags = ["db"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "mode", content = "tags", rename_all = "snake_case")]
pub enum TagFilter {
    /// Listed tags are excluded, everything else passes.
    AllowExcept(BTreeSet<String>),
    /// Listed tags pass, everything else is excluded.
    DenyExcept(BTreeSet<String>),
}

impl TagFilter {
    pub fn tags(&self) -> &BTreeSet<String> {
        match self {
            TagFilter::AllowExcept(tags) | TagFilter::DenyExcept(tags) => tags,
        }
    }
}
