use serde::{Deserialize, Serialize};

/// A time-window query for paginated history reads.
///
/// Both bounds are optional and inclusive; pages are returned newest-first,
/// so a response's continuation query tightens `before`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "DateTime: Serialize",
    deserialize = "DateTime: Deserialize<'de>"
))]
pub struct DateTimeRangeQuery<DateTime> {
    /// Only include records at or before this instant
    #[serde(default)]
    pub before: Option<DateTime>,
    /// Only include records at or after this instant
    #[serde(default)]
    pub after: Option<DateTime>,
}

impl<DateTime> Default for DateTimeRangeQuery<DateTime> {
    fn default() -> Self {
        Self {
            before: None,
            after: None,
        }
    }
}

/// One page of results plus the query that fetches the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeRangeResponse<T, DateTime> {
    /// The records of this page, newest first
    pub results: Vec<T>,
    /// Query for the next (older) page; `None` when exhausted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more: Option<DateTimeRangeQuery<DateTime>>,
}
