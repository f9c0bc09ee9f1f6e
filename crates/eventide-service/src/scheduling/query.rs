use chrono::NaiveDateTime;

use crate::error::{ServiceError, ServiceResult};

/// Options for occurrence generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceQuery {
    /// Split occurrences spanning several calendar days into one slice per day.
    pub split_multiday_dates: bool,

    /// Skip occurrences starting before this instant (inclusive bound).
    pub from: Option<NaiveDateTime>,

    /// Stop at the first occurrence starting after this instant (inclusive bound).
    pub to: Option<NaiveDateTime>,

    /// Maximum number of emitted occurrences per scheduling.
    pub limit: Option<usize>,
}

impl OccurrenceQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with a time range.
    #[must_use]
    pub fn with_range(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_split_multiday_dates(mut self, split: bool) -> Self {
        self.split_multiday_dates = split;
        self
    }

    #[must_use]
    pub fn with_from(mut self, from: NaiveDateTime) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: NaiveDateTime) -> Self {
        self.to = Some(to);
        self
    }

    /// Sets the maximum number of emitted occurrences.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns whether `to` or `limit` puts a hard stop on generation.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.to.is_some() || self.limit.is_some()
    }

    pub(crate) fn validate(&self) -> ServiceResult<()> {
        if self.limit == Some(0) {
            return Err(ServiceError::InvalidArgument(
                "limit must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let query = OccurrenceQuery::new();

        assert!(!query.is_bounded());
        assert!(!query.split_multiday_dates);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_bounded_by_limit_or_to() {
        let to = NaiveDateTime::parse_from_str("2024-01-31 00:00", "%Y-%m-%d %H:%M")
            .expect("valid test datetime");

        assert!(OccurrenceQuery::new().with_limit(5).is_bounded());
        assert!(OccurrenceQuery::new().with_to(to).is_bounded());
        assert!(!OccurrenceQuery::new().with_from(to).is_bounded());
    }

    #[test]
    fn test_zero_limit_is_invalid() {
        let err = OccurrenceQuery::new()
            .with_limit(0)
            .validate()
            .expect_err("zero limit");

        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }
}
