use serde::{Deserialize, Serialize};

use super::Scheduling;

/// Ordered collection of all schedulings of one item.
///
/// Insertion order is preserved; nothing is sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchedulingSet {
    schedulings: Vec<Scheduling>,
}

impl SchedulingSet {
    #[must_use]
    pub fn new(schedulings: Vec<Scheduling>) -> Self {
        Self { schedulings }
    }

    pub fn push(&mut self, scheduling: Scheduling) {
        self.schedulings.push(scheduling);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Scheduling] {
        &self.schedulings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scheduling> {
        self.schedulings.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schedulings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedulings.is_empty()
    }

    /// Returns whether any member carries a recurrence rule.
    #[must_use]
    pub fn has_recurrence(&self) -> bool {
        self.schedulings.iter().any(Scheduling::has_r_rule)
    }
}

impl AsRef<[Scheduling]> for SchedulingSet {
    fn as_ref(&self) -> &[Scheduling] {
        &self.schedulings
    }
}

impl From<Vec<Scheduling>> for SchedulingSet {
    fn from(schedulings: Vec<Scheduling>) -> Self {
        Self::new(schedulings)
    }
}

impl FromIterator<Scheduling> for SchedulingSet {
    fn from_iter<I: IntoIterator<Item = Scheduling>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for SchedulingSet {
    type Item = Scheduling;
    type IntoIter = std::vec::IntoIter<Scheduling>;

    fn into_iter(self) -> Self::IntoIter {
        self.schedulings.into_iter()
    }
}

impl<'a> IntoIterator for &'a SchedulingSet {
    type Item = &'a Scheduling;
    type IntoIter = std::slice::Iter<'a, Scheduling>;

    fn into_iter(self) -> Self::IntoIter {
        self.schedulings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("valid test datetime")
    }

    #[test]
    fn test_empty_set() {
        let set = SchedulingSet::default();

        assert!(set.is_empty());
        assert!(!set.has_recurrence());
        assert!(set.as_slice().is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let later = Scheduling::builder(at("2024-03-01 10:00")).build();
        let earlier = Scheduling::builder(at("2024-01-01 10:00")).build();

        let mut set = SchedulingSet::new(vec![later.clone()]);
        set.push(earlier.clone());
        set.push(later.clone());

        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice(), &[later.clone(), earlier, later]);
    }

    #[test]
    fn test_has_recurrence() {
        let set: SchedulingSet = [
            Scheduling::builder(at("2024-01-01 10:00")).build(),
            Scheduling::builder(at("2024-01-02 10:00"))
                .with_r_rule(Some("FREQ=DAILY;COUNT=2".to_string()))
                .build(),
        ]
        .into_iter()
        .collect();

        assert!(set.has_recurrence());
    }
}
