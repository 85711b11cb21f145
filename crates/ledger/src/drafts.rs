//! In-progress custom split percentages, one draft per payer.
//!
//! A draft is what a user is still editing before recording a custom-split
//! expense. Drafts are persisted with the trip so the editor can be restored,
//! but they never affect balances until turned into an expense.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tripsplit_core::approx_eq;

use crate::person::PersonName;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitDrafts(BTreeMap<PersonName, BTreeMap<PersonName, f64>>);

impl SplitDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record `person`'s share in `payer`'s draft. Non-finite input counts as 0.
    pub fn set_share(&mut self, payer: &PersonName, person: &PersonName, pct: f64) {
        let pct = if pct.is_finite() { pct } else { 0.0 };
        self.0
            .entry(payer.clone())
            .or_default()
            .insert(person.clone(), pct);
    }

    pub fn share(&self, payer: &str, person: &str) -> f64 {
        self.0
            .get(payer)
            .and_then(|draft| draft.get(person))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of `payer`'s draft over the current people.
    pub fn total(&self, payer: &str, people: &[PersonName]) -> f64 {
        people.iter().map(|p| self.share(payer, p.as_str())).sum()
    }

    pub fn is_valid(&self, payer: &str, people: &[PersonName]) -> bool {
        approx_eq(self.total(payer, people), 100.0)
    }

    /// Give the last person whatever is left of 100% (never below 0).
    pub fn balance(&mut self, payer: &PersonName, people: &[PersonName]) {
        let Some((last, others)) = people.split_last() else {
            return;
        };
        let others_total: f64 = others
            .iter()
            .map(|p| self.share(payer.as_str(), p.as_str()))
            .sum();
        self.set_share(payer, last, (100.0 - others_total).max(0.0));
    }

    /// `payer`'s draft as a full percentage map over the current people.
    pub fn percentages(&self, payer: &str, people: &[PersonName]) -> BTreeMap<PersonName, f64> {
        people
            .iter()
            .map(|p| (p.clone(), self.share(payer, p.as_str())))
            .collect()
    }

    /// Seed a zero share for a newcomer in every existing draft, and open the
    /// newcomer's own draft with a zero share for everyone in `people`.
    pub fn person_added(&mut self, name: &PersonName, people: &[PersonName]) {
        for draft in self.0.values_mut() {
            draft.entry(name.clone()).or_insert(0.0);
        }
        let own = self.0.entry(name.clone()).or_default();
        for person in people.iter().chain(std::iter::once(name)) {
            own.entry(person.clone()).or_insert(0.0);
        }
    }

    /// Drop `name` both as a payer and as a share holder.
    pub fn person_removed(&mut self, name: &str) {
        self.0.remove(name);
        for draft in self.0.values_mut() {
            draft.remove(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonName, &BTreeMap<PersonName, f64>)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(names: &[&str]) -> Vec<PersonName> {
        names.iter().map(|n| PersonName::parse(n).unwrap()).collect()
    }

    #[test]
    fn unset_shares_read_as_zero() {
        let drafts = SplitDrafts::new();
        let group = people(&["Alice", "Bob"]);
        assert_eq!(drafts.share("Alice", "Bob"), 0.0);
        assert_eq!(drafts.total("Alice", &group), 0.0);
        assert!(!drafts.is_valid("Alice", &group));
    }

    #[test]
    fn drafts_are_kept_per_payer() {
        let group = people(&["Alice", "Bob"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[1], 70.0);

        assert_eq!(drafts.share("Alice", "Bob"), 70.0);
        assert_eq!(drafts.share("Bob", "Bob"), 0.0);
    }

    #[test]
    fn non_finite_input_is_stored_as_zero() {
        let group = people(&["Alice"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[0], f64::NAN);
        assert_eq!(drafts.share("Alice", "Alice"), 0.0);
    }

    #[test]
    fn balance_fills_the_last_person() {
        let group = people(&["Alice", "Bob", "Carol"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[0], 25.0);
        drafts.set_share(&group[0], &group[1], 35.0);

        drafts.balance(&group[0], &group);

        assert_eq!(drafts.share("Alice", "Carol"), 40.0);
        assert!(drafts.is_valid("Alice", &group));
    }

    #[test]
    fn balance_never_goes_negative() {
        let group = people(&["Alice", "Bob"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[0], 120.0);

        drafts.balance(&group[0], &group);

        assert_eq!(drafts.share("Alice", "Bob"), 0.0);
        assert!(!drafts.is_valid("Alice", &group));
    }

    #[test]
    fn total_ignores_people_no_longer_in_the_group() {
        let group = people(&["Alice", "Bob", "Carol"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[1], 50.0);
        drafts.set_share(&group[0], &group[2], 50.0);

        assert_eq!(drafts.total("Alice", &group[..2]), 50.0);
    }

    #[test]
    fn person_lifecycle_updates_every_draft() {
        let group = people(&["Alice", "Bob"]);
        let carol = PersonName::parse("Carol").unwrap();
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[1], 60.0);
        drafts.set_share(&group[1], &group[0], 10.0);

        let mut with_carol = group.clone();
        with_carol.push(carol.clone());
        drafts.person_added(&carol, &with_carol);
        assert_eq!(drafts.percentages("Alice", &[group[1].clone(), carol.clone()]).len(), 2);

        drafts.person_removed("Bob");
        assert_eq!(drafts.share("Alice", "Bob"), 0.0);
        assert_eq!(drafts.iter().count(), 2);
    }

    #[test]
    fn newcomer_gets_a_zeroed_draft_of_their_own() {
        let group = people(&["Alice", "Bob", "Carol"]);
        let mut drafts = SplitDrafts::new();
        drafts.set_share(&group[0], &group[1], 40.0);

        drafts.person_added(&group[2], &group);

        let carol_draft = drafts
            .iter()
            .find(|(payer, _)| payer.as_str() == "Carol")
            .map(|(_, draft)| draft.clone())
            .unwrap();
        assert_eq!(carol_draft.len(), 3);
        assert!(carol_draft.values().all(|pct| *pct == 0.0));
        assert_eq!(drafts.share("Alice", "Bob"), 40.0);
        assert_eq!(drafts.share("Alice", "Carol"), 0.0);
        assert_eq!(drafts.iter().find(|(p, _)| p.as_str() == "Alice").map(|(_, d)| d.len()), Some(2));
    }
}
