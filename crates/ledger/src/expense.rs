use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tripsplit_core::Entity;

use crate::person::PersonName;

/// Per-person percentage share of one expense (0-100, absent = 0).
pub type Splits = BTreeMap<PersonName, f64>;

/// Expense identifier, assigned as `max(existing) + 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl ExpenseId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// How a new expense is divided among the current people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "percentages", rename_all = "lowercase")]
pub enum SplitMethod {
    /// `100 / N` percent each, frozen at creation.
    Equal,
    /// Caller-supplied percentages; must total 100 within tolerance.
    Custom(BTreeMap<PersonName, f64>),
}

/// A recorded expense.
///
/// Field names serialize in camelCase (`paidBy`) to stay compatible with
/// exported trip files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub paid_by: PersonName,
    #[serde(default)]
    pub splits: Splits,
}

impl Expense {
    /// Percentage share of `person` (0 when absent).
    pub fn share_of(&self, person: &str) -> f64 {
        self.splits.get(person).copied().unwrap_or(0.0)
    }

    /// Amount `person` owes for this expense.
    pub fn owed_by(&self, person: &str) -> f64 {
        self.amount * self.share_of(person) / 100.0
    }

    /// Sum of all recorded percentages.
    pub fn split_total(&self) -> f64 {
        self.splits.values().sum()
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &ExpenseId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PersonName {
        PersonName::parse(s).unwrap()
    }

    fn hotel() -> Expense {
        Expense {
            id: ExpenseId::new(1),
            description: "Hotel".to_string(),
            amount: 200.0,
            paid_by: name("Person 1"),
            splits: BTreeMap::from([(name("Person 1"), 50.0), (name("Person 2"), 50.0)]),
        }
    }

    #[test]
    fn owed_amount_follows_percentage() {
        let e = hotel();
        assert_eq!(e.owed_by("Person 2"), 100.0);
        assert_eq!(e.owed_by("Nobody"), 0.0);
        assert_eq!(e.split_total(), 100.0);
    }

    #[test]
    fn serializes_with_exported_field_names() {
        let json = serde_json::to_value(hotel()).unwrap();
        assert_eq!(json["paidBy"], "Person 1");
        assert_eq!(json["splits"]["Person 2"], 50.0);
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn missing_splits_default_to_empty() {
        let e: Expense = serde_json::from_str(
            r#"{"id": 4, "description": "Taxi", "amount": 12.5, "paidBy": "Ann"}"#,
        )
        .unwrap();
        assert!(e.splits.is_empty());
        assert_eq!(e.share_of("Ann"), 0.0);
    }
}
