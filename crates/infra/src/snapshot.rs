//! Persisted/exported trip format.
//!
//! Field names (`people`, `expenses[].paidBy`, `customSplits`, `date`) match
//! the trip files saved by the web client, so those files import unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tripsplit_core::TripId;
use tripsplit_ledger::{Expense, Ledger, PersonName, SplitDrafts};

use crate::error::InfraError;

/// Serializable trip contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshot {
    pub people: Vec<PersonName>,
    pub expenses: Vec<Expense>,
    #[serde(default, skip_serializing_if = "SplitDrafts::is_empty")]
    pub custom_splits: SplitDrafts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl TripSnapshot {
    /// Parse an imported document. `people` and `expenses` are required.
    pub fn from_json(raw: &str) -> Result<Self, InfraError> {
        serde_json::from_str(raw).map_err(|e| InfraError::InvalidSnapshot(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, InfraError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Live state of one trip: the ledger plus the split drafts being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct TripState {
    pub ledger: Ledger,
    pub drafts: SplitDrafts,
}

impl TripState {
    /// Fresh trip: default group, no expenses, no drafts.
    pub fn new(id: TripId) -> Self {
        Self {
            ledger: Ledger::new(id),
            drafts: SplitDrafts::new(),
        }
    }

    pub fn id(&self) -> TripId {
        self.ledger.id_typed()
    }

    pub fn to_snapshot(&self, date: DateTime<Utc>) -> TripSnapshot {
        TripSnapshot {
            people: self.ledger.people().to_vec(),
            expenses: self.ledger.expenses().to_vec(),
            custom_splits: self.drafts.clone(),
            date: Some(date),
        }
    }

    /// Restore a trip; the group is validated, historical expenses are not.
    pub fn from_snapshot(id: TripId, snapshot: TripSnapshot) -> Result<Self, InfraError> {
        let ledger = Ledger::from_parts(id, snapshot.people, snapshot.expenses)
            .map_err(|e| InfraError::InvalidSnapshot(e.to_string()))?;
        Ok(Self {
            ledger,
            drafts: snapshot.custom_splits,
        })
    }

    pub fn add_person(&mut self, name: &str) -> tripsplit_core::DomainResult<PersonName> {
        let added = self.ledger.add_person(name)?;
        self.drafts.person_added(&added, self.ledger.people());
        Ok(added)
    }

    pub fn remove_person(&mut self, name: &str) -> tripsplit_core::DomainResult<()> {
        self.ledger.remove_person(name)?;
        self.drafts.person_removed(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripsplit_ledger::{AddExpense, SplitMethod};

    const WEB_EXPORT: &str = r#"{
      "people": ["Person 1", "Person 2"],
      "expenses": [
        { "id": 1, "description": "Hotel", "amount": 200, "paidBy": "Person 1",
          "splits": { "Person 1": 50, "Person 2": 50 } }
      ],
      "customSplits": { "Person 1": { "Person 1": 70, "Person 2": 30 } },
      "date": "2024-06-01T10:20:30.000Z"
    }"#;

    #[test]
    fn imports_web_client_export() {
        let snapshot = TripSnapshot::from_json(WEB_EXPORT).unwrap();
        assert_eq!(snapshot.people.len(), 2);
        assert_eq!(snapshot.expenses[0].amount, 200.0);
        assert_eq!(snapshot.expenses[0].paid_by, "Person 1");
        assert_eq!(snapshot.custom_splits.share("Person 1", "Person 2"), 30.0);
        assert!(snapshot.date.is_some());

        let state = TripState::from_snapshot(TripId::new(), snapshot).unwrap();
        assert_eq!(state.ledger.expenses().len(), 1);
    }

    #[test]
    fn drafts_and_date_are_optional() {
        let snapshot =
            TripSnapshot::from_json(r#"{"people": ["Solo"], "expenses": []}"#).unwrap();
        assert!(snapshot.custom_splits.is_empty());
        assert_eq!(snapshot.date, None);
    }

    #[test]
    fn missing_people_or_expenses_is_invalid() {
        for raw in [r#"{"expenses": []}"#, r#"{"people": ["A"]}"#, "not json"] {
            assert!(matches!(
                TripSnapshot::from_json(raw),
                Err(InfraError::InvalidSnapshot(_))
            ));
        }
    }

    #[test]
    fn empty_group_is_rejected_on_restore() {
        let snapshot = TripSnapshot::from_json(r#"{"people": [], "expenses": []}"#).unwrap();
        assert!(matches!(
            TripState::from_snapshot(TripId::new(), snapshot),
            Err(InfraError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_round_trip_keeps_ledger_and_drafts() {
        let id = TripId::new();
        let mut state = TripState::new(id);
        state.add_person("Carol").unwrap();
        state
            .ledger
            .add_expense(AddExpense {
                description: "Ferry".to_string(),
                amount: 45.0,
                paid_by: "Carol".to_string(),
                split: SplitMethod::Equal,
            })
            .unwrap();
        let carol = PersonName::parse("Carol").unwrap();
        state.drafts.set_share(&carol, &carol, 100.0);

        let json = state.to_snapshot(Utc::now()).to_json_pretty().unwrap();
        let restored = TripState::from_snapshot(id, TripSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.ledger.people(), state.ledger.people());
        assert_eq!(restored.ledger.expenses(), state.ledger.expenses());
        assert_eq!(restored.drafts, state.drafts);
    }

    #[test]
    fn adding_a_person_opens_their_draft() {
        let mut state = TripState::new(TripId::new());
        let p1 = PersonName::parse("Person 1").unwrap();
        state.drafts.set_share(&p1, &p1, 30.0);

        state.add_person("Carol").unwrap();

        assert_eq!(state.drafts.iter().count(), 2);
        assert_eq!(state.drafts.share("Person 1", "Person 1"), 30.0);
        assert_eq!(state.drafts.total("Carol", state.ledger.people()), 0.0);
        let carol_draft = state.drafts.percentages("Carol", state.ledger.people());
        assert_eq!(carol_draft.len(), 3);
    }

    #[test]
    fn removing_a_person_clears_their_drafts() {
        let mut state = TripState::new(TripId::new());
        let p1 = PersonName::parse("Person 1").unwrap();
        let p2 = PersonName::parse("Person 2").unwrap();
        state.drafts.set_share(&p2, &p1, 40.0);
        state.drafts.set_share(&p1, &p2, 60.0);

        state.remove_person("Person 2").unwrap();

        assert_eq!(state.drafts.share("Person 1", "Person 2"), 0.0);
        assert_eq!(state.drafts.iter().count(), 1);
    }
}
