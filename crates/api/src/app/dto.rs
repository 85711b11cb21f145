use std::collections::BTreeMap;

use serde::Deserialize;

use tripsplit_core::{DomainError, DomainResult};
use tripsplit_infra::TripState;
use tripsplit_ledger::{AddExpense, PersonName, SplitMethod};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddPersonRequest {
    pub name: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    #[default]
    Equal,
    Custom,
}

#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub description: String,
    pub amount: f64,
    #[serde(alias = "paidBy")]
    pub paid_by: String,
    #[serde(default)]
    pub split: SplitKind,
    /// Custom split; when absent the payer's draft is used.
    pub percentages: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
pub struct SetShareRequest {
    pub percentage: f64,
}

// -------------------------
// Request → command mapping
// -------------------------

pub fn to_add_expense(body: &AddExpenseRequest, trip: &TripState) -> DomainResult<AddExpense> {
    let split = match body.split {
        SplitKind::Equal => SplitMethod::Equal,
        SplitKind::Custom => match &body.percentages {
            Some(pcts) => SplitMethod::Custom(
                pcts.iter()
                    .map(|(name, pct)| Ok((PersonName::parse(name)?, *pct)))
                    .collect::<DomainResult<_>>()?,
            ),
            None => {
                SplitMethod::Custom(trip.drafts.percentages(body.paid_by.trim(), trip.ledger.people()))
            }
        },
    };

    Ok(AddExpense {
        description: body.description.clone(),
        amount: body.amount,
        paid_by: body.paid_by.clone(),
        split,
    })
}

/// Look up a current group member by name.
pub fn person(trip: &TripState, name: &str) -> DomainResult<PersonName> {
    trip.ledger
        .people()
        .iter()
        .find(|p| *p == name)
        .cloned()
        .ok_or(DomainError::NotFound)
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn trip_to_json(trip: &TripState) -> serde_json::Value {
    serde_json::json!({
        "id": trip.id().to_string(),
        "people": trip.ledger.people(),
        "expenses": trip.ledger.expenses(),
        "customSplits": trip.drafts,
        "nextExpenseId": trip.ledger.next_expense_id().ok(),
    })
}

pub fn draft_to_json(trip: &TripState, payer: &PersonName) -> serde_json::Value {
    let people = trip.ledger.people();
    serde_json::json!({
        "payer": payer,
        "percentages": trip.drafts.percentages(payer.as_str(), people),
        "total": trip.drafts.total(payer.as_str(), people),
        "valid": trip.drafts.is_valid(payer.as_str(), people),
    })
}
