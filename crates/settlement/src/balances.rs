use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tripsplit_core::TOLERANCE;
use tripsplit_ledger::{Expense, PersonName};

/// Net position of one person: positive is owed money, negative owes money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonBalance {
    pub person: PersonName,
    pub balance: f64,
}

/// Balances in group order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(Vec<PersonBalance>);

impl Balances {
    pub fn get(&self, person: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|b| b.person == person)
            .map(|b| b.balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonBalance> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all balances; zero up to floating-point drift.
    pub fn total(&self) -> f64 {
        self.0.iter().map(|b| b.balance).sum()
    }

    /// Every balance within tolerance of zero.
    pub fn is_settled(&self) -> bool {
        self.0.iter().all(|b| b.balance.abs() <= TOLERANCE)
    }
}

impl FromIterator<(PersonName, f64)> for Balances {
    fn from_iter<T: IntoIterator<Item = (PersonName, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(person, balance)| PersonBalance { person, balance })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = &'a PersonBalance;
    type IntoIter = core::slice::Iter<'a, PersonBalance>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Net balance of every person in `people`.
///
/// Each expense credits its payer with the full amount and debits every
/// split holder `amount * pct / 100`, in list order. No normalization is
/// applied afterwards. Payers or split holders outside `people` (only
/// possible in imported data) are skipped.
pub fn compute_balances(people: &[PersonName], expenses: &[Expense]) -> Balances {
    let mut entries: Vec<PersonBalance> = people
        .iter()
        .map(|p| PersonBalance {
            person: p.clone(),
            balance: 0.0,
        })
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(people.len());
    for (i, p) in people.iter().enumerate() {
        index.entry(p.as_str()).or_insert(i);
    }

    for expense in expenses {
        match index.get(expense.paid_by.as_str()) {
            Some(&i) => entries[i].balance += expense.amount,
            None => tracing::warn!(
                expense_id = %expense.id,
                payer = %expense.paid_by,
                "payer is not in the group; payment ignored"
            ),
        }

        for (person, pct) in &expense.splits {
            match index.get(person.as_str()) {
                Some(&i) => entries[i].balance -= expense.amount * pct / 100.0,
                None => tracing::warn!(
                    expense_id = %expense.id,
                    person = %person,
                    "split holder is not in the group; share ignored"
                ),
            }
        }
    }

    Balances(entries)
}
