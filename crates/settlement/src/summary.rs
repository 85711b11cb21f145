use serde::{Deserialize, Serialize};

use tripsplit_ledger::{Expense, PersonName};

/// What one person put in and what their splits cost them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person: PersonName,
    /// Sum of the expenses this person paid for.
    pub paid: f64,
    /// Sum of this person's split shares.
    pub share: f64,
}

/// Totals shown next to the expense list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_expenses: f64,
    pub expense_count: usize,
    pub people: Vec<PersonSummary>,
}

impl TripSummary {
    pub fn compute(people: &[PersonName], expenses: &[Expense]) -> Self {
        let people = people
            .iter()
            .map(|person| PersonSummary {
                person: person.clone(),
                paid: expenses
                    .iter()
                    .filter(|e| e.paid_by == *person)
                    .map(|e| e.amount)
                    .sum(),
                share: expenses.iter().map(|e| e.owed_by(person.as_str())).sum(),
            })
            .collect();

        Self {
            total_expenses: expenses.iter().map(|e| e.amount).sum(),
            expense_count: expenses.len(),
            people,
        }
    }

    pub fn person(&self, name: &str) -> Option<&PersonSummary> {
        self.people.iter().find(|p| p.person == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripsplit_core::TripId;
    use tripsplit_ledger::{AddExpense, Ledger, SplitMethod};

    #[test]
    fn empty_trip_has_zero_totals() {
        let ledger = Ledger::new(TripId::new());
        let summary = TripSummary::compute(ledger.people(), ledger.expenses());
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.people.len(), 2);
        assert!(summary.people.iter().all(|p| p.paid == 0.0 && p.share == 0.0));
    }

    #[test]
    fn equal_shares_add_up_to_the_amount() {
        let mut ledger = Ledger::with_people(TripId::new(), ["A", "B", "C", "D"]).unwrap();
        ledger
            .add_expense(AddExpense {
                description: "Boat".to_string(),
                amount: 250.0,
                paid_by: "B".to_string(),
                split: SplitMethod::Equal,
            })
            .unwrap();
        ledger
            .add_expense(AddExpense {
                description: "Snacks".to_string(),
                amount: 14.0,
                paid_by: "B".to_string(),
                split: SplitMethod::Equal,
            })
            .unwrap();

        let summary = TripSummary::compute(ledger.people(), ledger.expenses());
        assert_eq!(summary.total_expenses, 264.0);
        assert_eq!(summary.person("B").unwrap().paid, 264.0);
        assert_eq!(summary.person("A").unwrap().paid, 0.0);

        for p in &summary.people {
            assert!((p.share - 66.0).abs() < 1e-9);
        }
        let shares: f64 = summary.people.iter().map(|p| p.share).sum();
        assert!((shares - 264.0).abs() < 1e-9);
    }
}
