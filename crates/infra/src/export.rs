//! Human-facing exports: the CSV spreadsheet and the JSON report.

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tripsplit_ledger::PersonName;
use tripsplit_settlement::{Balances, Settlement, TripSummary, settle};

use crate::error::InfraError;
use crate::snapshot::TripState;

/// Everything the results panel shows, computed at `date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub people: Vec<PersonName>,
    pub balances: Balances,
    pub settlements: Vec<Settlement>,
    pub summary: TripSummary,
    pub date: DateTime<Utc>,
}

impl TripReport {
    pub fn build(state: &TripState, date: DateTime<Utc>) -> Self {
        let people = state.ledger.people();
        let expenses = state.ledger.expenses();
        let settled = settle(people, expenses);

        Self {
            people: people.to_vec(),
            balances: settled.balances,
            settlements: settled.settlements,
            summary: TripSummary::compute(people, expenses),
            date,
        }
    }
}

/// Spreadsheet export.
///
/// Layout:
/// - header: `Description, Amount, Paid By`, then `<p> (%)`, `<p> ($)` per person
/// - one row per expense, percentages to 1 decimal, owed amounts to 2
/// - `TOTAL` row
/// - `Settlements:` row followed by one `<from> pays <to>, <amount>` row each
pub fn export_csv(state: &TripState) -> Result<String, InfraError> {
    let people = state.ledger.people();
    let expenses = state.ledger.expenses();
    let settled = settle(people, expenses);
    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let mut header = vec![
        "Description".to_string(),
        "Amount".to_string(),
        "Paid By".to_string(),
    ];
    for person in people {
        header.push(format!("{person} (%)"));
        header.push(format!("{person} ($)"));
    }
    wtr.write_record(&header)?;

    for expense in expenses {
        let mut row = vec![
            expense.description.clone(),
            expense.amount.to_string(),
            expense.paid_by.to_string(),
        ];
        for person in people {
            row.push(format!("{:.1}", expense.share_of(person.as_str())));
            row.push(format!("{:.2}", expense.owed_by(person.as_str())));
        }
        wtr.write_record(&row)?;
    }

    let mut total_row = vec!["TOTAL".to_string(), format!("{total:.2}"), String::new()];
    total_row.extend(people.iter().flat_map(|_| [String::new(), String::new()]));
    wtr.write_record(&total_row)?;

    wtr.write_record(["Settlements:"])?;
    for s in &settled.settlements {
        wtr.write_record([format!("{} pays {}", s.from, s.to), format!("{:.2}", s.amount)])?;
    }

    let bytes = wtr.into_inner().map_err(|e| InfraError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| InfraError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripsplit_core::TripId;
    use tripsplit_ledger::{AddExpense, SplitMethod};

    fn trip() -> TripState {
        let mut state = TripState::new(TripId::new());
        state.ledger.add_expense(AddExpense {
            description: "Hotel, two nights".to_string(),
            amount: 200.0,
            paid_by: "Person 1".to_string(),
            split: SplitMethod::Equal,
        })
        .unwrap();
        state.ledger.add_expense(AddExpense {
            description: "Taxi".to_string(),
            amount: 12.5,
            paid_by: "Person 2".to_string(),
            split: SplitMethod::Equal,
        })
        .unwrap();
        state
    }

    fn rows(csv_text: &str) -> Vec<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_text.as_bytes());
        rdr.records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn csv_layout() {
        let out = export_csv(&trip()).unwrap();
        let rows = rows(&out);

        assert_eq!(
            rows[0],
            [
                "Description",
                "Amount",
                "Paid By",
                "Person 1 (%)",
                "Person 1 ($)",
                "Person 2 (%)",
                "Person 2 ($)"
            ]
        );
        assert_eq!(
            rows[1],
            ["Hotel, two nights", "200", "Person 1", "50.0", "100.00", "50.0", "100.00"]
        );
        assert_eq!(rows[2], ["Taxi", "12.5", "Person 2", "50.0", "6.25", "50.0", "6.25"]);
        assert_eq!(rows[3], ["TOTAL", "212.50", "", "", "", "", ""]);
        assert_eq!(rows[4], ["Settlements:"]);
        assert_eq!(rows[5], ["Person 2 pays Person 1", "93.75"]);
        assert_eq!(rows.len(), 6);
    }

    #[test]
    fn descriptions_with_commas_are_quoted() {
        let out = export_csv(&trip()).unwrap();
        assert!(out.contains("\"Hotel, two nights\""));
    }

    #[test]
    fn empty_trip_exports_header_total_and_settlements_marker() {
        let out = export_csv(&TripState::new(TripId::new())).unwrap();
        let rows = rows(&out);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][..2], ["TOTAL", "0.00"]);
        assert_eq!(rows[2], ["Settlements:"]);
    }

    #[test]
    fn report_bundles_balances_settlements_and_summary() {
        let state = trip();
        let now = Utc::now();
        let report = TripReport::build(&state, now);

        assert_eq!(report.people, state.ledger.people());
        assert_eq!(report.balances.get("Person 1"), Some(93.75));
        assert_eq!(report.settlements.len(), 1);
        assert_eq!(report.summary.total_expenses, 212.5);
        assert_eq!(report.date, now);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["balances"][1]["person"], "Person 2");
        assert_eq!(json["settlements"][0]["from"], "Person 2");
    }
}
