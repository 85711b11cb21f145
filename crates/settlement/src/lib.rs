//! Settlement engine: expenses → balances → settlement plan.
//!
//! Pure, deterministic functions over ledger snapshots. Nothing here holds
//! state between calls; the working copy of creditor credit used while
//! matching lives and dies inside one [`compute_settlements`] call.

pub mod balances;
pub mod settlements;
pub mod summary;

use serde::Serialize;

use tripsplit_ledger::{Expense, PersonName};

pub use balances::{Balances, PersonBalance, compute_balances};
pub use settlements::{Settlement, compute_settlements};
pub use summary::{PersonSummary, TripSummary};

/// Balances together with the settlement plan derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementReport {
    pub balances: Balances,
    pub settlements: Vec<Settlement>,
}

/// Run the full pipeline for one snapshot.
pub fn settle(people: &[PersonName], expenses: &[Expense]) -> SettlementReport {
    let balances = compute_balances(people, expenses);
    let settlements = compute_settlements(&balances);
    SettlementReport {
        balances,
        settlements,
    }
}
