use serde::{Deserialize, Serialize};

use tripsplit_core::{TOLERANCE, round_cents};
use tripsplit_ledger::PersonName;

use crate::balances::Balances;

/// One proposed payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: PersonName,
    pub to: PersonName,
    /// Rounded to cents.
    pub amount: f64,
}

/// Greedy largest-to-largest settlement plan.
///
/// Creditors are sorted by descending balance, debtors by ascending balance
/// (biggest debt first); both sorts are stable, so ties keep group order. Each
/// debtor then pays down the creditor list in that fixed order until what is
/// left of the debt is within [`TOLERANCE`].
///
/// This usually yields few transactions but is not a minimum-transaction
/// solver.
pub fn compute_settlements(balances: &Balances) -> Vec<Settlement> {
    let mut creditors: Vec<(&PersonName, f64)> = balances
        .iter()
        .filter(|b| b.balance > 0.0)
        .map(|b| (&b.person, b.balance))
        .collect();
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut debtors: Vec<(&PersonName, f64)> = balances
        .iter()
        .filter(|b| b.balance < 0.0)
        .map(|b| (&b.person, b.balance))
        .collect();
    debtors.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut settlements = Vec::new();

    for (debtor, balance) in debtors {
        let mut remaining = -balance;

        for (creditor, credit) in creditors.iter_mut() {
            if remaining <= TOLERANCE {
                break;
            }
            if *credit <= TOLERANCE {
                continue;
            }

            let payment = remaining.min(*credit);
            if payment > TOLERANCE {
                settlements.push(Settlement {
                    from: debtor.clone(),
                    to: (*creditor).clone(),
                    amount: round_cents(payment),
                });
                remaining -= payment;
                *credit -= payment;
            }
        }
    }

    settlements
}
