//! Ledger model: people, expenses and their percentage splits.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! [`Ledger`] aggregate validates every mutation and leaves itself untouched
//! when a command is rejected.

pub mod drafts;
pub mod expense;
pub mod ledger;
pub mod person;

pub use drafts::SplitDrafts;
pub use expense::{Expense, ExpenseId, SplitMethod, Splits};
pub use ledger::{
    AddExpense, AddPerson, ExpenseAdded, ExpenseRemoved, Ledger, LedgerCommand, LedgerEvent,
    PersonAdded, PersonRemoved, RemoveExpense, RemovePerson, DEFAULT_PEOPLE,
};
pub use person::PersonName;
