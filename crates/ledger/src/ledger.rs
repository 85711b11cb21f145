use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use tripsplit_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, TripId, approx_eq, position_of,
};

use crate::expense::{Expense, ExpenseId, SplitMethod, Splits};
use crate::person::PersonName;

/// Group a fresh trip starts with.
pub const DEFAULT_PEOPLE: [&str; 2] = ["Person 1", "Person 2"];

/// Aggregate root: the people of one trip and the expenses they share.
///
/// Invariants:
/// - at least one person, names unique;
/// - expense ids unique;
/// - new expenses reference a current payer and carry a split entry for every
///   current person.
///
/// Historical expenses are never re-validated: equal splits stay at the
/// `100 / N` computed when they were recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    id: TripId,
    people: Vec<PersonName>,
    expenses: Vec<Expense>,
    version: u64,
}

impl Ledger {
    /// Fresh ledger with the default group and no expenses.
    pub fn new(id: TripId) -> Self {
        Self {
            id,
            people: DEFAULT_PEOPLE
                .iter()
                .map(|n| PersonName(n.to_string()))
                .collect(),
            expenses: Vec::new(),
            version: 0,
        }
    }

    /// Ledger with an explicit starting group.
    pub fn with_people<I, S>(id: TripId, names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let people = names
            .into_iter()
            .map(|n| PersonName::parse(n.as_ref()))
            .collect::<DomainResult<Vec<_>>>()?;
        Self::from_parts(id, people, Vec::new())
    }

    /// Restore a persisted ledger.
    ///
    /// The group is validated; expenses are taken as recorded apart from the
    /// id uniqueness check.
    pub fn from_parts(
        id: TripId,
        people: Vec<PersonName>,
        expenses: Vec<Expense>,
    ) -> DomainResult<Self> {
        if people.is_empty() {
            return Err(DomainError::invariant("a trip needs at least one person"));
        }

        let mut seen = HashSet::with_capacity(people.len());
        for person in &people {
            if !seen.insert(person.as_str()) {
                return Err(DomainError::validation(format!(
                    "duplicate person name: {person}"
                )));
            }
        }

        let mut ids = HashSet::with_capacity(expenses.len());
        for expense in &expenses {
            if !ids.insert(expense.id) {
                return Err(DomainError::invariant(format!(
                    "duplicate expense id: {}",
                    expense.id
                )));
            }
        }

        Ok(Self {
            id,
            people,
            expenses,
            version: 0,
        })
    }

    pub fn id_typed(&self) -> TripId {
        self.id
    }

    /// People in group order.
    pub fn people(&self) -> &[PersonName] {
        &self.people
    }

    /// Expenses in recording order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        position_of(&self.expenses, &id).map(|idx| &self.expenses[idx])
    }

    pub fn contains_person(&self, name: &str) -> bool {
        self.people.iter().any(|p| p == name)
    }

    /// Id the next recorded expense will receive.
    ///
    /// Fails once an (imported) expense already holds `u64::MAX`.
    pub fn next_expense_id(&self) -> DomainResult<ExpenseId> {
        match self.expenses.iter().map(|e| e.id.get()).max() {
            None => Ok(ExpenseId::new(1)),
            Some(max) => max
                .checked_add(1)
                .map(ExpenseId::new)
                .ok_or_else(|| DomainError::invariant("expense ids are exhausted")),
        }
    }

    pub fn add_person(&mut self, name: &str) -> DomainResult<PersonName> {
        let events = self.execute(&LedgerCommand::AddPerson(AddPerson {
            name: name.to_string(),
        }))?;
        match events.into_iter().next() {
            Some(LedgerEvent::PersonAdded(e)) => Ok(e.name),
            _ => Err(DomainError::invariant("add person emitted no event")),
        }
    }

    pub fn remove_person(&mut self, name: &str) -> DomainResult<()> {
        self.execute(&LedgerCommand::RemovePerson(RemovePerson {
            name: name.to_string(),
        }))?;
        Ok(())
    }

    pub fn add_expense(&mut self, cmd: AddExpense) -> DomainResult<ExpenseId> {
        let events = self.execute(&LedgerCommand::AddExpense(cmd))?;
        match events.into_iter().next() {
            Some(LedgerEvent::ExpenseAdded(e)) => Ok(e.expense.id),
            _ => Err(DomainError::invariant("add expense emitted no event")),
        }
    }

    /// Returns `false` when no expense has that id.
    pub fn remove_expense(&mut self, id: ExpenseId) -> bool {
        match self.execute(&LedgerCommand::RemoveExpense(RemoveExpense { id })) {
            Ok(events) => !events.is_empty(),
            Err(_) => false,
        }
    }
}

impl AggregateRoot for Ledger {
    type Id = TripId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddPerson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPerson {
    pub name: String,
}

/// Command: RemovePerson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePerson {
    pub name: String,
}

/// Command: AddExpense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub split: SplitMethod,
}

/// Command: RemoveExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveExpense {
    pub id: ExpenseId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerCommand {
    AddPerson(AddPerson),
    RemovePerson(RemovePerson),
    AddExpense(AddExpense),
    RemoveExpense(RemoveExpense),
}

/// Event: PersonAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonAdded {
    pub name: PersonName,
}

/// Event: PersonRemoved.
///
/// `reassigned_to` takes over as payer of every expense the removed person
/// paid for. The payment really happened, so this changes attribution; it is
/// the accepted price of keeping every expense attached to a known payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRemoved {
    pub name: PersonName,
    pub reassigned_to: PersonName,
}

/// Event: ExpenseAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAdded {
    pub expense: Expense,
}

/// Event: ExpenseRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRemoved {
    pub id: ExpenseId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    PersonAdded(PersonAdded),
    PersonRemoved(PersonRemoved),
    ExpenseAdded(ExpenseAdded),
    ExpenseRemoved(ExpenseRemoved),
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::PersonAdded(_) => "ledger.person_added",
            LedgerEvent::PersonRemoved(_) => "ledger.person_removed",
            LedgerEvent::ExpenseAdded(_) => "ledger.expense_added",
            LedgerEvent::ExpenseRemoved(_) => "ledger.expense_removed",
        }
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::PersonAdded(e) => {
                self.people.push(e.name.clone());
            }
            LedgerEvent::PersonRemoved(e) => {
                self.people.retain(|p| p != &e.name);
                for expense in &mut self.expenses {
                    expense.splits.remove(e.name.as_str());
                    if expense.paid_by == e.name {
                        expense.paid_by = e.reassigned_to.clone();
                    }
                }
            }
            LedgerEvent::ExpenseAdded(e) => {
                self.expenses.push(e.expense.clone());
            }
            LedgerEvent::ExpenseRemoved(e) => {
                self.expenses.retain(|x| x.id != e.id);
            }
        }

        self.version += 1;
        tracing::debug!(trip_id = %self.id, event = event.event_type(), version = self.version, "ledger event applied");
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AddPerson(cmd) => self.handle_add_person(cmd),
            LedgerCommand::RemovePerson(cmd) => self.handle_remove_person(cmd),
            LedgerCommand::AddExpense(cmd) => self.handle_add_expense(cmd),
            LedgerCommand::RemoveExpense(cmd) => self.handle_remove_expense(cmd),
        }
    }
}

impl Ledger {
    fn handle_add_person(&self, cmd: &AddPerson) -> DomainResult<Vec<LedgerEvent>> {
        let name = PersonName::parse(&cmd.name)?;
        if self.people.contains(&name) {
            return Err(DomainError::validation(format!("{name} is already in the group")));
        }
        Ok(vec![LedgerEvent::PersonAdded(PersonAdded { name })])
    }

    fn handle_remove_person(&self, cmd: &RemovePerson) -> DomainResult<Vec<LedgerEvent>> {
        if self.people.len() <= 1 {
            return Err(DomainError::invariant("cannot remove the last person"));
        }

        let Some(name) = self.people.iter().find(|p| **p == *cmd.name) else {
            return Err(DomainError::not_found());
        };

        // len >= 2, so somebody else is always left.
        let Some(reassigned_to) = self.people.iter().find(|p| *p != name) else {
            return Err(DomainError::invariant("no remaining person to take over payments"));
        };

        Ok(vec![LedgerEvent::PersonRemoved(PersonRemoved {
            name: name.clone(),
            reassigned_to: reassigned_to.clone(),
        })])
    }

    fn handle_add_expense(&self, cmd: &AddExpense) -> DomainResult<Vec<LedgerEvent>> {
        let description = cmd.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description must not be empty"));
        }
        if !(cmd.amount.is_finite() && cmd.amount > 0.0) {
            return Err(DomainError::validation("amount must be a positive number"));
        }

        let Some(paid_by) = self.people.iter().find(|p| **p == *cmd.paid_by) else {
            return Err(DomainError::validation(format!(
                "payer {} is not in the group",
                cmd.paid_by
            )));
        };

        let splits = match &cmd.split {
            SplitMethod::Equal => self.equal_splits(),
            SplitMethod::Custom(percentages) => self.custom_splits(percentages)?,
        };

        let expense = Expense {
            id: self.next_expense_id()?,
            description: description.to_string(),
            amount: cmd.amount,
            paid_by: paid_by.clone(),
            splits,
        };

        Ok(vec![LedgerEvent::ExpenseAdded(ExpenseAdded { expense })])
    }

    fn handle_remove_expense(&self, cmd: &RemoveExpense) -> DomainResult<Vec<LedgerEvent>> {
        if self.expense(cmd.id).is_none() {
            return Ok(vec![]);
        }
        Ok(vec![LedgerEvent::ExpenseRemoved(ExpenseRemoved { id: cmd.id })])
    }

    /// `100 / N` each; the remainder of the division is not redistributed.
    fn equal_splits(&self) -> Splits {
        let share = 100.0 / self.people.len() as f64;
        self.people.iter().map(|p| (p.clone(), share)).collect()
    }

    fn custom_splits(&self, percentages: &BTreeMap<PersonName, f64>) -> DomainResult<Splits> {
        for (person, pct) in percentages {
            if !self.people.contains(person) {
                return Err(DomainError::validation(format!(
                    "{person} is not in the group"
                )));
            }
            if !pct.is_finite() || *pct < 0.0 || *pct > 100.0 {
                return Err(DomainError::validation(format!(
                    "share of {person} must be between 0 and 100"
                )));
            }
        }

        let splits: Splits = self
            .people
            .iter()
            .map(|p| (p.clone(), percentages.get(p).copied().unwrap_or(0.0)))
            .collect();

        let total: f64 = splits.values().sum();
        if !approx_eq(total, 100.0) {
            return Err(DomainError::validation(format!(
                "split percentages must total 100 (got {total:.2})"
            )));
        }

        Ok(splits)
    }
}
