//! Canonical in-memory employee list and the actions that mutate it.
//!
//! Actions are dispatched only after the remote store acknowledged the
//! matching call, so the roster never runs ahead of the server.

use shared::domain::{Employee, EmployeeId};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum RosterAction {
    /// Bulk replace after a list call.
    Load(Vec<Employee>),
    Create(Employee),
    Update(Employee),
    Delete(EmployeeId),
}

impl RosterAction {
    fn name(&self) -> &'static str {
        match self {
            RosterAction::Load(_) => "load",
            RosterAction::Create(_) => "create",
            RosterAction::Update(_) => "update",
            RosterAction::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied,
    /// Update or delete named an id the roster does not hold; nothing changed.
    NoMatch,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        let mut roster = Self::default();
        roster.apply(RosterAction::Load(employees));
        roster
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.position(id).map(|idx| &self.employees[idx])
    }

    pub fn apply(&mut self, action: RosterAction) -> SyncOutcome {
        let name = action.name();
        let outcome = match action {
            RosterAction::Load(employees) => {
                self.employees.clear();
                for employee in employees {
                    self.upsert(employee);
                }
                SyncOutcome::Applied
            }
            RosterAction::Create(employee) => {
                self.upsert(employee);
                SyncOutcome::Applied
            }
            RosterAction::Update(employee) => {
                match employee.id.and_then(|id| self.position(id)) {
                    Some(idx) => {
                        self.employees[idx] = employee;
                        SyncOutcome::Applied
                    }
                    None => SyncOutcome::NoMatch,
                }
            }
            RosterAction::Delete(id) => match self.position(id) {
                Some(idx) => {
                    self.employees.remove(idx);
                    SyncOutcome::Applied
                }
                None => SyncOutcome::NoMatch,
            },
        };

        if outcome == SyncOutcome::NoMatch {
            debug!(action = name, "roster: no entry with a matching id, ignored");
        }
        outcome
    }

    /// Appends, or replaces in place when the id is already present.
    fn upsert(&mut self, employee: Employee) {
        match employee.id.and_then(|id| self.position(id)) {
            Some(idx) => self.employees[idx] = employee,
            None => self.employees.push(employee),
        }
    }

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.employees
            .iter()
            .position(|employee| employee.id == Some(id))
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
