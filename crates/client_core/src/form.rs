//! Editable employee form state for the create and edit views.

use shared::{
    domain::{Employee, EmployeeId},
    error::DomainError,
};

/// Wire names of the editable fields, in form order.
pub const FIELDS: [&str; 9] = [
    "name",
    "email",
    "phone",
    "department",
    "designation",
    "salary",
    "dateOfJoining",
    "location",
    "manager",
];

/// Raw text of every input, as typed. Nothing is parsed until [`validate`].
///
/// [`validate`]: EmployeeForm::validate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    pub salary: String,
    pub date_of_joining: String,
    pub location: String,
    pub manager: String,
}

impl EmployeeForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            department: employee.department.clone(),
            designation: employee.designation.clone(),
            salary: employee.salary.to_string(),
            date_of_joining: employee.date_of_joining.clone(),
            location: employee.location.clone(),
            manager: employee.manager.clone(),
        }
    }

    /// Sets one input by name. Both the wire name (`dateOfJoining`) and the
    /// snake case spelling are accepted.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), DomainError> {
        let slot = self
            .slot_mut(field)
            .ok_or_else(|| DomainError::UnknownField(field.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        let value = match canonical_field(field)? {
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "department" => &self.department,
            "designation" => &self.designation,
            "salary" => &self.salary,
            "dateOfJoining" => &self.date_of_joining,
            "location" => &self.location,
            "manager" => &self.manager,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Every field is required; salary must also be a finite number.
    pub fn validate(&self) -> Result<Employee, DomainError> {
        for field in FIELDS {
            if self.field(field).unwrap_or_default().trim().is_empty() {
                return Err(DomainError::EmptyField(field));
            }
        }

        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| DomainError::InvalidSalary(self.salary.clone()))?;

        Ok(Employee {
            id: self.id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            department: self.department.trim().to_string(),
            designation: self.designation.trim().to_string(),
            salary,
            date_of_joining: self.date_of_joining.trim().to_string(),
            location: self.location.trim().to_string(),
            manager: self.manager.trim().to_string(),
        })
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut String> {
        let slot = match canonical_field(field)? {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "department" => &mut self.department,
            "designation" => &mut self.designation,
            "salary" => &mut self.salary,
            "dateOfJoining" => &mut self.date_of_joining,
            "location" => &mut self.location,
            "manager" => &mut self.manager,
            _ => return None,
        };
        Some(slot)
    }
}

fn canonical_field(field: &str) -> Option<&'static str> {
    match field {
        "date_of_joining" | "date-of-joining" | "date" => Some("dateOfJoining"),
        other => FIELDS.iter().copied().find(|known| *known == other),
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
