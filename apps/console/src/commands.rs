//! One-shot subcommands.

use anyhow::Result;
use clap::Args;
use client_core::{EmployeeDirectory, EmployeeForm, ListQuery};
use shared::{
    domain::{EmployeeId, SortKey},
    error::DomainError,
    protocol::Route,
};
use tracing::{debug, info, warn};

use crate::render::render_page;

/// Field values for `add` and `edit`. Omitted fields stay blank on `add` and
/// keep their current value on `edit`.
#[derive(Args, Debug, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub designation: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    /// ISO date, e.g. 2024-03-01.
    #[arg(long)]
    pub date_of_joining: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub manager: Option<String>,
}

impl EmployeeFields {
    pub fn apply_to(&self, form: &mut EmployeeForm) -> Result<(), DomainError> {
        let values = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("department", &self.department),
            ("designation", &self.designation),
            ("salary", &self.salary),
            ("dateOfJoining", &self.date_of_joining),
            ("location", &self.location),
            ("manager", &self.manager),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value.as_str())?;
            }
        }
        Ok(())
    }
}

pub async fn list(
    directory: &EmployeeDirectory,
    page_size: usize,
    search: String,
    sort_by: SortKey,
    page: usize,
) -> Result<()> {
    directory.refresh().await?;
    let query = ListQuery {
        search,
        sort_by,
        page: page.max(1),
        ..ListQuery::new(page_size)
    };
    print!("{}", render_page(&directory.view(&query).await, &query));
    Ok(())
}

pub async fn add(
    directory: &EmployeeDirectory,
    page_size: usize,
    fields: &EmployeeFields,
) -> Result<()> {
    let mut form = EmployeeForm::blank();
    fields.apply_to(&mut form)?;

    let saved = directory.submit(Route::Create, &form).await?;
    info!(id = ?saved.id, "created {}", saved.name);
    show_list_view(directory, page_size).await
}

pub async fn edit(
    directory: &EmployeeDirectory,
    page_size: usize,
    raw_id: &str,
    fields: &EmployeeFields,
) -> Result<()> {
    let id = match raw_id.parse::<EmployeeId>() {
        Ok(id) => id,
        Err(err) => {
            warn!("edit aborted: {err}");
            return Ok(());
        }
    };

    // The edit view starts from the loaded list; a record the list does not
    // hold is fetched on its own, and a blank form is the last resort.
    if let Err(err) = directory.refresh().await {
        debug!("edit prefill falls back to a single fetch: {err}");
    }
    let mut form = match directory.find(id).await {
        Some(employee) => EmployeeForm::from_employee(&employee),
        None => match directory.fetch(id).await {
            Ok(employee) => EmployeeForm::from_employee(&employee),
            Err(_) => directory.edit_form(id).await,
        },
    };
    fields.apply_to(&mut form)?;

    directory.submit(Route::Edit(id), &form).await?;
    show_list_view(directory, page_size).await
}

pub async fn delete(directory: &EmployeeDirectory, raw_id: &str) -> Result<()> {
    let id = match raw_id.parse::<EmployeeId>() {
        Ok(id) => id,
        Err(err) => {
            warn!("delete aborted: {err}");
            return Ok(());
        }
    };

    directory.delete(id).await?;
    println!("deleted employee {id}");
    Ok(())
}

/// Navigation target after a successful create or update.
async fn show_list_view(directory: &EmployeeDirectory, page_size: usize) -> Result<()> {
    list(directory, page_size, String::new(), SortKey::default(), 1).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_only_given_fields() {
        let mut form = EmployeeForm::blank();
        form.set_field("manager", "Kim").expect("field");

        let fields = EmployeeFields {
            name: Some("Amy".into()),
            date_of_joining: Some("2019-05-01".into()),
            ..EmployeeFields::default()
        };
        fields.apply_to(&mut form).expect("apply");

        assert_eq!(form.name, "Amy");
        assert_eq!(form.date_of_joining, "2019-05-01");
        assert_eq!(form.manager, "Kim");
        assert!(form.email.is_empty());
    }
}
