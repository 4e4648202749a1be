//! Plain-text rendering of list pages and forms.

use client_core::{form::FIELDS, EmployeeForm, ListPage, ListQuery};
use shared::domain::Employee;

const HEADERS: [&str; 10] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Department",
    "Designation",
    "Manager",
    "Salary",
    "Date of Joining",
    "Location",
];

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn employee_row(employee: &Employee) -> Vec<String> {
    vec![
        employee.id.map(|id| id.to_string()).unwrap_or_default(),
        employee.name.clone(),
        employee.email.clone(),
        employee.phone.clone(),
        employee.department.clone(),
        employee.designation.clone(),
        employee.manager.clone(),
        employee.salary.to_string(),
        employee.date_of_joining.clone(),
        employee.location.clone(),
    ]
}

pub fn render_page(page: &ListPage, query: &ListQuery) -> String {
    let mut out = String::new();
    if page.employees.is_empty() {
        out.push_str("(no employees)\n");
    } else {
        let mut table = Table::new(&HEADERS);
        for employee in &page.employees {
            table.add_row(employee_row(employee));
        }
        out.push_str(&table.render());
    }

    out.push_str(&format!(
        "Page {} of {} | {} match(es) | sort: {}",
        page.page, page.total_pages, page.total_matches, query.sort_by
    ));
    if !query.search.is_empty() {
        out.push_str(&format!(" | search: {:?}", query.search));
    }
    out.push('\n');
    out
}

pub fn render_form(title: &str, form: &EmployeeForm) -> String {
    let mut out = format!("{title}\n");
    let width = FIELDS.iter().map(|f| f.len()).max().unwrap_or(0);
    for field in FIELDS {
        let value = form.field(field).unwrap_or_default();
        out.push_str(&format!("  {field:<width$}  {value}\n"));
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
