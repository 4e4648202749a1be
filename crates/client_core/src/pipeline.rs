//! Filter → sort → paginate derivation of the displayed employee page.
//!
//! Everything here is a pure function of the canonical list and a
//! [`ListQuery`]; the result is recomputed whenever search, sort or page
//! changes.

use std::{cmp::Ordering, ops::Range};

use feruca::Collator;
use shared::domain::{Employee, SortKey};
use tracing::warn;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub sort_by: SortKey,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort_by: SortKey::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = clamp_page(self.page.saturating_add(1), total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.page = clamp_page(self.page.saturating_sub(1), total_pages);
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub employees: Vec<Employee>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl ListPage {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Runs the full pipeline for one query.
pub fn run(employees: &[Employee], query: &ListQuery) -> ListPage {
    let page_size = query.page_size.max(1);
    let page = query.page.max(1);

    let mut matches = filter_by_name(employees, &query.search);
    sort_employees(&mut matches, query.sort_by);

    let total_matches = matches.len();
    let bounds = page_bounds(page, page_size, total_matches);
    ListPage {
        employees: matches[bounds].iter().map(|employee| (*employee).clone()).collect(),
        page,
        total_pages: total_pages(total_matches, page_size),
        total_matches,
    }
}

/// Case-insensitive substring match on `name`. An empty term keeps everyone.
pub fn filter_by_name<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    let needle = term.to_lowercase();
    employees
        .iter()
        .filter(|employee| needle.is_empty() || employee.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable ascending sort by the given key.
pub fn sort_employees(employees: &mut [&Employee], key: SortKey) {
    match key {
        SortKey::Name => {
            let mut collator = Collator::default();
            employees.sort_by(|a, b| compare_names(&mut collator, a, b));
        }
        SortKey::Salary => employees.sort_by(|a, b| a.salary.total_cmp(&b.salary)),
        SortKey::Date => {
            for employee in unparseable_join_dates(employees) {
                warn!(
                    id = ?employee.id,
                    date_of_joining = %employee.date_of_joining,
                    "date sort: unparseable dateOfJoining placed after all valid dates"
                );
            }
            employees.sort_by(|a, b| compare_join_dates(a, b));
        }
    }
}

/// Unicode collation of names (CLDR root order, so "Ángel" sorts with the
/// A's), then the exact text with lower case first.
pub fn compare_names(collator: &mut Collator, a: &Employee, b: &Employee) -> Ordering {
    collator
        .collate(&a.name, &b.name)
        .then_with(|| b.name.cmp(&a.name))
}

/// Employees whose `dateOfJoining` has no calendar date in it.
pub fn unparseable_join_dates<'a>(
    employees: &'a [&'a Employee],
) -> impl Iterator<Item = &'a Employee> + 'a {
    employees
        .iter()
        .copied()
        .filter(|employee| employee.joined_on().is_none())
}

fn compare_join_dates(a: &Employee, b: &Employee) -> Ordering {
    match (a.joined_on(), b.joined_on()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slice bounds of a 1-based page, cut to `len`. Pages past the end are empty.
pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = page.saturating_mul(page_size).min(len);
    start..end
}

/// Keeps navigation inside `[1, total_pages]`; an empty result still shows page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
