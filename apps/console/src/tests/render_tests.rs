use super::*;
use shared::domain::{EmployeeId, SortKey};

fn amy() -> Employee {
    Employee {
        id: Some(EmployeeId(2)),
        name: "Amy".into(),
        email: "amy@example.com".into(),
        phone: "555-0101".into(),
        department: "Finance".into(),
        designation: "Analyst".into(),
        salary: 70000.0,
        date_of_joining: "2019-05-01".into(),
        location: "Oslo".into(),
        manager: "Bob".into(),
    }
}

#[test]
fn table_pads_columns_to_widest_cell() {
    let mut table = Table::new(&["A", "B"]);
    table.add_row(vec!["long value".into(), "x".into()]);
    let rendered = table.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "A           B");
    assert_eq!(lines[1], "----------  -");
    assert_eq!(lines[2], "long value  x");
}

#[test]
fn page_footer_reports_position_and_search() {
    let query = ListQuery {
        search: "am".into(),
        sort_by: SortKey::Salary,
        ..ListQuery::default()
    };
    let page = ListPage {
        employees: vec![amy()],
        page: 1,
        total_pages: 1,
        total_matches: 1,
    };
    let rendered = render_page(&page, &query);

    assert!(rendered.contains("amy@example.com"));
    assert!(rendered.contains("70000"));
    assert!(rendered
        .trim_end()
        .ends_with("Page 1 of 1 | 1 match(es) | sort: salary | search: \"am\""));
}

#[test]
fn empty_page_says_so() {
    let page = ListPage {
        employees: Vec::new(),
        page: 1,
        total_pages: 0,
        total_matches: 0,
    };
    let rendered = render_page(&page, &ListQuery::default());
    assert!(rendered.starts_with("(no employees)"));
    assert!(rendered.contains("Page 1 of 0"));
}

#[test]
fn form_lists_every_field() {
    let rendered = render_form("Edit employee 2", &EmployeeForm::from_employee(&amy()));
    assert!(rendered.starts_with("Edit employee 2\n"));
    for field in FIELDS {
        assert!(rendered.contains(field), "{field} missing");
    }
    assert!(rendered.contains("2019-05-01"));
}
