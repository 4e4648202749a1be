use super::*;

fn employee(id: Option<i64>, name: &str) -> Employee {
    Employee {
        id: id.map(EmployeeId),
        name: name.to_string(),
        email: "someone@example.com".to_string(),
        phone: "555-0100".to_string(),
        department: "Sales".to_string(),
        designation: "Rep".to_string(),
        salary: 42000.0,
        date_of_joining: "2021-06-01".to_string(),
        location: "Lisbon".to_string(),
        manager: "Rui".to_string(),
    }
}

fn seeded() -> Roster {
    Roster::new(vec![employee(Some(1), "Bob"), employee(Some(2), "Amy")])
}

#[test]
fn create_then_delete_restores_previous_content() {
    let mut roster = seeded();
    let before = roster.clone();

    assert_eq!(
        roster.apply(RosterAction::Create(employee(Some(9), "Zoe"))),
        SyncOutcome::Applied
    );
    assert_eq!(roster.len(), 3);
    assert_eq!(roster.employees().last().map(|e| e.name.as_str()), Some("Zoe"));

    assert_eq!(
        roster.apply(RosterAction::Delete(EmployeeId(9))),
        SyncOutcome::Applied
    );
    assert_eq!(roster, before);
}

#[test]
fn update_replaces_matching_entry_in_place() {
    let mut roster = seeded();
    let mut changed = employee(Some(1), "Robert");
    changed.salary = 51000.0;

    assert_eq!(
        roster.apply(RosterAction::Update(changed.clone())),
        SyncOutcome::Applied
    );
    assert_eq!(roster.employees()[0], changed);
    assert_eq!(roster.len(), 2);
}

#[test]
fn update_of_unknown_id_is_a_no_op() {
    let mut roster = seeded();
    let before = roster.clone();

    assert_eq!(
        roster.apply(RosterAction::Update(employee(Some(77), "Ghost"))),
        SyncOutcome::NoMatch
    );
    assert_eq!(
        roster.apply(RosterAction::Update(employee(None, "Unsaved"))),
        SyncOutcome::NoMatch
    );
    assert_eq!(roster, before);
}

#[test]
fn delete_of_unknown_id_is_a_no_op() {
    let mut roster = seeded();
    let before = roster.clone();
    assert_eq!(
        roster.apply(RosterAction::Delete(EmployeeId(77))),
        SyncOutcome::NoMatch
    );
    assert_eq!(roster, before);
}

#[test]
fn create_with_existing_id_does_not_duplicate() {
    let mut roster = seeded();
    roster.apply(RosterAction::Create(employee(Some(2), "Amy B.")));

    assert_eq!(roster.len(), 2);
    assert_eq!(
        roster.get(EmployeeId(2)).map(|e| e.name.as_str()),
        Some("Amy B.")
    );
}

#[test]
fn load_replaces_everything_and_collapses_duplicate_ids() {
    let mut roster = seeded();
    roster.apply(RosterAction::Load(vec![
        employee(Some(5), "Eve"),
        employee(Some(6), "Finn"),
        employee(Some(5), "Eve (latest)"),
    ]));

    let names: Vec<_> = roster.employees().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Eve (latest)", "Finn"]);
    assert!(roster.get(EmployeeId(1)).is_none());
}

#[test]
fn last_completed_update_wins() {
    let mut roster = seeded();
    roster.apply(RosterAction::Update(employee(Some(1), "First")));
    roster.apply(RosterAction::Update(employee(Some(1), "Second")));
    assert_eq!(
        roster.get(EmployeeId(1)).map(|e| e.name.as_str()),
        Some("Second")
    );
}
