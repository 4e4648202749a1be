use super::*;

fn filled() -> EmployeeForm {
    let mut form = EmployeeForm::blank();
    for (field, value) in [
        ("name", "Amy"),
        ("email", "amy@example.com"),
        ("phone", "555-0101"),
        ("department", "Finance"),
        ("designation", "Analyst"),
        ("salary", "70000"),
        ("dateOfJoining", "2019-05-01"),
        ("location", "Oslo"),
        ("manager", "Bob"),
    ] {
        form.set_field(field, value).expect("known field");
    }
    form
}

#[test]
fn validates_a_complete_form() {
    let employee = filled().validate().expect("valid form");
    assert_eq!(employee.name, "Amy");
    assert_eq!(employee.salary, 70000.0);
    assert_eq!(employee.date_of_joining, "2019-05-01");
    assert_eq!(employee.id, None);
}

#[test]
fn every_field_is_required() {
    for field in FIELDS {
        let mut form = filled();
        form.set_field(field, "   ").expect("known field");
        assert_eq!(form.validate(), Err(DomainError::EmptyField(field)));
    }
}

#[test]
fn salary_must_be_numeric() {
    let mut form = filled();
    form.set_field("salary", "a lot").expect("known field");
    assert_eq!(
        form.validate(),
        Err(DomainError::InvalidSalary("a lot".to_string()))
    );

    form.set_field("salary", "inf").expect("known field");
    assert!(matches!(form.validate(), Err(DomainError::InvalidSalary(_))));
}

#[test]
fn accepts_snake_case_date_field() {
    let mut form = filled();
    form.set_field("date_of_joining", "2024-02-29").expect("alias");
    assert_eq!(form.field("dateOfJoining"), Some("2024-02-29"));
}

#[test]
fn rejects_unknown_fields() {
    let mut form = EmployeeForm::blank();
    assert_eq!(
        form.set_field("shoeSize", "44"),
        Err(DomainError::UnknownField("shoeSize".to_string()))
    );
    assert_eq!(form.field("shoeSize"), None);
}

#[test]
fn prefills_from_existing_record() {
    let employee = filled()
        .validate()
        .expect("valid form")
        .with_id(EmployeeId(4));
    let form = EmployeeForm::from_employee(&employee);

    assert_eq!(form.id, Some(EmployeeId(4)));
    assert_eq!(form.salary, "70000");
    assert_eq!(form.validate().expect("round trip"), employee);
}
