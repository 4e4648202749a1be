use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);

impl FromStr for EmployeeId {
    type Err = DomainError;

    /// Parses an id taken from a navigation parameter. Only plain base-10
    /// integers are accepted; empty, fractional or padded input is rejected.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() || raw.trim() != raw {
            return Err(DomainError::InvalidId(raw.to_string()));
        }
        raw.parse::<i64>()
            .map(EmployeeId)
            .map_err(|_| DomainError::InvalidId(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub designation: String,
    #[serde(deserialize_with = "de_salary")]
    pub salary: f64,
    pub date_of_joining: String,
    pub location: String,
    pub manager: String,
}

impl Employee {
    /// Calendar date of joining, if the stored string can be read as one.
    pub fn joined_on(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date_of_joining)
    }

    pub fn with_id(mut self, id: EmployeeId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Accepts `YYYY-MM-DD` as produced by date inputs, and full RFC 3339
/// timestamps as some stores return them.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn de_salary<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("salary is not numeric: {text:?}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Date,
    Salary,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Salary => "salary",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" | "date_of_joining" | "dateofjoining" => Ok(SortKey::Date),
            "salary" => Ok(SortKey::Salary),
            _ => Err(DomainError::InvalidSortKey(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: Some(EmployeeId(3)),
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
    fn serializes_with_camel_case_wire_names() {
        let value = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(value["dateOfJoining"], "2019-05-01");
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn omits_missing_id_when_serializing() {
        let mut employee = sample();
        employee.id = None;
        let value = serde_json::to_value(employee).expect("serialize");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn accepts_numeric_string_salary() {
        let raw = r#"{"id":1,"name":"Bob","email":"b@x","phone":"1","department":"d",
            "designation":"x","salary":"50000","dateOfJoining":"2020-01-01",
            "location":"l","manager":"m"}"#;
        let employee: Employee = serde_json::from_str(raw).expect("decode");
        assert_eq!(employee.salary, 50000.0);
        assert_eq!(employee.id, Some(EmployeeId(1)));
    }

    #[test]
    fn rejects_non_numeric_salary() {
        let raw = r#"{"name":"Bob","email":"b@x","phone":"1","department":"d",
            "designation":"x","salary":"lots","dateOfJoining":"2020-01-01",
            "location":"l","manager":"m"}"#;
        assert!(serde_json::from_str::<Employee>(raw).is_err());
    }

    #[test]
    fn parses_navigation_ids_strictly() {
        assert_eq!("42".parse::<EmployeeId>().expect("id"), EmployeeId(42));
        for raw in ["", " 4", "4.0", "abc", "0x10"] {
            assert!(
                matches!(raw.parse::<EmployeeId>(), Err(DomainError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn reads_plain_and_timestamp_dates() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1);
        assert_eq!(parse_calendar_date("2020-01-01"), expected);
        assert_eq!(parse_calendar_date("2020-01-01T08:30:00Z"), expected);
        assert_eq!(parse_calendar_date("01/01/2020"), None);
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("Salary".parse::<SortKey>().expect("key"), SortKey::Salary);
        assert_eq!("date".parse::<SortKey>().expect("key"), SortKey::Date);
        assert!("age".parse::<SortKey>().is_err());
    }
}
