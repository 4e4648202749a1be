//! REST paths of the remote employee store and the front-end routing surface.

use std::{fmt, str::FromStr};

use crate::{domain::EmployeeId, error::DomainError};

pub const EMPLOYEES_PATH: &str = "/api/employees";

pub fn employee_path(id: EmployeeId) -> String {
    format!("{EMPLOYEES_PATH}/{}", id.0)
}

/// Views a front end can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Edit(EmployeeId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/employees".to_string(),
            Route::Create => "/add".to_string(),
            Route::Edit(id) => format!("/edit/{}", id.0),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let path = raw.trim();
        let path = path.strip_suffix('/').unwrap_or(path);
        match path {
            "" | "/employees" => return Ok(Route::List),
            "/add" => return Ok(Route::Create),
            "/edit" => return Err(DomainError::InvalidId(String::new())),
            _ => {}
        }

        match path.strip_prefix("/edit/") {
            Some(id) => Ok(Route::Edit(id.parse()?)),
            None => Err(DomainError::UnknownRoute(raw.to_string())),
        }
    }
}
