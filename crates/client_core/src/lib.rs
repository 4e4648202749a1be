use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Employee, EmployeeId},
    error::DomainError,
    protocol::{employee_path, Route, EMPLOYEES_PATH},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};
use url::Url;

pub mod form;
pub mod pipeline;
pub mod report;
pub mod roster;

pub use form::EmployeeForm;
pub use pipeline::{ListPage, ListQuery};
pub use report::{ErrorCategory, ErrorContext, ErrorReport, ErrorReporter, SilentErrorReporter};
pub use roster::{Roster, RosterAction, SyncOutcome};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid employee store url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("employee store url {url:?} must use http or https, not {scheme:?}")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("employee store request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("employee store answered {status} to {method} {path}: {body}")]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },
    #[error("undecodable employee store response for {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
    #[error("employee store created a record without assigning an id")]
    MissingId,
}

/// Remote collection of employee records keyed by integer id.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, StoreError>;
    async fn get(&self, id: EmployeeId) -> Result<Employee, StoreError>;
    /// Returns the stored record carrying its server-assigned id.
    async fn create(&self, employee: &Employee) -> Result<Employee, StoreError>;
    async fn update(&self, id: EmployeeId, employee: &Employee) -> Result<Employee, StoreError>;
    async fn delete(&self, id: EmployeeId) -> Result<(), StoreError>;
}

pub struct HttpEmployeeStore {
    http: Client,
    base_url: String,
}

impl HttpEmployeeStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let parsed = Url::parse(base_url).map_err(|source| StoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        // "localhost:3003" parses with "localhost" as its scheme.
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::UnsupportedScheme {
                url: base_url.to_string(),
                scheme: parsed.scheme().to_string(),
            });
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::Transport)?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Employee>,
    ) -> Result<Response, StoreError> {
        let mut request = self
            .http
            .request(method.clone(), format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(StoreError::Transport)?;
        let status = response.status();
        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), "employee store call succeeded");
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > ERROR_BODY_SNIPPET_LEN {
            let cut = (0..=ERROR_BODY_SNIPPET_LEN)
                .rev()
                .find(|idx| body.is_char_boundary(*idx))
                .unwrap_or(0);
            body.truncate(cut);
        }
        Err(StoreError::Status {
            method,
            path: path.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> Result<T, StoreError> {
        let bytes = response.bytes().await.map_err(StoreError::Transport)?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl EmployeeStore for HttpEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>, StoreError> {
        let response = self.send(Method::GET, EMPLOYEES_PATH, None).await?;
        Self::read_json(EMPLOYEES_PATH, response).await
    }

    async fn get(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        let path = employee_path(id);
        let response = self.send(Method::GET, &path, None).await?;
        let employee: Employee = Self::read_json(&path, response).await?;
        Ok(employee.with_id(id))
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut draft = employee.clone();
        draft.id = None;

        let response = self
            .send(Method::POST, EMPLOYEES_PATH, Some(&draft))
            .await?;
        let created: Employee = Self::read_json(EMPLOYEES_PATH, response).await?;
        if created.id.is_none() {
            return Err(StoreError::MissingId);
        }
        Ok(created)
    }

    async fn update(&self, id: EmployeeId, employee: &Employee) -> Result<Employee, StoreError> {
        let path = employee_path(id);
        let submitted = employee.clone().with_id(id);
        let response = self.send(Method::PUT, &path, Some(&submitted)).await?;

        // Some stores acknowledge with an empty or partial body; the submitted
        // record is then what the server now holds.
        match Self::read_json::<Employee>(&path, response).await {
            Ok(updated) => Ok(updated.with_id(id)),
            Err(StoreError::Decode { source, .. }) => {
                debug!(path = %path, "update acknowledged without a record body: {source}");
                Ok(submitted)
            }
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.send(Method::DELETE, &employee_path(id), None).await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum DirectoryEvent {
    Loaded { count: usize },
    Created(Employee),
    Updated(Employee),
    Deleted(EmployeeId),
    Failed(ErrorReport),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("route {0} has no form to submit")]
    NotAForm(Route),
}

/// Owner of the canonical employee list.
///
/// Every mutation performs the remote call first and touches the roster only
/// once the store acknowledged it. Views derive their pages from the roster
/// and learn about changes through [`DirectoryEvent`]s.
pub struct EmployeeDirectory {
    store: Arc<dyn EmployeeStore>,
    reporter: Arc<dyn ErrorReporter>,
    roster: Mutex<Roster>,
    events: broadcast::Sender<DirectoryEvent>,
}

impl EmployeeDirectory {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self::with_reporter(store, Arc::new(SilentErrorReporter))
    }

    pub fn with_reporter(store: Arc<dyn EmployeeStore>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            store,
            reporter,
            roster: Mutex::new(Roster::default()),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    /// Replaces the roster with the store's full list.
    pub async fn refresh(&self) -> Result<usize, StoreError> {
        let employees = self
            .store
            .list()
            .await
            .map_err(|err| self.fail(ErrorContext::List, err))?;
        let count = employees.len();
        self.dispatch(RosterAction::Load(employees)).await;
        info!(count, "employee list loaded");
        let _ = self.events.send(DirectoryEvent::Loaded { count });
        Ok(count)
    }

    pub async fn create(&self, employee: Employee) -> Result<Employee, StoreError> {
        let created = self
            .store
            .create(&employee)
            .await
            .map_err(|err| self.fail(ErrorContext::Create, err))?;
        self.dispatch(RosterAction::Create(created.clone())).await;
        info!(id = ?created.id, "employee created");
        let _ = self.events.send(DirectoryEvent::Created(created.clone()));
        Ok(created)
    }

    pub async fn update(&self, id: EmployeeId, employee: Employee) -> Result<Employee, StoreError> {
        let updated = self
            .store
            .update(id, &employee)
            .await
            .map_err(|err| self.fail(ErrorContext::Update, err))?;
        self.dispatch(RosterAction::Update(updated.clone())).await;
        info!(id = id.0, "employee updated");
        let _ = self.events.send(DirectoryEvent::Updated(updated.clone()));
        Ok(updated)
    }

    pub async fn delete(&self, id: EmployeeId) -> Result<(), StoreError> {
        self.store
            .delete(id)
            .await
            .map_err(|err| self.fail(ErrorContext::Delete, err))?;
        self.dispatch(RosterAction::Delete(id)).await;
        info!(id = id.0, "employee deleted");
        let _ = self.events.send(DirectoryEvent::Deleted(id));
        Ok(())
    }

    /// Submits a create or edit form. The form is validated before any
    /// request goes out.
    pub async fn submit(&self, route: Route, form: &EmployeeForm) -> Result<Employee, SubmitError> {
        let context = match route {
            Route::Create => ErrorContext::Create,
            Route::Edit(_) => ErrorContext::Update,
            Route::List => return Err(SubmitError::NotAForm(route)),
        };

        let employee = match form.validate() {
            Ok(employee) => employee,
            Err(err) => {
                let report = ErrorReport::from_domain_error(context, &err);
                error!(context = context.as_str(), "rejected employee form: {err}");
                self.publish_failure(report);
                return Err(err.into());
            }
        };

        let saved = match route {
            Route::Edit(id) => self.update(id, employee).await?,
            _ => self.create(employee).await?,
        };
        Ok(saved)
    }

    /// Fetches a single record from the store without touching the roster.
    pub async fn fetch(&self, id: EmployeeId) -> Result<Employee, StoreError> {
        self.store
            .get(id)
            .await
            .map_err(|err| self.fail(ErrorContext::Get, err))
    }

    pub async fn view(&self, query: &ListQuery) -> ListPage {
        let roster = self.roster.lock().await;
        pipeline::run(roster.employees(), query)
    }

    pub async fn snapshot(&self) -> Vec<Employee> {
        self.roster.lock().await.employees().to_vec()
    }

    pub async fn find(&self, id: EmployeeId) -> Option<Employee> {
        self.roster.lock().await.get(id).cloned()
    }

    /// Edit form prefilled from the roster, or blank when the id is unknown.
    pub async fn edit_form(&self, id: EmployeeId) -> EmployeeForm {
        match self.find(id).await {
            Some(employee) => EmployeeForm::from_employee(&employee),
            None => EmployeeForm {
                id: Some(id),
                ..EmployeeForm::blank()
            },
        }
    }

    async fn dispatch(&self, action: RosterAction) -> SyncOutcome {
        self.roster.lock().await.apply(action)
    }

    fn fail(&self, context: ErrorContext, err: StoreError) -> StoreError {
        error!(context = context.as_str(), "employee store call failed: {err}");
        self.publish_failure(ErrorReport::from_store_error(context, &err));
        err
    }

    fn publish_failure(&self, report: ErrorReport) {
        self.reporter.report(&report);
        let _ = self.events.send(DirectoryEvent::Failed(report));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
