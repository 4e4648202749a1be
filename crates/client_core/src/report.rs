//! Failure reports handed to an external error-reporting collaborator.

use shared::error::DomainError;

use crate::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl ErrorContext {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorContext::List => "list",
            ErrorContext::Get => "get",
            ErrorContext::Create => "create",
            ErrorContext::Update => "update",
            ErrorContext::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Status,
    Decode,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    context: ErrorContext,
    category: ErrorCategory,
    status: Option<u16>,
    message: String,
}

impl ErrorReport {
    pub fn from_store_error(context: ErrorContext, err: &StoreError) -> Self {
        let (category, status) = match err {
            StoreError::InvalidBaseUrl { .. }
            | StoreError::UnsupportedScheme { .. }
            | StoreError::Transport(_) => (ErrorCategory::Transport, None),
            StoreError::Status { status, .. } => (ErrorCategory::Status, Some(*status)),
            StoreError::Decode { .. } | StoreError::MissingId => (ErrorCategory::Decode, None),
        };
        Self {
            context,
            category,
            status,
            message: err.to_string(),
        }
    }

    pub fn from_domain_error(context: ErrorContext, err: &DomainError) -> Self {
        Self {
            context,
            category: ErrorCategory::Validation,
            status: None,
            message: err.to_string(),
        }
    }

    pub fn context(&self) -> ErrorContext {
        self.context
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: &ErrorReport);
}

/// Default reporter. Failures are already logged where they are caught.
pub struct SilentErrorReporter;

impl ErrorReporter for SilentErrorReporter {
    fn report(&self, _report: &ErrorReport) {}
}
