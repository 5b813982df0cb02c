//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{DashboardView, SubmitOutcome};

pub enum UiEvent {
    BackendReady,
    Submitted(SubmitOutcome),
    DashboardLoaded(DashboardView),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("sqlite")
            || message_lower.contains("database")
            || message_lower.contains("disk")
            || message_lower.contains("quota")
            || message_lower.contains("slot")
            || message_lower.contains("directory")
        {
            UiErrorCategory::Storage
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Startup failures leave the app without a storage worker.
    pub fn is_fatal(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sqlite_failures_as_storage() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to open enrollment database 'sqlite://x.db': unable to open database file",
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
        assert!(err.is_fatal());
    }

    #[test]
    fn queue_failures_are_not_storage_errors() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "UI command queue is full; please retry",
        );
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert!(!err.is_fatal());
    }

    #[test]
    fn unknown_messages_fall_through() {
        let err = UiError::from_message(UiErrorContext::Dashboard, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err_label(err.category()), "Unexpected");
        assert_eq!(err.message(), "something odd");
    }
}
