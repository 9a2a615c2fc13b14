//! Case intake: the support ticket a panel deliberates on.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A case as supplied by the ticket store.
///
/// The core only reads it; results go back to the caller, never to the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Who the case is about (usually a customer id); keys the memory store
    pub subject: String,
    #[serde(default)]
    pub prior_messages: Vec<String>,
}

impl Case {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            subject: subject.into(),
            prior_messages: Vec::new(),
        }
    }

    pub fn with_prior_messages(mut self, messages: Vec<String>) -> Self {
        self.prior_messages = messages;
        self
    }

    /// Debate topic derived from the case
    pub fn topic(&self) -> String {
        format!("How should case {} be resolved? {}", self.id, self.title)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidCase("case id is empty".to_string()));
        }
        if self.subject.trim().is_empty() {
            return Err(DomainError::InvalidCase(format!("case {} has no subject", self.id)));
        }
        Ok(())
    }
}
