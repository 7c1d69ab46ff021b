use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Value object for a participant's email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantEmail(String);

impl ParticipantEmail {
    /// Trims surrounding whitespace and requires a `local@domain` shape
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        let mut parts = value.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(value))
            }
            _ => Err(DomainError::InvalidEmail),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of trying to add a participant, decided inside one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Enrolled,
    ActivityNotFound,
    ActivityFull,
    AlreadyRegistered,
}

/// Result of trying to remove a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnregisterOutcome {
    Removed,
    ActivityNotFound,
    ParticipantNotFound,
}
