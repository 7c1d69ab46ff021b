use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::participant::{ParticipantEmail, SignupOutcome, UnregisterOutcome},
};

pub type ActivityName = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    name: ActivityName,
    description: String,
    schedule: String,
    max_participants: u32,
    participants: Vec<ParticipantEmail>,
}

impl Activity {
    pub fn new(
        name: ActivityName,
        description: String,
        schedule: String,
        max_participants: u32,
        participants: Vec<ParticipantEmail>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyActivityName);
        }
        if max_participants == 0 {
            return Err(DomainError::InvalidCapacity);
        }

        Ok(Self {
            name,
            description,
            schedule,
            max_participants,
            participants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn schedule(&self) -> &str {
        &self.schedule
    }
    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }
    pub fn participants(&self) -> &[ParticipantEmail] {
        &self.participants
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() as u64 >= u64::from(self.max_participants)
    }

    pub fn is_registered(&self, email: &ParticipantEmail) -> bool {
        self.participants.contains(email)
    }

    /// Capacity is checked before duplicates, so a registered participant of a
    /// full activity sees `ActivityFull`.
    pub fn enroll(&mut self, email: ParticipantEmail) -> SignupOutcome {
        if self.is_full() {
            return SignupOutcome::ActivityFull;
        }
        if self.is_registered(&email) {
            return SignupOutcome::AlreadyRegistered;
        }
        self.participants.push(email);
        SignupOutcome::Enrolled
    }

    pub fn withdraw(&mut self, email: &ParticipantEmail) -> UnregisterOutcome {
        match self.participants.iter().position(|p| p == email) {
            Some(index) => {
                self.participants.remove(index);
                UnregisterOutcome::Removed
            }
            None => UnregisterOutcome::ParticipantNotFound,
        }
    }
}
