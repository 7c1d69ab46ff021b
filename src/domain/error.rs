use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Participant not found")]
    ParticipantNotFound,

    #[error("Activity is full")]
    ActivityFull,

    #[error("Already registered for this activity")]
    AlreadyRegistered,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Empty activity name")]
    EmptyActivityName,

    #[error("Maximum participants must be positive")]
    InvalidCapacity,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
