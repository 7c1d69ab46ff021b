use tracing::{info, warn};

use crate::domain::{
    error::DomainError,
    models::participant::{ParticipantEmail, SignupOutcome},
    repositories::activity_repository::ActivityRepository,
};

pub struct SignupUsecase<R: ActivityRepository> {
    activity_repository: R,
}

impl<R: ActivityRepository> SignupUsecase<R> {
    pub fn new(activity_repository: R) -> Self {
        Self {
            activity_repository,
        }
    }

    pub async fn signup(&self, activity_name: String, email: String) -> Result<(), DomainError>
    where
        R: Send + Sync,
    {
        let email = ParticipantEmail::new(email)?;

        let outcome = self
            .activity_repository
            .add_participant(&activity_name, &email)
            .await?;

        let error = match outcome {
            SignupOutcome::Enrolled => {
                info!(activity = %activity_name, email = email.as_str(), "participant signed up");
                return Ok(());
            }
            SignupOutcome::ActivityNotFound => DomainError::ActivityNotFound,
            SignupOutcome::ActivityFull => DomainError::ActivityFull,
            SignupOutcome::AlreadyRegistered => DomainError::AlreadyRegistered,
        };
        warn!(activity = %activity_name, email = email.as_str(), %error, "signup rejected");
        Err(error)
    }
}
