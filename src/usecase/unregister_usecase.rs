use tracing::{info, warn};

use crate::domain::{
    error::DomainError,
    models::participant::{ParticipantEmail, UnregisterOutcome},
    repositories::activity_repository::ActivityRepository,
};

pub struct UnregisterUsecase<R: ActivityRepository> {
    activity_repository: R,
}

impl<R: ActivityRepository> UnregisterUsecase<R> {
    pub fn new(activity_repository: R) -> Self {
        Self {
            activity_repository,
        }
    }

    pub async fn unregister(&self, activity_name: String, email: String) -> Result<(), DomainError>
    where
        R: Send + Sync,
    {
        let email = ParticipantEmail::new(email)?;

        let outcome = self
            .activity_repository
            .remove_participant(&activity_name, &email)
            .await?;

        let error = match outcome {
            UnregisterOutcome::Removed => {
                info!(activity = %activity_name, email = email.as_str(), "participant unregistered");
                return Ok(());
            }
            UnregisterOutcome::ActivityNotFound => DomainError::ActivityNotFound,
            UnregisterOutcome::ParticipantNotFound => DomainError::ParticipantNotFound,
        };
        warn!(activity = %activity_name, email = email.as_str(), %error, "unregister rejected");
        Err(error)
    }
}
