use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        activity::Activity,
        participant::{ParticipantEmail, SignupOutcome, UnregisterOutcome},
    },
};

/// Storage for activities and their rosters.
///
/// Each mutating call decides its outcome and applies it atomically, so two
/// concurrent signups can never push an activity past its capacity.
#[async_trait]
pub trait ActivityRepository {
    async fn list_activities(&self) -> Result<Vec<Activity>, RepositoryError>;

    async fn add_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<SignupOutcome, RepositoryError>;

    async fn remove_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<UnregisterOutcome, RepositoryError>;
}
