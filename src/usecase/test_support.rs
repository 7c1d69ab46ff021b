use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        activity::Activity,
        participant::{ParticipantEmail, SignupOutcome, UnregisterOutcome},
    },
    repositories::activity_repository::ActivityRepository,
};

/// Repository double backed by a vector; `broken` makes every call fail.
#[derive(Clone, Default)]
pub struct InMemoryActivityRepository {
    activities: Arc<Mutex<Vec<Activity>>>,
    broken: bool,
}

impl InMemoryActivityRepository {
    pub fn with_activity(name: &str, max_participants: u32, participants: &[&str]) -> Self {
        let participants = participants
            .iter()
            .map(|e| ParticipantEmail::new(*e).unwrap())
            .collect();
        let activity = Activity::new(
            name.to_string(),
            format!("{name} description"),
            "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants,
            participants,
        )
        .unwrap();
        Self {
            activities: Arc::new(Mutex::new(vec![activity])),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            activities: Arc::default(),
            broken: true,
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.broken {
            Err(RepositoryError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn list_activities(&self) -> Result<Vec<Activity>, RepositoryError> {
        self.check()?;
        Ok(self.activities.lock().unwrap().clone())
    }

    async fn add_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<SignupOutcome, RepositoryError> {
        self.check()?;
        let mut activities = self.activities.lock().unwrap();
        match activities.iter_mut().find(|a| a.name() == activity_name) {
            Some(activity) => Ok(activity.enroll(email.clone())),
            None => Ok(SignupOutcome::ActivityNotFound),
        }
    }

    async fn remove_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<UnregisterOutcome, RepositoryError> {
        self.check()?;
        let mut activities = self.activities.lock().unwrap();
        match activities.iter_mut().find(|a| a.name() == activity_name) {
            Some(activity) => Ok(activity.withdraw(email)),
            None => Ok(UnregisterOutcome::ActivityNotFound),
        }
    }
}
