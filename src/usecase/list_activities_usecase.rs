use crate::domain::{
    error::DomainError, models::activity::Activity,
    repositories::activity_repository::ActivityRepository,
};

pub struct ListActivitiesUsecase<R: ActivityRepository> {
    activity_repository: R,
}

impl<R: ActivityRepository> ListActivitiesUsecase<R> {
    pub fn new(activity_repository: R) -> Self {
        Self {
            activity_repository,
        }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, DomainError>
    where
        R: Send + Sync,
    {
        Ok(self.activity_repository.list_activities().await?)
    }
}
