use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            activity::Activity,
            participant::{ParticipantEmail, SignupOutcome, UnregisterOutcome},
        },
        repositories::activity_repository::ActivityRepository,
    },
    infrastructure::database::database_error,
};
use entity::{activities, participants};

#[derive(Clone)]
pub struct SqlActivityRepository {
    db: DatabaseConnection,
}

impl SqlActivityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Mutations issue their write as the first statement of the transaction.
    /// On SQLite that takes the write lock up front, so a concurrent writer
    /// waits on the busy timeout instead of failing a shared-to-write lock
    /// upgrade. SQLite rejects explicit isolation levels; server backends get
    /// SERIALIZABLE so the post-write capacity check sees every committed row.
    async fn begin_write(&self) -> Result<DatabaseTransaction, DbErr> {
        let isolation = match self.db.get_database_backend() {
            DbBackend::Sqlite => None,
            _ => Some(IsolationLevel::Serializable),
        };
        self.db.begin_with_config(isolation, None).await
    }
}

fn to_domain(
    model: activities::Model,
    members: Vec<participants::Model>,
) -> Result<Activity, RepositoryError> {
    let max_participants = u32::try_from(model.max_participants).map_err(|_| {
        RepositoryError::DatabaseError(format!(
            "invalid max_participants {} for {}",
            model.max_participants, model.name
        ))
    })?;

    let participants = members
        .into_iter()
        .map(|member| ParticipantEmail::new(member.email))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

    Activity::new(
        model.name,
        model.description,
        model.schedule,
        max_participants,
        participants,
    )
    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
}

async fn load_activity<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<Activity>, RepositoryError> {
    let Some(model) = activities::Entity::find_by_id(name)
        .one(conn)
        .await
        .map_err(database_error)?
    else {
        return Ok(None);
    };

    let members = participants::Entity::find()
        .filter(participants::Column::ActivityName.eq(name))
        .order_by_asc(participants::Column::SignedUpAt)
        .order_by_asc(participants::Column::Email)
        .all(conn)
        .await
        .map_err(database_error)?;

    to_domain(model, members).map(Some)
}

#[async_trait]
impl ActivityRepository for SqlActivityRepository {
    async fn list_activities(&self) -> Result<Vec<Activity>, RepositoryError> {
        // one transaction so the rosters match the activities we read
        let txn = self.db.begin().await.map_err(database_error)?;

        let models = activities::Entity::find()
            .order_by_asc(activities::Column::Name)
            .all(&txn)
            .await
            .map_err(database_error)?;

        let members = participants::Entity::find()
            .order_by_asc(participants::Column::SignedUpAt)
            .order_by_asc(participants::Column::Email)
            .all(&txn)
            .await
            .map_err(database_error)?;

        txn.commit().await.map_err(database_error)?;

        let mut rosters: HashMap<String, Vec<participants::Model>> = HashMap::new();
        for member in members {
            rosters
                .entry(member.activity_name.clone())
                .or_default()
                .push(member);
        }

        models
            .into_iter()
            .map(|model| {
                let members = rosters.remove(&model.name).unwrap_or_default();
                to_domain(model, members)
            })
            .collect()
    }

    async fn add_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<SignupOutcome, RepositoryError> {
        let txn = self.begin_write().await.map_err(database_error)?;

        // insert first, then judge the roster under the write lock
        let member = participants::ActiveModel {
            activity_name: Set(activity_name.to_string()),
            email: Set(email.as_str().to_string()),
            signed_up_at: Set(Utc::now()),
        };
        let inserted = participants::Entity::insert(member)
            .exec_without_returning(&txn)
            .await;

        let outcome = match inserted {
            Ok(_) => match load_activity(&txn, activity_name).await? {
                // the roster already holds the new row; judge it as if it did not
                Some(mut activity) => {
                    activity.withdraw(email);
                    activity.enroll(email.clone())
                }
                None => SignupOutcome::ActivityNotFound,
            },
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    match load_activity(&txn, activity_name).await? {
                        // full wins over duplicate
                        Some(mut activity) => activity.enroll(email.clone()),
                        None => SignupOutcome::ActivityNotFound,
                    }
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => SignupOutcome::ActivityNotFound,
                _ => return Err(database_error(e)),
            },
        };

        if outcome == SignupOutcome::Enrolled {
            txn.commit().await.map_err(database_error)?;
        } else {
            txn.rollback().await.map_err(database_error)?;
        }
        Ok(outcome)
    }

    async fn remove_participant(
        &self,
        activity_name: &str,
        email: &ParticipantEmail,
    ) -> Result<UnregisterOutcome, RepositoryError> {
        let txn = self.begin_write().await.map_err(database_error)?;

        let result = participants::Entity::delete_many()
            .filter(participants::Column::ActivityName.eq(activity_name))
            .filter(participants::Column::Email.eq(email.as_str()))
            .exec(&txn)
            .await
            .map_err(database_error)?;

        if result.rows_affected > 0 {
            txn.commit().await.map_err(database_error)?;
            return Ok(UnregisterOutcome::Removed);
        }

        let activity = activities::Entity::find_by_id(activity_name)
            .one(&txn)
            .await
            .map_err(database_error)?;
        txn.rollback().await.map_err(database_error)?;

        Ok(match activity {
            Some(_) => UnregisterOutcome::ParticipantNotFound,
            None => UnregisterOutcome::ActivityNotFound,
        })
    }
}
