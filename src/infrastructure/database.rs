use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, Schema, TransactionTrait,
};
use tracing::info;

use crate::{
    domain::error::RepositoryError,
    infrastructure::seed_data::{INITIAL_ACTIVITIES, SeedActivity},
};
use entity::{activities, participants};

pub(crate) fn database_error(e: DbErr) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(true);

    Database::connect(opt).await
}

/// Startup routine: creates missing tables, then writes the fixed dataset if
/// the activities table is empty. Returns `true` when the dataset was written.
pub async fn initialize(db: &DatabaseConnection) -> Result<bool, RepositoryError> {
    create_schema(db).await?;
    seed(db).await
}

async fn create_schema(db: &DatabaseConnection) -> Result<(), RepositoryError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // participants references activities, so activities goes first
    let mut activities_table = schema.create_table_from_entity(activities::Entity);
    activities_table.if_not_exists();
    db.execute(backend.build(&activities_table))
        .await
        .map_err(database_error)?;

    let mut participants_table = schema.create_table_from_entity(participants::Entity);
    participants_table.if_not_exists();
    db.execute(backend.build(&participants_table))
        .await
        .map_err(database_error)?;

    Ok(())
}

async fn seed(db: &DatabaseConnection) -> Result<bool, RepositoryError> {
    let txn = db.begin().await.map_err(database_error)?;

    let existing = activities::Entity::find()
        .count(&txn)
        .await
        .map_err(database_error)?;
    if existing > 0 {
        info!(existing, "activities already present, skipping seed");
        return Ok(false);
    }

    let now = Utc::now();
    for activity in INITIAL_ACTIVITIES {
        insert_seed_activity(&txn, activity, now).await?;
    }

    txn.commit().await.map_err(database_error)?;
    info!(count = INITIAL_ACTIVITIES.len(), "seeded initial activities");
    Ok(true)
}

async fn insert_seed_activity<C: ConnectionTrait>(
    conn: &C,
    activity: &SeedActivity,
    now: chrono::DateTime<Utc>,
) -> Result<(), RepositoryError> {
    let max_participants = i32::try_from(activity.max_participants).map_err(|_| {
        RepositoryError::DatabaseError(format!("capacity out of range for {}", activity.name))
    })?;

    let activity_model = activities::ActiveModel {
        name: Set(activity.name.to_string()),
        description: Set(activity.description.to_string()),
        schedule: Set(activity.schedule.to_string()),
        max_participants: Set(max_participants),
    };
    activities::Entity::insert(activity_model)
        .exec_without_returning(conn)
        .await
        .map_err(database_error)?;

    if activity.participants.is_empty() {
        return Ok(());
    }

    let members = activity
        .participants
        .iter()
        .map(|email| participants::ActiveModel {
            activity_name: Set(activity.name.to_string()),
            email: Set(email.to_string()),
            signed_up_at: Set(now),
        });
    participants::Entity::insert_many(members)
        .exec_without_returning(conn)
        .await
        .map_err(database_error)?;

    Ok(())
}
