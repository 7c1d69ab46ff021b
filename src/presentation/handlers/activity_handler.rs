use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::DomainError, models::activity::Activity,
        repositories::activity_repository::ActivityRepository,
    },
    usecase::{
        list_activities_usecase::ListActivitiesUsecase, signup_usecase::SignupUsecase,
        unregister_usecase::UnregisterUsecase,
    },
};

// Request

/// query string for signup and unregister
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

// Response

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// one entry of the activity listing, keyed by name in [`ActivitiesResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

pub type ActivitiesResponse = BTreeMap<String, ActivityResponse>;

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            description: activity.description().to_string(),
            schedule: activity.schedule().to_string(),
            max_participants: activity.max_participants(),
            participants: activity
                .participants()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        }
    }
}

/* Router Function and Handler Function */

/// Router for the activity directory.
/// Suppose to be merged into the main router
pub fn create_activity_router<R: ActivityRepository + Send + Sync + 'static + Clone>(
    list_service: ListActivitiesUsecase<R>,
    signup_service: SignupUsecase<R>,
    unregister_service: UnregisterUsecase<R>,
) -> Router {
    let state = AppState {
        list_service: Arc::new(list_service),
        signup_service: Arc::new(signup_service),
        unregister_service: Arc::new(unregister_service),
    };

    Router::new()
        .route("/activities", get(list_activities::<R>))
        .route("/activities/{activity_name}/signup", post(signup::<R>))
        .route(
            "/activities/{activity_name}/unregister",
            delete(unregister::<R>),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: ActivityRepository> {
    pub list_service: Arc<ListActivitiesUsecase<R>>,
    pub signup_service: Arc<SignupUsecase<R>>,
    pub unregister_service: Arc<UnregisterUsecase<R>>,
}

// handler function

async fn list_activities<R: ActivityRepository + Send + Sync + 'static + Clone>(
    State(state): State<AppState<R>>,
) -> Result<Json<ActivitiesResponse>, DomainError> {
    let activities = state.list_service.list().await?;

    let response = activities
        .iter()
        .map(|activity| (activity.name().to_string(), ActivityResponse::from(activity)))
        .collect();

    Ok(Json(response))
}

async fn signup<R: ActivityRepository + Send + Sync + 'static + Clone>(
    State(state): State<AppState<R>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, DomainError> {
    state
        .signup_service
        .signup(activity_name.clone(), query.email)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Successfully signed up for {activity_name}"),
    }))
}

async fn unregister<R: ActivityRepository + Send + Sync + 'static + Clone>(
    State(state): State<AppState<R>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<MessageResponse>, DomainError> {
    state
        .unregister_service
        .unregister(activity_name.clone(), query.email)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Successfully unregistered from {activity_name}"),
    }))
}
