mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::{net::SocketAddr, path::Path};

use axum::{
    Router,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    config::Config,
    domain::repositories::activity_repository::ActivityRepository,
    infrastructure::{activity_repository::SqlActivityRepository, database},
    presentation::handlers::activity_handler::create_activity_router,
    usecase::{
        list_activities_usecase::ListActivitiesUsecase, signup_usecase::SignupUsecase,
        unregister_usecase::UnregisterUsecase,
    },
};

const INDEX_PAGE: &str = "/static/index.html";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    info!(url = %config.database_url, "connecting to database");
    let db = database::connect(&config.database_url, config.database_max_connections).await?;
    database::initialize(&db).await?;

    let activity_repository = SqlActivityRepository::new(db.clone());
    let app = build_app(activity_repository, &config.static_dir);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on {addr}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("Server stopped");
    Ok(())
}

/// Assembles the full application: the activity API, the static front-end and
/// the root redirect.
fn build_app<R: ActivityRepository + Send + Sync + 'static + Clone>(
    activity_repository: R,
    static_dir: &Path,
) -> Router {
    let list_usecase = ListActivitiesUsecase::new(activity_repository.clone());
    let signup_usecase = SignupUsecase::new(activity_repository.clone());
    let unregister_usecase = UnregisterUsecase::new(activity_repository);

    Router::new()
        .route("/", get(redirect_to_index))
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(create_activity_router(
            list_usecase,
            signup_usecase,
            unregister_usecase,
        ))
        .layer(TraceLayer::new_for_http())
}

async fn redirect_to_index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, INDEX_PAGE)])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use tower::ServiceExt;

    use super::build_app;
    use crate::{
        infrastructure::{activity_repository::SqlActivityRepository, database},
        presentation::{
            error::ErrorResponse,
            handlers::activity_handler::{ActivitiesResponse, MessageResponse},
        },
    };

    // app wired to a freshly seeded in-memory database
    #[fixture]
    async fn test_app() -> Router {
        let db = database::connect("sqlite::memory:", 1).await.unwrap();
        database::initialize(&db).await.unwrap();
        let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
        build_app(SqlActivityRepository::new(db), &static_dir)
    }

    /// # Description
    ///
    /// General request helper.
    /// `app` is cloned so one router can serve several requests in a test
    async fn send(app: &Router, method: &str, uri: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn list(app: &Router) -> ActivitiesResponse {
        let response = send(app, "GET", "/activities").await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    #[rstest]
    #[tokio::test]
    async fn test_root_redirects_to_index(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(&app, "GET", "/").await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/static/index.html"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_static_index_served(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(&app, "GET", "/static/index.html").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(
            content_type
                .to_str()
                .unwrap()
                .starts_with(mime::TEXT_HTML.as_ref())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_activities_positive(#[future] test_app: Router) {
        let app = test_app.await;

        let activities = list(&app).await;

        assert_eq!(9, activities.len());
        let chess = &activities["Chess Club"];
        assert_eq!(
            "Learn strategies and compete in chess tournaments",
            chess.description
        );
        assert_eq!(12, chess.max_participants);
        assert!(chess.participants.contains(&"michael@mergington.edu".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_positive(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(
            &app,
            "POST",
            "/activities/Chess%20Club/signup?email=new@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageResponse = read_json(response).await;
        assert_eq!("Successfully signed up for Chess Club", body.message);

        let activities = list(&app).await;
        assert!(
            activities["Chess Club"]
                .participants
                .contains(&"new@mergington.edu".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_twice_negative(#[future] test_app: Router) {
        let app = test_app.await;
        let uri = "/activities/Chess%20Club/signup?email=new@mergington.edu";

        let first = send(&app, "POST", uri).await;
        let second = send(&app, "POST", uri).await;

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(second).await;
        assert_eq!("Already registered for this activity", body.detail);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_unknown_activity_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(
            &app,
            "POST",
            "/activities/Unknown%20Club/signup?email=x@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!("Activity not found", body.detail);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_full_activity_negative(#[future] test_app: Router) {
        let app = test_app.await;

        // Math Olympiad holds 10 and is seeded with 2
        for i in 0..8 {
            let uri = format!("/activities/Math%20Olympiad/signup?email=student{i}@mergington.edu");
            let response = send(&app, "POST", &uri).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = send(
            &app,
            "POST",
            "/activities/Math%20Olympiad/signup?email=late@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!("Activity is full", body.detail);

        let activities = list(&app).await;
        let math = &activities["Math Olympiad"];
        assert_eq!(10, math.participants.len());
        assert!(math.participants.len() as u32 <= math.max_participants);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_invalid_email_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(&app, "POST", "/activities/Chess%20Club/signup?email=nobody").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!("Invalid email address", body.detail);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_missing_email_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(&app, "POST", "/activities/Chess%20Club/signup").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unregister_positive(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(
            &app,
            "DELETE",
            "/activities/Chess%20Club/unregister?email=michael@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: MessageResponse = read_json(response).await;
        assert_eq!("Successfully unregistered from Chess Club", body.message);

        let activities = list(&app).await;
        assert_eq!(
            vec!["daniel@mergington.edu".to_string()],
            activities["Chess Club"].participants
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_unregister_non_member_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(
            &app,
            "DELETE",
            "/activities/Chess%20Club/unregister?email=nobody@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!("Participant not found", body.detail);
    }

    #[rstest]
    #[tokio::test]
    async fn test_unregister_unknown_activity_negative(#[future] test_app: Router) {
        let app = test_app.await;

        let response = send(
            &app,
            "DELETE",
            "/activities/Unknown%20Club/unregister?email=michael@mergington.edu",
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!("Activity not found", body.detail);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signup_after_unregister(#[future] test_app: Router) {
        let app = test_app.await;
        let signup = "/activities/Drama%20Club/signup?email=noah@mergington.edu";
        let unregister = "/activities/Drama%20Club/unregister?email=noah@mergington.edu";

        assert_eq!(send(&app, "POST", signup).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(send(&app, "DELETE", unregister).await.status(), StatusCode::OK);
        assert_eq!(send(&app, "POST", signup).await.status(), StatusCode::OK);
    }
}
