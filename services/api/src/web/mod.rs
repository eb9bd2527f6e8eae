//! services/api/src/web/mod.rs
//!
//! HTTP layer: shared state, the response envelope, the handler modules and
//! the router that stitches them together.

pub mod envelope;
pub mod pages;
pub mod state;
pub mod students;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

pub use state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        students::list_students,
        students::get_student,
        students::create_student,
        students::migrate_students,
        students::update_student,
        students::delete_student,
        students::get_dashboard_stats,
        users::signup_handler,
        users::verify_email_handler,
        users::login_handler,
        users::list_users_handler,
    ),
    components(schemas(
        students::MigrateRequest,
        users::SignupRequest,
        users::LoginRequest,
    )),
    tags(
        (name = "Tech-Pro AI Admin API", description = "Administrative endpoints for page configuration, student records and user accounts.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the `/api` route tree against the shared state.
pub fn api_router(state: Arc<AppState>) -> Router {
    let payment = Router::new()
        .route("/api/payment-config", get(pages::get_all_payment_configs))
        .route(
            "/api/payment-config/{page_id}",
            get(pages::get_payment_config).put(pages::update_payment_config),
        );

    let ailearning = Router::new()
        .route("/api/ailearning-config", get(pages::get_ailearning_config))
        .route(
            "/api/ailearning-config/subscription",
            put(pages::update_ai_subscription),
        )
        .route(
            "/api/ailearning-config/course/{course_id}",
            put(pages::update_ai_course),
        );

    let online = Router::new()
        .route("/api/online-config", get(pages::get_online_config))
        .route(
            "/api/online-config/batches",
            put(pages::update_online_batches),
        )
        .route("/api/online-config/batch", post(pages::create_online_batch))
        .route("/api/online-config/accessfee", put(pages::update_access_fee))
        .route(
            "/api/online-config/course",
            post(pages::create_online_course),
        )
        .route(
            "/api/online-config/course/{course_id}",
            put(pages::update_online_course).delete(pages::delete_online_course),
        );

    let offline = Router::new()
        .route("/api/offline-config", get(pages::get_offline_config))
        .route("/api/offline-config/batchfee", put(pages::update_batch_fee))
        .route("/api/offline-config/stats", put(pages::update_offline_stats))
        .route(
            "/api/offline-config/batches",
            put(pages::update_offline_batches),
        )
        .route(
            "/api/offline-config/course",
            post(pages::create_offline_course),
        )
        .route(
            "/api/offline-config/course/{course_id}",
            put(pages::update_offline_course),
        );

    let hybrid = Router::new()
        .route("/api/hybrid-config", get(pages::get_hybrid_config))
        .route("/api/hybrid-config/pageinfo", put(pages::update_page_info))
        .route(
            "/api/hybrid-config/batches",
            put(pages::update_hybrid_batches),
        )
        .route(
            "/api/hybrid-config/course",
            post(pages::create_hybrid_course),
        )
        .route(
            "/api/hybrid-config/course/{course_id}",
            put(pages::update_hybrid_course),
        );

    let student_routes = Router::new()
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/api/students/migrate", post(students::migrate_students))
        .route(
            "/api/students/stats/dashboard",
            get(students::get_dashboard_stats),
        )
        .route(
            "/api/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        );

    let user_routes = Router::new()
        .route("/api/users", get(users::list_users_handler))
        .route("/api/users/signup", post(users::signup_handler))
        .route("/api/users/login", post(users::login_handler))
        .route("/api/users/verify/{token}", get(users::verify_email_handler));

    Router::new()
        .merge(payment)
        .merge(ailearning)
        .merge(online)
        .merge(offline)
        .merge(hybrid)
        .merge(student_routes)
        .merge(user_routes)
        .with_state(state)
}
