use crate::{
    admin::{admin_authorization, admin_handlers},
    appointment::appointment_handlers,
    auth::auth_handlers,
    chat::chat_handlers,
    doctor::doctor_handlers,
    middleware::auth_middleware,
    notification::notification_handlers,
    reminder::reminder_handlers,
    report::report_handlers,
    state::AppState,
    symptom::symptom_handlers,
    user::user_handlers,
};
use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::auth_handlers::register,
        crate::auth::auth_handlers::login,
        crate::auth::auth_handlers::refresh_token,
        crate::auth::auth_handlers::logout,
        crate::user::user_handlers::get_me,
        crate::doctor::doctor_handlers::list_doctors,
        crate::doctor::doctor_handlers::get_doctor,
        crate::appointment::appointment_handlers::create_appointment,
        crate::appointment::appointment_handlers::list_appointments,
        crate::report::report_handlers::list_reports,
        crate::chat::chat_handlers::send_chat_message,
        crate::reminder::reminder_handlers::list_reminders,
        crate::reminder::reminder_handlers::create_reminder,
        crate::reminder::reminder_handlers::update_reminder,
        crate::reminder::reminder_handlers::delete_reminder,
        crate::notification::notification_handlers::get_notifications,
        crate::notification::notification_handlers::create_notification,
        crate::notification::notification_handlers::mark_notification_read,
        crate::notification::notification_handlers::unread_count,
        crate::notification::notification_handlers::delete_notification,
        crate::admin::admin_handlers::get_stats,
    ),
    components(
        schemas(
            crate::auth::auth_dto::RegisterRequest,
            crate::auth::auth_dto::LoginRequest,
            crate::auth::auth_dto::AuthResponse,
            crate::auth::auth_dto::RefreshTokenRequest,
            crate::auth::auth_dto::RefreshTokenResponse,
            crate::user::user_models::UserResponse,
            crate::user::user_dto::UpdateProfileRequest,
            crate::doctor::doctor_models::Doctor,
            crate::doctor::doctor_dto::CreateDoctorRequest,
            crate::doctor::doctor_dto::UpdateDoctorRequest,
            crate::appointment::appointment_models::Appointment,
            crate::appointment::appointment_models::AppointmentStatus,
            crate::appointment::appointment_dto::CreateAppointmentRequest,
            crate::appointment::appointment_dto::UpdateAppointmentStatusRequest,
            crate::report::report_models::Report,
            crate::report::report_dto::CreateReportRequest,
            crate::report::report_dto::UpdateReportRequest,
            crate::symptom::symptom_models::Symptom,
            crate::symptom::symptom_models::CreateSymptomRequest,
            crate::chat::chat_models::ChatMessage,
            crate::chat::chat_dto::ChatRequest,
            crate::reminder::reminder_models::Reminder,
            crate::reminder::reminder_models::ReminderKind,
            crate::reminder::reminder_models::Recurrence,
            crate::reminder::reminder_dto::CreateReminderRequest,
            crate::reminder::reminder_dto::UpdateReminderRequest,
            crate::notification::notification_models::Notification,
            crate::notification::notification_models::NotificationKind,
            crate::notification::notification_models::RecurrencePattern,
            crate::notification::notification_dto::CreateNotificationRequest,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Profile endpoints"),
        (name = "doctors", description = "Doctor directory"),
        (name = "appointments", description = "Appointment booking"),
        (name = "reports", description = "Medical report metadata"),
        (name = "chat", description = "Symptom chat proxy"),
        (name = "reminders", description = "Personal reminders"),
        (name = "notifications", description = "Scheduled notifications"),
        (name = "admin", description = "Admin endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh_token))
        .route("/logout", post(auth_handlers::logout));

    let user_routes = Router::new()
        .route(
            "/me",
            get(user_handlers::get_me).put(user_handlers::update_me),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public directory plus admin-only management; the admin half carries
    // its own middleware stack (auth runs first, then the role check).
    let doctor_routes = Router::new()
        .route("/", get(doctor_handlers::list_doctors))
        .route("/:id", get(doctor_handlers::get_doctor))
        .merge(
            Router::new()
                .route("/", post(doctor_handlers::create_doctor))
                .route(
                    "/:id",
                    put(doctor_handlers::update_doctor).delete(doctor_handlers::delete_doctor),
                )
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin_authorization,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let symptom_routes = Router::new()
        .route("/", get(symptom_handlers::list_symptoms))
        .merge(
            Router::new()
                .route("/", post(symptom_handlers::create_symptom))
                .route("/:id", delete(symptom_handlers::delete_symptom))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    admin_authorization,
                ))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    let appointment_routes = Router::new()
        .route(
            "/",
            get(appointment_handlers::list_appointments)
                .post(appointment_handlers::create_appointment),
        )
        .route("/:id", get(appointment_handlers::get_appointment))
        .route(
            "/:id/cancel",
            patch(appointment_handlers::cancel_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let report_routes = Router::new()
        .route(
            "/",
            get(report_handlers::list_reports).post(report_handlers::create_report),
        )
        .route(
            "/:id",
            get(report_handlers::get_report)
                .put(report_handlers::update_report)
                .delete(report_handlers::delete_report),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let chat_routes = Router::new()
        .route("/", post(chat_handlers::send_chat_message))
        .route(
            "/history",
            get(chat_handlers::get_chat_history).delete(chat_handlers::clear_chat_history),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let reminder_routes = Router::new()
        .route(
            "/",
            get(reminder_handlers::list_reminders).post(reminder_handlers::create_reminder),
        )
        .route(
            "/:id",
            put(reminder_handlers::update_reminder).delete(reminder_handlers::delete_reminder),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route(
            "/",
            get(notification_handlers::get_notifications)
                .post(notification_handlers::create_notification),
        )
        .route("/unread-count", get(notification_handlers::unread_count))
        .route(
            "/:id/read",
            patch(notification_handlers::mark_notification_read),
        )
        .route("/:id", delete(notification_handlers::delete_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/stats", get(admin_handlers::get_stats))
        .route("/users", get(admin_handlers::list_users))
        .route(
            "/appointments",
            get(appointment_handlers::admin_list_appointments),
        )
        .route(
            "/appointments/:id/status",
            patch(appointment_handlers::admin_update_appointment_status),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_authorization,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/doctors", doctor_routes)
        .nest("/symptoms", symptom_routes)
        .nest("/appointments", appointment_routes)
        .nest("/reports", report_routes)
        .nest("/chat", chat_routes)
        .nest("/reminders", reminder_routes)
        .nest("/notifications", notification_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
