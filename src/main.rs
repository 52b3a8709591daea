mod admin;
mod appointment;
mod auth;
mod chat;
mod db;
mod doctor;
mod error;
mod mailer;
mod middleware;
mod notification;
mod reminder;
mod report;
mod routes;
mod state;
mod symptom;
mod user;

use db::{create_pool, run_migrations};
use mailer::{HttpMailer, LogMailer, Mailer};
use notification::start_notification_sweep;
use reminder::ReminderScheduler;
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,symptoseek=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    let mailer: Arc<dyn Mailer> = match (&config.mail_api_url, &config.mail_api_key) {
        (Some(url), Some(key)) => Arc::new(HttpMailer::new(
            url.clone(),
            key.clone(),
            config.mail_from.clone(),
        )?),
        _ => {
            tracing::warn!("MAIL_API_URL/MAIL_API_KEY not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    // Create repositories
    let user_repository = crate::user::user_repository::UserRepository::new(db.clone());
    let refresh_token_repository =
        crate::auth::auth_repository::RefreshTokenRepository::new(db.clone());
    let doctor_repository = crate::doctor::doctor_repository::DoctorRepository::new(db.clone());
    let appointment_repository =
        crate::appointment::appointment_repository::AppointmentRepository::new(db.clone());
    let report_repository = crate::report::report_repository::ReportRepository::new(db.clone());
    let symptom_repository = crate::symptom::symptom_repository::SymptomRepository::new(db.clone());
    let chat_repository = crate::chat::chat_repository::ChatRepository::new(db.clone());
    let reminder_repository =
        crate::reminder::reminder_repository::ReminderRepository::new(db.clone());
    let notification_repository =
        crate::notification::notification_repository::NotificationRepository::new(db.clone());

    // Create services
    let auth_service = crate::auth::auth_service::AuthService::new(
        db.clone(),
        user_repository.clone(),
        refresh_token_repository.clone(),
        config.jwt_secret.clone(),
    );
    let appointment_service = crate::appointment::appointment_service::AppointmentService::new(
        appointment_repository.clone(),
        doctor_repository.clone(),
    );
    let chat_service = crate::chat::chat_service::ChatService::new(
        config.chat_service_url.clone(),
        chat_repository.clone(),
    )?;

    // The reminder job table is rebuilt from storage on every start;
    // it must be in place before any reminder could legitimately fire.
    let reminder_scheduler = ReminderScheduler::new(
        reminder_repository.clone(),
        user_repository.clone(),
        Arc::clone(&mailer),
    )
    .await?;
    reminder_scheduler.initialize().await?;
    reminder_scheduler.start().await?;

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        mailer,
        user_repository,
        refresh_token_repository,
        doctor_repository,
        appointment_repository,
        report_repository,
        symptom_repository,
        chat_repository,
        reminder_repository,
        notification_repository,
        auth_service,
        appointment_service,
        chat_service,
        reminder_scheduler,
    };

    // Start the notification sweep
    let sweep_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = start_notification_sweep(sweep_state).await {
            tracing::error!("Notification sweep error: {:?}", e);
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
