use crate::db::DbPool;
use crate::mailer::Mailer;
use std::sync::Arc;

use crate::appointment::appointment_repository::AppointmentRepository;
use crate::appointment::appointment_service::AppointmentService;
use crate::auth::auth_repository::RefreshTokenRepository;
use crate::auth::auth_service::AuthService;
use crate::chat::chat_repository::ChatRepository;
use crate::chat::chat_service::ChatService;
use crate::doctor::doctor_repository::DoctorRepository;
use crate::notification::notification_repository::NotificationRepository;
use crate::reminder::reminder_repository::ReminderRepository;
use crate::reminder::reminder_scheduler::ReminderScheduler;
use crate::report::report_repository::ReportRepository;
use crate::symptom::symptom_repository::SymptomRepository;
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn Mailer>,
    pub user_repository: UserRepository,
    pub refresh_token_repository: RefreshTokenRepository,
    pub doctor_repository: DoctorRepository,
    pub appointment_repository: AppointmentRepository,
    pub report_repository: ReportRepository,
    pub symptom_repository: SymptomRepository,
    pub chat_repository: ChatRepository,
    pub reminder_repository: ReminderRepository,
    pub notification_repository: NotificationRepository,
    pub auth_service: AuthService,
    pub appointment_service: AppointmentService,
    pub chat_service: ChatService,
    pub reminder_scheduler: ReminderScheduler,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub chat_service_url: String,
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            chat_service_url: std::env::var("CHAT_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            mail_api_url: std::env::var("MAIL_API_URL").ok(),
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@symptoseek.app".to_string()),
        }
    }
}
