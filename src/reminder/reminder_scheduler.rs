use super::reminder_models::Reminder;
use super::reminder_repository::ReminderRepository;
use crate::error::{AppError, Result};
use crate::mailer::{reminder_email, Mailer};
use crate::user::user_repository::UserRepository;
use dashmap::DashMap;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Keeps one recurring daily job per reminder, keyed by reminder id.
///
/// The job table is process-local derived state; the persisted reminders
/// are the source of truth. `initialize` rebuilds the table after a
/// restart. Fire callbacks re-read the reminder from storage so deletes
/// and completion changes take effect without tearing jobs down.
#[derive(Clone)]
pub struct ReminderScheduler {
    scheduler: JobScheduler,
    jobs: Arc<DashMap<Uuid, Uuid>>,
    reminders: ReminderRepository,
    users: UserRepository,
    mailer: Arc<dyn Mailer>,
}

impl ReminderScheduler {
    pub async fn new(
        reminders: ReminderRepository,
        users: UserRepository,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        Ok(Self {
            scheduler,
            jobs: Arc::new(DashMap::new()),
            reminders,
            users,
            mailer,
        })
    }

    pub async fn start(&self) -> Result<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        info!("Reminder scheduler started");
        Ok(())
    }

    /// Install a job for every persisted reminder. Called once at process
    /// start; calling it again replaces jobs instead of stacking them.
    pub async fn initialize(&self) -> Result<()> {
        let reminders = self.reminders.find_all().await?;

        for reminder in &reminders {
            if let Err(e) = self.schedule(reminder).await {
                error!("Skipping reminder {}: {}", reminder.id, e);
            }
        }

        info!("Installed {} reminder jobs", self.jobs.len());
        Ok(())
    }

    /// Install a recurring daily job at the reminder's fire time (UTC),
    /// replacing any job already registered for this reminder id.
    pub async fn schedule(&self, reminder: &Reminder) -> Result<()> {
        let (hour, minute) = parse_fire_time(&reminder.fire_time)?;

        // At most one active job per reminder id.
        self.cancel(reminder.id).await;

        let expression = daily_cron_expr(hour, minute);
        let reminder_id = reminder.id;
        let reminders = self.reminders.clone();
        let users = self.users.clone();
        let mailer = Arc::clone(&self.mailer);
        let jobs = Arc::clone(&self.jobs);

        let job = Job::new_async(expression.as_str(), move |job_id, scheduler| {
            let reminders = reminders.clone();
            let users = users.clone();
            let mailer = Arc::clone(&mailer);
            let jobs = Arc::clone(&jobs);

            Box::pin(async move {
                fire(reminder_id, job_id, scheduler, reminders, users, mailer, jobs).await;
            })
        })
        .map_err(|e| AppError::Scheduler(e.to_string()))?;

        let job_id = self
            .scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Scheduler(e.to_string()))?;

        self.jobs.insert(reminder_id, job_id);
        debug!("Scheduled reminder {} at {}", reminder_id, reminder.fire_time);

        Ok(())
    }

    /// Stop and forget the job for a reminder. No-op if none exists.
    pub async fn cancel(&self, reminder_id: Uuid) {
        if let Some((_, job_id)) = self.jobs.remove(&reminder_id) {
            let mut scheduler = self.scheduler.clone();
            if let Err(e) = scheduler.remove(&job_id).await {
                warn!("Failed to remove job for reminder {}: {}", reminder_id, e);
            }
        }
    }
}

/// One firing of a reminder's daily job. Re-reads current state; all
/// failures are logged and swallowed so the job keeps its future
/// occurrences.
async fn fire(
    reminder_id: Uuid,
    job_id: Uuid,
    mut scheduler: JobScheduler,
    reminders: ReminderRepository,
    users: UserRepository,
    mailer: Arc<dyn Mailer>,
    jobs: Arc<DashMap<Uuid, Uuid>>,
) {
    let reminder = match reminders.find_by_id_any(reminder_id).await {
        Ok(Some(reminder)) => reminder,
        Ok(None) => {
            // Deleted while scheduled: retire the orphaned job.
            jobs.remove(&reminder_id);
            if let Err(e) = scheduler.remove(&job_id).await {
                warn!("Failed to retire orphaned job {}: {}", job_id, e);
            }
            info!("Removed job for deleted reminder {}", reminder_id);
            return;
        }
        Err(e) => {
            error!("Failed to load reminder {}: {}", reminder_id, e);
            return;
        }
    };

    if reminder.is_completed {
        debug!("Reminder {} is completed, skipping", reminder_id);
        return;
    }

    let user = match users.find_by_id(reminder.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Owner of reminder {} no longer exists", reminder_id);
            return;
        }
        Err(e) => {
            error!("Failed to load owner of reminder {}: {}", reminder_id, e);
            return;
        }
    };

    if !user.notification_enabled {
        debug!("User {} has notifications disabled, skipping", user.id);
        return;
    }

    let (subject, body) = reminder_email(&reminder);
    match mailer.send(&user.email, &subject, &body).await {
        Ok(()) => info!("Sent reminder email for: {}", reminder.title),
        Err(e) => error!("Failed to send reminder email for {}: {}", reminder_id, e),
    }
}

/// Parse a `HH:MM` (24-hour) fire time.
pub fn parse_fire_time(value: &str) -> Result<(u32, u32)> {
    let invalid = || AppError::Validation(format!("Invalid fire time '{}', expected HH:MM", value));

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;

    if hours.len() != 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour, minute))
}

/// Six-field cron expression firing once per day at the given time.
fn daily_cron_expr(hour: u32, minute: u32) -> String {
    format!("0 {} {} * * *", minute, hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::LogMailer;
    use crate::reminder::reminder_models::{Recurrence, ReminderKind};
    use chrono::Utc;

    fn lazy_pool() -> sqlx::PgPool {
        // Never actually connects; the fire callbacks are not exercised here.
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/symptoseek_test")
            .expect("lazy pool")
    }

    async fn test_scheduler() -> ReminderScheduler {
        let pool = lazy_pool();
        ReminderScheduler::new(
            ReminderRepository::new(pool.clone()),
            UserRepository::new(pool),
            Arc::new(LogMailer),
        )
        .await
        .expect("scheduler")
    }

    fn sample_reminder(fire_time: &str) -> Reminder {
        Reminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Take pill".to_string(),
            description: None,
            kind: ReminderKind::Medication,
            fire_time: fire_time.to_string(),
            date: None,
            recurrence: Recurrence::Daily,
            days_of_week: vec![],
            is_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn parses_well_formed_times() {
        assert_eq!(parse_fire_time("00:00").unwrap(), (0, 0));
        assert_eq!(parse_fire_time("08:05").unwrap(), (8, 5));
        assert_eq!(parse_fire_time("23:59").unwrap(), (23, 59));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["24:00", "12:60", "8:00", "08:5", "ab:cd", "0800", "", "08:00:00", "-1:30"] {
            assert!(parse_fire_time(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn cron_expression_fires_daily_at_time() {
        assert_eq!(daily_cron_expr(8, 0), "0 0 8 * * *");
        assert_eq!(daily_cron_expr(23, 59), "0 59 23 * * *");
    }

    #[tokio::test]
    async fn schedule_installs_one_job() {
        let scheduler = test_scheduler().await;
        let reminder = sample_reminder("08:00");

        scheduler.schedule(&reminder).await.unwrap();

        assert_eq!(scheduler.jobs.len(), 1);
        assert!(scheduler.jobs.contains_key(&reminder.id));
    }

    #[tokio::test]
    async fn schedule_replaces_existing_job() {
        let scheduler = test_scheduler().await;
        let reminder = sample_reminder("08:00");

        scheduler.schedule(&reminder).await.unwrap();
        let first_job = *scheduler.jobs.get(&reminder.id).unwrap();

        let mut updated = reminder.clone();
        updated.fire_time = "09:30".to_string();
        scheduler.schedule(&updated).await.unwrap();

        assert_eq!(scheduler.jobs.len(), 1);
        assert_ne!(*scheduler.jobs.get(&reminder.id).unwrap(), first_job);
    }

    #[tokio::test]
    async fn malformed_time_installs_nothing() {
        let scheduler = test_scheduler().await;
        let reminder = sample_reminder("25:00");

        assert!(scheduler.schedule(&reminder).await.is_err());
        assert!(scheduler.jobs.is_empty());
    }

    #[tokio::test]
    async fn cancel_removes_job() {
        let scheduler = test_scheduler().await;
        let reminder = sample_reminder("08:00");

        scheduler.schedule(&reminder).await.unwrap();
        scheduler.cancel(reminder.id).await;

        assert!(scheduler.jobs.is_empty());
    }

    #[tokio::test]
    async fn cancel_unknown_reminder_is_noop() {
        let scheduler = test_scheduler().await;
        scheduler.cancel(Uuid::new_v4()).await;

        assert!(scheduler.jobs.is_empty());
    }

    #[tokio::test]
    async fn two_reminders_get_independent_jobs() {
        let scheduler = test_scheduler().await;
        let first = sample_reminder("08:00");
        let second = sample_reminder("20:15");

        scheduler.schedule(&first).await.unwrap();
        scheduler.schedule(&second).await.unwrap();

        assert_eq!(scheduler.jobs.len(), 2);

        scheduler.cancel(first.id).await;
        assert_eq!(scheduler.jobs.len(), 1);
        assert!(scheduler.jobs.contains_key(&second.id));
    }
}
