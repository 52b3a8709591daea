use super::notification_models::{Notification, RecurrencePattern};
use crate::mailer::{advance_email, notification_email, Mailer};
use crate::state::AppState;
use chrono::{DateTime, Duration, Months, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Widest allowed advance-notice window; bounds the sweep's fetch horizon.
const MAX_ADVANCE_MINUTES: i64 = 1440;

/// Start the global notification sweep: one job, once per minute, that
/// finds notifications due for an advance or main email and updates
/// their lifecycle state.
pub async fn start_notification_sweep(
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = sweep_once(&state, Utc::now()).await {
                error!("Notification sweep failed: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification sweep started");
    Ok(())
}

async fn sweep_once(
    state: &AppState,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let horizon = now + Duration::minutes(MAX_ADVANCE_MINUTES);
    let pending = state
        .notification_repository
        .find_pending_until(horizon)
        .await?;

    for notification in pending {
        // A failure on one notification must not starve the rest of the tick.
        if let Err(e) = process_notification(state, &notification, now).await {
            error!("Failed to process notification {}: {}", notification.id, e);
        }
    }

    Ok(())
}

async fn process_notification(
    state: &AppState,
    notification: &Notification,
    now: DateTime<Utc>,
) -> crate::error::Result<()> {
    let Some(fire) = classify(now, notification) else {
        return Ok(());
    };

    let Some(user) = state
        .user_repository
        .find_by_id(notification.user_id)
        .await?
    else {
        // Owner is gone; complete so the row stops matching.
        state.notification_repository.complete(notification.id).await?;
        return Ok(());
    };

    match fire {
        FireKind::Advance { minutes_left } => {
            if user.notification_enabled {
                let (subject, body) = advance_email(notification, minutes_left);
                state.mailer.send(&user.email, &subject, &body).await?;
                info!("Sent advance notice for: {}", notification.title);
            }
            state
                .notification_repository
                .mark_advance_sent(notification.id)
                .await?;
        }
        FireKind::Main => {
            if user.notification_enabled {
                let (subject, body) = notification_email(notification);
                state.mailer.send(&user.email, &subject, &body).await?;
                info!("Sent notification email for: {}", notification.title);
            }

            match notification.recurrence_pattern.filter(|_| notification.is_recurring) {
                Some(pattern) => {
                    let next = next_occurrence(notification.schedule_time, pattern);
                    state
                        .notification_repository
                        .roll_over(notification.id, next)
                        .await?;
                }
                None => {
                    state.notification_repository.complete(notification.id).await?;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum FireKind {
    Advance { minutes_left: i64 },
    Main,
}

/// Decide what, if anything, this tick owes a notification. The advance
/// window is derived from the notification's own `advance_notice_minutes`
/// and is latched by `advance_sent` so it fires exactly once.
fn classify(now: DateTime<Utc>, notification: &Notification) -> Option<FireKind> {
    if notification.is_completed {
        return None;
    }

    if notification.schedule_time <= now {
        return Some(FireKind::Main);
    }

    if notification.advance_notice && !notification.advance_sent {
        let lead = notification.schedule_time - now;
        if lead <= Duration::minutes(notification.advance_notice_minutes as i64) {
            // Round up so "in 1 minute" never reads as "in 0 minutes".
            let minutes_left = (lead.num_seconds() + 59) / 60;
            return Some(FireKind::Advance {
                minutes_left: minutes_left.max(1),
            });
        }
    }

    None
}

/// Next fire time for a recurring notification. Monthly additions are
/// calendar-aware and clamp to the last day of shorter months.
fn next_occurrence(current: DateTime<Utc>, pattern: RecurrencePattern) -> DateTime<Utc> {
    match pattern {
        RecurrencePattern::Daily => current + Duration::days(1),
        RecurrencePattern::Weekly => current + Duration::days(7),
        RecurrencePattern::Monthly => current
            .checked_add_months(Months::new(1))
            .unwrap_or(current + Duration::days(30)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notification_models::NotificationKind;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn notification(schedule_time: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: NotificationKind::Appointment,
            title: "Visit".to_string(),
            description: "Cardiology checkup".to_string(),
            schedule_time,
            is_recurring: false,
            recurrence_pattern: None,
            advance_notice: true,
            advance_notice_minutes: 15,
            advance_sent: false,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn due_notification_is_a_main_fire() {
        let now = Utc::now();
        assert_eq!(classify(now, &notification(now)), Some(FireKind::Main));
        assert_eq!(
            classify(now, &notification(now - Duration::minutes(3))),
            Some(FireKind::Main)
        );
    }

    #[test]
    fn inside_advance_window_is_an_advance_fire() {
        let now = Utc::now();
        let n = notification(now + Duration::minutes(15));
        assert_eq!(classify(now, &n), Some(FireKind::Advance { minutes_left: 15 }));
    }

    #[test]
    fn outside_advance_window_is_nothing() {
        let now = Utc::now();
        let n = notification(now + Duration::minutes(16));
        assert_eq!(classify(now, &n), None);
    }

    #[test]
    fn advance_window_uses_each_notifications_own_minutes() {
        let now = Utc::now();
        let mut n = notification(now + Duration::minutes(90));
        n.advance_notice_minutes = 120;
        assert!(matches!(classify(now, &n), Some(FireKind::Advance { .. })));

        n.advance_notice_minutes = 60;
        assert_eq!(classify(now, &n), None);
    }

    #[test]
    fn advance_latch_prevents_repeat_sends() {
        let now = Utc::now();
        let mut n = notification(now + Duration::minutes(10));
        n.advance_sent = true;
        assert_eq!(classify(now, &n), None);
    }

    #[test]
    fn advance_disabled_means_no_advance_fire() {
        let now = Utc::now();
        let mut n = notification(now + Duration::minutes(10));
        n.advance_notice = false;
        assert_eq!(classify(now, &n), None);
    }

    #[test]
    fn completed_notification_never_fires() {
        let now = Utc::now();
        let mut n = notification(now - Duration::minutes(1));
        n.is_completed = true;
        assert_eq!(classify(now, &n), None);
    }

    #[test]
    fn partial_minutes_round_up() {
        let now = Utc::now();
        let n = notification(now + Duration::seconds(90));
        assert_eq!(classify(now, &n), Some(FireKind::Advance { minutes_left: 2 }));
    }

    #[test]
    fn daily_rollover_adds_a_day() {
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(t, RecurrencePattern::Daily),
            Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn weekly_rollover_adds_seven_days() {
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(t, RecurrencePattern::Weekly),
            Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn monthly_rollover_is_calendar_aware() {
        let t = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(t, RecurrencePattern::Monthly),
            Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap()
        );

        let t = Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(t, RecurrencePattern::Monthly),
            Utc.with_ymd_and_hms(2024, 2, 29, 9, 0, 0).unwrap()
        );

        let t = Utc.with_ymd_and_hms(2025, 4, 15, 9, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(t, RecurrencePattern::Monthly),
            Utc.with_ymd_and_hms(2025, 5, 15, 9, 0, 0).unwrap()
        );
    }
}
