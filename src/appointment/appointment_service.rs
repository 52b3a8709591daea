use super::appointment_dto::CreateAppointmentRequest;
use super::appointment_models::{Appointment, AppointmentStatus};
use super::appointment_repository::AppointmentRepository;
use crate::doctor::doctor_repository::DoctorRepository;
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Booking rules for appointments: the slot must be in the future, the
/// doctor must exist, and the doctor must not already hold a live
/// appointment at the same instant.
#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    doctors: DoctorRepository,
}

impl AppointmentService {
    pub fn new(repo: AppointmentRepository, doctors: DoctorRepository) -> Self {
        Self { repo, doctors }
    }

    pub async fn book(
        &self,
        user_id: Uuid,
        payload: CreateAppointmentRequest,
    ) -> Result<Appointment> {
        ensure_future(payload.scheduled_for, Utc::now())?;

        self.doctors
            .find_by_id(payload.doctor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

        if self
            .repo
            .slot_taken(payload.doctor_id, payload.scheduled_for)
            .await?
        {
            return Err(AppError::BadRequest(
                "The doctor already has an appointment at that time".to_string(),
            ));
        }

        self.repo
            .create(
                user_id,
                payload.doctor_id,
                payload.scheduled_for,
                payload.reason.as_deref(),
            )
            .await
    }

    pub async fn cancel(&self, user_id: Uuid, appointment_id: Uuid) -> Result<Appointment> {
        let appointment = self
            .repo
            .find_by_id(appointment_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

        match appointment.status {
            AppointmentStatus::Pending | AppointmentStatus::Approved => {}
            other => {
                return Err(AppError::BadRequest(format!(
                    "Cannot cancel a {} appointment",
                    other
                )))
            }
        }

        self.repo
            .update_status(appointment_id, user_id, AppointmentStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }

    pub async fn set_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        self.repo
            .update_status_any(appointment_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }
}

fn ensure_future(scheduled_for: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if scheduled_for <= now {
        return Err(AppError::Validation(
            "Appointment time must be in the future".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn past_slot_is_rejected() {
        let now = Utc::now();
        assert!(ensure_future(now - Duration::minutes(1), now).is_err());
        assert!(ensure_future(now, now).is_err());
    }

    #[test]
    fn future_slot_is_accepted() {
        let now = Utc::now();
        assert!(ensure_future(now + Duration::minutes(30), now).is_ok());
    }
}
