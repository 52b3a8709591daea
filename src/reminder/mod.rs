pub mod reminder_dto;
pub mod reminder_handlers;
pub mod reminder_models;
pub mod reminder_repository;
pub mod reminder_scheduler;

pub use reminder_models::{Recurrence, Reminder, ReminderKind};
pub use reminder_repository::ReminderRepository;
pub use reminder_scheduler::ReminderScheduler;
