pub mod appointment_dto;
pub mod appointment_handlers;
pub mod appointment_models;
pub mod appointment_repository;
pub mod appointment_service;

pub use appointment_models::{Appointment, AppointmentStatus};
pub use appointment_repository::AppointmentRepository;
pub use appointment_service::AppointmentService;
