pub mod doctor_dto;
pub mod doctor_handlers;
pub mod doctor_models;
pub mod doctor_repository;

pub use doctor_models::Doctor;
pub use doctor_repository::DoctorRepository;
