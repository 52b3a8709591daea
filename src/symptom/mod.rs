pub mod symptom_handlers;
pub mod symptom_models;
pub mod symptom_repository;

pub use symptom_models::Symptom;
pub use symptom_repository::SymptomRepository;
