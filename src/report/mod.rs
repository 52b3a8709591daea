pub mod report_dto;
pub mod report_handlers;
pub mod report_models;
pub mod report_repository;

pub use report_models::Report;
pub use report_repository::ReportRepository;
