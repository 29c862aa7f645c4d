pub mod app;
pub mod application_service;
pub mod nav_service;
pub mod session_service;
pub mod vacancy_service;
