pub mod application;
pub mod help;
pub mod resume;
pub mod user;
pub mod vacancy;
