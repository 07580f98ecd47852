pub mod api;
pub mod config;
pub mod current_user;
pub mod error;
pub mod error_type;
pub mod log_param;
pub mod log_record;
pub mod log_view;
pub mod page;
