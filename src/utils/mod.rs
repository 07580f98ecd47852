pub mod error_msg;
