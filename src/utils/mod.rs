/// Utility modules for common functionality
pub mod datetime;
pub mod message_formatter;
pub mod photo;
pub mod string_utils;
pub mod timezone;
