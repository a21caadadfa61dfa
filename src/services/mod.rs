/// Data-loading services
pub mod birthday_service;

pub use birthday_service::{BirthdayService, FetchError, HttpBirthdaySource};
