//! Birthday-of-the-day flip-book: loads today's birthdays and drives a
//! page-turn carousel over them.

pub mod carousel;
pub mod constants;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
