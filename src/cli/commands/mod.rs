pub mod database;
pub mod pizza;
pub mod restaurant;
