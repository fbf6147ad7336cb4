//! Plain data types shared by the aggregation engine and the application.

pub mod day;
pub mod dose;
pub mod file_formats;
pub mod profile;
