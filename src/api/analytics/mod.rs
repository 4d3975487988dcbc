pub mod client;
pub mod html;
pub mod models;

pub use client::{AnalyticsClient, AnalyticsSource};
pub use models::ApiError;
