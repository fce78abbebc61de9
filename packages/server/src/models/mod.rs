pub mod analytics;
pub mod auth;
pub mod challenge;
pub mod execute;
pub mod notification;
pub mod progress;
pub mod review;
pub mod shared;
pub mod submission;
pub mod team;
