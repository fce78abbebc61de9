pub mod analytics;
pub mod auth;
pub mod challenge;
pub mod execute;
pub mod leaderboard;
pub mod notification;
pub mod progression;
pub mod review;
pub mod submission;
pub mod team;
