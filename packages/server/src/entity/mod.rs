pub mod challenge;
pub mod notification;
pub mod role;
pub mod role_permission;
pub mod submission;
pub mod team;
pub mod team_completion;
pub mod team_progress;
