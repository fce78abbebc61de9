mod common;

mod analytics;
mod auth;
mod challenge;
mod notification;
mod review;
mod submission;
mod team;
