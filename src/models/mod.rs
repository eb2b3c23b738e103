pub mod auth;
pub mod event;
pub mod location;
pub mod menu;
pub mod schedule;
