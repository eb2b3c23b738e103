pub mod auth;
pub mod contact;
pub mod events;
pub mod health;
pub mod location;
pub mod maps;
pub mod menu;
pub mod schedule;
pub mod uploads;
