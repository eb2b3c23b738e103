pub mod auth;
pub mod calendar;
pub mod dates;
pub mod email;
pub mod events;
pub mod location;
pub mod maps;
pub mod menu;
pub mod schedule;
pub mod uploads;
