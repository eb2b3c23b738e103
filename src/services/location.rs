use chrono::Datelike;
use sqlx::PgPool;

use crate::{
    config::Config,
    models::{
        location::{CurrentLocation, LocationSource},
        schedule::weekday_name,
    },
    services::{dates, events::EventService, schedule::ScheduleService},
};

pub struct LocationService;

impl LocationService {
    /// Resolve where the truck is today. A one-time event for today's date
    /// wins; otherwise the weekly schedule entry for today's weekday;
    /// otherwise the configured fallback address.
    pub async fn current(pool: &PgPool, config: &Config) -> anyhow::Result<CurrentLocation> {
        let today = dates::today_local();

        if let Some(event) = EventService::for_date(pool, today).await? {
            return Ok(CurrentLocation {
                address: event.location,
                time: event.time,
                title: Some(event.title),
                source: LocationSource::Event,
            });
        }

        let day = weekday_name(today.weekday());
        if let Some(entry) = ScheduleService::entry_for_day(pool, day).await? {
            if let Some(address) = entry.location.filter(|l| !l.trim().is_empty()) {
                return Ok(CurrentLocation {
                    address,
                    time: entry.time,
                    title: None,
                    source: LocationSource::Schedule,
                });
            }
        }

        Ok(CurrentLocation {
            address: config.fallback_address.clone(),
            time: None,
            title: None,
            source: LocationSource::Fallback,
        })
    }
}
