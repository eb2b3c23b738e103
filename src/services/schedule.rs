use sqlx::PgPool;

use crate::models::schedule::{ScheduleEntry, UpsertScheduleEntry, WEEKDAY_NAMES};

const SCHEDULE_COLS: &str = "day, location, time, notes, updated_at";

pub struct ScheduleService;

impl ScheduleService {
    /// All schedule rows in Monday..Sunday display order.
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<ScheduleEntry>> {
        let mut entries = sqlx::query_as::<_, ScheduleEntry>(&format!(
            "SELECT {SCHEDULE_COLS} FROM weekly_schedule"
        ))
        .fetch_all(pool)
        .await?;
        entries.sort_by_key(|e| weekday_position(&e.day));
        Ok(entries)
    }

    /// Replace the full week in one transaction. Day names are validated
    /// up front so a typo can't orphan half the schedule.
    pub async fn replace(
        pool: &PgPool,
        entries: &[UpsertScheduleEntry],
    ) -> anyhow::Result<Vec<ScheduleEntry>> {
        for entry in entries {
            if !WEEKDAY_NAMES.contains(&entry.day.as_str()) {
                anyhow::bail!("Unknown weekday name: {:?}", entry.day);
            }
        }

        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM weekly_schedule")
            .execute(&mut *tx)
            .await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO weekly_schedule (day, location, time, notes)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (day) DO UPDATE SET
                     location = EXCLUDED.location,
                     time = EXCLUDED.time,
                     notes = EXCLUDED.notes,
                     updated_at = NOW()",
            )
            .bind(&entry.day)
            .bind(&entry.location)
            .bind(&entry.time)
            .bind(&entry.notes)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Self::list(pool).await
    }

    pub async fn entry_for_day(
        pool: &PgPool,
        day: &str,
    ) -> anyhow::Result<Option<ScheduleEntry>> {
        let entry = sqlx::query_as::<_, ScheduleEntry>(&format!(
            "SELECT {SCHEDULE_COLS} FROM weekly_schedule WHERE day = $1"
        ))
        .bind(day)
        .fetch_optional(pool)
        .await?;
        Ok(entry)
    }
}

fn weekday_position(day: &str) -> usize {
    WEEKDAY_NAMES
        .iter()
        .position(|name| *name == day)
        .unwrap_or(WEEKDAY_NAMES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_position_ordering() {
        assert!(weekday_position("Monday") < weekday_position("Sunday"));
        assert_eq!(weekday_position("not a day"), 7);
    }
}
