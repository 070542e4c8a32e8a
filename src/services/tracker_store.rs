use crate::database::Database;
use crate::errors::AppResult;
use crate::models::tracker_model::AdTracker;
use async_trait::async_trait;

/// Well-known key for the single tracker row. One tracker per installation,
/// shared across every ad.
const TRACKER_ID: &str = "local";

/// Load/save contract for the ad-throttle record. A missing record reads as
/// the zeroed default.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn load(&self) -> AppResult<AdTracker>;
    async fn save(&self, tracker: AdTracker) -> AppResult<()>;
    async fn clear(&self) -> AppResult<()>;
}

pub struct PgTrackerStore {
    db: Database,
}

impl PgTrackerStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrackerStore for PgTrackerStore {
    async fn load(&self) -> AppResult<AdTracker> {
        let tracker = sqlx::query_as::<_, AdTracker>(
            r#"SELECT chapters_read, last_ad_shown FROM "AdTracker" WHERE id = $1"#,
        )
        .bind(TRACKER_ID)
        .fetch_optional(&self.db.pool)
        .await?;

        // Persisted counters are local, untrusted state: repair rather
        // than reject.
        Ok(tracker.unwrap_or_default().clamped())
    }

    async fn save(&self, tracker: AdTracker) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO "AdTracker" (id, chapters_read, last_ad_shown)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET chapters_read = EXCLUDED.chapters_read,
                last_ad_shown = EXCLUDED.last_ad_shown
            "#,
        )
        .bind(TRACKER_ID)
        .bind(tracker.chapters_read)
        .bind(tracker.last_ad_shown)
        .execute(&self.db.pool)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM "AdTracker" WHERE id = $1"#)
            .bind(TRACKER_ID)
            .execute(&self.db.pool)
            .await?;

        Ok(())
    }
}
