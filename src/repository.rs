use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::ad_model::{Ad, CreateAdDto, UpdateAdDto};
use crate::models::chapter_model::{Chapter, CreateChapterDto, UpdateChapterDto};
use crate::models::comic_model::{Comic, CreateComicDto, UpdateComicDto};
use crate::models::paging::PaginationParams;
use chrono::Utc;
use tokio::sync::broadcast;

/// Emitted after every committed catalog mutation. Subscribers get a
/// best-effort stream; a lagging receiver only misses notifications, never
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    ComicsChanged,
    ChaptersChanged,
    AdsChanged,
}

/// Data access for comics, chapters and ads.
///
/// Cheap to construct per request: it borrows the shared pool and the shared
/// event sender from the application state.
pub struct ContentRepository {
    db: Database,
    events: broadcast::Sender<ContentEvent>,
}

impl ContentRepository {
    pub fn new(db: Database, events: broadcast::Sender<ContentEvent>) -> Self {
        Self { db, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: ContentEvent) {
        // No receivers is fine; send only fails when nobody is listening.
        let _ = self.events.send(event);
    }

    // --- Comics ---

    pub async fn count_comics(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Comic""#)
            .fetch_one(&self.db.pool)
            .await?;
        Ok(count)
    }

    pub async fn list_comics(&self, params: &PaginationParams) -> AppResult<Vec<Comic>> {
        let comics = sqlx::query_as::<_, Comic>(
            r#"
            SELECT id, title, author, cover_image, description, genres,
                   rating, status, total_chapters, created_at, updated_at
            FROM "Comic"
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.take())
        .bind(params.skip())
        .fetch_all(&self.db.pool)
        .await?;

        Ok(comics)
    }

    pub async fn get_comic(&self, id: &str) -> AppResult<Comic> {
        sqlx::query_as::<_, Comic>(
            r#"
            SELECT id, title, author, cover_image, description, genres,
                   rating, status, total_chapters, created_at, updated_at
            FROM "Comic"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))
    }

    pub async fn create_comic(&self, dto: CreateComicDto) -> AppResult<Comic> {
        let id = cuid2::create_id();
        let now = Utc::now().naive_utc();

        let comic = sqlx::query_as::<_, Comic>(
            r#"
            INSERT INTO "Comic"
                (id, title, author, cover_image, description, genres,
                 rating, status, total_chapters, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, $9, $9)
            RETURNING id, title, author, cover_image, description, genres,
                      rating, status, total_chapters, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&dto.title)
        .bind(&dto.author)
        .bind(&dto.cover_image)
        .bind(&dto.description)
        .bind(&dto.genres)
        .bind(dto.rating)
        .bind(dto.status)
        .bind(now)
        .fetch_one(&self.db.pool)
        .await?;

        self.notify(ContentEvent::ComicsChanged);
        Ok(comic)
    }

    pub async fn update_comic(&self, id: &str, dto: UpdateComicDto) -> AppResult<Comic> {
        let comic = sqlx::query_as::<_, Comic>(
            r#"
            UPDATE "Comic"
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                cover_image = COALESCE($4, cover_image),
                description = COALESCE($5, description),
                genres = COALESCE($6, genres),
                rating = COALESCE($7, rating),
                status = COALESCE($8, status),
                updated_at = $9
            WHERE id = $1
            RETURNING id, title, author, cover_image, description, genres,
                      rating, status, total_chapters, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.author)
        .bind(dto.cover_image)
        .bind(dto.description)
        .bind(dto.genres)
        .bind(dto.rating)
        .bind(dto.status)
        .bind(Utc::now().naive_utc())
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Comic not found".to_string()))?;

        self.notify(ContentEvent::ComicsChanged);
        Ok(comic)
    }

    /// Deletes a comic together with its chapters and any bookmarks on it.
    pub async fn delete_comic(&self, id: &str) -> AppResult<()> {
        let mut tx = self.db.pool.begin().await?;

        sqlx::query(r#"DELETE FROM "Bookmark" WHERE comic_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(r#"DELETE FROM "Chapter" WHERE comic_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(r#"DELETE FROM "Comic" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Comic not found".to_string()));
        }

        tx.commit().await?;
        self.notify(ContentEvent::ComicsChanged);
        Ok(())
    }

    // --- Chapters ---

    /// Chapters of a comic in reading order (chapter number ascending).
    pub async fn list_chapters(&self, comic_id: &str) -> AppResult<Vec<Chapter>> {
        let chapters = sqlx::query_as::<_, Chapter>(
            r#"
            SELECT id, comic_id, number, title, release_date,
                   premium_release_date, is_locked, pages, created_at, updated_at
            FROM "Chapter"
            WHERE comic_id = $1
            ORDER BY number ASC
            "#,
        )
        .bind(comic_id)
        .fetch_all(&self.db.pool)
        .await?;

        Ok(chapters)
    }

    pub async fn get_chapter(&self, id: &str) -> AppResult<Chapter> {
        sqlx::query_as::<_, Chapter>(
            r#"
            SELECT id, comic_id, number, title, release_date,
                   premium_release_date, is_locked, pages, created_at, updated_at
            FROM "Chapter"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Chapter not found".to_string()))
    }

    pub async fn create_chapter(&self, dto: CreateChapterDto) -> AppResult<Chapter> {
        // Owning comic must exist and the number must be free.
        self.get_comic(&dto.comic_id).await?;

        let taken: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM "Chapter" WHERE comic_id = $1 AND number = $2"#,
        )
        .bind(&dto.comic_id)
        .bind(dto.number)
        .fetch_one(&self.db.pool)
        .await?;

        if taken > 0 {
            return Err(AppError::BadRequest(format!(
                "Chapter {} already exists for this comic",
                dto.number
            )));
        }

        let id = cuid2::create_id();
        let now = Utc::now().naive_utc();
        let mut tx = self.db.pool.begin().await?;

        let chapter = sqlx::query_as::<_, Chapter>(
            r#"
            INSERT INTO "Chapter"
                (id, comic_id, number, title, release_date,
                 premium_release_date, is_locked, pages, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING id, comic_id, number, title, release_date,
                      premium_release_date, is_locked, pages, created_at, updated_at
            "#,
        )
        .bind(&id)
        .bind(&dto.comic_id)
        .bind(dto.number)
        .bind(&dto.title)
        .bind(dto.release_date)
        .bind(dto.premium_release_date)
        .bind(dto.is_locked)
        .bind(&dto.pages)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        Self::sync_total_chapters(&mut tx, &dto.comic_id).await?;
        tx.commit().await?;

        self.notify(ContentEvent::ChaptersChanged);
        Ok(chapter)
    }

    pub async fn update_chapter(&self, id: &str, dto: UpdateChapterDto) -> AppResult<Chapter> {
        let chapter = sqlx::query_as::<_, Chapter>(
            r#"
            UPDATE "Chapter"
            SET title = COALESCE($2, title),
                release_date = COALESCE($3, release_date),
                premium_release_date = COALESCE($4, premium_release_date),
                is_locked = COALESCE($5, is_locked),
                pages = COALESCE($6, pages),
                updated_at = $7
            WHERE id = $1
            RETURNING id, comic_id, number, title, release_date,
                      premium_release_date, is_locked, pages, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.release_date)
        .bind(dto.premium_release_date)
        .bind(dto.is_locked)
        .bind(dto.pages)
        .bind(Utc::now().naive_utc())
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Chapter not found".to_string()))?;

        self.notify(ContentEvent::ChaptersChanged);
        Ok(chapter)
    }

    pub async fn delete_chapter(&self, id: &str) -> AppResult<()> {
        let chapter = self.get_chapter(id).await?;

        let mut tx = self.db.pool.begin().await?;

        sqlx::query(r#"DELETE FROM "Bookmark" WHERE chapter_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(r#"DELETE FROM "Chapter" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::sync_total_chapters(&mut tx, &chapter.comic_id).await?;
        tx.commit().await?;

        self.notify(ContentEvent::ChaptersChanged);
        Ok(())
    }

    /// Keeps the denormalized chapter count on the comic in step with the
    /// chapter table.
    async fn sync_total_chapters(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        comic_id: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE "Comic"
            SET total_chapters = (SELECT COUNT(*) FROM "Chapter" WHERE comic_id = $1)
            WHERE id = $1
            "#,
        )
        .bind(comic_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    // --- Ads ---

    pub async fn list_ads(&self) -> AppResult<Vec<Ad>> {
        let ads = sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, image_url, link_url, button_text,
                   is_active, show_frequency, created_at
            FROM "Ad"
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(ads)
    }

    /// Ads eligible for display, in stable creation order. The reader flow
    /// shows the first of these that passes the throttle.
    pub async fn list_active_ads(&self) -> AppResult<Vec<Ad>> {
        let ads = sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, image_url, link_url, button_text,
                   is_active, show_frequency, created_at
            FROM "Ad"
            WHERE is_active = TRUE
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(ads)
    }

    pub async fn get_ad(&self, id: &str) -> AppResult<Ad> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, image_url, link_url, button_text,
                   is_active, show_frequency, created_at
            FROM "Ad"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".to_string()))
    }

    pub async fn create_ad(&self, dto: CreateAdDto) -> AppResult<Ad> {
        let id = cuid2::create_id();

        let ad = sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO "Ad"
                (id, title, description, image_url, link_url, button_text,
                 is_active, show_frequency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, image_url, link_url, button_text,
                      is_active, show_frequency, created_at
            "#,
        )
        .bind(&id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(&dto.link_url)
        .bind(&dto.button_text)
        .bind(dto.is_active)
        .bind(dto.show_frequency)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.db.pool)
        .await?;

        self.notify(ContentEvent::AdsChanged);
        Ok(ad)
    }

    pub async fn update_ad(&self, id: &str, dto: UpdateAdDto) -> AppResult<Ad> {
        let ad = sqlx::query_as::<_, Ad>(
            r#"
            UPDATE "Ad"
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                link_url = COALESCE($5, link_url),
                button_text = COALESCE($6, button_text),
                is_active = COALESCE($7, is_active),
                show_frequency = COALESCE($8, show_frequency)
            WHERE id = $1
            RETURNING id, title, description, image_url, link_url, button_text,
                      is_active, show_frequency, created_at
            "#,
        )
        .bind(id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.image_url)
        .bind(dto.link_url)
        .bind(dto.button_text)
        .bind(dto.is_active)
        .bind(dto.show_frequency)
        .fetch_optional(&self.db.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ad not found".to_string()))?;

        self.notify(ContentEvent::AdsChanged);
        Ok(ad)
    }

    pub async fn delete_ad(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query(r#"DELETE FROM "Ad" WHERE id = $1"#)
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ad not found".to_string()));
        }

        self.notify(ContentEvent::AdsChanged);
        Ok(())
    }
}
