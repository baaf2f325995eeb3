use crate::domain::{models::venue::Venue, ports::VenueRepository};
use crate::error::AppError;
use crate::infra::repositories::records::{convert_all, to_json_list, VenueRecord};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteVenueRepo {
    pool: SqlitePool,
}

impl SqliteVenueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for SqliteVenueRepo {
    async fn create(&self, venue: &Venue) -> Result<Venue, AppError> {
        let record = sqlx::query_as::<_, VenueRecord>(
            "INSERT INTO venues (id, name, category, capacity, price, description, amenities_json, images_json,
                is_available, rating, review_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&venue.id).bind(&venue.name).bind(&venue.category).bind(venue.capacity).bind(venue.price)
            .bind(&venue.description).bind(to_json_list(&venue.amenities)).bind(to_json_list(&venue.images))
            .bind(venue.is_available).bind(venue.rating).bind(venue.review_count)
            .bind(venue.created_at).bind(venue.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        record.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, VenueRecord>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(Venue::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Venue>, AppError> {
        let rows = sqlx::query_as::<_, VenueRecord>("SELECT * FROM venues ORDER BY name ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, VenueRecord>(
            "UPDATE venues SET name = ?, category = ?, capacity = ?, price = ?, description = ?,
                amenities_json = ?, images_json = ?, is_available = ?, updated_at = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&venue.name).bind(&venue.category).bind(venue.capacity).bind(venue.price).bind(&venue.description)
            .bind(to_json_list(&venue.amenities)).bind(to_json_list(&venue.images)).bind(venue.is_available)
            .bind(Utc::now())
            .bind(&venue.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Venue not found".into()))?
            .try_into()
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Venue not found".into())); }
        Ok(())
    }
}
