//! Resource queries on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::resource::{Resource, ResourceRow},
};

impl Repository {
    /// Get a resource by ID
    pub async fn resources_find_by_id(&self, id: i32) -> AppResult<Option<Resource>> {
        let row = sqlx::query_as::<_, ResourceRow>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resource::from))
    }
}
