use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, prelude::DateTimeWithTimeZone,
};

use super::{DaoLayerError, DaoResult};
use crate::db::entities::room::{self, Entity as Room};

#[derive(Clone)]
pub struct RoomDao {
    db: DatabaseConnection,
}

impl RoomDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn insert(&self, model: room::ActiveModel) -> DaoResult<room::Model> {
        model.insert(&self.db).await.map_err(DaoLayerError::Db)
    }

    pub async fn find_by_id(&self, id: &str) -> DaoResult<Option<room::Model>> {
        Room::find_by_id(id.to_owned())
            .one(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn require(&self, id: &str) -> DaoResult<room::Model> {
        self.find_by_id(id).await?.ok_or(DaoLayerError::NotFound {
            entity: "Room",
            id: id.to_owned(),
        })
    }

    pub async fn id_exists(&self, id: &str) -> DaoResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn update_tokens(
        &self,
        id: &str,
        access_token: &str,
        refresh_token: &str,
        token_expires_at: DateTimeWithTimeZone,
    ) -> DaoResult<room::Model> {
        let mut active = self.require(id).await?.into_active_model();
        active.access_token = Set(access_token.to_owned());
        active.refresh_token = Set(refresh_token.to_owned());
        active.token_expires_at = Set(token_expires_at);
        active.update(&self.db).await.map_err(DaoLayerError::Db)
    }

    pub async fn set_qr_code_path(&self, id: &str, path: &str) -> DaoResult<room::Model> {
        let mut active = self.require(id).await?.into_active_model();
        active.qr_code_path = Set(Some(path.to_owned()));
        active.update(&self.db).await.map_err(DaoLayerError::Db)
    }

    /// Rooms whose session expiry has passed, oldest first.
    pub async fn expired(&self, now: DateTimeWithTimeZone) -> DaoResult<Vec<room::Model>> {
        Room::find()
            .filter(room::Column::ExpiresAt.lte(now))
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn delete(&self, id: &str) -> DaoResult<bool> {
        let result = Room::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected > 0)
    }
}
