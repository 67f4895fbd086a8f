use sea_orm::DatabaseConnection;

use crate::{
    config::RoomConfig, db::dao::DaoContext, services::room_service::RoomService, state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    room_cfg: RoomConfig,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, room_cfg: &RoomConfig) -> Self {
        Self {
            daos: DaoContext::new(db),
            room_cfg: room_cfg.clone(),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db, &state.config.room)
    }

    pub fn room(&self) -> RoomService {
        RoomService::new(self.daos.room(), self.room_cfg.clone())
    }
}
