use sea_orm::DatabaseConnection;

use super::RoomDao;

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn room(&self) -> RoomDao {
        RoomDao::new(&self.db)
    }
}
