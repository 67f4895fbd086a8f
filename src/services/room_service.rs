use std::path::Path;

use chrono::{Duration, Utc};
use qrcode::{QrCode, render::svg};
use rand::Rng;
use sea_orm::{Set, prelude::DateTimeWithTimeZone};

use crate::{
    config::RoomConfig,
    db::dao::RoomDao,
    db::entities::room,
    error::AppError,
    spotify::{SpotifyClient, TokenGrant},
};

/// How often a free code is rolled before giving up. With 6 digits and a
/// realistic number of open rooms this never triggers.
const MAX_ID_ROLLS: u32 = 64;

#[derive(Clone)]
pub struct RoomService {
    room_dao: RoomDao,
    cfg: RoomConfig,
}

impl RoomService {
    pub fn new(room_dao: RoomDao, cfg: RoomConfig) -> Self {
        Self { room_dao, cfg }
    }

    pub async fn find_room(&self, room_id: &str) -> Result<Option<room::Model>, AppError> {
        Ok(self.room_dao.find_by_id(room_id).await?)
    }

    /// Create a room from a fresh authorization grant. The id is rolled
    /// until it does not collide with an open room.
    pub async fn create_room(&self, grant: &TokenGrant) -> Result<room::Model, AppError> {
        let refresh_token = grant.refresh_token.clone().ok_or_else(|| {
            AppError::upstream("Authorization grant did not include a refresh token")
        })?;

        let id = self.roll_unused_id().await?;
        let now = Utc::now().fixed_offset();
        let model = room::ActiveModel {
            id: Set(id),
            access_token: Set(grant.access_token.clone()),
            refresh_token: Set(refresh_token),
            token_expires_at: Set(now + Duration::seconds(grant.expires_in)),
            expires_at: Set(now + Duration::hours(self.cfg.lifespan_hours)),
            qr_code_path: Set(None),
            created_at: Set(now),
        };
        let room = self.room_dao.insert(model).await?;
        tracing::info!(room_id = %room.id, expires_at = %room.expires_at, "new room created");
        Ok(room)
    }

    async fn roll_unused_id(&self) -> Result<String, AppError> {
        for _ in 0..MAX_ID_ROLLS {
            let id = roll_id(self.cfg.id_digits);
            if !self.room_dao.id_exists(&id).await? {
                return Ok(id);
            }
        }
        Err(AppError::internal("could not allocate a free room code"))
    }

    /// Refresh the access token when it has expired; otherwise hand the
    /// room back untouched. Concurrent refreshes race benignly: the last
    /// write wins and earlier tokens stay valid until their own expiry.
    pub async fn ensure_fresh(
        &self,
        spotify: &SpotifyClient,
        room: room::Model,
    ) -> Result<room::Model, AppError> {
        if room.token_expires_at > Utc::now().fixed_offset() {
            return Ok(room);
        }
        tracing::info!(room_id = %room.id, "access token expired, refreshing");
        self.refresh_tokens(spotify, room).await
    }

    pub async fn refresh_tokens(
        &self,
        spotify: &SpotifyClient,
        room: room::Model,
    ) -> Result<room::Model, AppError> {
        let grant = spotify
            .refresh_access_token(&room.refresh_token)
            .await
            .map_err(|err| {
                tracing::warn!(room_id = %room.id, error = %err, "access token refresh failed");
                AppError::upstream("Could not refresh the host session")
            })?;

        // Spotify only rotates the refresh token sometimes; keep the old
        // one when the response omits it.
        let refresh_token = grant.refresh_token.as_deref().unwrap_or(&room.refresh_token);
        let token_expires_at = Utc::now().fixed_offset() + Duration::seconds(grant.expires_in);
        let room = self
            .room_dao
            .update_tokens(&room.id, &grant.access_token, refresh_token, token_expires_at)
            .await?;
        tracing::info!(room_id = %room.id, "refreshed access token");
        Ok(room)
    }

    /// Delete rooms past their session expiry along with their QR files.
    /// Returns the number of rooms removed.
    pub async fn remove_expired(&self, now: DateTimeWithTimeZone) -> Result<u64, AppError> {
        let mut removed = 0;
        for room in self.room_dao.expired(now).await? {
            if let Some(path) = &room.qr_code_path
                && let Err(err) = tokio::fs::remove_file(path).await
            {
                tracing::warn!(room_id = %room.id, path, error = %err, "could not remove qr file");
            }
            if self.room_dao.delete(&room.id).await? {
                tracing::info!(room_id = %room.id, "removed expired room");
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// SVG for the room's join URL. Rendered and persisted on first use,
    /// read back from disk afterwards.
    pub async fn qr_code_svg(
        &self,
        room: &room::Model,
        join_url: &str,
    ) -> Result<String, AppError> {
        if let Some(path) = &room.qr_code_path
            && let Ok(svg) = tokio::fs::read_to_string(path).await
        {
            return Ok(svg);
        }

        let svg = render_qr_svg(join_url)?;
        tokio::fs::create_dir_all(&self.cfg.qr_dir)
            .await
            .map_err(|err| AppError::internal(format!("could not create qr dir: {err}")))?;
        let path = Path::new(&self.cfg.qr_dir).join(format!("{}.svg", room.id));
        tokio::fs::write(&path, &svg)
            .await
            .map_err(|err| AppError::internal(format!("could not write qr file: {err}")))?;
        self.room_dao
            .set_qr_code_path(&room.id, &path.to_string_lossy())
            .await?;
        Ok(svg)
    }
}

/// Random numeric code with the configured digit count, never starting
/// with a zero so the string and numeric forms agree.
fn roll_id(digits: u32) -> String {
    let lower = 10u64.pow(digits - 1);
    let upper = 10u64.pow(digits);
    rand::thread_rng().gen_range(lower..upper).to_string()
}

fn render_qr_svg(data: &str) -> Result<String, AppError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|err| AppError::internal(format!("could not encode qr code: {err}")))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(240, 240)
        .build())
}
