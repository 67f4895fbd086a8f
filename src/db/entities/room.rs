use sea_orm::entity::prelude::*;

/// One active listening party: the host's OAuth credentials plus the
/// session expiry. The playback queue itself lives on Spotify.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Short numeric code the guests type or scan; unique by re-roll at
    /// creation time.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the Spotify access token; refreshed in-line by the guard.
    pub token_expires_at: DateTimeWithTimeZone,
    /// Expiry of the room itself; enforced by the guard, rows past it are
    /// removed by the cleanup task.
    pub expires_at: DateTimeWithTimeZone,
    /// Set lazily once the QR code has been rendered to disk.
    pub qr_code_path: Option<String>,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
}

impl ActiveModelBehavior for ActiveModel {}
