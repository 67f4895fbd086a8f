use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    let public_url = &cfg.general.public_url;
    if !public_url.starts_with("http://") && !public_url.starts_with("https://") {
        errors.push("general.public_url must be an absolute http(s) URL".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if let Some(spotify) = cfg.spotify.as_ref() {
        if spotify.client_id.trim().is_empty() {
            errors.push("spotify.client_id must not be empty".to_string());
        }

        if spotify.client_secret.trim().is_empty() {
            errors.push("spotify.client_secret must not be empty".to_string());
        }

        if spotify.accounts_url.trim().is_empty() || spotify.api_url.trim().is_empty() {
            errors.push("spotify.accounts_url and spotify.api_url must not be empty".to_string());
        }
    }

    if cfg.room.lifespan_hours <= 0 {
        errors.push("room.lifespan_hours must be > 0".to_string());
    }

    // Codes must stay short enough to type but long enough to not collide
    // constantly while rooms are open.
    if !(4..=9).contains(&cfg.room.id_digits) {
        errors.push("room.id_digits must be between 4 and 9".to_string());
    }

    if cfg.room.qr_dir.trim().is_empty() {
        errors.push("room.qr_dir must not be empty".to_string());
    }

    if cfg.room.cleanup_interval_secs == 0 {
        errors.push("room.cleanup_interval_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
