use reqwest::{Response, StatusCode};
use thiserror::Error;

use crate::config::SpotifyConfig;

use super::types::{CurrentlyPlayingResponse, NowPlaying, SearchResponse, TokenGrant, Track};

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("spotify request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("spotify answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Thin client over the two Spotify surfaces: the accounts service (OAuth
/// token grants) and the Web API (catalog search, player queue). Base URLs
/// come from config so tests can point at a local mock server.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    cfg: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(cfg: SpotifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cfg,
        }
    }

    /// Authorize URL the host is redirected to; mirrors the parameters the
    /// accounts service documents for the authorization-code flow.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        let accounts = self.cfg.accounts_url.trim_end_matches('/');
        format!(
            "{accounts}/authorize/?client_id={}&response_type=code&redirect_uri={}&state={}&scope={}&show_dialog={}",
            urlencoding::encode(&self.cfg.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state),
            urlencoding::encode(&self.cfg.scope),
            self.cfg.show_dialog,
        )
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, SpotifyError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenGrant, SpotifyError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    pub async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u8,
    ) -> Result<Vec<Track>, SpotifyError> {
        let response = self
            .http
            .get(format!("{}/v1/search", self.api_url()))
            .bearer_auth(access_token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let search: SearchResponse = response.json().await?;
        Ok(search.tracks.items.into_iter().map(Track::from).collect())
    }

    /// Push a track onto the host's playback queue. Spotify answers 204 (or
    /// 200 on older player versions) on success.
    pub async fn queue_track(&self, access_token: &str, uri: &str) -> Result<(), SpotifyError> {
        let response = self
            .http
            .post(format!("{}/v1/me/player/queue", self.api_url()))
            .bearer_auth(access_token)
            .query(&[("uri", uri)])
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    /// `None` when nothing is playing (the API answers 204 in that case).
    pub async fn currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<NowPlaying>, SpotifyError> {
        let response = self
            .http
            .get(format!("{}/v1/me/player/currently-playing", self.api_url()))
            .bearer_auth(access_token)
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let response = Self::expect_success(response).await?;
        let playing: CurrentlyPlayingResponse = response.json().await?;
        Ok(Some(playing.into()))
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant, SpotifyError> {
        let accounts = self.cfg.accounts_url.trim_end_matches('/');
        let response = self
            .http
            .post(format!("{accounts}/api/token"))
            .basic_auth(&self.cfg.client_id, Some(&self.cfg.client_secret))
            .form(form)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn expect_success(response: Response) -> Result<Response, SpotifyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SpotifyError::Status { status, body })
    }

    fn api_url(&self) -> &str {
        self.cfg.api_url.trim_end_matches('/')
    }
}
