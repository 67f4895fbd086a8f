use serde::{Deserialize, Serialize};

/// Token response of the accounts service, for both the code exchange and
/// the refresh grant. Spotify omits `refresh_token` when it did not rotate.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

// Wire shapes of the catalog/player endpoints; only the fields the UI uses.

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackObject {
    pub name: String,
    pub uri: String,
    pub duration_ms: i64,
    pub artists: Vec<ArtistObject>,
    pub album: AlbumObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumObject {
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageObject {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<i64>,
    pub item: Option<TrackObject>,
}

/// Track as handed to the search box and the queue form.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub uri: String,
    pub duration_ms: i64,
    pub album_art_url: Option<String>,
}

impl From<TrackObject> for Track {
    fn from(track: TrackObject) -> Self {
        let artists = track
            .artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        // Spotify orders album art large to small; the smallest is enough
        // for a result row.
        let album_art_url = track.album.images.last().map(|image| image.url.clone());
        Self {
            name: track.name,
            artists,
            album: track.album.name,
            uri: track.uri,
            duration_ms: track.duration_ms,
            album_art_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NowPlaying {
    pub is_playing: bool,
    pub progress_ms: Option<i64>,
    pub track: Option<Track>,
}

impl From<CurrentlyPlayingResponse> for NowPlaying {
    fn from(playing: CurrentlyPlayingResponse) -> Self {
        Self {
            is_playing: playing.is_playing,
            progress_ms: playing.progress_ms,
            track: playing.item.map(Track::from),
        }
    }
}
