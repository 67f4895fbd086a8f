//! One-shot flash messages carried in a short-lived cookie: pushed before a
//! redirect, taken (and cleared) by the next page render.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "qtify_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Success,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Success => "success",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Level::Error),
            "success" => Some(Level::Success),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: Level,
    pub text: String,
}

/// Append a message to the flash cookie.
pub fn push(jar: CookieJar, level: Level, text: &str) -> CookieJar {
    let mut encoded: Vec<String> = jar
        .get(FLASH_COOKIE)
        .map(|cookie| split_encoded(cookie.value()))
        .unwrap_or_default();
    encoded.push(format!("{}:{}", level.as_str(), urlencoding::encode(text)));
    jar.add(flash_cookie(encoded.join(",")))
}

/// Read and clear all pending messages.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = jar
        .get(FLASH_COOKIE)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default();
    let jar = jar.remove(flash_cookie(String::new()));
    (jar, messages)
}

fn split_encoded(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

fn decode(value: &str) -> Vec<FlashMessage> {
    split_encoded(value)
        .into_iter()
        .filter_map(|part| {
            let (level, text) = part.split_once(':')?;
            Some(FlashMessage {
                level: Level::parse(level)?,
                text: urlencoding::decode(text).ok()?.into_owned(),
            })
        })
        .collect()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE.to_string(), value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .build()
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::CookieJar;

    use super::{Level, push, take};

    #[test]
    fn push_then_take_roundtrips_messages() {
        let jar = push(CookieJar::default(), Level::Error, "Room not found. (Error 404)");
        let jar = push(jar, Level::Success, "Track added");

        let (_, messages) = take(jar);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, Level::Error);
        assert_eq!(messages[0].text, "Room not found. (Error 404)");
        assert_eq!(messages[1].level, Level::Success);
        assert_eq!(messages[1].text, "Track added");
    }

    #[test]
    fn take_on_empty_jar_yields_nothing() {
        let (_, messages) = take(CookieJar::default());
        assert!(messages.is_empty());
    }

    #[test]
    fn garbage_cookie_values_are_ignored() {
        let jar = CookieJar::default().add(super::flash_cookie("not-a-flash".to_string()));
        let (_, messages) = take(jar);
        assert!(messages.is_empty());
    }
}
