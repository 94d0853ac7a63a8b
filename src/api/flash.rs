//! One-shot notices carried across a redirect.
//!
//! A notice is stored URL-encoded in the `logbook_flash` cookie and
//! removed by the next page that shows it.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::config::config;

pub const FLASH_COOKIE_NAME: &str = "logbook_flash";

/// Queue `message` for the next rendered page.
pub fn push(jar: CookieJar, message: &str) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE_NAME, urlencoding::encode(message).into_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(config().flash.max_age_seconds));
    jar.add(cookie)
}

/// Take any pending notice, clearing the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE_NAME) else {
        return (jar, Vec::new());
    };

    let messages = urlencoding::decode(cookie.value())
        .map(|m| vec![m.into_owned()])
        .unwrap_or_default();
    let jar = jar.remove(Cookie::build(FLASH_COOKIE_NAME).path("/"));
    (jar, messages)
}
