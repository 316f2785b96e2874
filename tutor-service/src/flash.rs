//! One-shot flash messages, carried between a POST and the redirected GET in
//! a signed cookie.

use axum_extra::extract::{SignedCookieJar, cookie::Cookie};

const FLASH_COOKIE: &str = "flash";

pub fn set(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, message.into()))
            .path("/")
            .http_only(true),
    )
}

/// Returns the pending message, if any, and clears it from the jar.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            (
                jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
                Some(message),
            )
        }
        None => (jar, None),
    }
}
