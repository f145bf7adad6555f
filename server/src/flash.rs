//! One-shot status messages carried from a mutating request to the next
//! rendered page in an encrypted cookie.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;

pub const FLASH_COOKIE: &str = "fs_flash";

pub const EMPLOYEE_ADDED: &str = "New employee added successfully!";
pub const EMPLOYEE_UPDATED: &str = "Employee updated successfully!";
pub const EMPLOYEE_DELETED: &str = "Employee deleted successfully!";

/// Store `message` for the next page render. Replaces any pending message.
pub fn set(jar: PrivateCookieJar, message: &str, secure: bool) -> PrivateCookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, message.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build();
    jar.add(cookie)
}

/// Read the pending message, if any, and clear it.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, Some(cookie.value().to_string()))
}
