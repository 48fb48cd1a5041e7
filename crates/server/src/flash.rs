//! One-shot notices carried across the post/redirect/get cycle in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::news_item::admin::{CREATED_NOTICE, SAVED_NOTICE};

pub const FLASH_COOKIE: &str = "flash_notice";

// cookie values are short codes so the notice text never needs encoding
fn code_for(notice: &str) -> Option<&'static str> {
    match notice {
        CREATED_NOTICE => Some("created"),
        SAVED_NOTICE => Some("saved"),
        _ => None,
    }
}

fn notice_for(code: &str) -> Option<&'static str> {
    match code {
        "created" => Some(CREATED_NOTICE),
        "saved" => Some(SAVED_NOTICE),
        _ => None,
    }
}

/// Queue `notice` for the next page load.
pub fn set_notice(jar: CookieJar, notice: &str) -> CookieJar {
    let Some(code) = code_for(notice) else {
        return jar;
    };
    let mut cookie = Cookie::new(FLASH_COOKIE, code);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    jar.add(cookie)
}

/// Read and clear the pending notice.
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<&'static str>) {
    let notice = jar.get(FLASH_COOKIE).and_then(|c| notice_for(c.value()));
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, None);
    }
    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), notice)
}
