//! Member selection kept in browser cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use configs::SelectionConfig;
use service::selection::SelectionStore;

pub const MEMBER_ID_COOKIE: &str = "memberId";
pub const FULL_NAME_COOKIE: &str = "fullName";
/// One-shot message shown by the next page that reads it.
pub const FLASH_COOKIE: &str = "message";

/// [`SelectionStore`] over the request's cookie jar. Writes land in the jar,
/// which the handler returns so they reach the response.
pub struct CookieSelectionStore {
    jar: CookieJar,
    max_age_secs: Option<i64>,
    secure: bool,
}

impl CookieSelectionStore {
    pub fn new(jar: CookieJar, cfg: &SelectionConfig) -> Self {
        Self { jar, max_age_secs: cfg.max_age_secs, secure: cfg.secure_cookies }
    }

    pub fn into_jar(self) -> CookieJar { self.jar }

    fn put(&mut self, name: &'static str, value: String) {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        // no max-age means a browser-session cookie
        if let Some(secs) = self.max_age_secs {
            cookie.set_max_age(time::Duration::seconds(secs));
        }
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(cookie);
    }
}

impl SelectionStore for CookieSelectionStore {
    fn member_id(&self) -> Option<i32> {
        self.jar.get(MEMBER_ID_COOKIE).and_then(|c| c.value().trim().parse().ok())
    }

    fn full_name(&self) -> Option<String> {
        self.jar
            .get(FULL_NAME_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set_member_id(&mut self, member_id: i32) {
        self.put(MEMBER_ID_COOKIE, member_id.to_string());
    }

    fn set_full_name(&mut self, full_name: &str) {
        self.put(FULL_NAME_COOKIE, full_name.to_string());
    }
}

pub fn flash_cookie(message: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(FLASH_COOKIE, message.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Read the flash message and drop the cookie.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());
    if message.is_none() {
        return (jar, None);
    }
    let mut gone = Cookie::from(FLASH_COOKIE);
    gone.set_path("/");
    (jar.remove(gone), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(max_age_secs: Option<i64>) -> SelectionConfig {
        SelectionConfig { max_age_secs, secure_cookies: false }
    }

    #[test]
    fn reads_and_writes_both_entries() {
        let jar = CookieJar::new().add(Cookie::new(MEMBER_ID_COOKIE, "4"));
        let mut store = CookieSelectionStore::new(jar, &cfg(None));
        assert_eq!(store.member_id(), Some(4));
        assert_eq!(store.full_name(), None);

        store.set_member_id(9);
        store.set_full_name("Ben Ainslie");
        let jar = store.into_jar();
        assert_eq!(jar.get(MEMBER_ID_COOKIE).map(|c| c.value()), Some("9"));
        let name = jar.get(FULL_NAME_COOKIE).expect("name cookie");
        assert_eq!(name.value(), "Ben Ainslie");
        assert_eq!(name.max_age(), None);
    }

    #[test]
    fn configured_expiry_is_applied() {
        let mut store = CookieSelectionStore::new(CookieJar::new(), &cfg(Some(600)));
        store.set_member_id(1);
        let jar = store.into_jar();
        let c = jar.get(MEMBER_ID_COOKIE).expect("member cookie");
        assert_eq!(c.max_age(), Some(time::Duration::seconds(600)));
    }

    #[test]
    fn garbage_member_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(MEMBER_ID_COOKIE, "abc"));
        let store = CookieSelectionStore::new(jar, &cfg(None));
        assert_eq!(store.member_id(), None);
    }

    #[test]
    fn flash_is_read_once() {
        let jar = CookieJar::new().add(flash_cookie("hello"));
        let (jar, msg) = take_flash(jar);
        assert_eq!(msg.as_deref(), Some("hello"));
        assert!(jar.get(FLASH_COOKIE).is_none());
        let (_, again) = take_flash(jar);
        assert_eq!(again, None);
    }
}
