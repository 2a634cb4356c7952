//! Callback link construction

/// Path of the recovery callback route on the application
pub const CALLBACK_PATH: &str = "/recovery/callback";

/// Build the recovery callback link
///
/// The identifier and token are interpolated verbatim; existing callback
/// consumers parse the query string byte for byte, so no percent-encoding is
/// applied. A trailing `/` on `app_url` is dropped.
///
/// ```rust
/// use mce_recovery::recovery::callback_link;
///
/// assert_eq!(
///     callback_link("https://mce.example.com", "a@b.com", "T1"),
///     "https://mce.example.com/recovery/callback?email=a@b.com&token=T1",
/// );
/// ```
#[must_use]
pub fn callback_link(app_url: &str, identifier: &str, token: &str) -> String {
    let origin = app_url.strip_suffix('/').unwrap_or(app_url);
    format!("{origin}{CALLBACK_PATH}?email={identifier}&token={token}")
}
