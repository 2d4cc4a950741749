//! OAuth implicit-grant helpers.
//!
//! Outbound: build the authorization URL the user is sent to.
//! Inbound: pull `access_token` out of the fragment of the URL the
//! authorization server redirected back to.

use crate::config::Config;
use crate::token_store::Credential;

/// Authorization URL for the login redirect.
///
/// ```
/// use moodfacts::{auth, config::Config};
///
/// let url = auth::authorize_url(&Config::default());
/// assert!(url.starts_with("https://accounts.spotify.com/authorize?client_id="));
/// assert!(url.ends_with("&response_type=token"));
/// ```
#[must_use]
pub fn authorize_url(config: &Config) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&scope={}&response_type={}",
        config.auth_endpoint,
        config.client_id,
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&config.scopes.join(" ")),
        config.response_type,
    )
}

/// Extracts the access token from a redirect URL's fragment.
///
/// The fragment is read as a form-encoded parameter list; other fields
/// (`token_type`, `expires_in`, `state`, ...) are ignored. An empty
/// `access_token` counts as absent.
#[must_use]
pub fn token_from_url(location: &str) -> Option<Credential> {
    let (_, fragment) = location.split_once('#')?;

    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
        .map(Credential::new)
}

/// Where the address bar should point once the token has been captured.
#[must_use]
pub fn clean_url(config: &Config) -> String {
    config.redirect_uri.clone()
}
