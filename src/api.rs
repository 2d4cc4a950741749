//! Streaming API client.
//!
//! Two sequential calls: the recently-played history (one page), then a
//! batch audio-features lookup for the track ids found there. No retries,
//! no pagination, no timeout beyond the transport default.

use crate::error::{MoodError, AUDIO_FEATURES_FAILED, RECENTLY_PLAYED_FAILED};
use crate::mood::AudioFeatures;
use crate::token_store::Credential;
use reqwest::blocking::Client;
use serde::Deserialize;

/// The two calls the loading sequence needs.
pub trait MusicApi {
    /// Ids of recently played tracks, nulls dropped.
    fn fetch_recently_played(&self, token: &Credential) -> Result<Vec<String>, MoodError>;

    /// Features for `track_ids`, entries the service could not analyze dropped.
    fn fetch_audio_features(
        &self,
        token: &Credential,
        track_ids: &[String],
    ) -> Result<Vec<AudioFeatures>, MoodError>;
}

#[derive(Deserialize)]
struct RecentlyPlayedResponse {
    items: Vec<PlayHistoryItem>,
}

#[derive(Deserialize)]
struct PlayHistoryItem {
    track: Option<TrackObject>,
}

#[derive(Deserialize)]
struct TrackObject {
    id: Option<String>,
}

#[derive(Deserialize)]
struct AudioFeaturesResponse {
    audio_features: Vec<Option<AudioFeatures>>,
}

/// Track ids from a recently-played response body.
///
/// Missing, null and empty ids are skipped.
pub fn parse_recently_played(body: &str) -> Result<Vec<String>, MoodError> {
    let response: RecentlyPlayedResponse = serde_json::from_str(body)?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| item.track?.id)
        .filter(|id| !id.is_empty())
        .collect())
}

/// Feature samples from an audio-features response body. Null entries are
/// skipped.
pub fn parse_audio_features(body: &str) -> Result<Vec<AudioFeatures>, MoodError> {
    let response: AudioFeaturesResponse = serde_json::from_str(body)?;
    Ok(response.audio_features.into_iter().flatten().collect())
}

/// Blocking HTTP implementation of [`MusicApi`].
pub struct SpotifyClient {
    client: Client,
    api_base: String,
    recently_played_limit: u32,
}

impl SpotifyClient {
    pub fn new(api_base: &str, recently_played_limit: u32) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            recently_played_limit,
        })
    }

    fn get(&self, url: &str, token: &Credential, failure: &'static str) -> Result<String, MoodError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).bearer_auth(token.as_str()).send()?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("GET {url} failed with status {status}");
            return Err(MoodError::Api(failure));
        }

        Ok(response.text()?)
    }
}

impl MusicApi for SpotifyClient {
    fn fetch_recently_played(&self, token: &Credential) -> Result<Vec<String>, MoodError> {
        let url = format!(
            "{}/me/player/recently-played?limit={}",
            self.api_base, self.recently_played_limit
        );
        let body = self.get(&url, token, RECENTLY_PLAYED_FAILED)?;
        parse_recently_played(&body)
    }

    fn fetch_audio_features(
        &self,
        token: &Credential,
        track_ids: &[String],
    ) -> Result<Vec<AudioFeatures>, MoodError> {
        let url = format!("{}/audio-features?ids={}", self.api_base, track_ids.join(","));
        let body = self.get(&url, token, AUDIO_FEATURES_FAILED)?;
        parse_audio_features(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// One-shot HTTP server: answers each connection with the next canned
    /// `(status, body)` and hands back the request heads it saw.
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (stream, _) = listener.accept().unwrap();

                    let mut head = String::new();
                    let mut reader = BufReader::new(&stream);
                    loop {
                        let mut line = String::new();
                        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                            break;
                        }
                        head.push_str(&line);
                    }

                    write!(
                        &stream,
                        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    )
                    .unwrap();
                    head
                })
                .collect()
        });

        (base, handle)
    }

    #[test]
    fn test_parse_recently_played_skips_null_ids() {
        let body = r#"{
            "items": [
                {"track": {"id": "a", "name": "One"}, "played_at": "2024-01-01T00:00:00Z"},
                {"track": {"id": null}},
                {"track": {"name": "local file"}},
                {"track": null},
                {"track": {"id": ""}},
                {"track": {"id": "b"}}
            ],
            "limit": 20
        }"#;

        assert_eq!(parse_recently_played(body).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_recently_played_empty() {
        assert!(parse_recently_played(r#"{"items": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_recently_played_missing_items_is_malformed() {
        assert!(matches!(
            parse_recently_played(r#"{"error": "nope"}"#),
            Err(MoodError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_audio_features_skips_nulls() {
        let body = r#"{
            "audio_features": [
                {"id": "a", "valence": 0.2, "energy": 0.4, "tempo": 120.0},
                null,
                {"id": "b", "valence": 0.6, "energy": 0.8}
            ]
        }"#;

        assert_eq!(
            parse_audio_features(body).unwrap(),
            vec![
                AudioFeatures { valence: 0.2, energy: 0.4 },
                AudioFeatures { valence: 0.6, energy: 0.8 },
            ]
        );
    }

    #[test]
    fn test_parse_audio_features_all_null() {
        assert!(parse_audio_features(r#"{"audio_features": [null, null]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SpotifyClient::new("https://api.example.com/v1/", 20).unwrap();
        assert_eq!(client.api_base, "https://api.example.com/v1");
    }

    #[test]
    fn test_recently_played_over_http() {
        let (base, server) = serve(vec![
            (401, r#"{"error": {"status": 401, "message": "The access token expired"}}"#),
            (200, r#"{"items": [{"track": {"id": "a"}}, {"track": {"id": null}}, {"track": {"id": "b"}}]}"#),
        ]);
        let client = SpotifyClient::new(&base, 20).unwrap();
        let token = Credential::new("tok");

        assert_eq!(
            client.fetch_recently_played(&token),
            Err(MoodError::Api(RECENTLY_PLAYED_FAILED))
        );
        assert_eq!(client.fetch_recently_played(&token).unwrap(), vec!["a", "b"]);

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert!(request.starts_with("GET /v1/me/player/recently-played?limit=20 HTTP/1.1\r\n"));
            assert!(request.to_ascii_lowercase().contains("authorization: bearer tok\r\n"));
        }
    }

    #[test]
    fn test_audio_features_over_http() {
        let (base, server) = serve(vec![
            (500, ""),
            (200, r#"{"audio_features": [null, {"id": "b", "valence": 0.5, "energy": 0.7}]}"#),
        ]);
        let client = SpotifyClient::new(&base, 20).unwrap();
        let token = Credential::new("tok");
        let ids = vec!["a".to_string(), "b".to_string()];

        assert_eq!(
            client.fetch_audio_features(&token, &ids),
            Err(MoodError::Api(AUDIO_FEATURES_FAILED))
        );
        assert_eq!(
            client.fetch_audio_features(&token, &ids).unwrap(),
            vec![AudioFeatures { valence: 0.5, energy: 0.7 }]
        );

        let requests = server.join().unwrap();
        for request in &requests {
            assert!(request.starts_with("GET /v1/audio-features?ids=a,b HTTP/1.1\r\n"));
            assert!(request.to_ascii_lowercase().contains("authorization: bearer tok\r\n"));
        }
    }
}
