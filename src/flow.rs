//! Flow controller: login state, loading sequence and page updates.
//!
//! The decision logic is the pure [`transition`] function: it takes the
//! current [`State`] and an [`Event`] and returns the next state plus the
//! [`Effect`]s to perform. [`FlowController`] runs those effects against
//! the injected token store, API client, renderer and navigator, feeding
//! fetch results back in as new events.
//!
//! ```text
//!                 Started (no credential)
//!   Unauthenticated <-------------------- *
//!                                         |
//!                 Started (credential)    v
//!   Loading --RecentlyPlayed ok--> Loading --AudioFeatures ok--> Displayed
//!      |                              |
//!      +------ error / empty ---------+-----------------------> Errored
//! ```

use crate::api::MusicApi;
use crate::auth;
use crate::config::Config;
use crate::error::{MoodError, NO_AUDIO_FEATURES, NO_RECENT_TRACKS};
use crate::facts::{pick_fact, RandomSource};
use crate::mood::{average_features, classify, AudioFeatures, MoodCategory};
use crate::page::{Element, Navigator, Renderer};
use crate::token_store::{Credential, TokenStore};
use anyhow::Result;
use log::{debug, info, warn};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// No credential: login control shown.
    Unauthenticated,
    /// Fetch sequence in flight.
    Loading { token: Credential },
    Displayed { mood: MoodCategory, fact: String },
    Errored { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Page load. `location` is the full current URL, fragment included.
    Started {
        stored: Option<Credential>,
        location: String,
    },
    RecentlyPlayed(Result<Vec<String>, MoodError>),
    AudioFeatures(Result<Vec<AudioFeatures>, MoodError>),
    LoginClicked,
    LogoutClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Show(Element),
    Hide(Element),
    SetText(Element, String),
    SaveToken(Credential),
    ClearToken,
    ReplaceUrl(String),
    Navigate(String),
    FetchRecentlyPlayed(Credential),
    FetchAudioFeatures(Credential, Vec<String>),
}

fn errored(err: &MoodError) -> (State, Vec<Effect>) {
    let message = err.to_string();
    (
        State::Errored { message: message.clone() },
        vec![Effect::SetText(Element::Error, message), Effect::Show(Element::Error)],
    )
}

/// Pure state transition.
///
/// The only non-determinism is fact selection, which goes through `rng`.
pub fn transition(
    state: &State,
    event: Event,
    config: &Config,
    rng: &mut dyn RandomSource,
) -> (State, Vec<Effect>) {
    match (state, event) {
        (_, Event::Started { stored, location }) => {
            let mut effects = Vec::new();

            let token = match stored {
                Some(token) => Some(token),
                None => auth::token_from_url(&location).inspect(|token| {
                    effects.push(Effect::SaveToken(token.clone()));
                    effects.push(Effect::ReplaceUrl(auth::clean_url(config)));
                }),
            };

            match token {
                None => {
                    effects.extend([
                        Effect::Show(Element::LoginButton),
                        Effect::Hide(Element::Content),
                        Effect::Hide(Element::Error),
                    ]);
                    (State::Unauthenticated, effects)
                }
                Some(token) => {
                    effects.extend([
                        Effect::Hide(Element::LoginButton),
                        Effect::Hide(Element::Error),
                        Effect::Show(Element::Content),
                        Effect::FetchRecentlyPlayed(token.clone()),
                    ]);
                    (State::Loading { token }, effects)
                }
            }
        }

        (State::Loading { token }, Event::RecentlyPlayed(result)) => match result {
            Ok(track_ids) if track_ids.is_empty() => errored(&MoodError::EmptyResult(NO_RECENT_TRACKS)),
            Ok(track_ids) => (
                State::Loading { token: token.clone() },
                vec![Effect::FetchAudioFeatures(token.clone(), track_ids)],
            ),
            Err(err) => errored(&err),
        },

        (State::Loading { .. }, Event::AudioFeatures(result)) => match result {
            Ok(features) => match average_features(&features) {
                None => errored(&MoodError::EmptyResult(NO_AUDIO_FEATURES)),
                Some(average) => {
                    let mood = classify(average.valence, average.energy);
                    let fact = pick_fact(mood, rng);
                    debug!(
                        "Averaged {} samples to valence {:.3}, energy {:.3}: {mood}",
                        features.len(),
                        average.valence,
                        average.energy
                    );
                    (
                        State::Displayed { mood, fact: fact.to_string() },
                        vec![
                            Effect::SetText(Element::Mood, mood.label().to_string()),
                            Effect::SetText(Element::Fact, fact.to_string()),
                        ],
                    )
                }
            },
            Err(err) => errored(&err),
        },

        (_, Event::RecentlyPlayed(_) | Event::AudioFeatures(_)) => {
            debug!("Dropping fetch result outside of loading state: {state:?}");
            (state.clone(), Vec::new())
        }

        (_, Event::LoginClicked) => (
            state.clone(),
            vec![Effect::Navigate(auth::authorize_url(config))],
        ),

        (_, Event::LogoutClicked) => (
            State::Unauthenticated,
            vec![Effect::ClearToken, Effect::Navigate(config.redirect_uri.clone())],
        ),
    }
}

/// Runs [`transition`] against real (or fake) collaborators.
pub struct FlowController<S, A, R, N> {
    config: Config,
    store: S,
    api: A,
    renderer: R,
    navigator: N,
    rng: Box<dyn RandomSource>,
    state: State,
}

impl<S, A, R, N> FlowController<S, A, R, N>
where
    S: TokenStore,
    A: MusicApi,
    R: Renderer,
    N: Navigator,
{
    pub fn new(
        config: Config,
        store: S,
        api: A,
        renderer: R,
        navigator: N,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            store,
            api,
            renderer,
            navigator,
            rng,
            state: State::Unauthenticated,
        }
    }

    /// Page load at `location`.
    ///
    /// Errors are storage failures only; API failures end in
    /// [`State::Errored`].
    pub fn start(&mut self, location: &str) -> Result<&State> {
        let stored = self.store.load()?;
        self.dispatch(Event::Started {
            stored,
            location: location.to_string(),
        })?;
        Ok(&self.state)
    }

    /// Sends the user to the authorization page.
    pub fn login(&mut self) -> Result<&State> {
        self.dispatch(Event::LoginClicked)?;
        Ok(&self.state)
    }

    /// Forgets the credential and navigates back to the redirect URI.
    ///
    /// The navigation is a full page load, so the controller runs
    /// [`start`](Self::start) again at the redirect URI and the page ends up
    /// showing only the login button.
    pub fn logout(&mut self) -> Result<&State> {
        self.dispatch(Event::LogoutClicked)?;
        let location = self.config.redirect_uri.clone();
        self.start(&location)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let (next, effects) = transition(&self.state, event, &self.config, self.rng.as_mut());

            if next != self.state {
                debug!("Flow state: {:?} -> {:?}", self.state, next);
            }
            if let State::Errored { message } = &next {
                warn!("Mood lookup failed: {message}");
            }
            self.state = next;

            for effect in effects {
                if let Some(follow_up) = self.perform(effect)? {
                    pending.push_back(follow_up);
                }
            }
        }

        Ok(())
    }

    fn perform(&mut self, effect: Effect) -> Result<Option<Event>> {
        match effect {
            Effect::Show(element) => self.renderer.set_visible(element, true),
            Effect::Hide(element) => self.renderer.set_visible(element, false),
            Effect::SetText(element, text) => self.renderer.set_text(element, &text),
            Effect::SaveToken(token) => {
                debug!("Captured credential from redirect");
                self.store.save(&token)?;
            }
            Effect::ClearToken => self.store.clear()?,
            Effect::ReplaceUrl(url) => self.navigator.replace_url(&url),
            Effect::Navigate(url) => {
                info!("Navigating to {url}");
                self.navigator.navigate(&url);
            }
            Effect::FetchRecentlyPlayed(token) => {
                return Ok(Some(Event::RecentlyPlayed(self.api.fetch_recently_played(&token))));
            }
            Effect::FetchAudioFeatures(token, track_ids) => {
                debug!("Looking up audio features for {} tracks", track_ids.len());
                return Ok(Some(Event::AudioFeatures(
                    self.api.fetch_audio_features(&token, &track_ids),
                )));
            }
        }
        Ok(None)
    }
}
