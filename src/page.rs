//! Page surface the flow controller writes to.
//!
//! [`Renderer`] stands in for the six page elements (toggle visibility,
//! set text) and [`Navigator`] for the address bar. [`Page`] and
//! [`Location`] are the plain in-memory versions used by the terminal
//! front end and by tests.

use std::fmt;

/// The page elements the controller touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    LoginButton,
    LogoutButton,
    Content,
    Mood,
    Fact,
    Error,
}

pub trait Renderer {
    fn set_visible(&mut self, element: Element, visible: bool);
    fn set_text(&mut self, element: Element, text: &str);
}

pub trait Navigator {
    /// Full-page navigation. Control leaves the current page.
    fn navigate(&mut self, url: &str);

    /// Rewrites the address bar without navigating.
    fn replace_url(&mut self, url: &str);
}

/// Visibility and text of every element.
///
/// Starts the way the static markup does: login, content and error hidden,
/// logout shown, all text empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub login_visible: bool,
    pub logout_visible: bool,
    pub content_visible: bool,
    pub error_visible: bool,
    pub mood: String,
    pub fact: String,
    pub error: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            login_visible: false,
            logout_visible: true,
            content_visible: false,
            error_visible: false,
            mood: String::new(),
            fact: String::new(),
            error: String::new(),
        }
    }
}

impl Page {
    #[must_use]
    pub fn is_visible(&self, element: Element) -> bool {
        match element {
            Element::LoginButton => self.login_visible,
            Element::LogoutButton => self.logout_visible,
            // Mood and fact live inside the content container.
            Element::Content | Element::Mood | Element::Fact => self.content_visible,
            Element::Error => self.error_visible,
        }
    }
}

impl Renderer for Page {
    fn set_visible(&mut self, element: Element, visible: bool) {
        match element {
            Element::LoginButton => self.login_visible = visible,
            Element::LogoutButton => self.logout_visible = visible,
            Element::Content => self.content_visible = visible,
            Element::Error => self.error_visible = visible,
            Element::Mood | Element::Fact => {
                log::trace!("Ignoring visibility change for {element:?}, it follows the content container");
            }
        }
    }

    fn set_text(&mut self, element: Element, text: &str) {
        match element {
            Element::Mood => self.mood = text.to_string(),
            Element::Fact => self.fact = text.to_string(),
            Element::Error => self.error = text.to_string(),
            Element::LoginButton | Element::LogoutButton | Element::Content => {
                log::trace!("Ignoring text for {element:?}");
            }
        }
    }
}

/// Terminal rendering: only visible elements are printed.
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.login_visible {
            writeln!(f, "Not logged in. Run `moodfacts login` to connect your account.")?;
        }
        if self.content_visible {
            if self.mood.is_empty() {
                writeln!(f, "Your mood: ...")?;
            } else {
                writeln!(f, "Your mood: {}", self.mood)?;
                writeln!(f, "Fun fact: {}", self.fact)?;
            }
        }
        if self.error_visible {
            writeln!(f, "Error: {}", self.error)?;
        }
        Ok(())
    }
}

/// In-memory address bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// What the address bar currently shows.
    pub href: String,
    /// Full-page navigations, oldest first.
    pub navigations: Vec<String>,
}

impl Location {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into(), navigations: Vec::new() }
    }

    /// Target of the latest full-page navigation, if any.
    #[must_use]
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }
}

impl Navigator for Location {
    fn navigate(&mut self, url: &str) {
        self.href = url.to_string();
        self.navigations.push(url.to_string());
    }

    fn replace_url(&mut self, url: &str) {
        self.href = url.to_string();
    }
}
