//! Browser environment capability.
//!
//! Everything the adapter needs to know about the page it runs in is read
//! through [`EnvironmentOracle`]. Hosts back it with real browser state;
//! [`StaticEnvironment`] backs it with plain values.

use cookie::CookieJar;

use crate::cookies::{cookie_value, parse_cookies_to_jar};

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Navigator language properties, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageAliases {
    pub language: Option<String>,
    pub browser_language: Option<String>,
    pub user_language: Option<String>,
    pub system_language: Option<String>,
}

impl LanguageAliases {
    /// First alias carrying a non-empty value.
    #[must_use]
    pub fn first_non_empty(&self) -> Option<&str> {
        [
            &self.language,
            &self.browser_language,
            &self.user_language,
            &self.system_language,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|value| !value.is_empty())
    }
}

/// Read-only view of the browsing environment.
pub trait EnvironmentOracle: Send + Sync {
    /// Location of the top-level browsing context, if reachable.
    fn top_location(&self) -> Option<String>;

    /// `document.referrer` of the top-level context. `None` when the top
    /// context is unreachable or has no referrer.
    fn top_referrer(&self) -> Option<String>;

    fn user_agent(&self) -> String;

    fn language_aliases(&self) -> LanguageAliases;

    /// Screen metrics, if exposed.
    fn screen_size(&self) -> Option<Dimensions>;

    /// Inner window size, used when screen metrics are missing.
    fn viewport_size(&self) -> Option<Dimensions>;

    fn do_not_track(&self) -> bool;

    /// Current value of the named cookie.
    fn cookie(&self, name: &str) -> Option<String>;

    fn is_in_iframe(&self) -> bool;

    /// Whether a test cookie can be written and read back.
    fn cookies_enabled(&self) -> bool;

    /// Whether the runtime exposes cookies at all.
    fn cookie_support(&self) -> bool;
}

/// [`EnvironmentOracle`] backed by fixed values.
///
/// Cookies are parsed from a `Cookie` header string.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub top_location: Option<String>,
    pub top_referrer: Option<String>,
    pub user_agent: String,
    pub languages: LanguageAliases,
    pub screen: Option<Dimensions>,
    pub viewport: Option<Dimensions>,
    pub do_not_track: bool,
    pub in_iframe: bool,
    pub cookies_enabled: bool,
    pub cookie_support: bool,
    cookies: CookieJar,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            top_location: None,
            top_referrer: None,
            user_agent: String::new(),
            languages: LanguageAliases::default(),
            screen: None,
            viewport: None,
            do_not_track: false,
            in_iframe: false,
            cookies_enabled: true,
            cookie_support: true,
            cookies: CookieJar::new(),
        }
    }
}

impl StaticEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cookie_header(mut self, header_value: &str) -> Self {
        self.cookies = parse_cookies_to_jar(header_value);
        self
    }

    #[must_use]
    pub fn with_top_location(mut self, location: impl Into<String>) -> Self {
        self.top_location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_top_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.top_referrer = Some(referrer.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen = Some(Dimensions::new(width, height));
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some(Dimensions::new(width, height));
        self
    }

    #[must_use]
    pub fn with_do_not_track(mut self, do_not_track: bool) -> Self {
        self.do_not_track = do_not_track;
        self
    }

    #[must_use]
    pub fn with_in_iframe(mut self, in_iframe: bool) -> Self {
        self.in_iframe = in_iframe;
        self
    }

    #[must_use]
    pub fn with_cookies_enabled(mut self, enabled: bool) -> Self {
        self.cookies_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_cookie_support(mut self, supported: bool) -> Self {
        self.cookie_support = supported;
        self
    }
}

impl EnvironmentOracle for StaticEnvironment {
    fn top_location(&self) -> Option<String> {
        self.top_location.clone()
    }

    fn top_referrer(&self) -> Option<String> {
        self.top_referrer.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn language_aliases(&self) -> LanguageAliases {
        self.languages.clone()
    }

    fn screen_size(&self) -> Option<Dimensions> {
        self.screen
    }

    fn viewport_size(&self) -> Option<Dimensions> {
        self.viewport
    }

    fn do_not_track(&self) -> bool {
        self.do_not_track
    }

    fn cookie(&self, name: &str) -> Option<String> {
        cookie_value(&self.cookies, name)
    }

    fn is_in_iframe(&self) -> bool {
        self.in_iframe
    }

    fn cookies_enabled(&self) -> bool {
        self.cookies_enabled
    }

    fn cookie_support(&self) -> bool {
        self.cookie_support
    }
}
