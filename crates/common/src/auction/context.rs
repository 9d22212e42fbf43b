//! Auction context resolution.
//!
//! Collects the page, referrer, device and identity facts shared by every
//! impression in one auction call.

use error_stack::{Report, ResultExt};
use url::Url;

use crate::environment::{Dimensions, EnvironmentOracle};
use crate::error::AdapterError;

use super::types::{AuctionContext, AuctionHints};

/// Resolve the page URL the auction runs on.
///
/// Order: configured override, then the host's referer hint, then the top
/// window location.
///
/// # Errors
///
/// Returns [`AdapterError::EnvironmentUnavailable`] if no candidate exists or
/// the chosen one is not an absolute URL.
pub fn resolve_page_url(
    hints: &AuctionHints,
    page_url_override: Option<&str>,
    env: &dyn EnvironmentOracle,
) -> Result<Url, Report<AdapterError>> {
    let candidate = page_url_override
        .map(str::to_string)
        .or_else(|| hints.referer.clone().filter(|referer| !referer.is_empty()))
        .or_else(|| env.top_location())
        .ok_or_else(|| Report::new(AdapterError::environment("no page URL available")))?;

    Url::parse(&candidate).change_context(AdapterError::environment(format!(
        "malformed page URL: {candidate}"
    )))
}

/// Read the [`AuctionContext`] for one auction call.
///
/// Missing optional data (referrer, language, screen metrics, user id) falls
/// back to empty values.
///
/// # Errors
///
/// Fails only when the page URL cannot be resolved; see [`resolve_page_url`].
pub fn read_context(
    hints: &AuctionHints,
    page_url_override: Option<&str>,
    user_id_cookie: &str,
    env: &dyn EnvironmentOracle,
) -> Result<AuctionContext, Report<AdapterError>> {
    let page = resolve_page_url(hints, page_url_override, env)?;
    let screen = resolve_screen(env.screen_size(), env.viewport_size());

    let context = AuctionContext {
        page_url: page.as_str().to_string(),
        page_host: page.host_str().unwrap_or_default().to_string(),
        referrer: env.top_referrer().unwrap_or_default(),
        is_secure: page.scheme().starts_with("https"),
        is_in_iframe: env.is_in_iframe(),
        user_agent: env.user_agent(),
        language: env
            .language_aliases()
            .first_non_empty()
            .unwrap_or_default()
            .to_string(),
        screen_width: screen.width,
        screen_height: screen.height,
        do_not_track: env.do_not_track(),
        user_id: env.cookie(user_id_cookie).filter(|id| !id.is_empty()),
    };

    log::debug!(
        "Resolved auction context for host '{}' (secure: {}, iframe: {})",
        context.page_host,
        context.is_secure,
        context.is_in_iframe
    );

    Ok(context)
}

/// Pick screen metrics per dimension, falling back to the viewport when the
/// screen value is missing or zero.
fn resolve_screen(screen: Option<Dimensions>, viewport: Option<Dimensions>) -> Dimensions {
    let pick = |from_screen: Option<u32>, from_viewport: Option<u32>| {
        from_screen
            .filter(|value| *value > 0)
            .or(from_viewport)
            .unwrap_or_default()
    };

    Dimensions {
        width: pick(screen.map(|s| s.width), viewport.map(|v| v.width)),
        height: pick(screen.map(|s| s.height), viewport.map(|v| v.height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::test_support::tests::test_environment;

    fn hints(referer: &str) -> AuctionHints {
        AuctionHints {
            referer: Some(referer.to_string()),
        }
    }

    #[test]
    fn test_read_context_from_referer() {
        let env = test_environment();
        let context = read_context(&hints("https://www.example.com?foo=bar"), None, "cb", &env)
            .expect("should read context");

        let expected = Url::parse("https://www.example.com?foo=bar").expect("should parse url");
        assert_eq!(context.page_url, expected.as_str());
        assert_eq!(context.page_host, "www.example.com");
        assert!(context.is_secure);
        assert_eq!(context.user_agent, env.user_agent);
        assert_eq!(context.referrer, "https://search.example/");
        assert_eq!(context.language, "en-US");
        assert_eq!((context.screen_width, context.screen_height), (1920, 1080));
        assert!(!context.do_not_track);
    }

    #[test]
    fn test_override_wins_over_referer() {
        let env = test_environment();
        let context = read_context(
            &hints("https://www.example.com/from-referer"),
            Some("http://configured.example.org/page"),
            "cb",
            &env,
        )
        .expect("should read context");

        assert_eq!(context.page_host, "configured.example.org");
        assert!(!context.is_secure);
    }

    #[test]
    fn test_top_location_used_when_no_hint() {
        let env = StaticEnvironment::new().with_top_location("https://top.example.net/a");
        let context = read_context(&AuctionHints::default(), None, "cb", &env)
            .expect("should fall back to top location");
        assert_eq!(context.page_host, "top.example.net");
    }

    #[test]
    fn test_malformed_page_url_is_environment_error() {
        let env = test_environment();
        let err = read_context(&hints("not a url"), None, "cb", &env)
            .expect_err("should reject malformed url");
        assert!(matches!(
            err.current_context(),
            AdapterError::EnvironmentUnavailable { .. }
        ));
    }

    #[test]
    fn test_missing_page_url_is_environment_error() {
        let env = StaticEnvironment::new();
        let err = read_context(&AuctionHints::default(), None, "cb", &env)
            .expect_err("should fail without any page url");
        assert!(matches!(
            err.current_context(),
            AdapterError::EnvironmentUnavailable { .. }
        ));
    }

    #[test]
    fn test_missing_optional_data_never_fails() {
        let env = StaticEnvironment::new();
        let context = read_context(&hints("https://bare.example/"), None, "cb", &env)
            .expect("should tolerate missing optional data");

        assert_eq!(context.referrer, "");
        assert_eq!(context.language, "");
        assert_eq!((context.screen_width, context.screen_height), (0, 0));
        assert!(context.user_id.is_none());
    }

    #[test]
    fn test_user_id_read_from_configured_cookie() {
        let env = StaticEnvironment::new().with_cookie_header("cb=user-1; uid=user-2");
        let from_default = read_context(&hints("https://a.example/"), None, "cb", &env)
            .expect("should read context");
        assert_eq!(from_default.user_id.as_deref(), Some("user-1"));

        let from_custom = read_context(&hints("https://a.example/"), None, "uid", &env)
            .expect("should read context");
        assert_eq!(from_custom.user_id.as_deref(), Some("user-2"));
    }

    #[test]
    fn test_screen_falls_back_to_viewport_per_dimension() {
        let screen = resolve_screen(
            Some(Dimensions::new(0, 900)),
            Some(Dimensions::new(1280, 700)),
        );
        assert_eq!(screen, Dimensions::new(1280, 900));

        let viewport_only = resolve_screen(None, Some(Dimensions::new(800, 600)));
        assert_eq!(viewport_only, Dimensions::new(800, 600));
    }

    #[test]
    fn test_iframe_and_dnt_flags_copied() {
        let env = StaticEnvironment::new()
            .with_in_iframe(true)
            .with_do_not_track(true);
        let context =
            read_context(&hints("https://a.example/"), None, "cb", &env).expect("should read");
        assert!(context.is_in_iframe);
        assert!(context.do_not_track);
    }
}
