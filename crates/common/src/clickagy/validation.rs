use crate::auction::types::BidRequest;
use crate::environment::EnvironmentOracle;

/// Whether `request` can be translated for the Clickagy exchange.
///
/// Requires a publisher id and a runtime where the `cb` identity cookie can
/// exist at all. Never has side effects.
#[must_use]
pub fn is_eligible(request: Option<&BidRequest>, env: &dyn EnvironmentOracle) -> bool {
    let Some(request) = request else {
        return false;
    };

    let has_publisher = request
        .params
        .as_ref()
        .and_then(|params| params.publisher_id.as_deref())
        .is_some_and(|publisher_id| !publisher_id.is_empty());

    if !has_publisher {
        log::debug!(
            "Clickagy: bid '{}' rejected, params.publisherId missing",
            request.bid_id
        );
        return false;
    }

    if !env.cookie_support() || !env.cookies_enabled() {
        log::debug!(
            "Clickagy: bid '{}' rejected, cookies unavailable",
            request.bid_id
        );
        return false;
    }

    true
}
