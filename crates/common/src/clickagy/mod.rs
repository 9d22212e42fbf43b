//! Clickagy bid adapter.
//!
//! Translates host bid requests into `OpenRTB` 2.x for the Clickagy exchange
//! and exchange responses back into host bids.
//!
//! Components:
//! - [`validation`]: per-slot eligibility
//! - [`request`]: outbound `OpenRTB` request
//! - [`response`]: bid response interpretation and price macros
//! - [`user_sync`]: user-sync pixel

pub mod request;
pub mod response;
pub mod user_sync;
pub mod validation;

use std::sync::Arc;

use error_stack::Report;

use crate::auction::context::read_context;
use crate::auction::types::{
    AuctionHints, BidRequest, BidResult, ServerRequest, ServerResponse, SyncPermissions,
    UserSync,
};
use crate::auction::BidAdapter;
use crate::constants::BIDDER_CODE;
use crate::environment::EnvironmentOracle;
use crate::error::AdapterError;
use crate::settings::Settings;

pub use request::{build_request, build_server_request};
pub use response::{interpret_response, substitute_price_macros};
pub use user_sync::resolve_user_syncs;
pub use validation::is_eligible;

/// Clickagy implementation of [`BidAdapter`].
pub struct ClickagyAdapter {
    settings: Settings,
    environment: Arc<dyn EnvironmentOracle>,
}

impl ClickagyAdapter {
    #[must_use]
    pub fn new(settings: Settings, environment: Arc<dyn EnvironmentOracle>) -> Self {
        Self {
            settings,
            environment,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl BidAdapter for ClickagyAdapter {
    fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn is_bid_request_valid(&self, request: Option<&BidRequest>) -> bool {
        is_eligible(request, self.environment.as_ref())
    }

    fn build_requests(
        &self,
        requests: &[BidRequest],
        hints: &AuctionHints,
    ) -> Result<ServerRequest, Report<AdapterError>> {
        let context = read_context(
            hints,
            self.settings.page_url_override(),
            &self.settings.bidder.user_id_cookie,
            self.environment.as_ref(),
        )?;

        build_server_request(requests, &context, &self.settings.bidder.endpoint)
    }

    fn interpret_response(&self, response: &ServerResponse) -> Vec<BidResult> {
        interpret_response(response.body.as_ref())
    }

    fn user_syncs(
        &self,
        permissions: &SyncPermissions,
        responses: &[ServerResponse],
    ) -> Vec<UserSync> {
        resolve_user_syncs(permissions, responses, &self.settings.bidder.user_sync_url)
    }
}

/// Build the Clickagy adapter if it is enabled in `settings`.
#[must_use]
pub fn register_adapter(
    settings: &Settings,
    environment: Arc<dyn EnvironmentOracle>,
) -> Option<Arc<dyn BidAdapter>> {
    if !settings.bidder.enabled {
        log::info!("Clickagy adapter not registered: disabled in configuration");
        return None;
    }

    log::info!(
        "Registering Clickagy adapter (endpoint: {}, sync: {})",
        settings.bidder.endpoint,
        settings.bidder.user_sync_url
    );

    Some(Arc::new(ClickagyAdapter::new(settings.clone(), environment)))
}
