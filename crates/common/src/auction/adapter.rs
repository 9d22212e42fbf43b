//! Trait definition for bid adapters.

use error_stack::Report;

use crate::error::AdapterError;

use super::types::{
    AuctionHints, BidRequest, BidResult, MediaType, ServerRequest, ServerResponse,
    SyncPermissions, UserSync,
};

/// Trait implemented by every exchange adapter the host can register.
///
/// The host drives an auction in this order: [`Self::is_bid_request_valid`]
/// per slot, [`Self::build_requests`] once for the surviving slots, its own
/// HTTP call, [`Self::interpret_response`] on the body, and optionally
/// [`Self::user_syncs`].
pub trait BidAdapter: Send + Sync {
    /// Bidder code the host keys this adapter by (e.g., "clickagy").
    fn code(&self) -> &'static str;

    /// Alternative codes publishers may configure.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check if this adapter supports a specific media type.
    fn supports_media_type(&self, media_type: &MediaType) -> bool {
        // By default, support banner ads
        matches!(media_type, MediaType::Banner)
    }

    /// Whether a slot is well-formed enough to be sent to the exchange.
    /// Ineligible slots are dropped by the host without error.
    fn is_bid_request_valid(&self, request: Option<&BidRequest>) -> bool;

    /// Translate the eligible slots into one outbound HTTP request.
    ///
    /// # Errors
    ///
    /// Fails when the batch is empty, a slot is missing mandatory fields, or
    /// the page URL cannot be resolved.
    fn build_requests(
        &self,
        requests: &[BidRequest],
        hints: &AuctionHints,
    ) -> Result<ServerRequest, Report<AdapterError>>;

    /// Translate an exchange response into bids. An empty vector means no fill.
    fn interpret_response(&self, response: &ServerResponse) -> Vec<BidResult>;

    /// User-sync pixels to fire after the auction.
    fn user_syncs(
        &self,
        permissions: &SyncPermissions,
        responses: &[ServerResponse],
    ) -> Vec<UserSync>;
}
