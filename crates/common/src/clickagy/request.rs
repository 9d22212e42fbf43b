use error_stack::{Report, ResultExt};
use http::Method;

use crate::auction::types::{AuctionContext, BidRequest, ServerRequest};
use crate::constants::AUCTION_TYPE_SECOND_PRICE;
use crate::error::AdapterError;
use crate::logging::is_debug_enabled;
use crate::openrtb::{Banner, Device, Imp, OpenRtbRequest, Publisher, Site, User};

/// Convert eligible bid requests into one `OpenRTB` request.
///
/// The outbound `id` is the first slot's bid id, not a fresh auction id.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidInput`] if `requests` is empty, or a slot
/// has no sizes or no publisher id.
pub fn build_request(
    requests: &[BidRequest],
    context: &AuctionContext,
) -> Result<OpenRtbRequest, Report<AdapterError>> {
    let first = requests
        .first()
        .ok_or_else(|| Report::new(AdapterError::invalid_input("no eligible bid requests")))?;

    let imp = requests
        .iter()
        .map(|request| to_imp(request, context))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OpenRtbRequest {
        id: first.bid_id.clone(),
        at: AUCTION_TYPE_SECOND_PRICE,
        imp,
        site: to_site(first, context)?,
        device: to_device(context),
        user: context.user_id.clone().map(|id| User { id }),
    })
}

/// Build the request and pair it with the exchange endpoint.
///
/// # Errors
///
/// Propagates [`build_request`] failures, and returns
/// [`AdapterError::Serialization`] if the payload cannot be encoded.
pub fn build_server_request(
    requests: &[BidRequest],
    context: &AuctionContext,
    endpoint: &str,
) -> Result<ServerRequest, Report<AdapterError>> {
    let openrtb = build_request(requests, context)?;

    let data = serde_json::to_string(&openrtb).change_context(AdapterError::Serialization {
        message: "Failed to serialize OpenRTB request".to_string(),
    })?;

    log::info!(
        "Clickagy: built OpenRTB request '{}' with {} impression(s)",
        openrtb.id,
        openrtb.imp.len()
    );

    if is_debug_enabled() {
        match serde_json::to_string_pretty(&openrtb) {
            Ok(json) => log::debug!("Clickagy OpenRTB request to {}:\n{}", endpoint, json),
            Err(e) => log::warn!("Clickagy: failed to serialize OpenRTB request for logging: {e}"),
        }
    }

    Ok(ServerRequest {
        method: Method::POST,
        url: endpoint.to_string(),
        data,
    })
}

impl ServerRequest {
    /// Convert into an [`http::Request`] for transports built on the `http` crate.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Serialization`] if the URL is not a valid URI.
    pub fn to_http_request(&self) -> Result<http::Request<String>, Report<AdapterError>> {
        http::Request::builder()
            .method(self.method.clone())
            .uri(self.url.as_str())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(self.data.clone())
            .change_context(AdapterError::Serialization {
                message: format!("Failed to build HTTP request for {}", self.url),
            })
    }
}

fn to_imp(request: &BidRequest, context: &AuctionContext) -> Result<Imp, Report<AdapterError>> {
    // Only the first declared size is offered to the exchange.
    let size = request.declared_sizes().first().ok_or_else(|| {
        Report::new(AdapterError::invalid_input(format!(
            "bid '{}' declares no sizes",
            request.bid_id
        )))
    })?;

    let params = request
        .params
        .as_ref()
        .filter(|p| p.publisher_id.as_deref().is_some_and(|id| !id.is_empty()))
        .ok_or_else(|| {
            Report::new(AdapterError::invalid_input(format!(
                "bid '{}' has no params.publisherId",
                request.bid_id
            )))
        })?;

    Ok(Imp {
        id: request.bid_id.clone(),
        secure: u8::from(context.is_secure),
        banner: Banner {
            w: size.width,
            h: size.height,
            topframe: u8::from(!context.is_in_iframe),
        },
        tagid: params.tagid.clone().unwrap_or_default(),
        bidfloor: params
            .bidfloor
            .filter(|floor| *floor != 0.0 && !floor.is_nan()),
    })
}

fn to_site(first: &BidRequest, context: &AuctionContext) -> Result<Site, Report<AdapterError>> {
    let publisher_id = first
        .params
        .as_ref()
        .and_then(|params| params.publisher_id.clone())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            Report::new(AdapterError::invalid_input(format!(
                "bid '{}' has no params.publisherId",
                first.bid_id
            )))
        })?;

    Ok(Site {
        publisher: Publisher {
            id: publisher_id,
            domain: context.page_host.clone(),
        },
        referrer: context.referrer.clone(),
        domain: context.page_host.clone(),
        page: context.page_url.clone(),
    })
}

fn to_device(context: &AuctionContext) -> Device {
    Device {
        dnt: u8::from(context.do_not_track),
        ua: context.user_agent.clone(),
        language: context.language.clone(),
        w: context.screen_width,
        h: context.screen_height,
    }
}
