use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value as Json;

use crate::auction::types::{BidResult, MediaType};
use crate::constants::{
    BID_CURRENCY, BID_TTL_SECONDS, MACRO_AUCTION_PRICE_B64, MACRO_WINNING_PRICE,
};
use crate::openrtb::{Bid, NumericField};

/// Translate an exchange response body into normalized bids.
///
/// Never fails: anything that is not a usable bid yields fewer results, and
/// an empty vector means no fill. Only the first seat is read; later seats are
/// never inspected, and each bid is decoded on its own.
#[must_use]
pub fn interpret_response(body: Option<&Json>) -> Vec<BidResult> {
    let Some(bids) = body.and_then(first_seat_bids) else {
        return Vec::new();
    };

    bids.iter()
        .filter_map(|raw| match serde_json::from_value::<Bid>(raw.clone()) {
            Ok(bid) => to_bid_result(&bid),
            Err(e) => {
                log::debug!("Clickagy: dropping bid that does not match OpenRTB shape: {e}");
                None
            }
        })
        .collect()
}

/// The raw `bid` array of the first seat, or `None` when there is nothing to
/// read. An absent array and an empty one are both no fill.
fn first_seat_bids(body: &Json) -> Option<&[Json]> {
    if body.is_null() {
        return None;
    }
    let Some(envelope) = body.as_object() else {
        log::warn!("Clickagy: response body is not a JSON object");
        return None;
    };

    let seatbid = envelope.get("seatbid").filter(|value| !value.is_null())?;
    let Some(seats) = seatbid.as_array() else {
        log::warn!("Clickagy: response `seatbid` is not an array");
        return None;
    };

    let bids = seats
        .first()?
        .get("bid")
        .filter(|value| !value.is_null())?;
    let Some(bids) = bids.as_array() else {
        log::warn!("Clickagy: first seat `bid` is not an array");
        return None;
    };

    Some(bids.as_slice())
}

/// Replace every occurrence of the exchange price macros in `adm`.
#[must_use]
pub fn substitute_price_macros(adm: &str, price_text: &str) -> String {
    adm.replace(MACRO_AUCTION_PRICE_B64, &STANDARD.encode(price_text))
        .replace(MACRO_WINNING_PRICE, price_text)
}

fn to_bid_result(bid: &Bid) -> Option<BidResult> {
    let bid_id = bid.id.as_deref().unwrap_or_default();

    let Some(request_id) = bid.impid.clone() else {
        log::debug!("Clickagy: dropping bid '{bid_id}' without impid");
        return None;
    };
    let Some(adm) = bid.adm.as_deref() else {
        log::debug!("Clickagy: dropping bid '{bid_id}' without adm");
        return None;
    };

    let Some(price) = bid.price.as_ref() else {
        log::debug!("Clickagy: dropping bid '{bid_id}' without price");
        return None;
    };
    let Some(cpm) = price.as_float() else {
        log::debug!("Clickagy: dropping bid '{bid_id}' with unparseable price {price:?}");
        return None;
    };

    let (Some(width), Some(height)) = (
        bid.w.as_ref().and_then(NumericField::as_pixels),
        bid.h.as_ref().and_then(NumericField::as_pixels),
    ) else {
        log::debug!("Clickagy: dropping bid '{bid_id}' with unusable size");
        return None;
    };

    let creative_id = bid
        .crid
        .clone()
        .filter(|crid| !crid.is_empty())
        .or_else(|| bid.id.clone())
        .unwrap_or_default();

    Some(BidResult {
        request_id,
        cpm,
        width,
        height,
        creative_id,
        currency: BID_CURRENCY.to_string(),
        net_revenue: true,
        media_type: MediaType::Banner,
        ad: substitute_price_macros(adm, &price.display_text()),
        ttl_seconds: BID_TTL_SECONDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::test_response_body;
    use serde_json::json;

    fn single_bid(bid: Json) -> Json {
        json!({ "seatbid": [{ "bid": [bid] }] })
    }

    #[test]
    fn test_interprets_single_bid() {
        let body = test_response_body();
        let results = interpret_response(Some(&body));

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.request_id, "bid-123");
        assert_eq!(result.cpm, 0.5);
        assert_eq!((result.width, result.height), (300, 250));
        assert_eq!(result.creative_id, "creative-123");
        assert_eq!(result.currency, "USD");
        assert!(result.net_revenue);
        assert_eq!(result.media_type, MediaType::Banner);
        assert_eq!(result.ad, "<!-- Ad creative markup -->");
        assert_eq!(result.ttl_seconds, 360);
    }

    #[test]
    fn test_absent_or_null_body_is_no_fill() {
        assert!(interpret_response(None).is_empty());
        assert!(interpret_response(Some(&Json::Null)).is_empty());
    }

    #[test]
    fn test_missing_or_empty_seatbid_is_no_fill() {
        assert!(interpret_response(Some(&json!({}))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": [] }))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": [{}] }))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": [{ "bid": [] }] }))).is_empty());
    }

    #[test]
    fn test_non_envelope_body_is_no_fill() {
        assert!(interpret_response(Some(&json!("no bids"))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": "oops" }))).is_empty());
    }

    #[test]
    fn test_only_first_seat_is_read() {
        let body = json!({
            "seatbid": [
                { "bid": [{ "id": "a", "impid": "imp-1", "adm": "<a/>", "price": 1, "w": 300, "h": 250 }] },
                { "bid": [{ "id": "b", "impid": "imp-2", "adm": "<b/>", "price": 9, "w": 300, "h": 250 }] }
            ]
        });
        let results = interpret_response(Some(&body));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].request_id, "imp-1");
    }

    #[test]
    fn test_malformed_later_seat_does_not_affect_first_seat() {
        let body = json!({
            "seatbid": [
                { "bid": [{ "id": "a", "impid": "imp-1", "adm": "<a/>", "price": 1, "w": 300, "h": 250 }] },
                { "bid": "unexpected" },
                "not a seat"
            ]
        });
        let results = interpret_response(Some(&body));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].request_id, "imp-1");
    }

    #[test]
    fn test_malformed_first_seat_is_no_fill() {
        assert!(interpret_response(Some(&json!({ "seatbid": [{ "bid": "oops" }] }))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": ["oops"] }))).is_empty());
        assert!(interpret_response(Some(&json!({ "seatbid": null }))).is_empty());
    }

    #[test]
    fn test_bid_order_is_preserved() {
        let body = json!({
            "seatbid": [{ "bid": [
                { "id": "a", "impid": "imp-2", "adm": "<a/>", "price": 0.1, "w": 300, "h": 250 },
                { "id": "b", "impid": "imp-1", "adm": "<b/>", "price": 2.5, "w": 728, "h": 90 }
            ] }]
        });
        let results = interpret_response(Some(&body));
        let ids: Vec<&str> = results.iter().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, vec!["imp-2", "imp-1"]);
    }

    #[test]
    fn test_price_macros_replaced_everywhere() {
        let body = single_bid(json!({
            "id": "b1",
            "impid": "imp-1",
            "crid": "c1",
            "price": 0.5,
            "w": 300,
            "h": 250,
            "adm": "<img src=\"https://win.example/?p=${AUCTION_PRICE:B64}&q=${AUCTION_PRICE:B64}\"><i>{winning_price}</i><b>{winning_price}</b>"
        }));
        let results = interpret_response(Some(&body));

        assert_eq!(
            results[0].ad,
            "<img src=\"https://win.example/?p=MC41&q=MC41\"><i>0.5</i><b>0.5</b>"
        );
    }

    #[test]
    fn test_integral_price_prints_without_fraction() {
        assert_eq!(substitute_price_macros("{winning_price}", "1"), "1");

        let body = single_bid(json!({
            "id": "b1", "impid": "imp-1", "price": 1.0, "w": 300, "h": 250,
            "adm": "{winning_price}|${AUCTION_PRICE:B64}"
        }));
        let results = interpret_response(Some(&body));
        assert_eq!(results[0].ad, "1|MQ==");
    }

    #[test]
    fn test_creative_id_falls_back_to_bid_id() {
        let body = single_bid(json!({
            "id": "bid-9", "impid": "imp-1", "crid": "", "adm": "<div/>",
            "price": 1.25, "w": 300, "h": 250
        }));
        assert_eq!(interpret_response(Some(&body))[0].creative_id, "bid-9");

        let anonymous = single_bid(json!({
            "impid": "imp-1", "adm": "<div/>", "price": 1.25, "w": 300, "h": 250
        }));
        assert_eq!(interpret_response(Some(&anonymous))[0].creative_id, "");
    }

    #[test]
    fn test_string_numerics_are_accepted() {
        let body = single_bid(json!({
            "id": "b1", "impid": "imp-1", "adm": "{winning_price}",
            "price": "1.75", "w": "320px", "h": "50"
        }));
        let results = interpret_response(Some(&body));

        assert_eq!(results[0].cpm, 1.75);
        assert_eq!((results[0].width, results[0].height), (320, 50));
        assert_eq!(results[0].ad, "1.75");
    }

    #[test]
    fn test_malformed_bids_are_dropped() {
        let body = json!({
            "seatbid": [{ "bid": [
                { "id": "bad-price", "impid": "imp-1", "adm": "<a/>", "price": "free", "w": 300, "h": 250 },
                { "id": "no-size", "impid": "imp-2", "adm": "<a/>", "price": 1 },
                { "id": "no-impid", "adm": "<a/>", "price": 1, "w": 300, "h": 250 },
                { "id": "no-adm", "impid": "imp-4", "price": 1, "w": 300, "h": 250 },
                { "id": 77, "impid": "imp-6", "adm": "<a/>", "price": 1, "w": 300, "h": 250 },
                { "id": "bool-price", "impid": "imp-7", "adm": "<a/>", "price": true, "w": 300, "h": 250 },
                "not a bid",
                { "id": "good", "impid": "imp-5", "adm": "<a/>", "price": 1, "w": 300, "h": 250 }
            ] }]
        });
        let results = interpret_response(Some(&body));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].request_id, "imp-5");
    }
}
