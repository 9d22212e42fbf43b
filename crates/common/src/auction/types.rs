//! Core types exchanged between the host auction engine and bid adapters.

use serde::{Deserialize, Deserializer, Serialize};

use crate::numeric::{format_js_number, parse_float_prefix};

/// A single ad slot as normalized by the host.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    /// Host-assigned id, echoed back as the impression id.
    pub bid_id: String,
    /// Legacy top-level sizes.
    #[serde(default)]
    pub sizes: Sizes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_types: Option<MediaTypes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BidParams>,
}

impl BidRequest {
    /// Sizes declared for this slot. `mediaTypes.banner.sizes` wins over the
    /// legacy `sizes` field.
    #[must_use]
    pub fn declared_sizes(&self) -> &[AdSize] {
        self.media_types
            .as_ref()
            .and_then(|media_types| media_types.banner.as_ref())
            .and_then(|banner| banner.sizes.as_ref())
            .map_or(self.sizes.as_slice(), Sizes::as_slice)
    }
}

/// Bidder-specific parameters configured by the publisher.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidParams {
    #[serde(default, deserialize_with = "deserialize_opt_string_or_number")]
    pub publisher_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_or_number")]
    pub tagid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_floor")]
    pub bidfloor: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MediaTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerMediaType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BannerMediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Sizes>,
}

/// A creative size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a `"300x250"` size string.
    #[must_use]
    pub fn parse(size: &str) -> Option<Self> {
        let (width, height) = size.trim().split_once(['x', 'X'])?;
        Some(Self::new(
            width.trim().parse().ok()?,
            height.trim().parse().ok()?,
        ))
    }
}

impl From<[u32; 2]> for AdSize {
    fn from([width, height]: [u32; 2]) -> Self {
        Self::new(width, height)
    }
}

impl From<AdSize> for [u32; 2] {
    fn from(size: AdSize) -> Self {
        [size.width, size.height]
    }
}

/// Ordered size list.
///
/// Accepts `[[300,250],[728,90]]`, a single `[300,250]`, `"300x250"` or
/// `["300x250","728x90"]`. Entries that cannot be read are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sizes(pub Vec<AdSize>);

impl Sizes {
    #[must_use]
    pub fn as_slice(&self) -> &[AdSize] {
        &self.0
    }
}

impl From<Vec<AdSize>> for Sizes {
    fn from(sizes: Vec<AdSize>) -> Self {
        Self(sizes)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSizes {
    Pair([u32; 2]),
    Text(String),
    List(Vec<RawSizeEntry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSizeEntry {
    Pair([u32; 2]),
    Text(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for Sizes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sizes = match RawSizes::deserialize(deserializer)? {
            RawSizes::Pair(pair) => vec![AdSize::from(pair)],
            RawSizes::Text(text) => AdSize::parse(&text).into_iter().collect(),
            RawSizes::List(entries) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    RawSizeEntry::Pair(pair) => Some(AdSize::from(pair)),
                    RawSizeEntry::Text(text) => AdSize::parse(&text),
                    RawSizeEntry::Other(_) => None,
                })
                .collect(),
        };
        Ok(Self(sizes))
    }
}

/// Accepts a string or a number and stores it as a string. A numeric zero is
/// treated as absent, as is an empty string downstream.
fn deserialize_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0).then(|| value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok((value != 0.0 && !value.is_nan()).then(|| format_js_number(value)))
        }
    }

    deserializer.deserialize_option(StringOrNumberVisitor)
}

/// Accepts a number or a numeric string. Unparseable strings become `None`.
fn deserialize_opt_floor<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFloor {
        Number(f64),
        Text(String),
    }

    Ok(
        Option::<RawFloor>::deserialize(deserializer)?.and_then(|raw| match raw {
            RawFloor::Number(value) => Some(value),
            RawFloor::Text(text) => parse_float_prefix(&text),
        }),
    )
}

/// Host-side hints gathered before the adapter runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuctionHints {
    /// Top-level page URL detected by the host, if any.
    #[serde(default)]
    pub referer: Option<String>,
}

/// Environment facts read once per auction call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuctionContext {
    /// Full href of the resolved page URL.
    pub page_url: String,
    pub page_host: String,
    pub referrer: String,
    pub is_secure: bool,
    pub is_in_iframe: bool,
    pub user_agent: String,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub do_not_track: bool,
    pub user_id: Option<String>,
}

/// Media type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// The HTTP call the host should perform for this auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRequest {
    pub method: http::Method,
    pub url: String,
    /// JSON-encoded `OpenRTB` request.
    pub data: String,
}

/// A response handed back by the host's transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerResponse {
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl ServerResponse {
    #[must_use]
    pub fn new(body: serde_json::Value) -> Self {
        Self { body: Some(body) }
    }
}

/// A bid translated into the host's shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BidResult {
    pub request_id: String,
    pub cpm: f64,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    pub currency: String,
    pub net_revenue: bool,
    pub media_type: MediaType,
    pub ad: String,
    #[serde(rename = "ttl")]
    pub ttl_seconds: u32,
}

/// Which kinds of user sync the host allows this auction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncPermissions {
    #[serde(default)]
    pub pixel_enabled: bool,
    #[serde(default)]
    pub iframe_enabled: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Image,
    Iframe,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSync {
    #[serde(rename = "type")]
    pub sync_type: SyncType,
    pub url: String,
}
