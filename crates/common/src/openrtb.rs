use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subset of the `OpenRTB` 2.x bid request understood by the Clickagy exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenRtbRequest {
    /// Reuses the first impression's bid id rather than a fresh auction id.
    pub id: String,
    /// Auction type, always second price.
    pub at: u8,
    pub imp: Vec<Imp>,
    pub site: Site,
    pub device: Device,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Imp {
    pub id: String,
    /// 1 when the page is served over HTTPS.
    pub secure: u8,
    pub banner: Banner,
    pub tagid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub w: u32,
    pub h: u32,
    /// 1 when the slot is in the top frame, 0 inside an iframe.
    pub topframe: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    pub publisher: Publisher,
    #[serde(rename = "ref")]
    pub referrer: String,
    pub domain: String,
    pub page: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Publisher {
    pub id: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub dnt: u8,
    pub ua: String,
    pub language: String,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
}

/// One bid from the exchange's bid response.
///
/// Each bid is decoded on its own, so a malformed sibling only loses itself.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Bid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumericField>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

/// A numeric field some exchanges send as a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericField {
    Number(serde_json::Number),
    Text(String),
}
