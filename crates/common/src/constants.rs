pub const BIDDER_CODE: &str = "clickagy";

pub const DEFAULT_ENDPOINT: &str = "https://aorta.clickagy.com/rtb/openrtb/bid?ch=183";
pub const DEFAULT_USER_SYNC_URL: &str = "https://aorta.clickagy.com/pixel.gif?ch=183";
pub const DEFAULT_USER_ID_COOKIE: &str = "cb";

/// `OpenRTB` `at` value signalling a second-price auction.
pub const AUCTION_TYPE_SECOND_PRICE: u8 = 2;

pub const BID_CURRENCY: &str = "USD";
pub const BID_TTL_SECONDS: u32 = 360;

/// Creative macro replaced with the base64-encoded clearing price.
pub const MACRO_AUCTION_PRICE_B64: &str = "${AUCTION_PRICE:B64}";
/// Creative macro replaced with the plain clearing price.
pub const MACRO_WINNING_PRICE: &str = "{winning_price}";
