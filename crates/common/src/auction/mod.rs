//! Host-facing auction surface.
//!
//! This module defines the normalized types exchanged with the host auction
//! engine, the [`BidAdapter`] trait adapters implement, and the context
//! reader that gathers per-auction environment facts.
//!
//! Note: the Clickagy adapter itself lives in [`crate::clickagy`].

pub mod adapter;
pub mod context;
pub mod types;

pub use adapter::BidAdapter;
pub use context::{read_context, resolve_page_url};
pub use types::{
    AdSize, AuctionContext, AuctionHints, BidParams, BidRequest, BidResult, MediaType,
    ServerRequest, ServerResponse, Sizes, SyncPermissions, SyncType, UserSync,
};
