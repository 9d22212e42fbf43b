//! Clickagy bid adapter.
//!
//! Translates publisher ad-slot bid requests into `OpenRTB` 2.x requests for
//! the Clickagy exchange, and exchange responses back into normalized bids.
//!
//! # Modules
//!
//! - [`auction`]: Host-facing types and the [`auction::BidAdapter`] trait
//! - [`clickagy`]: The Clickagy adapter and its components
//! - [`constants`]: Exchange endpoints, macros and fixed bid fields
//! - [`cookies`]: Cookie header parsing
//! - [`environment`]: Browser environment oracle
//! - [`error`]: Error types and error handling utilities
//! - [`logging`]: Logger setup
//! - [`numeric`]: Lenient number parsing for exchange JSON
//! - [`openrtb`]: `OpenRTB` wire types
//! - [`settings`]: Configuration management and validation
//! - [`test_support`]: Testing utilities and fixtures

pub mod auction;
pub mod clickagy;
pub mod constants;
pub mod cookies;
pub mod environment;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod openrtb;
pub mod settings;
