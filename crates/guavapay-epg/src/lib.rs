//! Client SDK for the GuavaPay Electronic Payment Gateway (EPG).
//!
//! Registers orders, runs card payments with 3-D Secure version checks,
//! refunds orders, and queries order status and merchant balance.
//!
//! # Quick example
//!
//! ```no_run
//! use epg::{EpgClient, EpgConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), epg::EpgError> {
//! let config = EpgConfig::new("merchant", "password", "BANK01", "sid");
//! let client = EpgClient::new(config)?;
//!
//! let order = client
//!     .create_order("ORD1", 1000, 944, "https://shop.example/return")
//!     .await?;
//! println!("pay at {}", order.form_url());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod params;
pub mod request;
pub mod response;

pub use client::EpgClient;
pub use config::{ConfigError, EpgConfig};
pub use error::EpgError;
pub use params::{CardDetails, DeviceFingerprint};
pub use response::{Balance, NewOrder, OrderInfo, Payment, Refund, Version};
