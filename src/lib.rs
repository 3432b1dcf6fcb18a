#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for the raffle ticket bonding curve.
//!
//! Prices raffle tickets on a stepped bonding curve with the same integer
//! arithmetic the on-chain contract uses, and turns quotes into the slippage
//! bounds submitted with buy and sell transactions.
//!
//! # Modules
//! - [`curves`]: Price tiers, buy/sell quotes, curve position
//! - [`slippage`]: `maxSofAmount` / `minSofAmount` bounds
//! - [`guards`]: Schedule and boundary-input validation
//! - [`schedule`]: JSON step schedules from the chain-read layer
//! - [`verifier`]: Walked totals vs closed-form tier sums
//! - [`plot`]: Visualization (optional in binaries)

/// Price tiers and exact buy/sell quotes
pub mod curves;

/// Error taxonomy shared by all modules
pub mod error;

/// Precondition checks on schedules and boundary inputs
pub mod guards;

/// Step schedule loading and integer coercion
pub mod schedule;

/// Slippage bound calculator
pub mod slippage;

/// Verification tools for schedule consistency
pub mod verifier;

/// Visualization utilities for generating charts
pub mod plot;

pub use curves::{quote_buy, quote_sell, CurvePosition, PriceStep, StepSequence};
pub use error::{CurveError, CurveResult};
pub use slippage::{compute_max_with_slippage, compute_min_after_slippage};
