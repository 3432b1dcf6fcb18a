//! Error taxonomy for curve evaluation and input guards

use thiserror::Error;

/// Errors raised by the pricing engine.
///
/// Malformed schedules and amounts fail fast. Empty schedules and oversells
/// only surface here through the strict `try_*` quote variants; the
/// compatibility quotes report them as a zero total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// No steps were supplied, so nothing can be priced
    #[error("step schedule is empty")]
    EmptySchedule,

    /// The first step ends at supply 0 and covers no tickets
    #[error("step {index} has zero width")]
    ZeroWidthStep {
        /// Offending step
        index: usize,
    },

    /// `range_to` did not strictly increase
    #[error("step {index}: rangeTo {next} does not exceed previous rangeTo {prev}")]
    NonMonotonicRange {
        /// Offending step
        index: usize,
        /// `range_to` of the preceding step
        prev: u128,
        /// `range_to` of the offending step
        next: u128,
    },

    /// `price` decreased from one step to the next
    #[error("step {index}: price {next} is below previous price {prev}")]
    DecreasingPrice {
        /// Offending step
        index: usize,
        /// Price of the preceding step
        prev: u128,
        /// Price of the offending step
        next: u128,
    },

    /// A buy needs more tickets than the schedule has left
    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        /// Tickets asked for
        requested: u128,
        /// Tickets the schedule can still issue
        available: u128,
    },

    /// A sell asks for more tickets than are in circulation
    #[error("insufficient supply: cannot sell {requested} of {supply}")]
    InsufficientSupply {
        /// Tickets asked for
        requested: u128,
        /// Current supply
        supply: u128,
    },

    /// Supply lies beyond the last configured step
    #[error("supply {supply} exceeds schedule capacity {capacity}")]
    SupplyOutOfRange {
        /// Current supply
        supply: u128,
        /// Last `range_to` of the schedule
        capacity: u128,
    },

    /// A boundary string could not be coerced to a non-negative integer
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// An intermediate product or sum does not fit in 128 bits
    #[error("arithmetic overflow")]
    Overflow,
}

/// Result alias used across the library
pub type CurveResult<T> = Result<T, CurveError>;
