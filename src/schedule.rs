//! Loading step schedules as delivered by the chain-read layer
//!
//! Schedules are JSON arrays of `{ "price": .., "rangeTo": .. }`. Values that
//! exceed a JSON-safe integer arrive as decimal strings, so both forms are
//! accepted and coerced through [`parse_amount`].

use crate::curves::{PriceStep, StepSequence};
use crate::error::CurveError;
use crate::guards::parse_amount;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Str(String),
}

impl IntOrString {
    fn coerce(self) -> Result<u128, CurveError> {
        match self {
            IntOrString::Int(n) => Ok(n.into()),
            IntOrString::Str(s) => parse_amount(&s),
        }
    }
}

/// Wire form of a [`PriceStep`] before integer coercion
#[derive(Deserialize)]
pub struct RawStep {
    price: IntOrString,
    #[serde(rename = "rangeTo", alias = "range_to")]
    range_to: IntOrString,
}

impl TryFrom<RawStep> for PriceStep {
    type Error = CurveError;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        Ok(PriceStep::new(raw.price.coerce()?, raw.range_to.coerce()?))
    }
}

/// Parses and validates a schedule from JSON text
pub fn parse_steps(json: &str) -> Result<StepSequence> {
    let seq: StepSequence = serde_json::from_str(json).context("malformed step schedule")?;
    log::debug!("loaded {} steps, capacity {}", seq.steps().len(), seq.capacity());
    Ok(seq)
}

/// Reads a schedule file from disk
pub fn load_steps(path: &Path) -> Result<StepSequence> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading step schedule {}", path.display()))?;
    parse_steps(&text).with_context(|| format!("in {}", path.display()))
}
