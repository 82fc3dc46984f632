//! Period identifiers.
//!
//! A period displays as `"{previous}/{current} {year}"` and is stored as a
//! request id token in which `/` becomes `_` and the space becomes `-`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical identifier of one request period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodId {
    pub previous: u32,
    pub current: u32,
    pub year: i16,
}

impl PeriodId {
    /// Period ending at week or month `number` of `year`.
    #[must_use]
    pub const fn new(number: u32, year: i16) -> Self {
        Self {
            previous: number.saturating_sub(1),
            current: number,
            year,
        }
    }

    /// Sanitized token stored against contractors and tasks.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        RequestId(format!("{}_{}-{}", self.previous, self.current, self.year))
    }
}

impl Display for PeriodId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{} {}", self.previous, self.current, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed request id {0:?}")]
pub struct MalformedRequestId(pub String);

/// Sanitized form of a [`PeriodId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the period this token was derived from.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not `{previous}_{current}-{year}`.
    pub fn period(&self) -> Result<PeriodId, MalformedRequestId> {
        let malformed = || MalformedRequestId(self.0.clone());

        let (numbers, year) = self.0.split_once('-').ok_or_else(malformed)?;
        let (previous, current) = numbers.split_once('_').ok_or_else(malformed)?;

        let period = PeriodId {
            previous: previous.parse().map_err(|_error| malformed())?,
            current: current.parse().map_err(|_error| malformed())?,
            year: year.parse().map_err(|_error| malformed())?,
        };

        if period != PeriodId::new(period.current, period.year) {
            return Err(malformed());
        }

        Ok(period)
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<PeriodId> for RequestId {
    fn from(period: PeriodId) -> Self {
        period.request_id()
    }
}
