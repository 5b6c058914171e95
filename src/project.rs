//! Host value projection.
//!
//! Types the wire format has no kind for can still be encoded by projecting
//! them onto an integer, a float or a string. [`project`] tries the three in
//! that order and takes the first one the type offers.
//!
//! ```rust
//! use serde_ace::{project, AceValue, Projection};
//!
//! struct Celsius(f64);
//!
//! impl Projection for Celsius {
//!     fn project_float(&self) -> Option<f64> {
//!         Some(self.0)
//!     }
//! }
//!
//! assert_eq!(project(&Celsius(21.5)).unwrap(), AceValue::from(21.5));
//! ```
//!
//! Inside a `#[derive(Serialize)]` type, use [`serialize_projected`]:
//!
//! ```rust
//! use chrono::{DateTime, TimeZone, Utc};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Event {
//!     #[serde(serialize_with = "serde_ace::serialize_projected")]
//!     at: DateTime<Utc>,
//! }
//!
//! let event = Event { at: Utc.timestamp_opt(1_700_000_000, 0).unwrap() };
//! assert_eq!(serde_ace::to_string(&event).unwrap(), "^1^T^Sat^N1700000000^t^^");
//! ```

use crate::{AceValue, Error, Number, Result};
use chrono::{DateTime, TimeZone};
use num_bigint::{BigInt, BigUint};
use serde::Serialize;
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

/// Conversion of a host type onto one of the format's scalar kinds.
///
/// Every method defaults to `None`; implement the ones that apply.
pub trait Projection {
    fn project_int(&self) -> Option<i64> {
        None
    }

    fn project_float(&self) -> Option<f64> {
        None
    }

    fn project_string(&self) -> Option<String> {
        None
    }
}

/// Projects `value` onto an integer, float or string, in that order.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] naming the type if it offers none of
/// the three.
pub fn project<P: Projection + ?Sized>(value: &P) -> Result<AceValue> {
    if let Some(i) = value.project_int() {
        return Ok(AceValue::Number(Number::Integer(i)));
    }
    if let Some(f) = value.project_float() {
        return Ok(AceValue::Number(Number::Float(f)));
    }
    if let Some(s) = value.project_string() {
        return Ok(AceValue::String(s));
    }
    Err(Error::unsupported_type(std::any::type_name::<P>()))
}

/// Serializes a [`Projection`] through its projected value.
///
/// Meant for `#[serde(serialize_with = "serde_ace::serialize_projected")]`.
pub fn serialize_projected<P, S>(value: &P, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    P: Projection + ?Sized,
    S: serde::Serializer,
{
    project(value)
        .map_err(<S::Error as serde::ser::Error>::custom)?
        .serialize(serializer)
}

/// Whole seconds since the Unix epoch; RFC 3339 text as the string form.
impl<Tz> Projection for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn project_int(&self) -> Option<i64> {
        Some(self.timestamp())
    }

    fn project_string(&self) -> Option<String> {
        Some(self.to_rfc3339())
    }
}

/// An integer while it fits in `i64`, decimal text beyond that.
impl Projection for BigInt {
    fn project_int(&self) -> Option<i64> {
        i64::try_from(self).ok()
    }

    fn project_string(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Projection for BigUint {
    fn project_int(&self) -> Option<i64> {
        i64::try_from(self).ok()
    }

    fn project_string(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Projection for SystemTime {
    fn project_int(&self) -> Option<i64> {
        match self.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).ok(),
            Err(before) => i64::try_from(before.duration().as_secs()).ok().map(|s| -s),
        }
    }

    fn project_float(&self) -> Option<f64> {
        match self.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Some(elapsed.as_secs_f64()),
            Err(before) => Some(-before.duration().as_secs_f64()),
        }
    }
}
