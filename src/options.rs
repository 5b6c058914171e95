//! Configuration options for AceSerializer encoding and decoding.
//!
//! The wire format itself has no knobs: every byte of output is fixed. The
//! options only bound the resources a single call may use.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ace::{deserialize_with_options, AceOptions, Error};
//!
//! let options = AceOptions::new().with_max_depth(1);
//!
//! assert!(deserialize_with_options("^1^T^N1^N1^t^^", options.clone()).is_ok());
//! assert_eq!(
//!     deserialize_with_options("^1^T^N1^T^t^t^^", options),
//!     Err(Error::TooDeep(1))
//! );
//! ```

/// Default limit on table nesting, shared by the encoder and decoder.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for AceSerializer encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use serde_ace::AceOptions;
///
/// let options = AceOptions::new();
/// assert_eq!(options.max_depth, 128);
///
/// let options = AceOptions::new().with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AceOptions {
    /// Maximum number of nested tables. Exceeding it yields [`crate::Error::TooDeep`].
    pub max_depth: usize,
}

impl Default for AceOptions {
    fn default() -> Self {
        AceOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AceOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum table nesting depth.
    ///
    /// A depth of 0 rejects every table; scalars are always accepted.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
