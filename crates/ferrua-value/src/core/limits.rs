//! Size ceilings for values built from untrusted protocol input.
//!
//! Array lengths arrive on the wire before their payload; bounding them
//! here keeps a hostile length prefix from turning into an unbounded
//! allocation.

use crate::error::{ValueError, ValueResult};

/// Configurable ceilings for value construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueLimits {
    /// Maximum number of elements in one array (also bounds the dimension
    /// list of a variant).
    pub max_array_length: usize,
}

impl Default for ValueLimits {
    fn default() -> Self {
        Self {
            max_array_length: 1 << 20, // 1M elements
        }
    }
}

impl ValueLimits {
    /// Tight ceilings for exposed endpoints.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_array_length: 10_000,
        }
    }

    /// No ceilings. Only for trusted, locally produced data.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_array_length: usize::MAX,
        }
    }

    /// Validate an element count against the array ceiling.
    ///
    /// # Errors
    ///
    /// [`ValueError::LimitExceeded`] when `len` is over the ceiling.
    #[inline]
    pub fn check_array_length(&self, len: usize) -> ValueResult<()> {
        if len > self.max_array_length {
            tracing::warn!(
                requested = len,
                max = self.max_array_length,
                "rejecting oversized array"
            );
            return Err(ValueError::limit_exceeded(
                "max_array_length",
                self.max_array_length,
                len,
            ));
        }
        Ok(())
    }
}
