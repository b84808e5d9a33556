//! Codec configuration.

/// Default limit on document nesting.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Options shared by the validator, decoder, encoder and JSON bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum number of embedded documents or arrays nested inside the
    /// top-level document. The top-level document itself is depth 0.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Fails with [`BsonError::DepthLimitExceeded`](crate::BsonError::DepthLimitExceeded)
    /// when `depth` is past the configured limit.
    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), crate::BsonError> {
        if depth > self.max_depth {
            Err(crate::BsonError::DepthLimitExceeded(self.max_depth))
        } else {
            Ok(())
        }
    }
}
