//! Configuration for the storage coordinator.

use dp3t_core::RetentionPolicy;

/// Configuration for the tracing database.
///
/// `diagnostics` decides at construction time whether the diagnostic log
/// store is bound and exposed at all; leaving it off changes nothing else
/// about the coordinator's behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageConfig {
    /// How long exposure days are kept before the retention sweep removes
    /// them.
    pub retention: RetentionPolicy,
    /// Whether the diagnostic log store is constructed and exposed.
    pub diagnostics: bool,
}
