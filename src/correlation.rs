//! Correlation id generation and validation.
use uuid::Uuid;

const CANONICAL_LEN: usize = 36;

/// Source of per-request correlation ids.
///
/// Implementations are shared across concurrently running request tasks and
/// must not rely on external locking.
pub trait CorrelationIdProvider: Send + Sync {
    /// Returns a fresh, globally unique id.
    fn generate(&self) -> String;

    /// Returns true when `id` is in the provider's canonical format.
    fn is_valid(&self, id: &str) -> bool;
}

/// UUID v4 ids backed by the OS random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidProvider;

impl CorrelationIdProvider for UuidProvider {
    fn generate(&self) -> String {
        generate()
    }

    fn is_valid(&self, id: &str) -> bool {
        is_valid(id)
    }
}

#[must_use]
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Canonical hyphenated UUID text only; braced, `urn:uuid:` and simple
/// forms are rejected.
#[must_use]
pub fn is_valid(id: &str) -> bool {
    id.len() == CANONICAL_LEN && Uuid::parse_str(id).is_ok()
}
