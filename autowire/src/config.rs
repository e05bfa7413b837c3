//! Tunables for a [`Container`](crate::Container).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default limit on nested resolutions, see [`ContainerConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for a [`Container`](crate::Container).
///
/// With the `serde` feature enabled this can be deserialized from any
/// serde format. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
  /// How many bindings and types may be in the middle of resolution at once
  /// before a request fails with `DepthExceeded`.
  pub max_depth: usize,
}

impl ContainerConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}
