//! Codec configuration

use crate::types::DxfVersion;

/// Settings threaded through every read and write.
///
/// Nothing is read from process-global state; two reads with different
/// configurations can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DxfConfiguration {
    /// Wire dialect (`$ACADVER`). Reading a file with a `$ACADVER` header
    /// replaces it with the declared version.
    pub version: DxfVersion,
    /// Emit elevation on code `38` for R11 and earlier.
    pub flatland: bool,
    /// Log enter/exit markers for every codec operation at `TRACE` level.
    pub debug_trace: bool,
}

impl Default for DxfConfiguration {
    fn default() -> Self {
        Self {
            version: DxfVersion::R12,
            flatland: false,
            debug_trace: false,
        }
    }
}

impl DxfConfiguration {
    pub fn new(version: DxfVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: DxfVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_flatland(mut self, flatland: bool) -> Self {
        self.flatland = flatland;
        self
    }

    pub fn with_debug_trace(mut self, debug_trace: bool) -> Self {
        self.debug_trace = debug_trace;
        self
    }
}
