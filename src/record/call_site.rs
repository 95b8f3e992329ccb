//! Call-site resolution.
//!
//! Every public logging entry point is `#[track_caller]`, so the location
//! seen here is the user's call site with no internal frames in between.
//! The number of frames skipped is therefore zero; `tests/lifecycle_test.rs`
//! logs from a known line and checks the reported file and line.

use std::panic::Location;

/// File name used when the call site cannot be resolved.
pub const UNKNOWN_FILE: &str = "unknown";

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Source file, as reported by the compiler.
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// Opaque numeric identifier of the call site. Distinct call sites
    /// have distinct values; `0` means unknown.
    pub pc: usize,
}

impl CallSite {
    /// Sentinel for call sites that could not be resolved.
    pub const fn unknown() -> Self {
        Self {
            file: UNKNOWN_FILE,
            line: 0,
            column: 0,
            pc: 0,
        }
    }

    /// Location of the caller of the (track_caller) function invoking this.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            // Each call site owns a distinct static `Location`.
            pc: location as *const Location<'static> as usize,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.pc == 0
    }
}

impl Default for CallSite {
    fn default() -> Self {
        Self::unknown()
    }
}
