//! Superuser check performed before touching physical memory.

use crate::error::{ProbeError, Result};
use tracing::debug;

/// True when the effective user is root.
pub fn is_root() -> bool {
    rustix::process::geteuid().is_root()
}

/// Fail with `ProbeError::Privilege` unless running as root.
pub fn ensure_root() -> Result<()> {
    let euid = rustix::process::geteuid();
    debug!(euid = euid.as_raw(), "Checking process privilege");
    if euid.is_root() {
        Ok(())
    } else {
        Err(ProbeError::Privilege)
    }
}
