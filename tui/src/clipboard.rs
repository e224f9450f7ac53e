//! Clipboard Access
//!
//! Best-effort system clipboard writes for the copyable blocks. Clipboard
//! failure is cosmetic: it is logged as a warning and never shown to the
//! user as an error.

/// Wrapper around the system clipboard.
///
/// Initialization can fail (headless session, no display server); in that
/// case every copy silently reports `false`.
pub struct Clipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard {
    /// Connect to the system clipboard if one is available.
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }

    /// Write `text` to the clipboard. Returns whether the write succeeded;
    /// the caller uses this to decide whether to flash the copied marker.
    pub fn copy(&mut self, text: &str) -> bool {
        let Some(clipboard) = self.inner.as_mut() else {
            return false;
        };
        match clipboard.set_text(text.to_owned()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("clipboard copy failed: {err}");
                false
            }
        }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
