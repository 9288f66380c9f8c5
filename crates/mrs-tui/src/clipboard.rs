//! System clipboard access.

use arboard::Clipboard;

/// Write text to the system clipboard.
///
/// Errors are returned as display strings -- the caller surfaces them as a
/// failure alert rather than aborting anything.
pub fn copy(text: &str) -> Result<(), String> {
    Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(text.to_owned()))
        .map_err(|e| e.to_string())
}
