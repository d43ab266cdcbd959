//! Host capabilities the share widgets rely on: the system clipboard and an
//! optional native share sheet.
//!
//! Uses arboard for cross-platform clipboard access

use anyhow::Result;

use crate::model::SharePayload;

/// Somewhere the copy-link button can put text
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// The operating system clipboard
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// Operating-system share sheet
pub trait NativeShare: Send + Sync {
    fn is_available(&self) -> bool;

    /// Hand the payload to the share sheet. A user cancelling the sheet is
    /// reported as an error too; callers ignore it.
    fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// Terminals have no share sheet, so the share button always opens the
/// in-page menu.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNativeShare;

impl NativeShare for NoNativeShare {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&self, _payload: &SharePayload) -> Result<()> {
        anyhow::bail!("native share is not supported in the terminal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy() {
        SystemClipboard
            .copy("https://pressroom.example.com/")
            .expect("Copy failed");
    }

    #[test]
    fn test_empty_copy() {
        assert!(SystemClipboard.copy("").is_ok());
    }

    #[test]
    fn terminal_has_no_share_sheet() {
        let host = NoNativeShare;
        let payload = SharePayload {
            title: String::new(),
            url: String::new(),
            description: String::new(),
        };
        assert!(!host.is_available());
        assert!(host.share(&payload).is_err());
    }
}
