//! Share buttons: platform URLs and the in-page share menu

use std::time::{Duration, Instant};

/// How long the "Copied!" confirmation stays visible
pub const COPIED_RESET: Duration = Duration::from_millis(2000);

/// What gets shared
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    LinkedIn,
    Facebook,
    Email,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 4] = [
        SharePlatform::Twitter,
        SharePlatform::LinkedIn,
        SharePlatform::Facebook,
        SharePlatform::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "Twitter",
            SharePlatform::LinkedIn => "LinkedIn",
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Email => "Email",
        }
    }

    pub fn share_url(self, payload: &SharePayload) -> String {
        let title = urlencoding::encode(&payload.title);
        let url = urlencoding::encode(&payload.url);
        match self {
            SharePlatform::Twitter => {
                format!("https://twitter.com/intent/tweet?text={title}&url={url}")
            }
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url}")
            }
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url}")
            }
            SharePlatform::Email => {
                let description = urlencoding::encode(&payload.description);
                format!("mailto:?subject={title}&body={description}%0A%0A{url}")
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShareMenuState {
    pub is_open: bool,
    copied_at: Option<Instant>,
    /// Last platform URL handed to the host
    pub last_shared: Option<(SharePlatform, String)>,
}

impl ShareMenuState {
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    pub fn copied(&self) -> bool {
        self.copied_at.is_some()
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    /// Clear the copied flag once [`COPIED_RESET`] has elapsed as of `now`
    pub fn expire_copied(&mut self, now: Instant) -> bool {
        match self.copied_at {
            Some(at) if now.saturating_duration_since(at) >= COPIED_RESET => {
                self.copied_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn record_share(&mut self, platform: SharePlatform, url: String) {
        self.last_shared = Some((platform, url));
        self.is_open = false;
    }
}
