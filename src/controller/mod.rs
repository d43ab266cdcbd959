//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and owns the playback timer.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `playback`: Audio player controls and the tick task
//! - `navigation`: Page switching, browse selection, feed and carousel
//! - `share`: Share sheet, share menu and copy-link

mod input;
mod playback;
mod navigation;
mod share;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::host::{Clipboard, NativeShare};
use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    native_share: Arc<dyn NativeShare>,
    clipboard: Arc<dyn Clipboard>,
    playback_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        native_share: Arc<dyn NativeShare>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            model,
            native_share,
            clipboard,
            playback_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Stop the player and its tick task before the UI goes away
    pub async fn shutdown(&self) {
        self.model.lock().await.pause_playback().await;
        self.stop_playback_clock().await;
        tracing::debug!("Controller shut down");
    }

    pub(crate) fn format_error(context: &str, error: &anyhow::Error) -> String {
        format!("{}: {}", context, error)
    }
}
