//! Share buttons: native share sheet, in-page menu and copy-link

use crate::model::SharePlatform;

use super::AppController;

impl AppController {
    /// Use the host share sheet when there is one, the in-page menu otherwise
    pub async fn share(&self) {
        let payload = self.model.lock().await.share_payload();

        if self.native_share.is_available() {
            match self.native_share.share(&payload) {
                Ok(()) => tracing::info!(url = %payload.url, "Shared via native share sheet"),
                // Cancelling the sheet is not an error worth surfacing
                Err(e) => tracing::debug!(error = %e, "Native share dismissed"),
            }
            return;
        }

        let model = self.model.lock().await;
        let open = model.update_widgets(|w| w.share.toggle()).await;
        tracing::debug!(open, "Share menu toggled");
    }

    pub async fn close_share_menu(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.share.close()).await;
    }

    pub async fn share_to(&self, platform: SharePlatform) {
        let model = self.model.lock().await;
        let url = platform.share_url(&model.share_payload());
        tracing::info!(platform = platform.label(), url = %url, "Share link built");
        model.record_share(platform, url).await;
        model.set_notice(format!("{} share link ready", platform.label())).await;
    }

    /// Copy the article URL. Failures are logged and otherwise ignored.
    pub async fn copy_link(&self) {
        let url = self.model.lock().await.share_payload().url;

        let clipboard = self.clipboard.clone();
        let result = tokio::task::spawn_blocking(move || clipboard.copy(&url)).await;
        match result {
            Ok(Ok(())) => {
                self.model.lock().await.mark_link_copied().await;
                tracing::info!("Article link copied to clipboard");
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to copy link to clipboard");
            }
            Err(e) => {
                tracing::error!(error = %e, "Clipboard task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::Result;
    use tokio::sync::Mutex;

    use crate::config::SiteConfig;
    use crate::host::{Clipboard, NativeShare, NoNativeShare};
    use crate::model::{AppModel, SharePayload, SharePlatform};

    use super::AppController;

    /// Share sheet that is present but always cancelled by the user
    #[derive(Default)]
    struct CancellingShare {
        calls: AtomicUsize,
    }

    impl NativeShare for CancellingShare {
        fn is_available(&self) -> bool {
            true
        }

        fn share(&self, _payload: &SharePayload) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("user cancelled")
        }
    }

    /// Clipboard that remembers what was written
    #[derive(Default)]
    struct RecordingClipboard {
        written: std::sync::Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&self, text: &str) -> Result<()> {
            if let Ok(mut written) = self.written.lock() {
                written.push(text.to_string());
            }
            Ok(())
        }
    }

    /// Clipboard of a host with no display server
    struct UnavailableClipboard;

    impl Clipboard for UnavailableClipboard {
        fn copy(&self, _text: &str) -> Result<()> {
            anyhow::bail!("no clipboard available")
        }
    }

    fn model() -> Arc<Mutex<AppModel>> {
        Arc::new(Mutex::new(AppModel::new(SiteConfig::default())))
    }

    #[tokio::test]
    async fn without_native_share_the_menu_opens() {
        let controller = AppController::new(model(), Arc::new(NoNativeShare), Arc::new(UnavailableClipboard));
        controller.share().await;
        assert!(controller.model.lock().await.is_share_menu_open().await);
        controller.share().await;
        assert!(!controller.model.lock().await.is_share_menu_open().await);
    }

    #[tokio::test]
    async fn cancelled_native_share_is_silent() {
        let host = Arc::new(CancellingShare::default());
        let controller = AppController::new(model(), host.clone(), Arc::new(UnavailableClipboard));
        controller.share().await;

        let model = controller.model.lock().await;
        assert_eq!(host.calls.load(Ordering::SeqCst), 1);
        assert!(!model.is_share_menu_open().await);
        assert!(!model.has_error().await);
    }

    #[tokio::test]
    async fn platform_share_records_url_and_closes_menu() {
        let controller = AppController::new(model(), Arc::new(NoNativeShare), Arc::new(UnavailableClipboard));
        controller.share().await;
        controller.share_to(SharePlatform::LinkedIn).await;

        let widgets = controller.model.lock().await.get_widgets().await;
        assert!(!widgets.share.is_open);
        let (platform, url) = widgets.share.last_shared.expect("share recorded");
        assert_eq!(platform, SharePlatform::LinkedIn);
        assert_eq!(
            url,
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fpressroom.example.com%2Farticles%2Fthe-quiet-revolution-of-edge-computing"
        );
    }

    #[tokio::test]
    async fn copy_link_marks_copied_until_reset() {
        let clipboard = Arc::new(RecordingClipboard::default());
        let controller = AppController::new(model(), Arc::new(NoNativeShare), clipboard.clone());
        controller.copy_link().await;

        let written = clipboard.written.lock().unwrap().clone();
        assert_eq!(
            written,
            vec!["https://pressroom.example.com/articles/the-quiet-revolution-of-edge-computing".to_string()]
        );

        let model = controller.model.lock().await;
        assert!(model.get_widgets().await.share.copied());

        model.run_timers(Instant::now() + Duration::from_millis(2000)).await;
        assert!(!model.get_widgets().await.share.copied());
    }

    #[tokio::test]
    async fn failed_copy_is_swallowed() {
        let controller = AppController::new(
            model(),
            Arc::new(NoNativeShare),
            Arc::new(UnavailableClipboard),
        );
        controller.copy_link().await;

        let model = controller.model.lock().await;
        assert!(!model.get_widgets().await.share.copied());
        assert!(!model.has_error().await);
    }
}
