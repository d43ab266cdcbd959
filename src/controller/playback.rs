//! Playback control methods

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::model::{AppModel, PlaybackRate, TickOutcome};

use super::AppController;

impl AppController {
    pub async fn toggle_playback(&self) {
        let model = self.model.lock().await;
        let is_playing = model.toggle_play().await;
        tracing::info!(action = if is_playing { "resumed" } else { "paused" }, "Playback toggled");
        drop(model);

        self.restart_playback_clock().await;
    }

    pub async fn skip_forward(&self) {
        let position = self.model.lock().await.skip_forward().await;
        tracing::debug!(position, "Skipped forward");
    }

    pub async fn skip_back(&self) {
        let position = self.model.lock().await.skip_back().await;
        tracing::debug!(position, "Skipped back");
    }

    pub async fn seek_at(&self, x: u16, track_x: u16, track_width: u16) {
        let position = self.model.lock().await.seek_at(x, track_x, track_width).await;
        tracing::debug!(x, position, "Seeked on progress track");
    }

    pub async fn cycle_rate(&self) {
        let rate = self.model.lock().await.cycle_rate().await;
        tracing::info!(rate = rate.label(), "Playback rate changed");
        // The tick period depends on the rate
        self.restart_playback_clock().await;
    }

    pub async fn toggle_mute(&self) {
        let muted = self.model.lock().await.toggle_mute().await;
        tracing::debug!(muted, "Mute toggled");
    }

    pub async fn toggle_minimized(&self) {
        let minimized = self.model.lock().await.toggle_minimized().await;
        tracing::debug!(minimized, "Player minimized toggled");
    }

    /// Replace the tick task so it matches the current play state and rate
    pub(crate) async fn restart_playback_clock(&self) {
        let mut task = self.playback_task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
        }

        let (is_playing, rate) = {
            let model = self.model.lock().await;
            (model.is_playing().await, model.playback_rate().await)
        };
        if is_playing {
            *task = Some(spawn_ticker(self.model.clone(), rate));
        }
    }

    pub(crate) async fn stop_playback_clock(&self) {
        if let Some(handle) = self.playback_task.lock().await.take() {
            handle.abort();
            tracing::debug!("Playback tick task stopped");
        }
    }
}

fn spawn_ticker(model: Arc<Mutex<AppModel>>, rate: PlaybackRate) -> tokio::task::JoinHandle<()> {
    let period = rate.tick_interval();
    tracing::debug!(rate = rate.label(), period_ms = period.as_millis() as u64, "Starting playback tick task");

    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let outcome = model.lock().await.tick_playback().await;
            match outcome {
                TickOutcome::Advanced => {}
                TickOutcome::Finished => {
                    tracing::info!("Playback reached the end, rewound to start");
                    break;
                }
                TickOutcome::Idle => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::SiteConfig;
    use crate::host::{NoNativeShare, SystemClipboard};

    fn controller(duration_secs: u32) -> AppController {
        let config = SiteConfig {
            listen_duration_secs: duration_secs,
            ..SiteConfig::default()
        };
        let model = Arc::new(Mutex::new(AppModel::new(config)));
        AppController::new(model, Arc::new(NoNativeShare), Arc::new(SystemClipboard))
    }

    async fn position(controller: &AppController) -> u32 {
        controller.model.lock().await.get_playback().await.current_secs
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_playing() {
        let controller = controller(720);
        controller.toggle_playback().await;
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(position(&controller).await, 3);

        controller.toggle_playback().await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(position(&controller).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn faster_rate_ticks_faster() {
        let controller = controller(720);
        controller.cycle_rate().await; // 1.25x, 800ms per tick
        controller.toggle_playback().await;
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(position(&controller).await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn finishing_stops_the_clock() {
        let controller = controller(3);
        controller.toggle_playback().await;
        tokio::time::sleep(Duration::from_millis(4500)).await;
        let playback = controller.model.lock().await.get_playback().await;
        assert!(!playback.is_playing);
        assert_eq!(playback.current_secs, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_the_tick_task() {
        let controller = controller(720);
        controller.toggle_playback().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.shutdown().await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(position(&controller).await, 1);
    }
}
