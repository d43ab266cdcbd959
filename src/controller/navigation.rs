//! Page switching and the selection-style widgets (browse controls, feed,
//! carousel, table of contents, banners, newsletter form)

use std::time::Instant;

use crate::model::{
    featured_article, ActiveSection, BannerVariant, LayoutSelection, SelectionChange, SubscribeStatus,
    ARTICLES,
};

use super::AppController;

impl AppController {
    pub async fn go_to_section(&self, section: ActiveSection) {
        let model = self.model.lock().await;
        model.set_active_section(section).await;
        model.update_widgets(|w| w.share.close()).await;
        model.sync_metadata().await;
        tracing::debug!(section = section.title(), "Switched page");
    }

    pub async fn next_section(&self) {
        let section = self.model.lock().await.active_section().await.next();
        self.go_to_section(section).await;
    }

    pub async fn previous_section(&self) {
        let section = self.model.lock().await.active_section().await.prev();
        self.go_to_section(section).await;
    }

    // ========================================================================
    // Browse controls
    // ========================================================================

    async fn change_selection<F>(&self, f: F)
    where
        F: FnOnce(&mut LayoutSelection) -> Option<SelectionChange>,
    {
        let change = self.model.lock().await.apply_selection(f).await;
        if let Some(change) = change {
            self.on_selection_change(&change);
        }
    }

    /// The browse page's reaction to a selector notification
    fn on_selection_change(&self, change: &SelectionChange) {
        match change {
            SelectionChange::Layout(layout) => {
                tracing::info!(layout = layout.label(), "Layout changed");
            }
            SelectionChange::Sort(sort) => {
                tracing::info!(sort = sort.label(), "Sort changed");
            }
            SelectionChange::Filters(filters) => {
                tracing::info!(?filters, "Filters changed");
            }
        }
    }

    pub async fn cycle_layout(&self) {
        self.change_selection(|l| Some(l.cycle_layout())).await;
    }

    pub async fn cycle_sort(&self) {
        self.change_selection(|l| Some(l.cycle_sort())).await;
    }

    pub async fn focus_next_filter(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.layout.focus_next_filter()).await;
    }

    pub async fn cycle_filter_value(&self, forward: bool) {
        self.change_selection(|l| l.cycle_focused_filter(forward)).await;
    }

    pub async fn clear_filters(&self) {
        self.change_selection(|l| Some(l.clear_filters())).await;
    }

    // ========================================================================
    // Feed
    // ========================================================================

    pub async fn feed_switch_tab(&self, forward: bool) {
        let model = self.model.lock().await;
        let tab = model
            .update_widgets(|w| {
                let tab = if forward { w.feed.tab.next() } else { w.feed.tab.prev() };
                w.feed.set_tab(tab);
                tab
            })
            .await;
        tracing::debug!(tab = tab.label(), "Feed tab changed");
    }

    pub async fn feed_move(&self, down: bool) {
        let model = self.model.lock().await;
        model
            .update_widgets(|w| {
                if down {
                    let len = w.feed.visible(ARTICLES).len();
                    w.feed.move_down(len);
                } else {
                    w.feed.move_up();
                }
            })
            .await;
    }

    pub async fn feed_toggle_bookmark(&self) {
        let model = self.model.lock().await;
        let toggled = model
            .update_widgets(|w| {
                let visible = w.feed.visible(ARTICLES);
                let article = visible.get(w.feed.selected).copied()?;
                let saved = w.feed.toggle_bookmark(article.id);
                let len = w.feed.visible(ARTICLES).len();
                w.feed.clamp_selection(len);
                Some((article.title, saved))
            })
            .await;

        if let Some((title, saved)) = toggled {
            tracing::info!(title, saved, "Bookmark toggled");
            let verb = if saved { "Saved" } else { "Removed" };
            model.set_notice(format!("{}: {}", verb, title)).await;
        }
    }

    pub async fn feed_next_topic(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.feed.move_topic_cursor()).await;
    }

    pub async fn feed_toggle_topic(&self) {
        let model = self.model.lock().await;
        let (topic, followed) = model
            .update_widgets(|w| {
                let topic = w.feed.cursor_topic();
                (topic, w.feed.toggle_topic(topic))
            })
            .await;
        tracing::info!(topic = topic.label(), followed, "Topic follow toggled");
    }

    pub async fn feed_refresh(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.feed.start_refresh(Instant::now())).await;
        tracing::debug!("Feed refresh started");
    }

    // ========================================================================
    // Carousel & table of contents
    // ========================================================================

    pub async fn carousel_step(&self, forward: bool) {
        let model = self.model.lock().await;
        let index = model
            .update_widgets(|w| {
                if forward {
                    w.carousel.next();
                } else {
                    w.carousel.prev();
                }
                w.carousel.active_index
            })
            .await;
        tracing::trace!(index, "Carousel moved");
    }

    pub async fn carousel_jump(&self, index: usize) {
        let model = self.model.lock().await;
        if !model.update_widgets(|w| w.carousel.go_to(index)).await {
            tracing::debug!(index, "Ignoring jump to missing slide");
        }
    }

    pub async fn carousel_toggle_autoplay(&self) {
        let model = self.model.lock().await;
        let autoplay = model.update_widgets(|w| w.carousel.toggle_autoplay()).await;
        tracing::debug!(autoplay, "Carousel autoplay toggled");
    }

    pub async fn toc_move(&self, down: bool) {
        let model = self.model.lock().await;
        model
            .update_widgets(|w| if down { w.toc.next() } else { w.toc.prev() })
            .await;
    }

    /// Follow the anchor of the `index`-th heading
    pub async fn toc_jump(&self, index: usize) {
        let model = self.model.lock().await;
        let jumped = model
            .update_widgets(|w| {
                let id = w.toc.headings.get(index).map(|h| h.id);
                id.is_some_and(|id| w.toc.jump_to(id))
            })
            .await;
        if !jumped {
            tracing::debug!(index, "Ignoring jump to missing heading");
        }
    }

    pub async fn toc_toggle_collapsed(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.toc.toggle_collapsed()).await;
    }

    // ========================================================================
    // Banner & newsletter
    // ========================================================================

    pub async fn dismiss_banner(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.banner.dismiss()).await;
        tracing::debug!("Banner dismissed");
    }

    pub async fn rotate_banner(&self) {
        let model = self.model.lock().await;
        model.update_widgets(|w| w.banner.rotate()).await;
    }

    pub async fn activate_banner(&self) {
        let banner = self.model.lock().await.get_widgets().await.banner;
        if !banner.is_visible() {
            return;
        }
        tracing::info!(variant = ?banner.variant, "Banner action");
        match banner.variant {
            BannerVariant::Newsletter => self.go_to_section(ActiveSection::Subscribe).await,
            BannerVariant::Premium => {
                let model = self.model.lock().await;
                model.set_notice("Premium trials are not available in this preview".to_string()).await;
            }
            BannerVariant::Podcast => {
                let is_playing = self.model.lock().await.is_playing().await;
                if !is_playing {
                    self.toggle_playback().await;
                }
                let model = self.model.lock().await;
                model.set_notice(format!("Now playing: {}", featured_article().title)).await;
            }
        }
    }

    pub async fn newsletter_submit(&self) {
        let model = self.model.lock().await;
        let (accepted, frequency) = model
            .update_widgets(|w| {
                if w.newsletter.status == SubscribeStatus::Subscribed {
                    w.newsletter.reset();
                    return (false, w.newsletter.frequency);
                }
                let accepted = w.newsletter.submit(Instant::now());
                (accepted, w.newsletter.frequency)
            })
            .await;
        if accepted {
            tracing::info!(frequency = frequency.label(), "Newsletter subscription submitted");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use crate::config::SiteConfig;
    use crate::host::{NoNativeShare, SystemClipboard};
    use crate::model::{ActiveSection, AppModel, FeedTab, SubscribeStatus};

    use super::AppController;

    fn controller() -> AppController {
        let model = Arc::new(Mutex::new(AppModel::new(SiteConfig::default())));
        AppController::new(model, Arc::new(NoNativeShare), Arc::new(SystemClipboard))
    }

    #[tokio::test]
    async fn switching_pages_resyncs_head() {
        let controller = controller();
        controller.go_to_section(ActiveSection::Voices).await;
        controller.go_to_section(ActiveSection::Voices).await;
        let head = controller.model.lock().await.get_head().await;
        assert_eq!(head.canonical(), Some("https://pressroom.example.com/testimonials"));
        assert_eq!(head.count_links("canonical"), 1);
    }

    #[tokio::test]
    async fn section_cycle_wraps() {
        let controller = controller();
        controller.previous_section().await;
        assert_eq!(controller.model.lock().await.active_section().await, ActiveSection::Head);
        controller.next_section().await;
        assert_eq!(controller.model.lock().await.active_section().await, ActiveSection::Listen);
    }

    #[tokio::test]
    async fn filter_cycling_round_trips_to_sentinel() {
        let controller = controller();
        controller.cycle_filter_value(true).await;
        let widgets = controller.model.lock().await.get_widgets().await;
        assert_eq!(widgets.layout.filter_value("category"), "Technology");

        controller.clear_filters().await;
        let widgets = controller.model.lock().await.get_widgets().await;
        assert!(widgets.layout.active_filters.is_empty());
    }

    #[tokio::test]
    async fn bookmarking_from_feed_fills_saved_tab() {
        let controller = controller();
        controller.feed_toggle_bookmark().await;
        controller.feed_switch_tab(false).await;
        let widgets = controller.model.lock().await.get_widgets().await;
        assert_eq!(widgets.feed.tab, FeedTab::Saved);
        assert_eq!(widgets.feed.visible(crate::model::ARTICLES).len(), 1);
    }

    #[tokio::test]
    async fn carousel_keys_cycle_and_jump() {
        let controller = controller();
        controller.carousel_step(false).await;
        assert_eq!(controller.model.lock().await.get_widgets().await.carousel.active_index, 3);
        controller.carousel_jump(1).await;
        controller.carousel_jump(9).await;
        assert_eq!(controller.model.lock().await.get_widgets().await.carousel.active_index, 1);
    }

    #[tokio::test]
    async fn newsletter_banner_routes_to_subscribe() {
        let controller = controller();
        controller.activate_banner().await;
        assert_eq!(controller.model.lock().await.active_section().await, ActiveSection::Subscribe);

        controller.dismiss_banner().await;
        controller.go_to_section(ActiveSection::Listen).await;
        controller.activate_banner().await;
        assert_eq!(controller.model.lock().await.active_section().await, ActiveSection::Listen);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let controller = controller();
        controller.newsletter_submit().await;
        let widgets = controller.model.lock().await.get_widgets().await;
        assert!(matches!(widgets.newsletter.status, SubscribeStatus::Invalid(_)));
    }
}
