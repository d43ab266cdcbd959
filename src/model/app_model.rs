//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::config::SiteConfig;

use super::banner::BannerState;
use super::carousel::CarouselState;
use super::content::{featured_article, Article, Category, FEATURED_HEADINGS, TESTIMONIALS};
use super::feed::FeedState;
use super::layout::{LayoutSelection, SelectionChange};
use super::newsletter::NewsletterForm;
use super::playback::{ListenMetadata, PlaybackClock, PlaybackRate, TickOutcome};
use super::seo::{ArticleMeta, HeadDocument, MetaSnapshot, PageMetadataPort};
use super::share::{ShareMenuState, SharePayload, SharePlatform};
use super::skeleton::Shimmer;
use super::toc::TocState;
use super::types::{ActiveSection, UiState};

const ERROR_DISPLAY_SECS: u64 = 5;
const NOTICE_DISPLAY_SECS: u64 = 3;

/// State of every widget except the audio player
#[derive(Clone, Debug)]
pub struct WidgetState {
    pub layout: LayoutSelection,
    pub carousel: CarouselState,
    pub share: ShareMenuState,
    pub feed: FeedState,
    pub toc: TocState,
    pub banner: BannerState,
    pub newsletter: NewsletterForm,
    pub shimmer: Shimmer,
    /// Browse listing is showing skeletons
    pub browse_loading_since: Option<Instant>,
}

impl WidgetState {
    fn new(config: &SiteConfig) -> Self {
        let topics = config
            .followed_topics
            .iter()
            .filter_map(|name| Category::ALL.into_iter().find(|c| c.label().eq_ignore_ascii_case(name)));

        Self {
            layout: LayoutSelection::default(),
            carousel: CarouselState::new(TESTIMONIALS.len()),
            share: ShareMenuState::default(),
            feed: FeedState::with_topics(topics),
            toc: TocState::new(FEATURED_HEADINGS),
            banner: BannerState::default(),
            newsletter: NewsletterForm::default(),
            shimmer: Shimmer::default(),
            browse_loading_since: None,
        }
    }

    pub fn browse_loading(&self) -> bool {
        self.browse_loading_since.is_some()
    }
}

/// Main application model containing all state
pub struct AppModel {
    config: SiteConfig,
    playback: Arc<Mutex<PlaybackClock>>,
    pub ui_state: Arc<Mutex<UiState>>,
    widgets: Arc<Mutex<WidgetState>>,
    head: Arc<Mutex<HeadDocument>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(config: SiteConfig) -> Self {
        let article = featured_article();
        let playback = PlaybackClock::new(ListenMetadata {
            title: article.title.to_string(),
            author: article.author.to_string(),
            duration_secs: config.listen_duration_secs,
        });
        let widgets = WidgetState::new(&config);

        Self {
            config,
            playback: Arc::new(Mutex::new(playback)),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            widgets: Arc::new(Mutex::new(widgets)),
            head: Arc::new(Mutex::new(HeadDocument::new())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Playback clock
    // ========================================================================

    pub async fn get_playback(&self) -> PlaybackClock {
        self.playback.lock().await.clone()
    }

    pub async fn is_playing(&self) -> bool {
        self.playback.lock().await.is_playing
    }

    pub async fn playback_rate(&self) -> PlaybackRate {
        self.playback.lock().await.rate
    }

    pub async fn toggle_play(&self) -> bool {
        self.playback.lock().await.toggle_play()
    }

    pub async fn pause_playback(&self) {
        self.playback.lock().await.pause();
    }

    pub async fn skip_forward(&self) -> u32 {
        let mut playback = self.playback.lock().await;
        playback.skip_forward();
        playback.current_secs
    }

    pub async fn skip_back(&self) -> u32 {
        let mut playback = self.playback.lock().await;
        playback.skip_back();
        playback.current_secs
    }

    pub async fn seek_at(&self, x: u16, track_x: u16, track_width: u16) -> u32 {
        let mut playback = self.playback.lock().await;
        playback.seek_at(x, track_x, track_width);
        playback.current_secs
    }

    pub async fn cycle_rate(&self) -> PlaybackRate {
        self.playback.lock().await.cycle_rate()
    }

    pub async fn toggle_mute(&self) -> bool {
        self.playback.lock().await.toggle_mute()
    }

    pub async fn toggle_minimized(&self) -> bool {
        self.playback.lock().await.toggle_minimized()
    }

    pub async fn is_player_minimized(&self) -> bool {
        self.playback.lock().await.is_minimized
    }

    pub async fn tick_playback(&self) -> TickOutcome {
        self.playback.lock().await.tick()
    }

    // ========================================================================
    // Pages, errors & notices
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn active_section(&self) -> ActiveSection {
        self.ui_state.lock().await.active_section
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
        state.head_scroll = 0;
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn set_notice(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(message);
        state.notice_timestamp = Some(Instant::now());
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    /// Scroll the head preview, keeping its last line on screen
    pub async fn scroll_head(&self, down: bool) {
        let last_line = self.head.lock().await.render_html().lines().count().saturating_sub(1);
        let last_line = u16::try_from(last_line).unwrap_or(u16::MAX);

        let mut state = self.ui_state.lock().await;
        state.head_scroll = if down {
            state.head_scroll.saturating_add(1).min(last_line)
        } else {
            state.head_scroll.saturating_sub(1)
        };
    }

    /// Expire every time-based flag as of `now`.
    ///
    /// Called once per frame from the UI loop.
    pub async fn run_timers(&self, now: Instant) {
        {
            let mut state = self.ui_state.lock().await;
            if let Some(timestamp) = state.error_timestamp {
                if now.saturating_duration_since(timestamp).as_secs() >= ERROR_DISPLAY_SECS {
                    state.error_message = None;
                    state.error_timestamp = None;
                }
            }
            if let Some(timestamp) = state.notice_timestamp {
                if now.saturating_duration_since(timestamp).as_secs() >= NOTICE_DISPLAY_SECS {
                    state.notice = None;
                    state.notice_timestamp = None;
                }
            }
        }

        let subscribed = {
            let mut widgets = self.widgets.lock().await;
            if widgets.share.expire_copied(now) {
                tracing::trace!("Copied confirmation cleared");
            }
            if widgets.carousel.autoplay_due(now) {
                tracing::trace!(index = widgets.carousel.active_index, "Carousel autoplay advanced");
            }
            if widgets.feed.finish_refresh_if_due(now) {
                tracing::debug!("Feed refresh finished");
            }
            if let Some(since) = widgets.browse_loading_since {
                if now.saturating_duration_since(since) >= super::feed::REFRESH_DELAY {
                    widgets.browse_loading_since = None;
                }
            }
            if widgets.feed.is_refreshing() || widgets.browse_loading() {
                widgets.shimmer.advance(now);
            }
            widgets.newsletter.finish_if_due(now)
        };

        if subscribed {
            tracing::info!("Newsletter subscription confirmed");
            self.set_notice("You're subscribed! Check your inbox to confirm.".to_string()).await;
        }
    }

    // ========================================================================
    // Widgets
    // ========================================================================

    pub async fn get_widgets(&self) -> WidgetState {
        self.widgets.lock().await.clone()
    }

    /// Run `f` against the widget state while holding its lock
    pub async fn update_widgets<R>(&self, f: impl FnOnce(&mut WidgetState) -> R) -> R {
        let mut widgets = self.widgets.lock().await;
        f(&mut widgets)
    }

    /// Apply a selector change and reload the browse listing
    pub async fn apply_selection<F>(&self, f: F) -> Option<SelectionChange>
    where
        F: FnOnce(&mut LayoutSelection) -> Option<SelectionChange>,
    {
        let mut widgets = self.widgets.lock().await;
        let change = f(&mut widgets.layout)?;
        if matches!(change, SelectionChange::Sort(_) | SelectionChange::Filters(_)) {
            widgets.browse_loading_since = Some(Instant::now());
        }
        Some(change)
    }

    pub async fn is_share_menu_open(&self) -> bool {
        self.widgets.lock().await.share.is_open
    }

    pub async fn mark_link_copied(&self) {
        self.widgets.lock().await.share.mark_copied(Instant::now());
    }

    pub async fn record_share(&self, platform: SharePlatform, url: String) {
        self.widgets.lock().await.share.record_share(platform, url);
    }

    // ========================================================================
    // Page metadata
    // ========================================================================

    pub fn share_payload(&self) -> SharePayload {
        let article = featured_article();
        SharePayload {
            title: article.title.to_string(),
            url: self.config.canonical_url(&article.path()),
            description: article.excerpt.to_string(),
        }
    }

    /// Metadata the given page wants in the document head
    pub fn meta_snapshot(&self, section: ActiveSection) -> MetaSnapshot {
        let config = &self.config;
        let path = route_path(section);

        let base = MetaSnapshot {
            title: config.site_name.clone(),
            description: config.description.clone(),
            keywords: config.keywords.clone(),
            author: config.default_author.clone(),
            image: config.default_image.clone(),
            canonical_url: config.canonical_url(&path),
            site_name: config.site_name.clone(),
            site_url: config.base_url.clone(),
            twitter_site: config.twitter_handle.clone(),
            article: None,
        };

        if section.is_article() {
            let article = featured_article();
            let mut keywords = vec![article.category.label().to_lowercase()];
            keywords.extend(config.keywords.iter().cloned());
            return MetaSnapshot {
                title: article.title.to_string(),
                description: article.excerpt.to_string(),
                keywords,
                author: article.author.to_string(),
                article: Some(ArticleMeta {
                    published_time: published_time(article),
                    author: article.author.to_string(),
                }),
                ..base
            };
        }

        let (title, description) = match section {
            ActiveSection::Browse => ("All Articles", "Every story we have published, newest first."),
            ActiveSection::ForYou => ("For You", "Stories picked for the topics you follow."),
            ActiveSection::Voices => ("What Readers Say", "Readers on why they keep coming back."),
            ActiveSection::Subscribe => ("Subscribe", "Get our best long reads delivered to your inbox."),
            _ => return base,
        };
        MetaSnapshot {
            title: title.to_string(),
            description: description.to_string(),
            ..base
        }
    }

    /// Push the active page's metadata through the head port
    pub async fn sync_metadata(&self) {
        let section = self.active_section().await;
        let snapshot = self.meta_snapshot(section);
        self.head.lock().await.apply(&snapshot);
    }

    pub async fn get_head(&self) -> HeadDocument {
        self.head.lock().await.clone()
    }
}

/// Route path the router would report for a page
pub fn route_path(section: ActiveSection) -> String {
    match section {
        ActiveSection::Listen | ActiveSection::Read => featured_article().path(),
        ActiveSection::Browse => "/articles".to_string(),
        ActiveSection::ForYou => "/for-you".to_string(),
        ActiveSection::Voices => "/testimonials".to_string(),
        ActiveSection::Subscribe => "/newsletter".to_string(),
        ActiveSection::Head => "/".to_string(),
    }
}

fn published_time(article: &Article) -> String {
    article
        .published_date()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seo::JSON_LD_ID;
    use std::time::Duration;

    fn model() -> AppModel {
        AppModel::new(SiteConfig::default())
    }

    #[tokio::test]
    async fn sync_twice_keeps_single_canonical_and_script() {
        let model = model();
        model.sync_metadata().await;
        model.sync_metadata().await;
        let head = model.get_head().await;
        assert_eq!(head.count_links("canonical"), 1);
        assert_eq!(head.count_scripts(JSON_LD_ID), 1);
    }

    #[tokio::test]
    async fn metadata_follows_the_route() {
        let model = model();
        model.sync_metadata().await;
        let head = model.get_head().await;
        assert_eq!(head.meta("og:type"), Some("article"));
        assert_eq!(
            head.canonical(),
            Some("https://pressroom.example.com/articles/the-quiet-revolution-of-edge-computing")
        );
        assert_eq!(head.meta("article:published_time"), Some("2024-03-18T00:00:00+00:00"));

        model.set_active_section(ActiveSection::Subscribe).await;
        model.sync_metadata().await;
        let head = model.get_head().await;
        assert_eq!(head.meta("og:type"), Some("website"));
        assert_eq!(head.canonical(), Some("https://pressroom.example.com/newsletter"));
        assert_eq!(head.title, "Subscribe | The Pressroom");
        assert_eq!(head.count_links("canonical"), 1);
    }

    #[tokio::test]
    async fn home_page_title_is_site_name() {
        let model = model();
        let snapshot = model.meta_snapshot(ActiveSection::Head);
        assert_eq!(snapshot.document_title(), "The Pressroom");
        assert_eq!(snapshot.canonical_url, "https://pressroom.example.com/");
    }

    #[tokio::test]
    async fn configured_topics_seed_the_feed() {
        let model = model();
        let widgets = model.get_widgets().await;
        assert!(widgets.feed.followed.contains(&Category::Technology));
        assert!(widgets.feed.followed.contains(&Category::Design));
        assert_eq!(widgets.feed.followed.len(), 2);
    }

    #[tokio::test]
    async fn timers_expire_copied_flag_and_errors() {
        let model = model();
        model.mark_link_copied().await;
        model.set_error("boom".to_string()).await;
        assert!(model.get_widgets().await.share.copied());

        let later = Instant::now() + Duration::from_millis(2100);
        model.run_timers(later).await;
        assert!(!model.get_widgets().await.share.copied());
        assert!(model.has_error().await);

        model.run_timers(Instant::now() + Duration::from_secs(6)).await;
        assert!(!model.has_error().await);
    }

    #[tokio::test]
    async fn newsletter_completion_posts_a_notice() {
        let model = model();
        model
            .update_widgets(|w| {
                "reader@example.com".chars().for_each(|c| w.newsletter.push_char(c));
                w.newsletter.submit(Instant::now())
            })
            .await;
        model.run_timers(Instant::now() + Duration::from_secs(2)).await;
        let ui = model.get_ui_state().await;
        assert!(ui.notice.is_some());
    }

    #[tokio::test]
    async fn sort_change_shows_browse_skeleton() {
        let model = model();
        let change = model.apply_selection(|l| Some(l.cycle_sort())).await;
        assert!(change.is_some());
        assert!(model.get_widgets().await.browse_loading());

        let layout_only = model.apply_selection(|l| Some(l.cycle_layout())).await;
        assert!(matches!(layout_only, Some(SelectionChange::Layout(_))));
    }

    #[tokio::test]
    async fn playback_controls_round_trip_through_model() {
        let model = model();
        assert!(model.toggle_play().await);
        assert_eq!(model.skip_back().await, 0);
        assert_eq!(model.skip_forward().await, 15);
        assert_eq!(model.seek_at(50, 0, 100).await, 360);
        assert_eq!(model.tick_playback().await, TickOutcome::Advanced);
        assert_eq!(model.get_playback().await.current_secs, 361);
    }

    #[tokio::test]
    async fn head_scroll_stops_at_last_line() {
        let model = model();
        model.sync_metadata().await;
        let lines = model.get_head().await.render_html().lines().count() as u16;

        for _ in 0..lines + 10 {
            model.scroll_head(true).await;
        }
        assert_eq!(model.get_ui_state().await.head_scroll, lines - 1);

        model.scroll_head(false).await;
        assert_eq!(model.get_ui_state().await.head_scroll, lines - 2);
    }
}
