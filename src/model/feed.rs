//! Personalized content feed panel

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use super::content::{Article, Category};

/// Simulated latency of a feed refresh
pub const REFRESH_DELAY: Duration = Duration::from_millis(800);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeedTab {
    #[default]
    ForYou,
    Trending,
    Saved,
}

impl FeedTab {
    pub const ALL: [FeedTab; 3] = [FeedTab::ForYou, FeedTab::Trending, FeedTab::Saved];

    pub fn label(self) -> &'static str {
        match self {
            FeedTab::ForYou => "For You",
            FeedTab::Trending => "Trending",
            FeedTab::Saved => "Saved",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FeedTab::ForYou => FeedTab::Trending,
            FeedTab::Trending => FeedTab::Saved,
            FeedTab::Saved => FeedTab::ForYou,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FeedTab::ForYou => FeedTab::Saved,
            FeedTab::Trending => FeedTab::ForYou,
            FeedTab::Saved => FeedTab::Trending,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FeedState {
    pub tab: FeedTab,
    pub followed: BTreeSet<Category>,
    pub bookmarks: BTreeSet<u32>,
    pub selected: usize,
    /// Cursor in the topic chip row
    pub topic_cursor: usize,
    refreshing_since: Option<Instant>,
}

impl FeedState {
    pub fn with_topics(topics: impl IntoIterator<Item = Category>) -> Self {
        Self {
            followed: topics.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Articles visible under the current tab
    pub fn visible<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        match self.tab {
            FeedTab::ForYou => articles
                .iter()
                .filter(|a| self.followed.is_empty() || self.followed.contains(&a.category))
                .collect(),
            FeedTab::Trending => {
                let mut list: Vec<&Article> = articles.iter().collect();
                list.sort_by(|a, b| b.views.cmp(&a.views));
                list
            }
            FeedTab::Saved => articles
                .iter()
                .filter(|a| self.bookmarks.contains(&a.id))
                .collect(),
        }
    }

    pub fn set_tab(&mut self, tab: FeedTab) {
        self.tab = tab;
        self.selected = 0;
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, visible_len: usize) {
        if self.selected + 1 < visible_len {
            self.selected += 1;
        }
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp_selection(&mut self, visible_len: usize) {
        self.selected = self.selected.min(visible_len.saturating_sub(1));
    }

    /// Returns whether the article is now bookmarked
    pub fn toggle_bookmark(&mut self, article_id: u32) -> bool {
        if self.bookmarks.remove(&article_id) {
            false
        } else {
            self.bookmarks.insert(article_id);
            true
        }
    }

    pub fn is_bookmarked(&self, article_id: u32) -> bool {
        self.bookmarks.contains(&article_id)
    }

    /// Returns whether the topic is now followed
    pub fn toggle_topic(&mut self, topic: Category) -> bool {
        self.selected = 0;
        if self.followed.remove(&topic) {
            false
        } else {
            self.followed.insert(topic);
            true
        }
    }

    pub fn cursor_topic(&self) -> Category {
        Category::ALL[self.topic_cursor % Category::ALL.len()]
    }

    pub fn move_topic_cursor(&mut self) {
        self.topic_cursor = (self.topic_cursor + 1) % Category::ALL.len();
    }

    pub fn start_refresh(&mut self, now: Instant) {
        self.refreshing_since = Some(now);
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing_since.is_some()
    }

    /// Finish a pending refresh once the simulated delay passed
    pub fn finish_refresh_if_due(&mut self, now: Instant) -> bool {
        match self.refreshing_since {
            Some(since) if now.saturating_duration_since(since) >= REFRESH_DELAY => {
                self.refreshing_since = None;
                self.selected = 0;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ARTICLES;

    #[test]
    fn for_you_shows_everything_without_topics() {
        let feed = FeedState::default();
        assert_eq!(feed.visible(ARTICLES).len(), ARTICLES.len());
    }

    #[test]
    fn for_you_filters_by_followed_topics() {
        let feed = FeedState::with_topics([Category::Design, Category::Science]);
        let ids: Vec<u32> = feed.visible(ARTICLES).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 4, 7]);
    }

    #[test]
    fn trending_orders_by_views() {
        let mut feed = FeedState::default();
        feed.set_tab(FeedTab::Trending);
        let visible = feed.visible(ARTICLES);
        assert_eq!(visible.first().map(|a| a.id), Some(4));
        assert!(visible.windows(2).all(|w| w[0].views >= w[1].views));
    }

    #[test]
    fn bookmarks_populate_saved_tab() {
        let mut feed = FeedState::default();
        assert!(feed.toggle_bookmark(3));
        assert!(feed.toggle_bookmark(5));
        assert!(!feed.toggle_bookmark(3));
        feed.set_tab(FeedTab::Saved);
        let ids: Vec<u32> = feed.visible(ARTICLES).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        for tab in FeedTab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(FeedTab::Saved.next(), FeedTab::ForYou);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut feed = FeedState::default();
        feed.move_up();
        assert_eq!(feed.selected, 0);
        feed.move_down(2);
        feed.move_down(2);
        assert_eq!(feed.selected, 1);
        feed.clamp_selection(0);
        assert_eq!(feed.selected, 0);
    }

    #[test]
    fn refresh_completes_after_delay() {
        let mut feed = FeedState::default();
        let t0 = Instant::now();
        feed.start_refresh(t0);
        assert!(feed.is_refreshing());
        assert!(!feed.finish_refresh_if_due(t0 + Duration::from_millis(799)));
        assert!(feed.finish_refresh_if_due(t0 + REFRESH_DELAY));
        assert!(!feed.is_refreshing());
    }
}
