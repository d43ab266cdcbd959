//! Layout, sort and filter selection for the browse page

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::content::Article;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutVariant {
    #[default]
    Grid,
    List,
    Compact,
    Magazine,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 4] = [
        LayoutVariant::Grid,
        LayoutVariant::List,
        LayoutVariant::Compact,
        LayoutVariant::Magazine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LayoutVariant::Grid => "Grid",
            LayoutVariant::List => "List",
            LayoutVariant::Compact => "Compact",
            LayoutVariant::Magazine => "Magazine",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LayoutVariant::Grid => LayoutVariant::List,
            LayoutVariant::List => LayoutVariant::Compact,
            LayoutVariant::Compact => LayoutVariant::Magazine,
            LayoutVariant::Magazine => LayoutVariant::Grid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Latest,
    Oldest,
    Popular,
    Trending,
    ReadTime,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Latest,
        SortKey::Oldest,
        SortKey::Popular,
        SortKey::Trending,
        SortKey::ReadTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Latest => "Latest",
            SortKey::Oldest => "Oldest",
            SortKey::Popular => "Most Popular",
            SortKey::Trending => "Trending",
            SortKey::ReadTime => "Read Time",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::Latest => SortKey::Oldest,
            SortKey::Oldest => SortKey::Popular,
            SortKey::Popular => SortKey::Trending,
            SortKey::Trending => SortKey::ReadTime,
            SortKey::ReadTime => SortKey::Latest,
        }
    }
}

/// A filter category. The first option is the "no filter" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterDef {
    pub id: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

impl FilterDef {
    pub fn sentinel(&self) -> &'static str {
        self.options[0]
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.contains(&value)
    }
}

pub const FILTER_CATEGORY: &str = "category";
pub const FILTER_READ_TIME: &str = "read_time";
pub const FILTER_DATE: &str = "date";

pub const FILTERS: &[FilterDef] = &[
    FilterDef {
        id: FILTER_CATEGORY,
        label: "Category",
        options: &["All", "Technology", "Design", "Business", "Science", "Culture"],
    },
    FilterDef {
        id: FILTER_READ_TIME,
        label: "Read Time",
        options: &["Any", "Under 5 min", "5-10 min", "Over 10 min"],
    },
    FilterDef {
        id: FILTER_DATE,
        label: "Published",
        options: &["Any Time", "This Week", "This Month", "This Year"],
    },
];

pub fn filter_def(id: &str) -> Option<&'static FilterDef> {
    FILTERS.iter().find(|f| f.id == id)
}

/// Notification forwarded to the page hosting the selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Layout(LayoutVariant),
    Sort(SortKey),
    Filters(BTreeMap<String, String>),
}

/// Authoritative UI copy of the browse selection
#[derive(Clone, Debug, Default)]
pub struct LayoutSelection {
    pub active_layout: LayoutVariant,
    pub active_sort: SortKey,
    pub active_filters: BTreeMap<String, String>,
    /// Filter row that arrow keys operate on
    pub focused_filter: usize,
}

impl LayoutSelection {
    pub fn select_layout(&mut self, layout: LayoutVariant) -> SelectionChange {
        self.active_layout = layout;
        SelectionChange::Layout(layout)
    }

    pub fn select_sort(&mut self, sort: SortKey) -> SelectionChange {
        self.active_sort = sort;
        SelectionChange::Sort(sort)
    }

    /// Choose `value` for filter `id`. Unknown filters or values are ignored.
    pub fn select_filter(&mut self, id: &str, value: &str) -> Option<SelectionChange> {
        let def = filter_def(id)?;
        if !def.has_option(value) {
            return None;
        }
        if value == def.sentinel() {
            self.active_filters.remove(id);
        } else {
            self.active_filters.insert(id.to_string(), value.to_string());
        }
        Some(SelectionChange::Filters(self.active_filters.clone()))
    }

    pub fn clear_filters(&mut self) -> SelectionChange {
        self.active_filters.clear();
        SelectionChange::Filters(BTreeMap::new())
    }

    /// Value shown for a filter, the sentinel when nothing is chosen
    pub fn filter_value(&self, id: &str) -> &str {
        match self.active_filters.get(id) {
            Some(value) => value.as_str(),
            None => filter_def(id).map(|d| d.sentinel()).unwrap_or(""),
        }
    }

    pub fn cycle_layout(&mut self) -> SelectionChange {
        self.select_layout(self.active_layout.next())
    }

    pub fn cycle_sort(&mut self) -> SelectionChange {
        self.select_sort(self.active_sort.next())
    }

    pub fn focus_next_filter(&mut self) {
        self.focused_filter = (self.focused_filter + 1) % FILTERS.len();
    }

    /// Step the focused filter to its next (or previous) option
    pub fn cycle_focused_filter(&mut self, forward: bool) -> Option<SelectionChange> {
        let def = FILTERS.get(self.focused_filter)?;
        let current = self.filter_value(def.id);
        let index = def.options.iter().position(|o| *o == current).unwrap_or(0);
        let len = def.options.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.select_filter(def.id, def.options[next])
    }

    /// Filter and sort `articles` against the current selection.
    ///
    /// Date filters are relative to `today`.
    pub fn apply<'a>(&self, articles: &'a [Article], today: NaiveDate) -> Vec<&'a Article> {
        let mut visible: Vec<&Article> = articles
            .iter()
            .filter(|a| self.matches(a, today))
            .collect();

        match self.active_sort {
            SortKey::Latest => visible.sort_by(|a, b| b.published.cmp(a.published)),
            SortKey::Oldest => visible.sort_by(|a, b| a.published.cmp(b.published)),
            SortKey::Popular => visible.sort_by(|a, b| b.views.cmp(&a.views)),
            SortKey::Trending => visible.sort_by(|a, b| b.trending_score.cmp(&a.trending_score)),
            SortKey::ReadTime => visible.sort_by(|a, b| a.read_minutes.cmp(&b.read_minutes)),
        }
        visible
    }

    fn matches(&self, article: &Article, today: NaiveDate) -> bool {
        self.active_filters.iter().all(|(id, value)| match id.as_str() {
            FILTER_CATEGORY => article.category.label() == value.as_str(),
            FILTER_READ_TIME => match value.as_str() {
                "Under 5 min" => article.read_minutes < 5,
                "5-10 min" => (5..=10).contains(&article.read_minutes),
                "Over 10 min" => article.read_minutes > 10,
                _ => true,
            },
            FILTER_DATE => {
                let Some(published) = article.published_date() else {
                    return false;
                };
                let age_days = (today - published).num_days();
                match value.as_str() {
                    "This Week" => (0..7).contains(&age_days),
                    "This Month" => (0..31).contains(&age_days),
                    "This Year" => (0..366).contains(&age_days),
                    _ => true,
                }
            }
            _ => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::ARTICLES;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn sentinel_removes_filter() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_CATEGORY, "Design");
        assert_eq!(sel.active_filters.get(FILTER_CATEGORY).map(String::as_str), Some("Design"));

        let change = sel.select_filter(FILTER_CATEGORY, "All");
        assert!(!sel.active_filters.contains_key(FILTER_CATEGORY));
        assert_eq!(change, Some(SelectionChange::Filters(BTreeMap::new())));
    }

    #[test]
    fn non_sentinel_overwrites() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_CATEGORY, "Design");
        sel.select_filter(FILTER_CATEGORY, "Science");
        assert_eq!(sel.active_filters.len(), 1);
        assert_eq!(sel.filter_value(FILTER_CATEGORY), "Science");
    }

    #[test]
    fn every_sentinel_is_honored() {
        let mut sel = LayoutSelection::default();
        for def in FILTERS {
            sel.select_filter(def.id, def.options[1]);
        }
        assert_eq!(sel.active_filters.len(), FILTERS.len());
        for def in FILTERS {
            sel.select_filter(def.id, def.sentinel());
        }
        assert!(sel.active_filters.is_empty());
    }

    #[test]
    fn unknown_filter_or_value_is_ignored() {
        let mut sel = LayoutSelection::default();
        assert_eq!(sel.select_filter("colour", "Red"), None);
        assert_eq!(sel.select_filter(FILTER_CATEGORY, "Sports"), None);
        assert!(sel.active_filters.is_empty());
    }

    #[test]
    fn clear_notifies_with_empty_mapping() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_DATE, "This Year");
        sel.select_filter(FILTER_READ_TIME, "Over 10 min");
        assert_eq!(sel.clear_filters(), SelectionChange::Filters(BTreeMap::new()));
        assert!(sel.active_filters.is_empty());
    }

    #[test]
    fn layout_and_sort_selection_notify() {
        let mut sel = LayoutSelection::default();
        assert_eq!(sel.select_layout(LayoutVariant::Magazine), SelectionChange::Layout(LayoutVariant::Magazine));
        assert_eq!(sel.cycle_layout(), SelectionChange::Layout(LayoutVariant::Grid));
        assert_eq!(sel.select_sort(SortKey::ReadTime), SelectionChange::Sort(SortKey::ReadTime));
        assert_eq!(sel.cycle_sort(), SelectionChange::Sort(SortKey::Latest));
    }

    #[test]
    fn cycling_focused_filter_wraps_through_sentinel() {
        let mut sel = LayoutSelection::default();
        sel.focused_filter = 1;
        sel.cycle_focused_filter(false);
        assert_eq!(sel.filter_value(FILTER_READ_TIME), "Over 10 min");
        sel.cycle_focused_filter(true);
        assert_eq!(sel.filter_value(FILTER_READ_TIME), "Any");
        assert!(sel.active_filters.is_empty());
    }

    #[test]
    fn apply_filters_by_category_and_sorts_by_views() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_CATEGORY, "Technology");
        sel.select_sort(SortKey::Popular);
        let visible = sel.apply(ARTICLES, today());
        let ids: Vec<u32> = visible.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 6]);
    }

    #[test]
    fn apply_filters_by_read_time() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_READ_TIME, "Under 5 min");
        sel.select_sort(SortKey::ReadTime);
        let ids: Vec<u32> = sel.apply(ARTICLES, today()).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 4]);
    }

    #[test]
    fn apply_filters_by_date_window() {
        let mut sel = LayoutSelection::default();
        sel.select_filter(FILTER_DATE, "This Week");
        sel.select_sort(SortKey::Oldest);
        let ids: Vec<u32> = sel.apply(ARTICLES, today()).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1, 6]);
    }

    #[test]
    fn latest_sort_orders_by_date() {
        let sel = LayoutSelection::default();
        let visible = sel.apply(ARTICLES, today());
        assert_eq!(visible.first().map(|a| a.id), Some(6));
        assert_eq!(visible.last().map(|a| a.id), Some(7));
    }
}
