//! Static content catalogs rendered by the widgets
//!
//! Everything here is mock data compiled into the binary.

use chrono::NaiveDate;

/// Editorial category, also used as a followable feed topic
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Technology,
    Design,
    Business,
    Science,
    Culture,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technology,
        Category::Design,
        Category::Business,
        Category::Science,
        Category::Culture,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Design => "Design",
            Category::Business => "Business",
            Category::Science => "Science",
            Category::Culture => "Culture",
        }
    }
}

/// An article card
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub id: u32,
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub author: &'static str,
    pub category: Category,
    /// ISO date, `YYYY-MM-DD`
    pub published: &'static str,
    pub read_minutes: u32,
    pub views: u32,
    pub trending_score: u32,
}

impl Article {
    pub fn published_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.published, "%Y-%m-%d").ok()
    }

    pub fn path(&self) -> String {
        format!("/articles/{}", self.slug)
    }
}

pub const ARTICLES: &[Article] = &[
    Article {
        id: 1,
        slug: "the-quiet-revolution-of-edge-computing",
        title: "The Quiet Revolution of Edge Computing",
        excerpt: "Why the next wave of infrastructure is moving closer to the people who use it.",
        author: "Maya Lindqvist",
        category: Category::Technology,
        published: "2024-03-18",
        read_minutes: 12,
        views: 18_420,
        trending_score: 87,
    },
    Article {
        id: 2,
        slug: "designing-for-calm",
        title: "Designing for Calm",
        excerpt: "Interfaces that respect attention are quietly winning over their noisier rivals.",
        author: "Theo Okafor",
        category: Category::Design,
        published: "2024-03-14",
        read_minutes: 7,
        views: 9_310,
        trending_score: 64,
    },
    Article {
        id: 3,
        slug: "small-teams-big-margins",
        title: "Small Teams, Big Margins",
        excerpt: "How lean companies are rewriting the economics of software.",
        author: "Priya Raman",
        category: Category::Business,
        published: "2024-02-27",
        read_minutes: 9,
        views: 22_050,
        trending_score: 71,
    },
    Article {
        id: 4,
        slug: "the-physics-of-a-perfect-espresso",
        title: "The Physics of a Perfect Espresso",
        excerpt: "Pressure, temperature and a surprising amount of fluid dynamics.",
        author: "Jonas Weber",
        category: Category::Science,
        published: "2024-03-02",
        read_minutes: 4,
        views: 31_700,
        trending_score: 92,
    },
    Article {
        id: 5,
        slug: "reading-in-the-age-of-feeds",
        title: "Reading in the Age of Feeds",
        excerpt: "Long-form writing finds new audiences in unexpected places.",
        author: "Amara Diallo",
        category: Category::Culture,
        published: "2024-01-22",
        read_minutes: 15,
        views: 6_880,
        trending_score: 40,
    },
    Article {
        id: 6,
        slug: "type-systems-you-can-feel",
        title: "Type Systems You Can Feel",
        excerpt: "What strongly typed languages teach us about product design.",
        author: "Maya Lindqvist",
        category: Category::Technology,
        published: "2024-03-20",
        read_minutes: 6,
        views: 12_960,
        trending_score: 78,
    },
    Article {
        id: 7,
        slug: "color-as-information",
        title: "Color as Information",
        excerpt: "Palettes that carry meaning, and the ones that only carry noise.",
        author: "Theo Okafor",
        category: Category::Design,
        published: "2023-12-05",
        read_minutes: 3,
        views: 4_150,
        trending_score: 22,
    },
    Article {
        id: 8,
        slug: "the-subscription-fatigue-myth",
        title: "The Subscription Fatigue Myth",
        excerpt: "Readers still pay for what they value. They just value different things.",
        author: "Priya Raman",
        category: Category::Business,
        published: "2024-03-10",
        read_minutes: 11,
        views: 15_240,
        trending_score: 69,
    },
];

/// Article presented on the read and listen pages
pub fn featured_article() -> &'static Article {
    &ARTICLES[0]
}

/// Date of the newest article; relative date filters count back from here
pub fn catalog_date() -> NaiveDate {
    ARTICLES
        .iter()
        .filter_map(Article::published_date)
        .max()
        .unwrap_or_default()
}

/// A reader testimonial
#[derive(Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub rating: u8,
}

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "The only newsletter I read end to end every single week.",
        name: "Sofia Marquez",
        role: "Product Lead",
        company: "Northwind",
        rating: 5,
    },
    Testimonial {
        quote: "Thoughtful, well researched and never in a hurry. Exactly what I want from a publication.",
        name: "Daniel Cho",
        role: "Staff Engineer",
        company: "Lumen Labs",
        rating: 5,
    },
    Testimonial {
        quote: "The audio versions turned my commute into the best part of my day.",
        name: "Hannah Becker",
        role: "Designer",
        company: "Studio Forma",
        rating: 4,
    },
    Testimonial {
        quote: "I forward at least one piece a week to my whole team.",
        name: "Kwame Mensah",
        role: "Founder",
        company: "Brightpath",
        rating: 5,
    },
];

/// A heading in the featured article's table of contents
#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    pub id: &'static str,
    pub text: &'static str,
    pub level: u8,
}

pub const FEATURED_HEADINGS: &[Heading] = &[
    Heading { id: "introduction", text: "Introduction", level: 2 },
    Heading { id: "what-is-the-edge", text: "What is the edge?", level: 2 },
    Heading { id: "latency-budgets", text: "Latency budgets", level: 3 },
    Heading { id: "data-gravity", text: "Data gravity", level: 3 },
    Heading { id: "who-is-building-it", text: "Who is building it", level: 2 },
    Heading { id: "open-problems", text: "Open problems", level: 2 },
    Heading { id: "conclusion", text: "Conclusion", level: 2 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_dates_parse() {
        for article in ARTICLES {
            assert!(article.published_date().is_some(), "bad date on {}", article.slug);
        }
    }

    #[test]
    fn article_ids_are_unique() {
        let mut ids: Vec<u32> = ARTICLES.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ARTICLES.len());
    }

    #[test]
    fn catalog_date_is_newest_article() {
        assert_eq!(catalog_date(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
    }
}
