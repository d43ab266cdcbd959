//! Page metadata synchronization
//!
//! Widgets describe the metadata they want as a [`MetaSnapshot`] and hand it
//! to a [`PageMetadataPort`]. [`HeadDocument`] is the in-memory document head
//! used by the app; it creates elements on first use and updates them in
//! place afterwards, so applying the same snapshot twice is a no-op.

use serde_json::{json, Value};

/// Id of the structured-data script element
pub const JSON_LD_ID: &str = "seo-json-ld";

/// Article-only metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleMeta {
    /// RFC 3339 timestamp
    pub published_time: String,
    pub author: String,
}

/// Desired metadata for the current route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaSnapshot {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub image: String,
    pub canonical_url: String,
    pub site_name: String,
    pub site_url: String,
    pub twitter_site: String,
    pub article: Option<ArticleMeta>,
}

impl MetaSnapshot {
    pub fn is_article(&self) -> bool {
        self.article.is_some()
    }

    pub fn document_title(&self) -> String {
        if self.title == self.site_name || self.title.is_empty() {
            self.site_name.clone()
        } else {
            format!("{} | {}", self.title, self.site_name)
        }
    }

    fn og_type(&self) -> &'static str {
        if self.is_article() { "article" } else { "website" }
    }

    /// Named meta tags in document order
    pub fn meta_tags(&self) -> Vec<(MetaKey, String)> {
        let mut tags = vec![
            (MetaKey::name("description"), self.description.clone()),
            (MetaKey::name("keywords"), self.keywords.join(", ")),
            (MetaKey::name("author"), self.author.clone()),
            (MetaKey::property("og:title"), self.title.clone()),
            (MetaKey::property("og:description"), self.description.clone()),
            (MetaKey::property("og:image"), self.image.clone()),
            (MetaKey::property("og:url"), self.canonical_url.clone()),
            (MetaKey::property("og:type"), self.og_type().to_string()),
            (MetaKey::property("og:site_name"), self.site_name.clone()),
            (MetaKey::name("twitter:card"), "summary_large_image".to_string()),
            (MetaKey::name("twitter:site"), self.twitter_site.clone()),
            (MetaKey::name("twitter:title"), self.title.clone()),
            (MetaKey::name("twitter:description"), self.description.clone()),
            (MetaKey::name("twitter:image"), self.image.clone()),
        ];
        if let Some(article) = &self.article {
            tags.push((MetaKey::property("article:published_time"), article.published_time.clone()));
            tags.push((MetaKey::property("article:author"), article.author.clone()));
        }
        tags
    }

    /// schema.org record: `Article` for articles, `WebSite` otherwise
    pub fn structured_data(&self) -> Value {
        match &self.article {
            Some(article) => json!({
                "@context": "https://schema.org",
                "@type": "Article",
                "headline": self.title,
                "description": self.description,
                "image": self.image,
                "url": self.canonical_url,
                "datePublished": article.published_time,
                "author": {
                    "@type": "Person",
                    "name": article.author,
                },
                "publisher": {
                    "@type": "Organization",
                    "name": self.site_name,
                },
                "mainEntityOfPage": {
                    "@type": "WebPage",
                    "@id": self.canonical_url,
                },
            }),
            None => json!({
                "@context": "https://schema.org",
                "@type": "WebSite",
                "name": self.site_name,
                "url": self.site_url,
                "description": self.description,
                "potentialAction": {
                    "@type": "SearchAction",
                    "target": format!("{}/search?q={{search_term_string}}", self.site_url.trim_end_matches('/')),
                    "query-input": "required name=search_term_string",
                },
            }),
        }
    }
}

/// Attribute used to identify a meta tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetaKey {
    pub attr: MetaAttr,
    pub key: &'static str,
}

impl MetaKey {
    const fn name(key: &'static str) -> Self {
        Self { attr: MetaAttr::Name, key }
    }

    const fn property(key: &'static str) -> Self {
        Self { attr: MetaAttr::Property, key }
    }
}

/// A single element in the document head
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadElement {
    Meta { key: MetaKey, content: String },
    Link { rel: String, href: String },
    Script { id: String, script_type: String, body: String },
}

/// Receives metadata snapshots and reflects them in the page
pub trait PageMetadataPort {
    fn apply(&mut self, snapshot: &MetaSnapshot);
}

/// In-memory document head
#[derive(Clone, Debug, Default)]
pub struct HeadDocument {
    pub title: String,
    elements: Vec<HeadElement>,
}

impl HeadDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Meta { key: k, content } if k.key == key => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn canonical(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Link { rel, href } if rel == "canonical" => Some(href.as_str()),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn script(&self, id: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Script { id: i, body, .. } if i == id => Some(body.as_str()),
            _ => None,
        })
    }

    #[cfg(test)]
    pub fn count_links(&self, rel: &str) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, HeadElement::Link { rel: r, .. } if r == rel))
            .count()
    }

    #[cfg(test)]
    pub fn count_scripts(&self, id: &str) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, HeadElement::Script { id: i, .. } if i == id))
            .count()
    }

    fn upsert_meta(&mut self, key: MetaKey, content: String) {
        let existing = self.elements.iter_mut().find_map(|e| match e {
            HeadElement::Meta { key: k, content } if k.key == key.key => Some(content),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = content,
            None => self.elements.push(HeadElement::Meta { key, content }),
        }
    }

    fn remove_meta(&mut self, key: &str) {
        self.elements
            .retain(|e| !matches!(e, HeadElement::Meta { key: k, .. } if k.key == key));
    }

    fn upsert_link(&mut self, rel: &str, href: String) {
        let existing = self.elements.iter_mut().find_map(|e| match e {
            HeadElement::Link { rel: r, href } if r == rel => Some(href),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = href,
            None => self.elements.push(HeadElement::Link { rel: rel.to_string(), href }),
        }
    }

    fn upsert_script(&mut self, id: &str, script_type: &str, body: String) {
        let existing = self.elements.iter_mut().find_map(|e| match e {
            HeadElement::Script { id: i, body, .. } if i == id => Some(body),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = body,
            None => self.elements.push(HeadElement::Script {
                id: id.to_string(),
                script_type: script_type.to_string(),
                body,
            }),
        }
    }

    /// Serialize the head as HTML markup
    pub fn render_html(&self) -> String {
        let mut out = String::from("<head>\n");
        out.push_str(&format!("  <title>{}</title>\n", escape_html(&self.title)));
        for element in &self.elements {
            let line = match element {
                HeadElement::Meta { key, content } => format!(
                    "  <meta {}=\"{}\" content=\"{}\">\n",
                    key.attr.as_str(),
                    key.key,
                    escape_html(content)
                ),
                HeadElement::Link { rel, href } => format!(
                    "  <link rel=\"{}\" href=\"{}\">\n",
                    escape_html(rel),
                    escape_html(href)
                ),
                HeadElement::Script { id, script_type, body } => format!(
                    "  <script type=\"{}\" id=\"{}\">{}</script>\n",
                    escape_html(script_type),
                    escape_html(id),
                    body.replace("</", "<\\/")
                ),
            };
            out.push_str(&line);
        }
        out.push_str("</head>\n");
        out
    }
}

impl PageMetadataPort for HeadDocument {
    fn apply(&mut self, snapshot: &MetaSnapshot) {
        self.title = snapshot.document_title();

        for (key, content) in snapshot.meta_tags() {
            self.upsert_meta(key, content);
        }
        if !snapshot.is_article() {
            self.remove_meta("article:published_time");
            self.remove_meta("article:author");
        }

        self.upsert_link("canonical", snapshot.canonical_url.clone());

        let body = snapshot.structured_data().to_string();
        self.upsert_script(JSON_LD_ID, "application/ld+json", body);

        tracing::debug!(
            title = %self.title,
            canonical = %snapshot.canonical_url,
            article = snapshot.is_article(),
            elements = self.elements.len(),
            "Page metadata synchronized"
        );
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(article: bool) -> MetaSnapshot {
        MetaSnapshot {
            title: "Designing for Calm".to_string(),
            description: "Interfaces that respect attention".to_string(),
            keywords: vec!["design".to_string(), "attention".to_string()],
            author: "Theo Okafor".to_string(),
            image: "https://example.com/og.png".to_string(),
            canonical_url: "https://example.com/articles/designing-for-calm".to_string(),
            site_name: "The Pressroom".to_string(),
            site_url: "https://example.com".to_string(),
            twitter_site: "@pressroom".to_string(),
            article: article.then(|| ArticleMeta {
                published_time: "2024-03-14T00:00:00+00:00".to_string(),
                author: "Theo Okafor".to_string(),
            }),
        }
    }

    #[test]
    fn applying_twice_does_not_duplicate() {
        let mut head = HeadDocument::new();
        head.apply(&snapshot(true));
        let first = head.elements().len();
        head.apply(&snapshot(true));

        assert_eq!(head.elements().len(), first);
        assert_eq!(head.count_links("canonical"), 1);
        assert_eq!(head.count_scripts(JSON_LD_ID), 1);
    }

    #[test]
    fn all_named_tags_are_present_for_articles() {
        let mut head = HeadDocument::new();
        head.apply(&snapshot(true));
        for key in [
            "description", "keywords", "author", "og:title", "og:description", "og:image",
            "og:url", "og:type", "og:site_name", "twitter:card", "twitter:site",
            "twitter:title", "twitter:description", "twitter:image",
            "article:published_time", "article:author",
        ] {
            assert!(head.meta(key).is_some(), "missing {key}");
        }
        assert_eq!(head.meta("og:type"), Some("article"));
        assert_eq!(head.meta("keywords"), Some("design, attention"));
        assert_eq!(head.title, "Designing for Calm | The Pressroom");
    }

    #[test]
    fn updates_in_place_when_route_changes() {
        let mut head = HeadDocument::new();
        head.apply(&snapshot(true));

        let mut home = snapshot(false);
        home.title = "The Pressroom".to_string();
        home.canonical_url = "https://example.com/".to_string();
        head.apply(&home);

        assert_eq!(head.title, "The Pressroom");
        assert_eq!(head.canonical(), Some("https://example.com/"));
        assert_eq!(head.meta("og:type"), Some("website"));
        assert!(head.meta("article:author").is_none());
        assert_eq!(head.count_links("canonical"), 1);
        assert_eq!(head.count_scripts(JSON_LD_ID), 1);
    }

    #[test]
    fn json_ld_switches_on_article_flag() {
        let article: Value = serde_json::from_str(
            &{
                let mut head = HeadDocument::new();
                head.apply(&snapshot(true));
                head.script(JSON_LD_ID).unwrap_or_default().to_string()
            },
        )
        .expect("valid json");
        assert_eq!(article["@type"], "Article");
        assert_eq!(article["author"]["name"], "Theo Okafor");
        assert_eq!(article["datePublished"], "2024-03-14T00:00:00+00:00");

        let site = snapshot(false).structured_data();
        assert_eq!(site["@type"], "WebSite");
        assert_eq!(site["potentialAction"]["target"], "https://example.com/search?q={search_term_string}");
    }

    #[test]
    fn og_tags_use_property_attribute() {
        let tags = snapshot(true).meta_tags();
        for (key, _) in tags {
            let expected = if key.key.starts_with("og:") || key.key.starts_with("article:") {
                MetaAttr::Property
            } else {
                MetaAttr::Name
            };
            assert_eq!(key.attr, expected, "{}", key.key);
        }
    }

    #[test]
    fn rendered_html_escapes_attributes() {
        let mut snap = snapshot(false);
        snap.description = "Tips & \"tricks\"".to_string();
        let mut head = HeadDocument::new();
        head.apply(&snap);
        let html = head.render_html();
        assert!(html.contains("<meta name=\"description\" content=\"Tips &amp; &quot;tricks&quot;\">"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/articles/designing-for-calm\">"));
        assert_eq!(html.matches("application/ld+json").count(), 1);
    }
}
