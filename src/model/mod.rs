//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (pages, UI state)
//! - `content`: Static article, testimonial and heading catalogs
//! - `playback`: Audio player clock
//! - `layout`: Layout/sort/filter selection for the browse page
//! - `carousel`: Testimonial carousel
//! - `share`: Share URLs and share menu state
//! - `seo`: Page metadata snapshots and the in-memory document head
//! - `feed`: Personalized feed panel
//! - `skeleton`: Loading placeholders
//! - `toc`: Table of contents
//! - `banner`: Call-to-action banners
//! - `newsletter`: Subscribe form
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod playback;
mod layout;
mod carousel;
mod share;
mod seo;
mod feed;
mod skeleton;
mod toc;
mod banner;
mod newsletter;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, UiState};

pub use content::{catalog_date, featured_article, Article, Category, ARTICLES, TESTIMONIALS};

pub use playback::{PlaybackClock, PlaybackRate, TickOutcome};

pub use layout::{LayoutSelection, LayoutVariant, SelectionChange, SortKey, FILTERS};

pub use share::{ShareMenuState, SharePayload, SharePlatform};

pub use seo::HeadDocument;

pub use feed::{FeedState, FeedTab};

pub use skeleton::{Shimmer, SkeletonKind};

pub use toc::TocState;

pub use banner::{BannerState, BannerVariant};

pub use newsletter::{Frequency, NewsletterForm, SubscribeStatus};

pub use app_model::{AppModel, WidgetState};
