//! Page rendering (one renderer per tab)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{
    catalog_date, featured_article, ActiveSection, Article, BannerState, Category, FeedState, FeedTab,
    Frequency, LayoutSelection, LayoutVariant, NewsletterForm, SkeletonKind, SortKey, SubscribeStatus, TocState,
    WidgetState, ARTICLES, FILTERS, TESTIMONIALS,
};
use super::skeleton::render_skeletons;
use super::utils::{format_views, render_scrollable_list, stars, truncate_string};
use super::FrameState;

fn page_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green))
}

fn key(label: &str) -> Span<'static> {
    Span::styled(label.to_string(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
}

fn meta_line(article: &Article) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "{} · {} · {} · {} min read · {} views",
            article.category.label(),
            article.author,
            article.published,
            article.read_minutes,
            format_views(article.views)
        ),
        Style::default().fg(Color::DarkGray),
    ))
}

pub fn render_page(frame: &mut Frame, area: Rect, state: &FrameState) {
    match state.ui_state.active_section {
        ActiveSection::Listen => render_listen(frame, area, state),
        ActiveSection::Browse => render_browse(frame, area, &state.widgets),
        ActiveSection::ForYou => render_feed(frame, area, &state.widgets),
        ActiveSection::Read => render_read(frame, area, &state.widgets),
        ActiveSection::Voices => render_voices(frame, area, &state.widgets),
        ActiveSection::Subscribe => render_subscribe(frame, area, &state.widgets.newsletter),
        ActiveSection::Head => render_head(frame, area, state),
    }
}

// ============================================================================
// Listen
// ============================================================================

fn render_listen(frame: &mut Frame, area: Rect, state: &FrameState) {
    let banner = &state.widgets.banner;
    let banner_height = if banner.is_visible() { 5 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(area);

    if banner.is_visible() {
        render_banner(frame, chunks[0], banner);
    }

    let article = featured_article();
    let status = if state.playback.is_playing { "Now playing" } else { "Ready to play" };
    let lines = vec![
        Line::from(Span::styled(
            article.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        meta_line(article),
        Line::default(),
        Line::from(article.excerpt),
        Line::default(),
        Line::from(Span::styled(status, Style::default().fg(Color::Yellow))),
        Line::default(),
        Line::from(vec![
            key("Space"),
            Span::raw(" play/pause  "),
            key("←/→"),
            Span::raw(" skip 15s  "),
            key("R"),
            Span::raw(" speed  "),
            key("M"),
            Span::raw(" mute  "),
            key("Z"),
            Span::raw(" minimize player"),
        ]),
        Line::from(vec![
            Span::raw("Click anywhere on the progress bar to seek."),
        ]),
    ];

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(page_block("Listen"));
    frame.render_widget(body, chunks[1]);
}

fn render_banner(frame: &mut Frame, area: Rect, banner: &BannerState) {
    let variant = banner.variant;
    let lines = vec![
        Line::from(Span::styled(variant.body(), Style::default().fg(Color::White))),
        Line::from(vec![
            key("Enter"),
            Span::raw(format!(" {}  ", variant.action_label())),
            key("B"),
            Span::raw(" next offer  "),
            key("X"),
            Span::raw(" dismiss"),
        ]),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", variant.headline()))
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(widget, area);
}

// ============================================================================
// Browse
// ============================================================================

fn render_browse(frame: &mut Frame, area: Rect, widgets: &WidgetState) {
    let layout = &widgets.layout;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    render_selector(frame, chunks[0], layout);

    let visible = layout.apply(ARTICLES, catalog_date());
    let block = page_block(&format!("Articles ({})", visible.len()));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    if widgets.browse_loading() {
        let kind = match layout.active_layout {
            LayoutVariant::Grid | LayoutVariant::Magazine => SkeletonKind::ArticleCard,
            LayoutVariant::List => SkeletonKind::Paragraph(3),
            LayoutVariant::Compact => SkeletonKind::ListRow,
        };
        render_skeletons(frame, inner, kind, &widgets.shimmer);
        return;
    }

    if visible.is_empty() {
        let empty = Paragraph::new("No articles match these filters. Press C to clear them.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    match layout.active_layout {
        LayoutVariant::Grid => render_grid(frame, inner, &visible),
        LayoutVariant::List => render_list(frame, inner, &visible),
        LayoutVariant::Compact => render_compact(frame, inner, &visible),
        LayoutVariant::Magazine => render_magazine(frame, inner, &visible),
    }
}

fn option_span(label: &str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(Color::White))
    }
}

fn render_selector(frame: &mut Frame, area: Rect, layout: &LayoutSelection) {
    let mut layouts: Vec<Span> = vec![Span::raw("Layout   ")];
    layouts.extend(
        LayoutVariant::ALL
            .iter()
            .map(|variant| option_span(variant.label(), *variant == layout.active_layout)),
    );

    let mut sorts: Vec<Span> = vec![Span::raw("Sort     ")];
    sorts.extend(
        SortKey::ALL
            .iter()
            .map(|sort| option_span(sort.label(), *sort == layout.active_sort)),
    );

    let mut filters: Vec<Span> = vec![Span::raw("Filters  ")];
    for (i, def) in FILTERS.iter().enumerate() {
        let value = layout.filter_value(def.id);
        let style = if i == layout.focused_filter {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else if value != def.sentinel() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        filters.push(Span::styled(format!(" {}: {} ", def.label, value), style));
        filters.push(Span::raw(" "));
    }

    let selector = Paragraph::new(vec![Line::from(layouts), Line::from(sorts), Line::from(filters)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" View ")
            .title_bottom(Line::from(" L layout | O sort | F next filter | ←/→ value | C clear ").right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(selector, area);
}

fn card_lines(article: &Article, width: u16) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            truncate_string(article.title, width as usize),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_string(article.excerpt, width as usize),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("{} · {} min", article.category.label(), article.read_minutes),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ]
}

fn render_grid(frame: &mut Frame, area: Rect, articles: &[&Article]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (col, column_area) in columns.iter().enumerate() {
        let lines: Vec<Line> = articles
            .iter()
            .skip(col)
            .step_by(2)
            .flat_map(|a| card_lines(a, column_area.width.saturating_sub(2)))
            .collect();
        frame.render_widget(Paragraph::new(lines), *column_area);
    }
}

fn render_list(frame: &mut Frame, area: Rect, articles: &[&Article]) {
    let lines: Vec<Line> = articles
        .iter()
        .flat_map(|a| {
            vec![
                Line::from(Span::styled(
                    a.title,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                meta_line(a),
                Line::from(Span::styled(
                    truncate_string(a.excerpt, area.width as usize),
                    Style::default().fg(Color::Gray),
                )),
                Line::default(),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_compact(frame: &mut Frame, area: Rect, articles: &[&Article]) {
    let title_width = area.width.saturating_sub(24) as usize;
    let lines: Vec<Line> = articles
        .iter()
        .map(|a| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", truncate_string(a.title, title_width), width = title_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!(" {:>10} {:>4}m", a.published, a.read_minutes),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_magazine(frame: &mut Frame, area: Rect, articles: &[&Article]) {
    let Some((lead, rest)) = articles.split_first() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let lead_lines = vec![
        Line::from(Span::styled(
            "FEATURED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            lead.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(lead.excerpt),
        meta_line(lead),
    ];
    frame.render_widget(Paragraph::new(lead_lines).wrap(Wrap { trim: true }), chunks[0]);

    render_grid(frame, chunks[1], rest);
}

// ============================================================================
// For You
// ============================================================================

fn render_feed(frame: &mut Frame, area: Rect, widgets: &WidgetState) {
    let feed = &widgets.feed;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_feed_header(frame, chunks[0], feed);

    let visible = feed.visible(ARTICLES);
    let block = page_block(feed.tab.label());

    if feed.is_refreshing() {
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        render_skeletons(frame, inner, SkeletonKind::ListRow, &widgets.shimmer);
        return;
    }

    if visible.is_empty() {
        let hint = match feed.tab {
            FeedTab::Saved => "Nothing saved yet. Press B on a story to bookmark it.",
            _ => "Follow a topic with ] and T to fill your feed.",
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let width = chunks[1].width.saturating_sub(10) as usize;
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let mark = if feed.is_bookmarked(article.id) { "★" } else { " " };
            let style = if i == feed.selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(format!("{} {}", mark, truncate_string(article.title, width))),
                Line::from(Span::styled(
                    format!(
                        "  {} · {} min · {} views",
                        article.category.label(),
                        article.read_minutes,
                        format_views(article.views)
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .style(style)
        })
        .collect();

    render_scrollable_list(frame, chunks[1], items, feed.selected, block);
}

fn render_feed_header(frame: &mut Frame, area: Rect, feed: &FeedState) {
    let mut tabs: Vec<Span> = Vec::new();
    for tab in FeedTab::ALL {
        let style = if tab == feed.tab {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        tabs.push(Span::styled(format!(" {} ", tab.label()), style));
        tabs.push(Span::raw(" "));
    }
    tabs.push(Span::styled(
        format!("  {} saved", feed.bookmarks.len()),
        Style::default().fg(Color::DarkGray),
    ));

    let mut topics: Vec<Span> = vec![Span::raw("Topics: ")];
    let cursor = feed.cursor_topic();
    for topic in Category::ALL {
        let followed = feed.followed.contains(&topic);
        let mut style = if followed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if topic == cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        let mark = if followed { "✓" } else { "+" };
        topics.push(Span::styled(format!("{}{} ", mark, topic.label()), style));
    }

    let header = Paragraph::new(vec![Line::from(tabs), Line::from(topics)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your Feed ")
            .title_bottom(Line::from(" ←/→ tab | ↑/↓ move | B save | ] T topics | R refresh ").right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

// ============================================================================
// Read
// ============================================================================

fn render_read(frame: &mut Frame, area: Rect, widgets: &WidgetState) {
    let toc_width = if widgets.toc.collapsed { 18 } else { 30 };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(toc_width), Constraint::Min(0)])
        .split(area);

    render_toc(frame, chunks[0], &widgets.toc);

    let article = featured_article();
    let mut lines = vec![
        Line::from(Span::styled(
            article.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        meta_line(article),
        Line::default(),
    ];

    if let Some(heading) = widgets.toc.active_heading() {
        let indent = if heading.level > 2 { "  " } else { "" };
        lines.push(Line::from(Span::styled(
            format!("{}{} {}", indent, "#".repeat(heading.level as usize), heading.text),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(article.excerpt));
        lines.push(Line::default());
    }

    let copied = if widgets.share.copied() {
        Span::styled("  ✓ Copied!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("")
    };
    lines.push(Line::from(vec![
        key("S"),
        Span::raw(" share  "),
        key("Y"),
        Span::raw(" copy link"),
        copied,
    ]));

    if let Some((platform, url)) = &widgets.share.last_shared {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("{} share link:", platform.label()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(url.clone(), Style::default().fg(Color::Cyan))));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(page_block("Read"));
    frame.render_widget(body, chunks[1]);
}

fn render_toc(frame: &mut Frame, area: Rect, toc: &TocState) {
    let percent = (toc.progress() * 100.0).round() as u16;
    let title = format!(" Contents {}% ", percent);

    if toc.collapsed {
        let collapsed = Paragraph::new(Line::from(vec![key("C"), Span::raw(" expand")]))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(collapsed, area);
        return;
    }

    let lines: Vec<Line> = toc
        .headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let indent = "  ".repeat(heading.level.saturating_sub(2) as usize);
            let style = if i == toc.active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i < toc.active {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if i == toc.active { "▸ " } else { "  " };
            Line::from(Span::styled(format!("{}{}{}", marker, indent, heading.text), style))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(Line::from(" ↑/↓ C ").right_aligned()),
    );
    frame.render_widget(widget, area);
}

// ============================================================================
// Voices
// ============================================================================

fn render_voices(frame: &mut Frame, area: Rect, widgets: &WidgetState) {
    let carousel = &widgets.carousel;
    let block = page_block("What Readers Say");

    let Some(testimonial) = TESTIMONIALS.get(carousel.active_index) else {
        frame.render_widget(Paragraph::new("No testimonials yet.").block(block), area);
        return;
    };

    let dots: Vec<Span> = (0..carousel.len())
        .map(|i| {
            if i == carousel.active_index {
                Span::styled("● ", Style::default().fg(Color::Green))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();

    let autoplay = if carousel.autoplay { "Autoplay on" } else { "Autoplay paused" };

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(stars(testimonial.rating), Style::default().fg(Color::Yellow))),
        Line::default(),
        Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", testimonial.quote),
            Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            testimonial.name,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}, {}", testimonial.role, testimonial.company),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(dots),
        Line::default(),
        Line::from(vec![
            key("←/→"),
            Span::raw(" previous/next  "),
            key("1-9"),
            Span::raw(" jump  "),
            key("P"),
            Span::raw(format!(" {}", autoplay)),
        ]),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(widget, area);
}

// ============================================================================
// Subscribe
// ============================================================================

fn render_subscribe(frame: &mut Frame, area: Rect, form: &NewsletterForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Pitch
            Constraint::Length(3), // Email field
            Constraint::Length(5), // Frequency
            Constraint::Min(0),    // Status
        ])
        .split(area);

    let pitch = Paragraph::new(vec![
        Line::from(Span::styled(
            "Stay in the loop",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from("Our best long reads, delivered on your schedule."),
    ])
    .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(pitch, chunks[0]);

    let field_style = if form.is_locked() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let email_text = if form.email.is_empty() {
        Span::styled("you@example.com", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(format!("{}▏", form.email), field_style)
    };
    let email = Paragraph::new(Line::from(email_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Email ")
            .padding(Padding::horizontal(1))
            .border_style(match form.status {
                SubscribeStatus::Invalid(_) => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::Green),
            }),
    );
    frame.render_widget(email, chunks[1]);

    let options: Vec<Line> = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly]
        .into_iter()
        .map(|frequency| {
            if frequency == form.frequency {
                Line::from(Span::styled(
                    format!("(•) {}", frequency.label()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("( ) {}", frequency.label()))
            }
        })
        .collect();
    let frequency = Paragraph::new(options).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" How often? (↑/↓) ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(frequency, chunks[2]);

    let status = match &form.status {
        SubscribeStatus::Idle => Line::from(vec![
            key("Enter"),
            Span::raw(" subscribe  "),
            key("Esc"),
            Span::raw(" clear  "),
            key("Ctrl+Q"),
            Span::raw(" quit"),
        ]),
        SubscribeStatus::Invalid(reason) => {
            Line::from(Span::styled(reason.clone(), Style::default().fg(Color::Red)))
        }
        SubscribeStatus::Submitting { .. } => {
            Line::from(Span::styled("Subscribing...", Style::default().fg(Color::Yellow)))
        }
        SubscribeStatus::Subscribed => Line::from(vec![
            Span::styled(
                format!("✓ Subscribed to the {}. ", form.frequency.label().to_lowercase()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            key("Enter"),
            Span::raw(" to use another address"),
        ]),
    };
    frame.render_widget(
        Paragraph::new(status).block(Block::default().padding(Padding::horizontal(2))),
        chunks[3],
    );
}

// ============================================================================
// Head
// ============================================================================

fn render_head(frame: &mut Frame, area: Rect, state: &FrameState) {
    let html = state.head.render_html();
    let lines: Vec<Line> = html
        .lines()
        .map(|line| {
            let style = if line.trim_start().starts_with("<title") {
                Style::default().fg(Color::Yellow)
            } else if line.contains("property=\"article:") {
                Style::default().fg(Color::Magenta)
            } else if line.trim_start().starts_with("<link") {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect();

    let summary = format!(
        " {} elements | og:type {} | {} ",
        state.head.elements().len(),
        state.head.meta("og:type").unwrap_or("-"),
        state.head.canonical().unwrap_or("no canonical")
    );

    let widget = Paragraph::new(lines)
        .scroll((state.ui_state.head_scroll, 0))
        .block(
            page_block("Document Head")
                .title_bottom(Line::from(summary))
                .title_bottom(Line::from(" ↑/↓ scroll ").right_aligned()),
        );
    frame.render_widget(widget, area);
}
