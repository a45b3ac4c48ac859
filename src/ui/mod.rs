use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::{Duration, Instant};

pub mod inputs;
pub mod theme;
pub mod viewport;

use crate::cart::Cart;
use crate::catalog::{categories, CatalogClient, Pager, Query, SortMode, ALL_CATEGORIES};
use crate::config::Settings;
use crate::view::visible_products;
use theme::Theme;

/// High-level actions emitted by the input layer and handled by the event
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Up,
    Down,
    EditSearch,
    NextCategory,
    NextSort,
    AddToCart,
    ToggleCart,
    IncrementQuantity,
    DecrementQuantity,
    ToggleTheme,
    Retry,
    Help,
    Quit,
}

struct AppState {
    client: CatalogClient,
    pager: Pager,
    categories: Vec<String>, // index 0 is always "all"
    category_index: usize,
    search_input: String,
    editing_search: bool,
    sort: SortMode,
    cart: Cart,
    show_cart: bool,
    show_help: bool,
    theme: Theme,
    viewport: viewport::Viewport,
    list_height: usize,
    started: Instant,
}

impl AppState {
    fn new(settings: &Settings, client: CatalogClient, slugs: Vec<String>) -> Self {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        categories.extend(slugs);
        // A category given on the command line stays selectable even when
        // the category endpoint did not list it (or was unreachable).
        if !categories.contains(&settings.category) {
            categories.push(settings.category.clone());
        }
        let category_index = categories
            .iter()
            .position(|c| c == &settings.category)
            .unwrap_or(0);

        Self {
            client,
            pager: Pager::new(settings.initial_query()),
            categories,
            category_index,
            search_input: settings.search.clone(),
            editing_search: false,
            sort: settings.sort,
            cart: Cart::default(),
            show_cart: false,
            show_help: false,
            theme: settings.theme,
            viewport: viewport::Viewport::new(),
            list_height: 0,
            started: Instant::now(),
        }
    }

    fn current_category(&self) -> &str {
        &self.categories[self.category_index]
    }

    fn current_query(&self) -> Query {
        Query::new(self.search_input.clone(), self.current_category().to_string())
    }
}

/// Launch the interactive catalog browser. Blocks until the user quits and
/// returns the cart accumulated during the session.
pub async fn run(settings: &Settings) -> Result<Cart> {
    let client = CatalogClient::new(&settings.base_url);
    let slugs = categories::fetch_slugs(&client).await;

    // Enter alternate screen + raw mode.
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(settings, client, slugs);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal state no matter what.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map(|()| app.cart)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    use ratatui::layout::{Constraint, Direction, Layout, Rect};
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    loop {
        // A query edit invalidates accumulation; the pager no-ops when the
        // normalized query is unchanged.
        let query = app.current_query();
        app.pager.set_query(query);

        let visible = visible_products(app.pager.products(), &app.search_input, app.sort);
        app.viewport.clamp(visible.len());

        // 1. Draw UI
        terminal.draw(|f| {
            let size = f.area();
            let palette = app.theme.palette();

            // Layout: title (1), filter bar (1), product list, footer (1).
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(size);

            let title = Line::from(vec![
                Span::styled(
                    "shopfront",
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  cart: {} item(s)  ${:.2}",
                        app.cart.total_items(),
                        app.cart.total_price()
                    ),
                    Style::default().fg(palette.dim),
                ),
            ]);
            f.render_widget(Paragraph::new(title), chunks[0]);

            let search_label = if app.editing_search {
                format!("search: {}▏", app.search_input)
            } else if app.search_input.trim().is_empty() {
                "search: (press / to type)".to_string()
            } else {
                format!("search: {}", app.search_input)
            };
            let filters = Line::from(vec![
                Span::styled(search_label, Style::default().fg(palette.normal)),
                Span::styled(
                    format!("   category: {}", app.current_category()),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("   sort: {}", app.sort.label()),
                    Style::default().fg(palette.accent),
                ),
            ]);
            f.render_widget(Paragraph::new(filters), chunks[1]);

            let list_height = chunks[2].height as usize;
            app.list_height = list_height;
            app.viewport.ensure_visible(list_height);
            app.viewport.reveal_sentinel(visible.len(), list_height);

            let start = app.viewport.scroll_offset;
            let end = usize::min(start + list_height, visible.len());

            let mut styled_lines: Vec<Line> = Vec::with_capacity(end.saturating_sub(start) + 1);
            for (idx, product) in visible[start..end].iter().enumerate() {
                let absolute_idx = start + idx;
                let in_cart = app
                    .cart
                    .entries()
                    .find(|e| e.product.id == product.id)
                    .map(|e| format!(" [×{}]", e.quantity))
                    .unwrap_or_default();
                let text = format!(
                    "{:<50} ${:>9.2}  ★{:>3.1}  {}{}",
                    truncate(&product.title, 50),
                    product.price,
                    product.rating,
                    product.category,
                    in_cart,
                );
                if absolute_idx == app.viewport.selected_index {
                    styled_lines.push(Line::from(Span::styled(
                        text,
                        Style::default()
                            .fg(palette.selected_fg)
                            .bg(palette.selected_bg)
                            .add_modifier(Modifier::BOLD),
                    )));
                } else {
                    styled_lines.push(Line::from(Span::styled(
                        text,
                        Style::default().fg(palette.normal),
                    )));
                }
            }

            // Sentinel row: load progress / exhaustion marker after the last
            // item, shown only while it fits in the window.
            if end == visible.len() && (end - start) < list_height {
                let status = if app.pager.is_loading() {
                    format!("{} loading more products…", spinner_frame(app.started.elapsed()))
                } else if app.pager.has_more() {
                    "scroll for more".to_string()
                } else {
                    format!("all {} product(s) loaded", visible.len())
                };
                styled_lines.push(Line::from(Span::styled(
                    status,
                    Style::default().fg(palette.dim),
                )));
            }

            if visible.is_empty() && !app.pager.is_loading() && app.pager.error().is_none() {
                let empty = Paragraph::new("No products match your filters.")
                    .style(Style::default().fg(palette.dim));
                f.render_widget(empty, chunks[2]);
            } else {
                let list_widget =
                    Paragraph::new(styled_lines).block(Block::default().borders(Borders::NONE));
                f.render_widget(list_widget, chunks[2]);
            }

            // Footer hints
            let footer_text = if app.editing_search {
                "type to search  Enter/Esc done"
            } else {
                "↑/↓ move  / search  c category  s sort  a add  o cart  +/- qty  t theme  ? help  q quit"
            };
            let footer =
                Paragraph::new(footer_text).style(Style::default().fg(palette.dim));
            f.render_widget(footer, chunks[3]);

            // Error banner with retry hint; accumulated products stay on
            // screen behind it.
            if let Some(err) = app.pager.error() {
                let banner = Paragraph::new(format!("{err}  (r to retry)")).style(
                    Style::default().fg(palette.error_fg).bg(palette.error_bg),
                );
                let area = Rect::new(0, size.height.saturating_sub(2), size.width, 1);
                f.render_widget(banner, area);
            }

            // Cart panel overlay
            if app.show_cart {
                let area = centered_rect(70, 60, size);
                let mut lines: Vec<Line> = app
                    .cart
                    .entries()
                    .map(|entry| {
                        Line::from(Span::styled(
                            format!(
                                "{:>3} × {:<40} ${:>9.2}",
                                entry.quantity,
                                truncate(&entry.product.title, 40),
                                entry.line_total(),
                            ),
                            Style::default().fg(palette.normal),
                        ))
                    })
                    .collect();
                if lines.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "cart is empty",
                        Style::default().fg(palette.dim),
                    )));
                } else {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!(
                            "{} item(s)   total ${:.2}",
                            app.cart.total_items(),
                            app.cart.total_price()
                        ),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    )));
                }
                let block = Block::default()
                    .title("Cart")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent));
                f.render_widget(Clear, area);
                f.render_widget(Paragraph::new(lines).block(block), area);
            }

            // Help modal overlay
            if app.show_help {
                let help_text = "Controls:\n\n↑/k up  ↓/j down\n/ edit search (Enter/Esc done)\nc cycle category  s cycle sort\na/Enter add to cart  +/- change quantity\no cart panel  t light/dark\nr retry after an error\nq quit  ? help";
                let area = centered_rect(60, 50, size);
                let block = Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent));
                f.render_widget(Clear, area);
                f.render_widget(Paragraph::new(help_text).block(block), area);
            }
        })?;

        // 2. Load pages: bootstrap after a reset, or top up when the
        // sentinel is on screen. Errors wait for an explicit retry.
        let sentinel_wants_more = app
            .viewport
            .sentinel_visible(visible.len(), app.list_height)
            && app.pager.has_more()
            && !app.pager.is_loading();
        if app.pager.error().is_none() && (app.pager.wants_load() || sentinel_wants_more) {
            let client = app.client.clone();
            app.pager.load_next_page(&client).await;
        }

        // 3. Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.editing_search {
                    match key.code {
                        KeyCode::Enter | KeyCode::Esc => app.editing_search = false,
                        KeyCode::Backspace => {
                            app.search_input.pop();
                        }
                        KeyCode::Char(c) => app.search_input.push(c),
                        _ => {}
                    }
                } else if let Some(action) = inputs::key_event_to_action(&key) {
                    match action {
                        AppAction::Quit => break,
                        AppAction::Up => app.viewport.up(),
                        AppAction::Down => app.viewport.down(visible.len()),
                        AppAction::EditSearch => app.editing_search = true,
                        AppAction::NextCategory => {
                            app.category_index =
                                (app.category_index + 1) % app.categories.len();
                        }
                        AppAction::NextSort => app.sort = app.sort.next(),
                        AppAction::AddToCart => {
                            if let Some(product) = visible.get(app.viewport.selected_index) {
                                app.cart.add(product.clone());
                            }
                        }
                        AppAction::IncrementQuantity => {
                            if let Some(product) = visible.get(app.viewport.selected_index) {
                                app.cart.adjust(product.id, 1);
                            }
                        }
                        AppAction::DecrementQuantity => {
                            if let Some(product) = visible.get(app.viewport.selected_index) {
                                app.cart.adjust(product.id, -1);
                            }
                        }
                        AppAction::ToggleCart => app.show_cart = !app.show_cart,
                        AppAction::ToggleTheme => app.theme = app.theme.toggled(),
                        AppAction::Retry => {
                            let client = app.client.clone();
                            app.pager.load_next_page(&client).await;
                        }
                        AppAction::Help => app.show_help = !app.show_help,
                    }
                }
            }
        }
    }

    Ok(())
}

/// Helper to create a centered rect with given percentage width/height.
fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    r: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    use ratatui::layout::{Constraint, Direction, Layout};
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

/// Pick a spinner frame from the time elapsed since the session started, so
/// the animation advances one frame per 100ms redraw.
fn spinner_frame(elapsed: Duration) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = ((elapsed.as_millis() / 100) % 10) as usize;
    FRAMES[idx]
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
