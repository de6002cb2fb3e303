use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::app::{App, AppState};
use crate::modules::navigation::{DrawerSide, Viewport};
use crate::modules::theme::Palette;

pub mod toasts;

const RAIL_WIDTH: u16 = 22;
const RAIL_COLLAPSED_WIDTH: u16 = 5;

pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.current().palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title(f, chunks[0], app, &palette);

    match app.viewport {
        Viewport::Regular => {
            let rail_width = if app.nav.rail_collapsed() { RAIL_COLLAPSED_WIDTH } else { RAIL_WIDTH };
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(rail_width), Constraint::Min(0)])
                .split(chunks[1]);
            draw_rail(f, app, main_chunks[0], &palette);
            draw_page(f, app, main_chunks[1], &palette);
        }
        Viewport::Compact => {
            let main_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(chunks[1]);
            draw_page(f, app, main_chunks[0], &palette);
            draw_bottom_tabs(f, app, main_chunks[1], &palette);
        }
    }

    draw_status(f, app, chunks[2]);

    if app.chrome.inset().is_open() {
        draw_inset(f, chunks[1], &palette);
    }
    if app.chrome.scrim().is_open() {
        draw_drawers(f, app, chunks[1], &palette);
    }
    if app.chrome.avatar_menu().is_open() {
        draw_avatar_menu(f, chunks[1], &palette);
    }
    if app.state() == AppState::Submenu {
        draw_submenu_sheet(f, app, &palette);
    } else if app.state() == AppState::Search {
        draw_search_popup(f, app, &palette);
    } else if app.show_help {
        draw_help_popup(f, &palette);
    }

    toasts::draw_toasts(f, chunks[1], &app.toast_layer, app.theme.current());
}

fn draw_title(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let time_str = chrono::Local::now().format("%H:%M").to_string();
    let theme_glyph = app.theme.current().toggle_glyph();
    let copy_glyph = app.copy_feedback.map(|fb| fb.glyph()).unwrap_or("⧉");

    let mut spans = vec![
        Span::styled("railshell", Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}  ", app.nav.page())),
        Span::styled(format!("[{} copy]", copy_glyph), Style::default().fg(palette.muted)),
    ];
    if app.viewport == Viewport::Regular && !app.search.is_open() {
        let hint = if app.search.query().is_empty() { "Search…" } else { app.search.query() };
        spans.push(Span::styled(format!("  / {}", hint), Style::default().fg(palette.muted)));
    }
    spans.push(Span::raw(format!("  {} | {} | ◉", time_str, theme_glyph)));

    let title = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.muted)));
    f.render_widget(title, area);
}

fn draw_rail(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let collapsed = app.nav.rail_collapsed();
    let items: Vec<ListItem> = app
        .nav
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut style = if app.nav.is_active(i) {
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            if i == app.nav.focused() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let text = if collapsed {
                item.icon.to_string()
            } else {
                format!("{} {} {}", i + 1, item.icon, item.label)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let toggle = if collapsed { "☰" } else { "«" };
    let list = List::new(items).block(
        Block::default()
            .title(toggle)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted)),
    );
    f.render_widget(list, area);
}

fn draw_bottom_tabs(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    // Only the active tab has room for its label.
    let titles: Vec<Line> = app
        .nav
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if app.nav.is_active(i) {
                Line::from(format!("{} {}", item.icon, item.label_for(Viewport::Compact)))
            } else {
                Line::from(item.icon)
            }
        })
        .collect();
    let active = app
        .nav
        .items()
        .iter()
        .position(|item| item.id == app.nav.active().id)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(active)
        .style(Style::default().fg(palette.muted))
        .highlight_style(Style::default().fg(palette.primary).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.muted)));
    f.render_widget(tabs, area);
}

fn draw_page(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let item = app.nav.active();
    let body = vec![
        Line::from(Span::styled(
            format!("{} {}", item.icon, item.label_for(app.viewport)),
            Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Page: {}", app.nav.page()),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            if app.toasts.is_mounted() {
                format!(
                    "Toasts: {} live, {} total",
                    app.toasts.live_count(),
                    app.toasts.len()
                )
            } else {
                String::from("Toasts: off")
            },
            Style::default().fg(palette.muted),
        )),
    ];
    let page = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.muted)))
        .wrap(Wrap { trim: false });
    f.render_widget(page, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.state() {
        AppState::Normal => "q: Quit | ↑↓/jk: Navigate | Enter: Open | t: Demo toast | x: Close toast | T: Theme | [: Rail | y: Copy | /: Search | ?: Help",
        AppState::Search => "Type to filter | Enter: Jump | Esc: Close | ↑↓: Navigate",
        AppState::Submenu => "↑↓: Choose | Enter: Select | Esc: Close",
    };

    let status = Paragraph::new(vec![
        Line::from(app.status_message.as_str()),
        Line::from(help_text),
    ])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

fn draw_drawers(f: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let width = (area.width * 2 / 5).max(20).min(area.width);
    for side in [DrawerSide::Left, DrawerSide::Right] {
        if !app.chrome.drawer(side).is_open() {
            continue;
        }
        let (x, title, body) = match side {
            DrawerSide::Left => (area.x, "Programs", "Your programs and drafts.\n\ni: Open inset\nEsc to close"),
            DrawerSide::Right => (
                area.x + area.width - width,
                "Content Hub",
                "Shared content and resources.\n\nEsc to close",
            ),
        };
        let rect = Rect { x, y: area.y, width, height: area.height };
        let drawer = Paragraph::new(body)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.primary))
                    .style(Style::default().bg(palette.surface)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, rect);
        f.render_widget(drawer, rect);
    }
}

fn draw_inset(f: &mut Frame, area: Rect, palette: &Palette) {
    let width = (area.width / 3).max(24).min(area.width);
    let height = (area.height / 2).max(6).min(area.height);
    let rect = Rect {
        x: area.x + 1u16.min(area.width - width),
        y: area.y + 1u16.min(area.height - height),
        width,
        height,
    };
    let inset = Paragraph::new("Start something new.\n\nEsc to close")
        .block(
            Block::default()
                .title("Create")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.primary))
                .style(Style::default().bg(palette.surface)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, rect);
    f.render_widget(inset, rect);
}

fn draw_avatar_menu(f: &mut Frame, area: Rect, palette: &Palette) {
    let width = 24u16.min(area.width);
    let rect = Rect { x: area.x + area.width - width, y: area.y, width, height: 5u16.min(area.height) };
    let menu = Paragraph::new("Profile\nSettings\nSign out").block(
        Block::default()
            .title("Account")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.surface)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(menu, rect);
}

fn draw_submenu_sheet(f: &mut Frame, app: &App, palette: &Palette) {
    let Some(menu) = app.chrome.submenu() else { return };
    let selected = app.chrome.submenu_selected().unwrap_or(0);
    let area = f.area();
    let height = (menu.items.len() as u16 + 2).min(area.height);
    let rect = Rect { x: area.x, y: area.y + area.height - height, width: area.width, height };

    let items: Vec<ListItem> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut style = if item.primary {
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.foreground)
            };
            if i == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(format!("{} {}", item.icon, item.label)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(menu.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.surface)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(list, rect);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_popup(f: &mut Frame, palette: &Palette) {
    let area = centered_rect(70, 70, f.area());
    let help = "railshell Help\n\nKeys:\n  q: Quit\n  j/k or ↑/↓, Tab: Move focus\n  Enter: Open focused item\n  1-7: Open item directly\n  t: Demo toast\n  x: Close newest toast\n  T: Toggle theme\n  [: Collapse/expand rail\n  a: Account menu\n  i: Inset panel\n  y: Copy page link\n  /: Search\n  Esc: Close drawers and menus\n  ?: Toggle this help";

    let paragraph = Paragraph::new(help)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.primary)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn draw_search_popup(f: &mut Frame, app: &App, palette: &Palette) {
    let area = match app.viewport {
        Viewport::Compact => f.area(),
        Viewport::Regular => centered_rect(70, 80, f.area()),
    };

    f.render_widget(Clear, area);
    let outer = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary));
    f.render_widget(outer, area);

    let inner_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let header = Paragraph::new("Type to filter, Enter to jump, Esc to close");
    f.render_widget(header, inner[0]);

    let input = Paragraph::new(format!("/ {}", app.search.query()))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(input, inner[1]);

    let list_area = inner[2];
    let window_height = list_area.height.saturating_sub(2) as usize;
    let results = app.search.results();
    let start = app.search.selected().saturating_sub(window_height / 2);
    let end = usize::min(start + window_height, results.len());

    let items: Vec<ListItem> = results[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(offset, r)| {
            let i = start + offset;
            let style = if i == app.search.selected() {
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(r.label.clone()).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Results").borders(Borders::ALL));
    f.render_widget(list, list_area);
}
