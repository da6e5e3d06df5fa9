//! TUI rendering of the current page.
//!
//! This is the thin renderer side of the prompter: it takes the current
//! song and page range from the [`App`] and draws title block, chord rows
//! and lyric lines with ratatui. Chord rows are positioned by padding a
//! separate line with spaces up to each chord's lyric column.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use stagecue_core::{Song, SongLine};

use crate::app::App;
use crate::config::{parse_hex_color, DisplayConfig};

/// Horizontal margin in cells and vertical margin in rows.
pub const H_MARGIN: u16 = 4;
pub const V_MARGIN: u16 = 1;

/// Resolved display colors.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub chord: Color,
    pub background: Color,
}

impl Theme {
    /// Resolve the configured hex colors, falling back to the stage
    /// defaults (white on black, yellow chords) on bad input.
    pub fn from_display_config(config: &DisplayConfig) -> Self {
        fn color(hex: &str, fallback: (u8, u8, u8)) -> Color {
            let (r, g, b) = parse_hex_color(hex).unwrap_or_else(|| {
                log::warn!("invalid color in config: {hex}");
                fallback
            });
            Color::Rgb(r, g, b)
        }
        Self {
            text: color(&config.font_color, (255, 255, 255)),
            chord: color(&config.chord_color, (255, 255, 0)),
            background: color(&config.background_color, (0, 0, 0)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(255, 255, 255),
            chord: Color::Rgb(255, 255, 0),
            background: Color::Rgb(0, 0, 0),
        }
    }
}

/// Content rows available inside the margins of a terminal this size.
pub fn content_rows(size: Size) -> u16 {
    size.height.saturating_sub(2 * V_MARGIN)
}

/// Draw the current page.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let content = inset(area);
    let Some(entry) = app.playlist().current_entry() else {
        render_message(frame, area, "No song loaded", theme);
        return;
    };

    match &entry.song {
        Some(song) => {
            render_song(frame, content, app, song, theme);
            render_page_indicator(frame, content, app, theme);
        }
        None => {
            let reason = entry.error.as_deref().unwrap_or("not loaded");
            render_message(frame, area, &format!("{}: {}", entry.filename, reason), theme);
        }
    }
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + H_MARGIN,
        y: area.y + V_MARGIN,
        width: area.width.saturating_sub(2 * H_MARGIN),
        height: area.height.saturating_sub(2 * V_MARGIN),
    }
}

fn render_song(frame: &mut Frame, content: Rect, app: &App, song: &Song, theme: &Theme) {
    let mut lines: Vec<Line> = Vec::new();

    // Title block on the first page only.
    if app.page_index() == 0 && !song.title.is_empty() {
        lines.push(title_line(song, theme));
        let info = info_line(song);
        if !info.is_empty() {
            lines.push(Line::styled(info, Style::default().fg(theme.text)));
        }
        lines.push(Line::default());
    }

    let page = app.current_page();
    for line in &song.lines[page.start_line..page.end_line] {
        if line.is_empty {
            lines.push(Line::default());
            continue;
        }
        if line.has_chords() {
            lines.push(Line::styled(
                chord_row(line),
                Style::default().fg(theme.chord).bold(),
            ));
        }
        lines.push(Line::styled(
            line.lyrics.clone(),
            Style::default().fg(theme.text),
        ));
    }

    frame.render_widget(Paragraph::new(lines), content);
}

fn title_line(song: &Song, theme: &Theme) -> Line<'static> {
    let mut title = song.display_title().to_string();
    if !song.artist.is_empty() {
        title.push_str(" - ");
        title.push_str(&song.artist);
    }
    Line::styled(title, Style::default().fg(theme.text).bold())
}

/// "Key: G | Capo: 2" style info row, empty when there is nothing to say.
fn info_line(song: &Song) -> String {
    let mut parts = Vec::new();
    if !song.key.is_empty() {
        parts.push(format!("Key: {}", song.key));
    }
    if !song.capo.is_empty() {
        parts.push(format!("Capo: {}", song.capo));
    }
    parts.join(" | ")
}

/// Build the chord row for a line: chord names padded out to the display
/// column of their lyric position.
///
/// Positions are byte offsets into the lyrics, so the column is the char
/// count of the prefix. When chords crowd together each one is pushed
/// right far enough to keep a separating space.
fn chord_row(line: &SongLine) -> String {
    let mut row = String::new();
    let mut row_chars = 0;
    for annotation in &line.chords {
        let column = line.lyrics[..annotation.position].chars().count();
        let pad = if column > row_chars {
            column - row_chars
        } else if row_chars > 0 {
            1
        } else {
            0
        };
        row.extend(std::iter::repeat(' ').take(pad));
        row.push_str(&annotation.chord);
        row_chars += pad + annotation.chord.chars().count();
    }
    row
}

fn render_page_indicator(frame: &mut Frame, content: Rect, app: &App, theme: &Theme) {
    let total = app.pages().len();
    if total <= 1 || content.height == 0 {
        return;
    }
    let indicator = format!("{}/{}", app.page_index() + 1, total);
    let top_right = Rect {
        y: content.y,
        height: 1,
        ..content
    };
    frame.render_widget(
        Paragraph::new(indicator)
            .style(Style::default().fg(theme.text))
            .alignment(Alignment::Right),
        top_right,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let centered = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1.min(area.height),
    };
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(theme.text))
            .alignment(Alignment::Center),
        centered,
    );
}
