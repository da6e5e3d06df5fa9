//! Pagination of a song under a height budget.
//!
//! [`paginate`] walks the song's lines once and greedily packs them into
//! [`Page`]s. The title block is reserved on the first page only, an
//! oversized line overflows its own page rather than being split, and a
//! song always yields at least one page. The walk is stateless; callers
//! rerun it whenever the song or the [`PageMetrics`] change (zoom).

use crate::song::{Song, SongLine};

/// A page of content: the half-open line range `[start_line, end_line)`.
///
/// The pages of a song partition its full line range with no gaps or
/// overlaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub start_line: usize,
    pub end_line: usize,
}

impl Page {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Number of lines on this page.
    pub fn len(&self) -> usize {
        self.end_line - self.start_line
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line
    }
}

/// Layout metrics the renderer supplies for pagination.
///
/// All heights share one unit; the engine only compares sums against the
/// available height, so the unit can be pixels, terminal rows or anything
/// else the renderer works in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    /// Height of one lyric line.
    pub line_height: f32,
    /// Extra height of the chord row above a line with chords.
    pub chord_height: f32,
    /// Height of the title block, reserved on the first page when the
    /// song has a title.
    pub title_height: f32,
    /// Usable content height (display height minus margins).
    pub available_height: f32,
}

impl PageMetrics {
    /// Total height one line occupies.
    ///
    /// Blank lines get a factor of 1.2 for stanza spacing; lines with
    /// chords pay for the chord row on top of the lyric row.
    pub fn line_height_for(&self, line: &SongLine) -> f32 {
        if line.is_empty {
            self.line_height * 1.2
        } else if line.has_chords() {
            self.chord_height + self.line_height
        } else {
            self.line_height
        }
    }
}

/// Split a song into pages for the given metrics.
///
/// Greedy bin-packing: a line that would overflow the current page closes
/// it and opens the next, except that a page never ends up empty, so a
/// single line taller than the budget overflows in place. A song with no
/// lines still yields the single page `[0, 0)`.
pub fn paginate(song: &Song, metrics: &PageMetrics) -> Vec<Page> {
    let title_height = if song.title.is_empty() {
        0.0
    } else {
        metrics.title_height
    };
    let first_page_height = metrics.available_height - title_height;
    let other_page_height = metrics.available_height;

    let mut pages = Vec::new();
    let mut current_height = 0.0_f32;
    let mut page_start = 0_usize;
    let mut is_first_page = true;

    for (i, line) in song.lines.iter().enumerate() {
        let line_height = metrics.line_height_for(line);
        let budget = if is_first_page {
            first_page_height
        } else {
            other_page_height
        };

        if current_height + line_height > budget && i > page_start {
            pages.push(Page::new(page_start, i));
            page_start = i;
            current_height = line_height;
            is_first_page = false;
        } else {
            current_height += line_height;
        }
    }

    if page_start < song.lines.len() {
        pages.push(Page::new(page_start, song.lines.len()));
    }
    if pages.is_empty() {
        pages.push(Page::new(0, 0));
    }
    pages
}

/// Zoom level with clamped bounds.
///
/// The renderer scales its metrics by the zoom value and repaginates
/// after every change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Zoom {
    pub const DEFAULT_MIN: f32 = 0.5;
    pub const DEFAULT_MAX: f32 = 3.0;
    pub const DEFAULT_STEP: f32 = 0.1;

    /// Zoom with the default bounds, clamping the initial value.
    pub fn new(value: f32) -> Self {
        Self::with_bounds(value, Self::DEFAULT_MIN, Self::DEFAULT_MAX, Self::DEFAULT_STEP)
    }

    /// Zoom with explicit bounds and step.
    pub fn with_bounds(value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the zoom level, clamped. Returns true if the value changed.
    pub fn set(&mut self, value: f32) -> bool {
        let clamped = value.clamp(self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Step the zoom up. Returns true if the value changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set(self.value + self.step)
    }

    /// Step the zoom down. Returns true if the value changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set(self.value - self.step)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(1.0)
    }
}
