//! Application state and action handling.
//!
//! [`App`] glues the core pieces together: it owns the playlist, the
//! navigator, the zoom state and the page list of the current song, and
//! applies [`Action`]s coming from the keyboard or the pedal queue.
//! Every song change, zoom change or viewport resize repaginates from
//! scratch; pagination is cheap next to drawing.

use stagecue_core::{
    paginate, Action, Landing, NavOutcome, Navigator, Page, PageMetrics, Playlist, Zoom,
};

/// Rows the title block occupies on the first page (title, info, spacer).
pub const TITLE_ROWS: u16 = 3;

/// Mutable state of a running prompter session.
pub struct App {
    playlist: Playlist,
    nav: Navigator,
    zoom: Zoom,
    pages: Vec<Page>,
    content_rows: u16,
}

impl App {
    /// Create the session state and paginate the first song.
    pub fn new(playlist: Playlist, zoom: Zoom) -> Self {
        let nav = Navigator::new(playlist.len());
        let mut app = Self {
            playlist,
            nav,
            zoom,
            pages: vec![Page::new(0, 0)],
            content_rows: 0,
        };
        app.repaginate();
        app
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    /// The page list of the current song.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page the cursor is on.
    pub fn current_page(&self) -> Page {
        self.pages
            .get(self.nav.page())
            .copied()
            .unwrap_or(Page::new(0, 0))
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.nav.page()
    }

    /// Tell the app how many content rows the viewport offers.
    ///
    /// Repaginates when the height actually changed (startup, terminal
    /// resize).
    pub fn set_viewport_rows(&mut self, rows: u16) {
        if rows != self.content_rows {
            self.content_rows = rows;
            self.repaginate();
        }
    }

    /// Page metrics for the current zoom and viewport.
    ///
    /// Heights are measured in terminal rows. A glyph cell cannot grow
    /// with zoom, so zoom scales the per-line cost instead: fewer lines
    /// fit a page as the zoom rises. The packing factor is floored at
    /// 1.0: below that a page would hold more lines than the viewport
    /// has rows, and the renderer draws one row per line.
    pub fn page_metrics(&self) -> PageMetrics {
        let zoom = self.zoom.value().max(1.0);
        PageMetrics {
            line_height: zoom,
            chord_height: zoom,
            title_height: TITLE_ROWS as f32,
            available_height: self.content_rows as f32,
        }
    }

    /// Apply one action. Returns false when the session should end.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::NextPage => {
                let outcome = self.nav.next_page();
                self.settle(outcome);
            }
            Action::PrevPage => {
                let outcome = self.nav.prev_page();
                self.settle(outcome);
            }
            Action::NextSong => {
                let outcome = self.nav.next_song();
                self.settle(outcome);
            }
            Action::PrevSong => {
                let outcome = self.nav.prev_song();
                self.settle(outcome);
            }
            Action::FirstPage => self.nav.first_page(),
            Action::LastPage => self.nav.last_page(),
            Action::ZoomIn => {
                if self.zoom.zoom_in() {
                    self.repaginate();
                }
            }
            Action::ZoomOut => {
                if self.zoom.zoom_out() {
                    self.repaginate();
                }
            }
        }
        true
    }

    /// Complete a navigation outcome: sync the playlist cursor,
    /// repaginate and land on the requested page.
    fn settle(&mut self, outcome: NavOutcome) {
        if let NavOutcome::SongChanged(landing) = outcome {
            self.playlist.go_to(self.nav.song());
            self.repaginate();
            if landing == Landing::End {
                self.nav.last_page();
            }
            if let Some(entry) = self.playlist.current_entry() {
                log::info!("now showing: {}", entry.display_name());
            }
        }
    }

    fn repaginate(&mut self) {
        let metrics = self.page_metrics();
        self.pages = match self.playlist.current_song() {
            Some(song) => paginate(song, &metrics),
            None => vec![Page::new(0, 0)],
        };
        self.nav.set_page_count(self.pages.len());
    }
}
