//! Page and song cursor state machine.
//!
//! A [`Navigator`] holds the `(song, page)` cursor pair and applies the
//! paging rules: paging past the last page chains into the next song,
//! paging back from the first page chains into the previous song landing
//! on its *last* page, and song indices clamp at the playlist edges.
//!
//! The navigator does not paginate. After a [`NavOutcome::SongChanged`]
//! the caller repaginates the new song, feeds the result back through
//! [`Navigator::set_page_count`] and, for a [`Landing::End`], jumps to
//! [`Navigator::last_page`]. `set_page_count` is also the clamp applied
//! after a zoom change shrinks the page list.

/// Where the cursor lands inside a newly entered song.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// First page of the song.
    Start,
    /// Last page of the song (paging backwards across a song boundary).
    End,
}

/// Result of a navigation request.
///
/// `Unchanged` is a signal, not an error: the cursor is already at an
/// edge of the closed loop formed by the playlist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The page moved within the current song.
    PageChanged,
    /// The song changed; the caller must repaginate and apply the landing.
    SongChanged(Landing),
    /// Nothing moved.
    Unchanged,
}

/// Zero-based `(song, page)` cursor over a playlist.
#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    song: usize,
    page: usize,
    song_count: usize,
    page_count: usize,
}

impl Navigator {
    /// Navigator at song 0, page 0. The page count starts at 1 until the
    /// first pagination result arrives.
    pub fn new(song_count: usize) -> Self {
        Self {
            song: 0,
            page: 0,
            song_count,
            page_count: 1,
        }
    }

    pub fn song(&self) -> usize {
        self.song
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Install the page count of the current song, pinning the page index
    /// to the last valid page if the count shrank below it.
    pub fn set_page_count(&mut self, count: usize) {
        self.page_count = count.max(1);
        if self.page >= self.page_count {
            self.page = self.page_count - 1;
        }
    }

    /// Jump to the first page of the current song.
    pub fn first_page(&mut self) {
        self.page = 0;
    }

    /// Jump to the last page of the current song.
    pub fn last_page(&mut self) {
        self.page = self.page_count - 1;
    }

    /// Advance one page, chaining into the next song when exhausted.
    pub fn next_page(&mut self) -> NavOutcome {
        if self.page + 1 < self.page_count {
            self.page += 1;
            NavOutcome::PageChanged
        } else {
            self.next_song()
        }
    }

    /// Step back one page, chaining into the previous song when exhausted.
    pub fn prev_page(&mut self) -> NavOutcome {
        if self.page > 0 {
            self.page -= 1;
            NavOutcome::PageChanged
        } else {
            self.prev_song()
        }
    }

    /// Move to the next song, landing on its first page.
    pub fn next_song(&mut self) -> NavOutcome {
        if self.song + 1 < self.song_count {
            self.song += 1;
            self.page = 0;
            NavOutcome::SongChanged(Landing::Start)
        } else {
            NavOutcome::Unchanged
        }
    }

    /// Move to the previous song, landing on its last page.
    ///
    /// The page index is left for the caller: the new song's page count is
    /// only known after repagination.
    pub fn prev_song(&mut self) -> NavOutcome {
        if self.song > 0 {
            self.song -= 1;
            self.page = 0;
            NavOutcome::SongChanged(Landing::End)
        } else {
            NavOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Apply the caller-side protocol for a song change.
    fn settle(nav: &mut Navigator, outcome: NavOutcome, page_count: usize) {
        if let NavOutcome::SongChanged(landing) = outcome {
            nav.set_page_count(page_count);
            if landing == Landing::End {
                nav.last_page();
            }
        }
    }

    #[test]
    fn test_page_stepping() {
        let mut nav = Navigator::new(1);
        nav.set_page_count(3);

        assert_eq!(nav.next_page(), NavOutcome::PageChanged);
        assert_eq!(nav.next_page(), NavOutcome::PageChanged);
        assert_eq!(nav.page(), 2);
        // Single song: exhausting the last page is a no-op.
        assert_eq!(nav.next_page(), NavOutcome::Unchanged);
        assert_eq!(nav.page(), 2);

        assert_eq!(nav.prev_page(), NavOutcome::PageChanged);
        assert_eq!(nav.prev_page(), NavOutcome::PageChanged);
        assert_eq!(nav.prev_page(), NavOutcome::Unchanged);
        assert_eq!(nav.page(), 0);
    }

    #[test]
    fn test_next_page_chains_into_next_song() {
        // Three songs, two pages each.
        let mut nav = Navigator::new(3);
        nav.set_page_count(2);

        assert_eq!(nav.next_page(), NavOutcome::PageChanged);
        let outcome = nav.next_page();
        assert_eq!(outcome, NavOutcome::SongChanged(Landing::Start));
        settle(&mut nav, outcome, 2);
        assert_eq!((nav.song(), nav.page()), (1, 0));

        assert_eq!(nav.next_page(), NavOutcome::PageChanged);
        assert_eq!((nav.song(), nav.page()), (1, 1));

        let outcome = nav.next_page();
        settle(&mut nav, outcome, 2);
        assert_eq!(nav.next_page(), NavOutcome::PageChanged);
        assert_eq!((nav.song(), nav.page()), (2, 1));
        assert_eq!(nav.next_page(), NavOutcome::Unchanged);
    }

    #[test]
    fn test_prev_page_lands_on_last_page() {
        let mut nav = Navigator::new(2);
        nav.set_page_count(2);
        let outcome = nav.next_song();
        settle(&mut nav, outcome, 4);
        assert_eq!((nav.song(), nav.page()), (1, 0));

        // Backwards over the boundary: end of the previous song.
        let outcome = nav.prev_page();
        assert_eq!(outcome, NavOutcome::SongChanged(Landing::End));
        settle(&mut nav, outcome, 2);
        assert_eq!((nav.song(), nav.page()), (0, 1));
    }

    #[test]
    fn test_song_moves_clamp_at_edges() {
        let mut nav = Navigator::new(2);
        assert_eq!(nav.prev_song(), NavOutcome::Unchanged);
        assert_eq!(nav.next_song(), NavOutcome::SongChanged(Landing::Start));
        assert_eq!(nav.next_song(), NavOutcome::Unchanged);
        assert_eq!(nav.song(), 1);
    }

    #[test]
    fn test_set_page_count_pins_page() {
        let mut nav = Navigator::new(1);
        nav.set_page_count(5);
        nav.last_page();
        assert_eq!(nav.page(), 4);

        // Zoom-out shrank the page list.
        nav.set_page_count(2);
        assert_eq!(nav.page(), 1);

        // A zero count is floored at one page.
        nav.set_page_count(0);
        assert_eq!(nav.page_count(), 1);
        assert_eq!(nav.page(), 0);
    }

    #[test]
    fn test_empty_playlist_never_moves() {
        let mut nav = Navigator::new(0);
        assert_eq!(nav.next_page(), NavOutcome::Unchanged);
        assert_eq!(nav.prev_page(), NavOutcome::Unchanged);
        assert_eq!(nav.next_song(), NavOutcome::Unchanged);
        assert_eq!((nav.song(), nav.page()), (0, 0));
    }
}
