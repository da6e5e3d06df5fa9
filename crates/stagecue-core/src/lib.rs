//! stagecue-core - Song model and paging engine for the stagecue teleprompter.
//!
//! This crate provides the non-visual building blocks of stagecue:
//!
//! - **Song** - The parsed song model (lyric lines with chord annotations)
//! - **Parser** - ChordPro markup parsing (directives, inline `[chord]` tokens)
//! - **Playlist** - Set lists with per-entry load errors
//! - **Layout** - Greedy pagination of a song under a height budget
//! - **Navigation** - Page/song cursor state machine
//! - **Action** - User actions and the cross-thread action queue
//! - **Source** - Data-source discovery (config, songs and playlist folders)
//!
//! # Architecture
//!
//! Data flows one way: raw text is parsed into a [`Song`], songs are grouped
//! into a [`Playlist`], [`paginate`] splits the current song into [`Page`]s
//! for the given [`PageMetrics`], and a [`Navigator`] walks pages and songs.
//! The renderer in the `stagecue` binary only consumes the results; nothing
//! here touches the terminal.

pub mod action;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod parser;
pub mod playlist;
pub mod song;
pub mod source;

pub use action::{Action, ActionQueue};
pub use error::{Error, Result};
pub use layout::{paginate, Page, PageMetrics, Zoom};
pub use navigation::{Landing, NavOutcome, Navigator};
pub use parser::{find_song_files, is_song_file, parse, parse_file, SONG_EXTENSIONS};
pub use playlist::{
    find_playlist_files, Playlist, PlaylistEntry, PlaylistManager, PLAYLIST_EXTENSIONS,
};
pub use song::{ChordAnnotation, Song, SongLine};
pub use source::{find_first_source, find_mounted_sources, DataSource};
