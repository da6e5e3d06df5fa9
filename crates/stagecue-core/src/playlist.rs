//! Set lists and song loading.
//!
//! A [`Playlist`] is an ordered list of [`PlaylistEntry`]s plus a cursor.
//! Entries are resolved independently: a missing or unreadable file marks
//! its own entry with an error string and never aborts the rest of the
//! batch, so a playlist where every entry failed is still a usable value.
//!
//! [`PlaylistManager`] builds playlists either from a playlist file (one
//! filename per line, `#` comments) or by scanning a directory for songs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::{self, SONG_EXTENSIONS};
use crate::song::Song;

/// File extensions recognized as playlist files (lowercase, no dot).
pub const PLAYLIST_EXTENSIONS: &[&str] = &["txt", "lst", "playlist"];

/// An entry in a playlist.
///
/// After resolution an entry either carries a parsed song or an error
/// string, never both.
#[derive(Clone, Debug, Default)]
pub struct PlaylistEntry {
    /// Filename as written in the playlist file (or found on disk).
    pub filename: String,
    /// Resolved path, if any.
    pub path: Option<PathBuf>,
    /// The parsed song, once loaded.
    pub song: Option<Song>,
    /// Why this entry could not be loaded.
    pub error: Option<String>,
}

impl PlaylistEntry {
    /// Create an unresolved entry for a raw filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Attach an already-known path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach an already-parsed song.
    pub fn with_song(mut self, song: Song) -> Self {
        self.song = Some(song);
        self
    }

    /// Whether the song has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.song.is_some()
    }

    /// Whether resolution failed for this entry.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Song title if loaded and titled, otherwise the filename.
    pub fn display_name(&self) -> &str {
        match &self.song {
            Some(song) if !song.title.is_empty() => &song.title,
            _ => &self.filename,
        }
    }
}

/// A playlist of songs with a current-song cursor.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    /// Playlist name (file stem or directory name).
    pub name: String,
    /// Entries in playback order.
    pub entries: Vec<PlaylistEntry>,
    current_index: usize,
}

impl Playlist {
    /// Create a playlist from already-built entries.
    pub fn new(name: impl Into<String>, entries: Vec<PlaylistEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            current_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaylistEntry> {
        self.entries.iter()
    }

    /// Index of the current song (0 when empty).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The entry under the cursor, if any.
    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.entries.get(self.current_index)
    }

    /// The loaded song under the cursor, if any.
    pub fn current_song(&self) -> Option<&Song> {
        self.current_entry().and_then(|entry| entry.song.as_ref())
    }

    /// Advance to the next song. Returns true if the cursor moved.
    pub fn next_song(&mut self) -> bool {
        if self.current_index + 1 < self.entries.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Step back to the previous song. Returns true if the cursor moved.
    pub fn prev_song(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a specific index. Returns true if the index was valid.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    /// Jump to the first song.
    pub fn first_song(&mut self) {
        self.current_index = 0;
    }

    /// Jump to the last song.
    pub fn last_song(&mut self) {
        self.current_index = self.entries.len().saturating_sub(1);
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a PlaylistEntry;
    type IntoIter = std::slice::Iter<'a, PlaylistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Find all playlist files in a directory, sorted case-insensitively.
pub fn find_playlist_files(directory: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(directory) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_playlist = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| PLAYLIST_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_playlist {
                files.push(path);
            }
        }
    }
    files.sort_by_key(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    });
    files
}

/// Loads and resolves playlists against a songs directory.
pub struct PlaylistManager {
    songs_dir: PathBuf,
}

impl PlaylistManager {
    /// Create a manager rooted at the given songs directory.
    pub fn new(songs_dir: impl Into<PathBuf>) -> Self {
        Self {
            songs_dir: songs_dir.into(),
        }
    }

    /// The songs directory this manager resolves against.
    pub fn songs_dir(&self) -> &Path {
        &self.songs_dir
    }

    /// Load a playlist from a text file (one filename per line).
    ///
    /// Blank lines and `#` comments are skipped; the remaining order
    /// defines playback order. Every entry is resolved and loaded, with
    /// failures captured per entry.
    pub fn load_playlist_file(&self, path: &Path) -> Result<Playlist> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Playlist")
            .to_string();
        let content = fs::read_to_string(path)?;

        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(PlaylistEntry::new)
            .collect();

        let mut playlist = Playlist::new(name, entries);
        self.resolve_and_load(&mut playlist);
        Ok(playlist)
    }

    /// Create a playlist from all ChordPro files in a directory.
    ///
    /// Files are sorted case-insensitively by filename. An unreadable
    /// directory yields an empty playlist rather than an error.
    pub fn from_directory(&self, directory: Option<&Path>) -> Playlist {
        let directory = directory.unwrap_or(&self.songs_dir);
        let name = directory
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Songs")
            .to_string();

        let mut files = parser::find_song_files(directory);
        files.sort_by_key(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_lowercase)
                .unwrap_or_default()
        });

        let entries = files
            .into_iter()
            .map(|path| {
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                PlaylistEntry::new(filename).with_path(path)
            })
            .collect();

        let mut playlist = Playlist::new(name, entries);
        self.load_songs(&mut playlist);
        playlist
    }

    /// Find all playlist files in the songs directory.
    pub fn find_playlist_files(&self) -> Vec<PathBuf> {
        find_playlist_files(&self.songs_dir)
    }

    /// Resolve a raw filename to a path in the songs directory.
    ///
    /// Tries the exact filename first, then the stem combined with each
    /// recognized song extension.
    pub fn resolve_song_path(&self, filename: &str) -> Option<PathBuf> {
        let exact = self.songs_dir.join(filename);
        if exact.exists() {
            return Some(exact);
        }

        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(filename);
        for ext in SONG_EXTENSIONS {
            let candidate = self.songs_dir.join(format!("{stem}.{ext}"));
            if candidate.exists() {
                return Some(candidate);
            }
        }

        None
    }

    fn resolve_and_load(&self, playlist: &mut Playlist) {
        for entry in &mut playlist.entries {
            if entry.path.is_none() {
                entry.path = self.resolve_song_path(&entry.filename);
            }
        }
        self.load_songs(playlist);
    }

    fn load_songs(&self, playlist: &mut Playlist) {
        for entry in &mut playlist.entries {
            let Some(path) = entry.path.as_ref().filter(|p| p.exists()) else {
                entry.error = Some("File not found".to_string());
                log::warn!("playlist entry not found: {}", entry.filename);
                continue;
            };

            match parser::parse_file(path) {
                Ok(song) => entry.song = Some(song),
                Err(err) => {
                    log::warn!("failed to load {}: {err}", entry.filename);
                    entry.error = Some(err.to_string());
                }
            }
        }
    }
}
