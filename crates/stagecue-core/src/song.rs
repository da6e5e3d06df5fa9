//! The parsed song model.
//!
//! A [`Song`] is produced once by the parser and read-only afterwards:
//!
//! - [`ChordAnnotation`] - A chord name anchored at a lyric offset
//! - [`SongLine`] - One physical line of lyrics with its chords
//! - [`Song`] - Metadata fields plus the ordered lines

use std::collections::HashMap;

/// A chord at a specific position in a line.
///
/// `position` is a byte offset into the lyrics-only string (the line with
/// all `[chord]` tokens removed). It always falls on a segment boundary,
/// so `&lyrics[..position]` is valid, and `0 <= position <= lyrics.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChordAnnotation {
    /// Chord name as written in the source, e.g. `G`, `Am7`, `F#m`.
    pub chord: String,
    /// Offset into the lyrics string where the chord sounds.
    pub position: usize,
}

impl ChordAnnotation {
    /// Create a new annotation.
    pub fn new(chord: impl Into<String>, position: usize) -> Self {
        Self {
            chord: chord.into(),
            position,
        }
    }
}

/// A single line of a song with lyrics and chord positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongLine {
    /// Lyric text with chord tokens stripped.
    pub lyrics: String,
    /// Chords in document order; positions are non-decreasing.
    pub chords: Vec<ChordAnnotation>,
    /// True for blank (stanza-separating) lines.
    pub is_empty: bool,
}

impl SongLine {
    /// A blank line separating stanzas.
    pub fn empty() -> Self {
        Self {
            lyrics: String::new(),
            chords: Vec::new(),
            is_empty: true,
        }
    }

    /// A lyric line with its chord annotations.
    pub fn text(lyrics: impl Into<String>, chords: Vec<ChordAnnotation>) -> Self {
        Self {
            lyrics: lyrics.into(),
            chords,
            is_empty: false,
        }
    }

    /// Whether any chord is anchored on this line.
    pub fn has_chords(&self) -> bool {
        !self.chords.is_empty()
    }
}

/// A complete song parsed from ChordPro markup.
///
/// The metadata fields default to empty strings when the corresponding
/// directive is absent. Every directive encountered, recognized or not,
/// is also recorded under its canonical name in [`raw_directives`].
///
/// [`raw_directives`]: Song::raw_directives
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub tempo: String,
    pub capo: String,
    /// Lyric and blank lines in document order. Directive lines are not
    /// represented here.
    pub lines: Vec<SongLine>,
    /// Canonical directive name to trimmed value, last occurrence wins.
    pub raw_directives: HashMap<String, String>,
}

impl Song {
    /// Title for display, falling back to `"Untitled"`.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}
