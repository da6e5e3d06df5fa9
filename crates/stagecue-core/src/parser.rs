//! ChordPro markup parsing.
//!
//! The parser is a single-pass, line-local scan. Each physical line is
//! classified as:
//!
//! - a **directive** - `{name}` or `{name: value}` anchored at the line
//!   start; recorded on the [`Song`], never emitted as a line
//! - a **blank line** - empty after stripping, kept as a stanza separator
//! - a **lyric line** - scanned left-to-right for inline `[chord]` tokens
//!
//! Parsing is total: malformed directive-like text simply falls through to
//! lyric parsing, so there is no failure mode short of unreadable files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::song::{ChordAnnotation, Song, SongLine};

/// File extensions recognized as ChordPro songs (lowercase, no dot).
pub const SONG_EXTENSIONS: &[&str] = &["chopro", "cho", "crd", "chordpro"];

/// Directive line: `{name}` or `{name: value}` at the start of the line.
///
/// The value is matched non-greedily up to the first `}`, so `{t:}` with a
/// colon but no value does not match and is treated as plain lyric text.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{(\w+)(?::\s*(.+?))?\}").expect("directive pattern"));

/// Inline chord token: `[anything-but-a-closing-bracket]`.
static CHORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("chord pattern"));

/// Short directive names to their canonical form.
///
/// Note that `subtitle` (and its aliases) feeds the artist field further
/// down; that conflation comes from the Songbook convention ChordPro grew
/// out of and is kept as-is.
static DIRECTIVE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("t", "title"),
        ("st", "subtitle"),
        ("su", "subtitle"),
        ("a", "artist"),
        ("k", "key"),
        ("c", "comment"),
        ("ci", "comment_italic"),
        ("cb", "comment_box"),
        ("soc", "start_of_chorus"),
        ("eoc", "end_of_chorus"),
        ("sov", "start_of_verse"),
        ("eov", "end_of_verse"),
        ("sob", "start_of_bridge"),
        ("eob", "end_of_bridge"),
    ])
});

/// Check whether a path has a recognized ChordPro extension.
pub fn is_song_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SONG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find all ChordPro files in a directory (non-recursive, unsorted).
pub fn find_song_files(directory: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(directory) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_song_file(&path) {
                files.push(path);
            }
        }
    }
    files
}

/// Parse a ChordPro file from disk.
pub fn parse_file(path: &Path) -> Result<Song> {
    let content = fs::read_to_string(path)?;
    Ok(parse(&content))
}

/// Parse ChordPro content into a [`Song`].
pub fn parse(content: &str) -> Song {
    let mut song = Song::default();

    for raw in content.lines() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if trimmed.starts_with('{') {
            if let Some(caps) = DIRECTIVE_RE.captures(trimmed) {
                let value = caps.get(2).map(|m| m.as_str());
                apply_directive(&mut song, &caps[1], value);
                continue;
            }
        }

        song.lines.push(parse_line(line));
    }

    song
}

/// Record a directive and update the matching metadata field.
fn apply_directive(song: &mut Song, name: &str, value: Option<&str>) {
    let name = name.to_lowercase();
    let canonical = DIRECTIVE_ALIASES
        .get(name.as_str())
        .copied()
        .unwrap_or(name.as_str());
    let value = value.map(str::trim).unwrap_or("").to_string();

    song.raw_directives
        .insert(canonical.to_string(), value.clone());

    match canonical {
        "title" => song.title = value,
        // Subtitle doubles as artist, last one wins.
        "subtitle" | "artist" => song.artist = value,
        "key" => song.key = value,
        "tempo" => song.tempo = value,
        "capo" => song.capo = value,
        _ => {}
    }
}

/// Extract chords and lyrics from a single line.
///
/// The chord position is the length of the lyrics accumulated so far, i.e.
/// an offset into the output string rather than the raw line. The running
/// offset only advances over non-bracket text, so adjacent tokens share a
/// position and a trailing token sits at `lyrics.len()`.
fn parse_line(line: &str) -> SongLine {
    if line.trim().is_empty() {
        return SongLine::empty();
    }

    let mut lyrics = String::new();
    let mut chords = Vec::new();
    let mut last_end = 0;

    for cap in CHORD_RE.captures_iter(line) {
        if let (Some(m), Some(token)) = (cap.get(0), cap.get(1)) {
            lyrics.push_str(&line[last_end..m.start()]);
            chords.push(ChordAnnotation::new(token.as_str(), lyrics.len()));
            last_end = m.end();
        }
    }
    lyrics.push_str(&line[last_end..]);

    SongLine::text(lyrics, chords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_content() {
        let song = parse("");
        assert_eq!(song.title, "");
        assert!(song.lines.is_empty());
    }

    #[test]
    fn test_parse_title_directive() {
        let song = parse("{title: Amazing Grace}");
        assert_eq!(song.title, "Amazing Grace");
        assert!(song.lines.is_empty());
    }

    #[test]
    fn test_parse_title_directive_short() {
        let song = parse("{t: Amazing Grace}");
        assert_eq!(song.title, "Amazing Grace");
    }

    #[test]
    fn test_parse_artist_directive() {
        let song = parse("{artist: John Newton}");
        assert_eq!(song.artist, "John Newton");
    }

    #[test]
    fn test_subtitle_feeds_artist() {
        let song = parse("{st: The Band}");
        assert_eq!(song.artist, "The Band");
        assert_eq!(song.raw_directives["subtitle"], "The Band");

        // A later artist directive overwrites the subtitle value.
        let song = parse("{st: The Band}\n{artist: Someone Else}");
        assert_eq!(song.artist, "Someone Else");
    }

    #[test]
    fn test_parse_multiple_directives() {
        let song = parse("{title: Amazing Grace}\n{artist: John Newton}\n{key: G}\n{capo: 2}");
        assert_eq!(song.title, "Amazing Grace");
        assert_eq!(song.artist, "John Newton");
        assert_eq!(song.key, "G");
        assert_eq!(song.capo, "2");
    }

    #[test]
    fn test_unknown_directive_recorded() {
        let song = parse("{define: G 320003}");
        assert_eq!(song.raw_directives["define"], "G 320003");
        assert!(song.lines.is_empty());
    }

    #[test]
    fn test_directive_without_value() {
        let song = parse("{soc}\nchorus line\n{eoc}");
        assert_eq!(song.raw_directives["start_of_chorus"], "");
        assert_eq!(song.raw_directives["end_of_chorus"], "");
        assert_eq!(song.lines.len(), 1);
    }

    #[test]
    fn test_colon_without_value_falls_through() {
        // `{t:}` does not match the directive pattern and stays lyric text.
        let song = parse("{t:}");
        assert_eq!(song.title, "");
        assert_eq!(song.lines.len(), 1);
        assert_eq!(song.lines[0].lyrics, "{t:}");
    }

    #[test]
    fn test_unbalanced_brace_falls_through() {
        let song = parse("{title: no closing brace");
        assert_eq!(song.title, "");
        assert_eq!(song.lines.len(), 1);
        assert_eq!(song.lines[0].lyrics, "{title: no closing brace");
    }

    #[test]
    fn test_parse_line_without_chords() {
        let song = parse("Amazing grace how sweet the sound");
        assert_eq!(song.lines.len(), 1);
        assert_eq!(song.lines[0].lyrics, "Amazing grace how sweet the sound");
        assert!(!song.lines[0].has_chords());
    }

    #[test]
    fn test_parse_line_with_single_chord() {
        let song = parse("[G]Amazing grace");
        let line = &song.lines[0];
        assert_eq!(line.lyrics, "Amazing grace");
        assert_eq!(line.chords, vec![ChordAnnotation::new("G", 0)]);
    }

    #[test]
    fn test_parse_line_with_multiple_chords() {
        let song = parse("[G]Amazing [C]grace how [D]sweet");
        let line = &song.lines[0];
        assert_eq!(line.lyrics, "Amazing grace how sweet");
        assert_eq!(
            line.chords,
            vec![
                ChordAnnotation::new("G", 0),
                ChordAnnotation::new("C", 8),
                ChordAnnotation::new("D", 18),
            ]
        );
    }

    #[test]
    fn test_parse_line_with_chord_at_end() {
        let song = parse("Amazing grace[G]");
        let line = &song.lines[0];
        assert_eq!(line.lyrics, "Amazing grace");
        assert_eq!(line.chords, vec![ChordAnnotation::new("G", 13)]);
    }

    #[test]
    fn test_adjacent_chord_tokens_share_position() {
        let song = parse("[G][C]word");
        let line = &song.lines[0];
        assert_eq!(line.lyrics, "word");
        assert_eq!(
            line.chords,
            vec![ChordAnnotation::new("G", 0), ChordAnnotation::new("C", 0)]
        );
    }

    #[test]
    fn test_parse_complex_chords() {
        let song = parse("[Am7]First [Cmaj7]second [F#m]third");
        let line = &song.lines[0];
        assert_eq!(line.chords[0].chord, "Am7");
        assert_eq!(line.chords[1].chord, "Cmaj7");
        assert_eq!(line.chords[2].chord, "F#m");
    }

    #[test]
    fn test_chord_positions_non_decreasing() {
        let song = parse("[G]A [C]B [D]C");
        let line = &song.lines[0];
        assert_eq!(line.lyrics, "A B C");
        let positions: Vec<usize> = line.chords.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 2, 4]);
        for pair in positions.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        for pos in positions {
            assert!(pos <= line.lyrics.len());
        }
    }

    #[test]
    fn test_parse_empty_line() {
        let song = parse("Line one\n\nLine two");
        assert_eq!(song.lines.len(), 3);
        assert_eq!(song.lines[0].lyrics, "Line one");
        assert!(song.lines[1].is_empty);
        assert_eq!(song.lines[2].lyrics, "Line two");
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let song = parse("Amazing grace   \t");
        assert_eq!(song.lines[0].lyrics, "Amazing grace");
    }

    #[test]
    fn test_parse_full_song() {
        let content = "{title: Amazing Grace}\n\
                       {artist: John Newton}\n\
                       {key: G}\n\
                       \n\
                       [G]Amazing [G7]grace how [C]sweet the [G]sound\n\
                       That [G]saved a [Em]wretch like [D]me\n\
                       [G]I once was [G7]lost but [C]now I'm [G]found\n\
                       Was [G]blind but [D]now I [G]see";
        let song = parse(content);
        assert_eq!(song.title, "Amazing Grace");
        assert_eq!(song.artist, "John Newton");
        assert_eq!(song.key, "G");
        // One blank line after the directives, then four lyric lines.
        assert_eq!(song.lines.len(), 5);
        assert!(song.lines[0].is_empty);
        assert!(song.lines[1].has_chords());
    }

    #[test]
    fn test_directives_mixed_with_chords() {
        let song = parse("{title: Amazing Grace}\n{artist: John Newton}\n\n[G]Hi");
        assert_eq!(song.title, "Amazing Grace");
        assert_eq!(song.artist, "John Newton");
        assert_eq!(song.lines.len(), 2);
        assert!(song.lines[0].is_empty);
        assert_eq!(song.lines[1].chords, vec![ChordAnnotation::new("G", 0)]);
    }

    #[test]
    fn test_is_song_file() {
        assert!(is_song_file(Path::new("song.chopro")));
        assert!(is_song_file(Path::new("song.cho")));
        assert!(is_song_file(Path::new("song.CRD")));
        assert!(is_song_file(Path::new("song.chordpro")));
        assert!(!is_song_file(Path::new("song.txt")));
        assert!(!is_song_file(Path::new("song")));
    }

    #[test]
    fn test_find_song_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.chopro"), "{t: A}").unwrap();
        std::fs::write(dir.path().join("b.cho"), "{t: B}").unwrap();
        std::fs::write(dir.path().join("notes.md"), "not a song").unwrap();

        let mut names: Vec<String> = find_song_files(dir.path())
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.chopro", "b.cho"]);
    }
}
