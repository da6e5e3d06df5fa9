//! Data-source discovery.
//!
//! A data source is a directory (typically a USB stick) holding an
//! optional `config.toml`, a `songs/` subdirectory (or songs directly in
//! the root) and an optional `playlists/` subdirectory.
//! [`find_mounted_sources`] scans the usual Linux mount roots for such
//! directories; [`DataSource::scan`] inspects one explicitly.

use std::fs;
use std::path::{Path, PathBuf};

/// Config filename looked for in the source root.
pub const CONFIG_FILENAME: &str = "config.toml";
/// Subdirectory holding ChordPro files.
pub const SONGS_DIRNAME: &str = "songs";
/// Subdirectory holding playlist files.
pub const PLAYLISTS_DIRNAME: &str = "playlists";

/// Mount roots checked for removable media.
const MOUNT_ROOTS: &[&str] = &["/media", "/mnt", "/run/media"];

/// A resolved data directory with its config, songs and playlist paths.
#[derive(Clone, Debug)]
pub struct DataSource {
    root: PathBuf,
    config_path: Option<PathBuf>,
    songs_path: Option<PathBuf>,
    playlists_path: Option<PathBuf>,
}

impl DataSource {
    /// Inspect a root directory for config, songs and playlists.
    ///
    /// When there is no `songs/` subdirectory the root itself serves as
    /// the songs path.
    pub fn scan(root: impl Into<PathBuf>) -> Self {
        let root = root.into();

        let config_file = root.join(CONFIG_FILENAME);
        let config_path = config_file.is_file().then_some(config_file);

        let songs_dir = root.join(SONGS_DIRNAME);
        let songs_path = if songs_dir.is_dir() {
            Some(songs_dir)
        } else if root.is_dir() {
            Some(root.clone())
        } else {
            None
        };

        let playlists_dir = root.join(PLAYLISTS_DIRNAME);
        let playlists_path = playlists_dir.is_dir().then_some(playlists_dir);

        Self {
            root,
            config_path,
            songs_path,
            playlists_path,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn songs_path(&self) -> Option<&Path> {
        self.songs_path.as_deref()
    }

    pub fn playlists_path(&self) -> Option<&Path> {
        self.playlists_path.as_deref()
    }

    /// A source is usable when it has songs or at least a config file.
    pub fn is_valid(&self) -> bool {
        self.songs_path.is_some() || self.config_path.is_some()
    }
}

/// Find all valid data sources under the common mount roots.
pub fn find_mounted_sources() -> Vec<DataSource> {
    let mut sources = Vec::new();
    for mount in mount_candidates() {
        let source = DataSource::scan(mount);
        if source.is_valid() {
            sources.push(source);
        }
    }
    sources
}

/// The first valid mounted data source, if any.
pub fn find_first_source() -> Option<DataSource> {
    find_mounted_sources().into_iter().next()
}

/// Enumerate plausible mount points one and two levels below the roots.
///
/// Sticks land either directly under a root (`/media/usb`) or below a
/// per-user directory (`/media/pi/STICK`).
fn mount_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    for base in MOUNT_ROOTS {
        let base = Path::new(base);
        let Ok(entries) = fs::read_dir(base) else {
            continue;
        };
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            if is_likely_mount(&dir) {
                candidates.push(dir);
            } else if let Ok(subentries) = fs::read_dir(&dir) {
                for sub in subentries.flatten() {
                    let sub = sub.path();
                    if sub.is_dir() && is_likely_mount(&sub) {
                        candidates.push(sub);
                    }
                }
            }
        }
    }

    candidates
}

/// Heuristic mount-point check.
///
/// Hidden names (`.Spotlight-V100` and friends) are skipped. On unix a
/// device id differing from the parent marks a real mount; otherwise any
/// non-empty directory qualifies.
fn is_likely_mount(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    if path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
    {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(meta), Some(Ok(parent_meta))) =
            (path.metadata(), path.parent().map(|p| p.metadata()))
        {
            if meta.dev() != parent_meta.dev() {
                return true;
            }
        }
    }

    fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
