//! stagecue - Stage teleprompter for ChordPro songs.
//!
//! Finds a data source (a directory or mounted stick with songs, an
//! optional playlist and an optional config), loads the set list and
//! runs the fullscreen terminal prompter with keyboard and pedal paging.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use stagecue::{ui, App, Config, KeyMap, PedalListener, Theme};
use stagecue_core::{
    find_first_source, find_playlist_files, parse_file, ActionQueue, DataSource, Playlist,
    PlaylistEntry, PlaylistManager,
};

/// Stage teleprompter for ChordPro songs
#[derive(Parser, Debug)]
#[command(name = "stagecue")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stage teleprompter for ChordPro songs", long_about = None)]
struct Cli {
    /// Path to a config.toml (default: config.toml on the data source)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Data directory containing songs and playlists
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Show a single ChordPro file instead of a playlist
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = locate_source(&cli)?;
    let config = load_config(&cli, source.as_ref())?;

    let playlist = match &cli.file {
        Some(file) => single_file_playlist(file)?,
        None => {
            let source = source.ok_or_else(|| {
                anyhow!(
                    "no data source found; pass --data-dir or mount a stick \
                     with ChordPro files (.chopro, .cho, .crd, .chordpro)"
                )
            })?;
            build_playlist(&source)?
        }
    };

    if playlist.is_empty() {
        log::warn!("playlist '{}' has no entries", playlist.name);
    } else {
        log::info!("loaded playlist '{}' ({} songs)", playlist.name, playlist.len());
    }

    run_tui(&config, playlist)
}

/// Resolve the data source: explicit directory first, then mounted media.
fn locate_source(cli: &Cli) -> Result<Option<DataSource>> {
    match &cli.data_dir {
        Some(dir) => {
            let source = DataSource::scan(dir);
            if !source.is_valid() {
                bail!("{} is not a usable data directory", dir.display());
            }
            log::info!("using data directory {}", dir.display());
            Ok(Some(source))
        }
        None => {
            let source = find_first_source();
            if let Some(source) = &source {
                log::info!("found data source at {}", source.root().display());
            }
            Ok(source)
        }
    }
}

/// Config precedence: `-c` path, then the data source's config.toml, then
/// defaults. A config file that exists but does not parse is fatal.
fn load_config(cli: &Cli, source: Option<&DataSource>) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path);
    }
    if let Some(path) = source.and_then(|s| s.config_path()) {
        log::info!("loading config from {}", path.display());
        return Config::load(path);
    }
    log::info!("using default configuration");
    Ok(Config::default())
}

/// Wrap one ChordPro file in a single-entry playlist.
fn single_file_playlist(file: &Path) -> Result<Playlist> {
    let song = parse_file(file).with_context(|| format!("loading {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("song")
        .to_string();
    let entry = PlaylistEntry::new(filename).with_path(file).with_song(song);
    Ok(Playlist::new("Single Song", vec![entry]))
}

/// Load the first playlist file, or fall back to a directory scan.
fn build_playlist(source: &DataSource) -> Result<Playlist> {
    let songs_dir = source
        .songs_path()
        .ok_or_else(|| anyhow!("data source has no songs directory"))?;
    let manager = PlaylistManager::new(songs_dir);

    let mut playlist_files = manager.find_playlist_files();
    if let Some(dir) = source.playlists_path() {
        playlist_files.extend(find_playlist_files(dir));
    }

    match playlist_files.first() {
        Some(path) => {
            log::info!("loading playlist file {}", path.display());
            Ok(manager.load_playlist_file(path)?)
        }
        None => {
            log::info!("no playlist file, scanning {}", songs_dir.display());
            Ok(manager.from_directory(None))
        }
    }
}

fn run_tui(config: &Config, playlist: Playlist) -> Result<()> {
    let keymap = KeyMap::from_bindings(&config.input.keyboard);
    let theme = Theme::from_display_config(&config.display);
    let mut app = App::new(playlist, config.display.zoom());

    let queue = ActionQueue::new();
    let pedal = if config.input.pedal.enabled {
        match PedalListener::spawn(queue.sender()) {
            Ok(listener) => Some(listener),
            Err(err) => {
                log::warn!("pedal listener unavailable: {err}");
                None
            }
        }
    } else {
        None
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, &keymap, &theme, &queue);

    // Best-effort teardown in fixed order; failures are logged, not raised.
    if let Err(err) = disable_raw_mode() {
        log::warn!("failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        log::warn!("failed to leave alternate screen: {err}");
    }
    if let Some(pedal) = pedal {
        pedal.stop();
    }

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &KeyMap,
    theme: &Theme,
    queue: &ActionQueue,
) -> Result<()> {
    loop {
        app.set_viewport_rows(ui::content_rows(terminal.size()?));
        terminal.draw(|frame| ui::render(frame, app, theme))?;

        // Pedal actions first, then the keyboard.
        while let Some(action) = queue.try_recv() {
            if !app.apply(action) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    if let Some(action) = keymap.action_for(key.code) {
                        if !app.apply(action) {
                            return Ok(());
                        }
                    }
                }
                // Resize is picked up by the viewport check next tick.
                _ => {}
            }
        }
    }
}
