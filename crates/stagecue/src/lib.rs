//! stagecue - Stage teleprompter for ChordPro songs.
//!
//! The binary side of the prompter: configuration, key bindings, the
//! terminal renderer and the pedal signal listener. The song model,
//! parser, pagination and navigation live in `stagecue-core`.

pub mod app;
pub mod bindings;
pub mod config;
pub mod pedal;
pub mod ui;

pub use app::App;
pub use bindings::KeyMap;
pub use config::Config;
pub use pedal::PedalListener;
pub use ui::Theme;
