//! Pedal input via POSIX signals.
//!
//! Foot pedals reach the prompter as process signals: SIGUSR1 pages
//! forward, SIGUSR2 pages backward, so a GPIO daemon, a udev rule or a
//! plain `kill -USR1` can all act as the pedal. SIGTERM maps to a clean
//! quit. The listener thread owns nothing but a sender handle into the
//! action queue; the control loop applies the actions on its own thread.

use std::io;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use signal_hook::consts::{SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook::iterator::{Handle, Signals};
use stagecue_core::Action;

/// Running signal listener; call [`stop`](PedalListener::stop) on
/// teardown.
pub struct PedalListener {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

impl PedalListener {
    /// Spawn the listener thread.
    pub fn spawn(sender: Sender<Action>) -> io::Result<Self> {
        let mut signals = Signals::new([SIGUSR1, SIGUSR2, SIGTERM])?;
        let handle = signals.handle();

        let thread = std::thread::Builder::new()
            .name("pedal-signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    let action = match signal {
                        SIGUSR1 => Action::NextPage,
                        SIGUSR2 => Action::PrevPage,
                        SIGTERM => Action::Quit,
                        _ => continue,
                    };
                    log::debug!("pedal signal {signal} -> {action:?}");
                    if sender.send(action).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }

    /// Stop the listener and join its thread.
    pub fn stop(mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("pedal listener thread panicked");
            }
        }
    }
}
