//! Application state shared between the adapters and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context};

use range_core::commands::RangeCommand;
use range_core::events::RangeEvent;
use range_core::state::RangeSnapshot;

use crate::game_loop;
use crate::settings::AppSettings;

/// Commands sent from the adapters to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the session engine.
    Command(RangeCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// Usable from several adapter threads at once:
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start`
/// - `Arc<Mutex<...>>` holds the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<RangeSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the game loop thread has been started and not shut down.
    pub fn is_running(&self) -> bool {
        lock(&self.command_tx).map(|tx| tx.is_some()).unwrap_or(false)
    }

    /// Whether the game loop thread exists and has not exited.
    pub fn loop_alive(&self) -> bool {
        lock(&self.loop_handle)
            .map(|handle| handle.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Spawn the game loop. Events are forwarded to `event_tx`.
    pub fn start(
        &self,
        settings: AppSettings,
        event_tx: mpsc::Sender<RangeEvent>,
    ) -> anyhow::Result<()> {
        let mut tx_lock = lock(&self.command_tx)?;
        if tx_lock.is_some() {
            bail!("game loop already running");
        }
        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(settings, self.latest_snapshot.clone(), event_tx)?;
        *tx_lock = Some(cmd_tx);
        *lock(&self.loop_handle)? = Some(handle);
        Ok(())
    }

    /// Forward a command to the game loop.
    pub fn send(&self, command: RangeCommand) -> anyhow::Result<()> {
        let tx_lock = lock(&self.command_tx)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Command(command))
                .context("game loop is no longer receiving commands"),
            None => bail!("game loop not started"),
        }
    }

    /// Get the latest snapshot (for polling / initial state).
    pub fn snapshot(&self) -> Option<RangeSnapshot> {
        lock(&self.latest_snapshot).ok().and_then(|s| (*s).clone())
    }

    /// Stop the game loop and wait for its thread to exit. No-op if not running.
    pub fn shutdown(&self) -> anyhow::Result<()> {
        let tx = lock(&self.command_tx)?.take();
        if let Some(tx) = tx {
            // The loop may already have exited on its own.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let handle = lock(&self.loop_handle)?.take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> anyhow::Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| anyhow!("app state lock poisoned"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(state.send(RangeCommand::StartSession).is_err());
        assert!(state.shutdown().is_ok(), "shutdown when stopped is a no-op");
    }

    #[test]
    fn test_start_send_shutdown() {
        let state = AppState::new();
        let (event_tx, _event_rx) = mpsc::channel();
        let settings = AppSettings {
            tick_rate: 200,
            ..Default::default()
        };
        state.start(settings.clone(), event_tx.clone()).unwrap();
        assert!(state.is_running());
        assert!(
            state.start(settings, event_tx).is_err(),
            "second start must be rejected"
        );

        state.send(RangeCommand::StartSession).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if state.snapshot().is_some_and(|s| !s.weapons.is_empty()) {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(state.snapshot().is_some_and(|s| !s.weapons.is_empty()));

        assert!(state.loop_alive());
        state.shutdown().unwrap();
        assert!(!state.is_running());
        assert!(!state.loop_alive());
        assert!(state.send(RangeCommand::ResetSession).is_err());
    }
}
