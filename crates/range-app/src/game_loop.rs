//! Game loop thread: runs the session engine at the configured rate.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel, which makes the thread the single consumer
//! of every input. Events go out on a second channel and the latest snapshot is
//! stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{info, warn};

use range_core::events::RangeEvent;
use range_core::state::RangeSnapshot;
use range_sim::RangeEngine;

use crate::settings::AppSettings;
use crate::state::GameLoopCommand;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    settings: AppSettings,
    latest_snapshot: Arc<Mutex<Option<RangeSnapshot>>>,
    event_tx: mpsc::Sender<RangeEvent>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("range-game-loop".into())
        .spawn(move || {
            run_game_loop(&settings, cmd_rx, &latest_snapshot, &event_tx);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    settings: &AppSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RangeSnapshot>>,
    event_tx: &mpsc::Sender<RangeEvent>,
) {
    let mut engine = RangeEngine::new(settings.sim_config());
    let dt = settings.dt();
    let tick_duration = Duration::from_secs_f64(dt);
    let mut next_tick_time = Instant::now();
    let mut snapshot_poisoned = false;
    info!(tick_rate = settings.tick_rate, seed = settings.seed, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let mut snapshot = match engine.tick(dt) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "tick rejected");
                return;
            }
        };

        // 3. Forward events; a closed receiver only means nobody is listening
        for event in std::mem::take(&mut snapshot.events) {
            let _ = event_tx.send(event);
        }

        // 4. Store latest snapshot for synchronous polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) if !snapshot_poisoned => {
                warn!("latest snapshot lock poisoned; polling will see stale state");
                snapshot_poisoned = true;
            }
            Err(_) => {}
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::commands::RangeCommand;
    use range_core::enums::SessionPhase;
    use range_core::types::WeaponId;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Command(RangeCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::Command(RangeCommand::RequestReload {
            weapon_id: WeaponId(0),
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Command(RangeCommand::StartSession)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Command(RangeCommand::RequestReload { .. })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_runs_session_and_shuts_down() {
        let settings = AppSettings {
            tick_rate: 200,
            ..Default::default()
        };
        let latest = Arc::new(Mutex::new(None));
        let (event_tx, event_rx) = mpsc::channel();
        let (cmd_tx, handle) = spawn_game_loop(settings, latest.clone(), event_tx).unwrap();

        cmd_tx
            .send(GameLoopCommand::Command(RangeCommand::StartSession))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut running = false;
        while Instant::now() < deadline {
            let phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(SessionPhase::Running) {
                running = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(running, "session should be running within 5 s");

        cmd_tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let events: Vec<RangeEvent> = event_rx.try_iter().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, RangeEvent::WeaponSpawned { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, RangeEvent::SessionTick { .. })));
    }

    #[test]
    fn test_loop_survives_poisoned_snapshot_lock() {
        let latest: Arc<Mutex<Option<RangeSnapshot>>> = Arc::new(Mutex::new(None));
        let poisoner = latest.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the snapshot lock");
        })
        .join();
        assert!(latest.is_poisoned());

        let settings = AppSettings {
            tick_rate: 200,
            ..Default::default()
        };
        let (event_tx, event_rx) = mpsc::channel();
        let (cmd_tx, handle) = spawn_game_loop(settings, latest, event_tx).unwrap();
        cmd_tx
            .send(GameLoopCommand::Command(RangeCommand::StartSession))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut ticked = false;
        while Instant::now() < deadline && !ticked {
            ticked = event_rx
                .try_iter()
                .any(|e| matches!(e, RangeEvent::SessionTick { .. }));
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(ticked, "the loop keeps ticking without its snapshot slot");

        cmd_tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let latest = Arc::new(Mutex::new(None));
        let (event_tx, _event_rx) = mpsc::channel();
        let (cmd_tx, handle) =
            spawn_game_loop(AppSettings::default(), latest, event_tx).unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
