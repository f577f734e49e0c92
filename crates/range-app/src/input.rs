//! Line-oriented command input for the `run` mode.
//!
//! Lines are decoded lossily, so a stray invalid byte costs one command
//! instead of the rest of the stream.

use std::io::BufRead;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use range_core::enums::SessionPhase;

use crate::jsonl;
use crate::state::AppState;

/// Forward every parseable command from `reader` to the game loop until EOF.
///
/// Returns how many commands were forwarded. Unparseable lines are logged
/// and skipped; the only errors are a failing reader and a game loop that
/// stopped accepting commands.
pub fn forward_commands<R: BufRead>(mut reader: R, state: &AppState) -> anyhow::Result<usize> {
    let mut forwarded = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("failed to read command input")?;
        if read == 0 {
            return Ok(forwarded);
        }
        let line = String::from_utf8_lossy(&buf);
        match jsonl::parse_command(&line) {
            Ok(Some(command)) => {
                state.send(command)?;
                forwarded += 1;
            }
            Ok(None) => {}
            Err(err) => warn!("{err:#}"),
        }
    }
}

/// Block while a session is running and the game loop thread is alive.
pub fn wait_for_session_end(state: &AppState) {
    info!("input closed; waiting for the session to end");
    // Give the loop a tick to pick up the final commands before polling.
    std::thread::sleep(Duration::from_millis(100));
    while state.loop_alive()
        && state
            .snapshot()
            .is_some_and(|s| s.phase == SessionPhase::Running)
    {
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// Forward `reader` to the game loop, then shut the loop down on every path.
///
/// Once this returns the game loop has exited, so the event channel closes
/// and the writer side can finish.
pub fn drive<R: BufRead>(reader: R, state: &AppState) {
    match forward_commands(reader, state) {
        Ok(count) => {
            info!(commands = count, "command input finished");
            wait_for_session_end(state);
        }
        Err(err) => warn!("{err:#}"),
    }
    if let Err(err) = state.shutdown() {
        warn!("{err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;
    use std::time::Instant;

    use range_core::config::SessionConfig;
    use range_core::events::RangeEvent;

    use crate::settings::AppSettings;

    fn fast_settings() -> AppSettings {
        AppSettings {
            tick_rate: 200,
            session: SessionConfig {
                session_duration_secs: 0.1,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_bytes_skip_one_line() {
        let state = AppState::new();
        let (event_tx, _event_rx) = mpsc::channel();
        state.start(fast_settings(), event_tx).unwrap();

        let input: &[u8] =
            b"{\"type\":\"StartSession\"}\n\xff\xfe\nnot json\n\n{\"type\":\"ResetSession\"}\n";
        let forwarded = forward_commands(Cursor::new(input), &state).unwrap();
        assert_eq!(forwarded, 2, "bad lines are skipped, later lines still arrive");

        state.shutdown().unwrap();
    }

    #[test]
    fn test_stopped_loop_is_an_error() {
        let state = AppState::new();
        let input: &[u8] = b"{\"type\":\"StartSession\"}\n";
        assert!(forward_commands(Cursor::new(input), &state).is_err());
    }

    #[test]
    fn test_drive_always_shuts_down() {
        let state = AppState::new();
        let (event_tx, event_rx) = mpsc::channel();
        state.start(fast_settings(), event_tx).unwrap();

        let input: &[u8] = b"{\"type\":\"StartSession\"}\n\xff\n";
        let started = Instant::now();
        drive(Cursor::new(input), &state);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!state.is_running());

        // The loop owned the only event sender, so the channel is closed now.
        let events: Vec<RangeEvent> = event_rx.iter().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, RangeEvent::SessionEnded { .. })));
    }
}
