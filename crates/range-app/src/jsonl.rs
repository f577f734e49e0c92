//! JSON-lines wire format for the stdin/stdout adapter.
//!
//! Input is one `RangeCommand` per line, e.g.
//! `{"type":"RequestFire","weapon_id":0}`. Blank lines and lines starting
//! with `#` are skipped. Output is one `RangeEvent` per line.

use anyhow::Context;
use serde::Serialize;

use range_core::commands::RangeCommand;

/// Parse one input line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_command(line: &str) -> anyhow::Result<Option<RangeCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let command = serde_json::from_str(line)
        .with_context(|| format!("failed to parse command line `{line}`"))?;
    Ok(Some(command))
}

/// Encode a value as a single JSON line without the trailing newline.
pub fn encode_line<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string(value).context("failed to encode json line")
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::events::RangeEvent;
    use range_core::types::{ProjectileId, TargetId, WeaponId};

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        assert!(parse_command("").unwrap().is_none());
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command("# start the session").unwrap().is_none());
    }

    #[test]
    fn test_parse_commands() {
        let cmd = parse_command(r#"{"type":"StartSession"}"#).unwrap();
        assert!(matches!(cmd, Some(RangeCommand::StartSession)));

        let cmd = parse_command(r#" {"type":"RequestFire","weapon_id":2} "#).unwrap();
        match cmd {
            Some(RangeCommand::RequestFire { weapon_id, muzzle }) => {
                assert_eq!(weapon_id, WeaponId(2));
                assert_eq!(muzzle.origin.x, 0.0, "muzzle defaults when omitted");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cmd =
            parse_command(r#"{"type":"ReportImpact","projectile_id":4,"target_id":1}"#).unwrap();
        assert!(matches!(
            cmd,
            Some(RangeCommand::ReportImpact {
                projectile_id: ProjectileId(4),
                target_id: TargetId(1)
            })
        ));
    }

    #[test]
    fn test_bad_line_reports_content() {
        let err = parse_command(r#"{"type":"Jump"}"#).unwrap_err();
        assert!(format!("{err}").contains("Jump"));
        assert!(parse_command("not json").is_err());
    }

    #[test]
    fn test_encode_event_line() {
        let line = encode_line(&RangeEvent::TargetDestroyed {
            target_id: TargetId(3),
            score_awarded: 10,
        })
        .unwrap();
        assert_eq!(
            line,
            r#"{"type":"TargetDestroyed","target_id":3,"score_awarded":10}"#
        );
        assert!(!line.contains('\n'));
    }
}
