//! Command-line helpers shared by the binaries: argument parsing, the
//! autoplay loop, and plain-text board rendering.

use std::io::Write;

use anyhow::{anyhow, Result};

use crate::adapter::build_observation;
use crate::core::BoardSnapshot;
use crate::engine::{EngineConfig, GameSnapshot, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayArgs {
    pub config: EngineConfig,
    pub moves: u32,
    /// Emit observations as JSON lines instead of text boards.
    pub json: bool,
}

/// Parse `--seed --width --height --kinds --moves --json` on top of `base`
pub fn parse_autoplay_args(args: &[String], base: EngineConfig) -> Result<AutoplayArgs> {
    fn value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
        let v = args
            .get(i)
            .ok_or_else(|| anyhow!("missing value for {}", flag))?;
        v.parse::<T>()
            .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
    }

    let mut config = base;
    let mut moves = 20u32;
    let mut json = false;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = value(args, i, "--seed")?;
            }
            "--width" => {
                i += 1;
                config.width = value(args, i, "--width")?;
            }
            "--height" => {
                i += 1;
                config.visible_height = value(args, i, "--height")?;
            }
            "--kinds" => {
                i += 1;
                config.kinds = value(args, i, "--kinds")?;
            }
            "--moves" => {
                i += 1;
                moves = value(args, i, "--moves")?;
            }
            "--json" => json = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;
    Ok(AutoplayArgs {
        config,
        moves,
        json,
    })
}

/// Text rows, top first, with a row index gutter
pub fn render_board(board: &BoardSnapshot) -> Vec<String> {
    let height = board.height as usize;
    board
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| format!("{:>2} {}", height - 1 - i, row))
        .collect()
}

pub fn status_line(snap: &GameSnapshot) -> String {
    format!(
        "ep={} seed={} score={} swaps={} cleared={} best_chain={}",
        snap.episode_id, snap.seed, snap.score, snap.swaps, snap.tiles_cleared, snap.best_chain
    )
}

/// Consecutive restarts without a legal swap before autoplay gives up
const MAX_DEAD_BOARDS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoplayReport {
    pub swaps: u32,
    pub restarts: u32,
    pub score: u32,
}

/// Play `args.moves` hinted swaps, restarting whenever the board has no move left
pub fn run_autoplay(args: &AutoplayArgs, out: &mut impl Write) -> Result<AutoplayReport> {
    let mut session = Session::new(args.config.clone())?;
    let mut report = AutoplayReport::default();
    let mut seq = 0u64;

    let mut dead_boards = 0u32;

    emit(&session, args.json, &mut seq, out)?;
    while report.swaps < args.moves {
        let Some((a, b)) = session.hint() else {
            dead_boards += 1;
            if dead_boards > MAX_DEAD_BOARDS {
                return Err(anyhow!("no playable board after {} restarts", MAX_DEAD_BOARDS));
            }
            session.restart();
            report.restarts += 1;
            emit(&session, args.json, &mut seq, out)?;
            continue;
        };
        dead_boards = 0;
        session.try_swap(a, b)?;
        session.settle()?;
        report.swaps += 1;
        if !args.json {
            writeln!(out, "swap {} <-> {}", a, b)?;
        }
        emit(&session, args.json, &mut seq, out)?;
    }

    report.score = session.score();
    Ok(report)
}

fn emit(session: &Session, json: bool, seq: &mut u64, out: &mut impl Write) -> Result<()> {
    let snap = session.snapshot();
    *seq += 1;
    if json {
        serde_json::to_writer(&mut *out, &build_observation(&snap, *seq))?;
        writeln!(out)?;
    } else {
        for line in render_board(&snap.board) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}", status_line(&snap))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_autoplay_args_overrides_base() {
        let parsed = parse_autoplay_args(
            &args(&["--seed", "42", "--width", "6", "--moves", "3", "--json"]),
            EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(parsed.config.seed, 42);
        assert_eq!(parsed.config.width, 6);
        assert_eq!(parsed.config.visible_height, 8);
        assert_eq!(parsed.moves, 3);
        assert!(parsed.json);
    }

    #[test]
    fn parse_autoplay_args_rejects_bad_input() {
        let base = EngineConfig::default();
        assert!(parse_autoplay_args(&args(&["--seed"]), base.clone()).is_err());
        assert!(parse_autoplay_args(&args(&["--seed", "x"]), base.clone()).is_err());
        assert!(parse_autoplay_args(&args(&["--kinds", "2"]), base.clone()).is_err());
        assert!(parse_autoplay_args(&args(&["--turbo"]), base).is_err());
    }

    #[test]
    fn render_board_labels_rows_top_first() {
        let board = crate::core::Board::from_pattern(&["AB", "CD"]).unwrap();
        let lines = render_board(&BoardSnapshot::capture(&board));
        assert_eq!(lines, vec![" 1 AB".to_string(), " 0 CD".to_string()]);
    }

    #[test]
    fn run_autoplay_gives_up_on_boards_without_moves() {
        let parsed = AutoplayArgs {
            config: EngineConfig::immediate().with_size(2, 2),
            moves: 1,
            json: false,
        };
        let err = run_autoplay(&parsed, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no playable board"));
    }

    #[test]
    fn run_autoplay_plays_requested_moves() {
        let parsed = AutoplayArgs {
            config: EngineConfig::immediate().with_seed(3),
            moves: 5,
            json: true,
        };
        let mut out = Vec::new();
        let report = run_autoplay(&parsed, &mut out).unwrap();

        assert_eq!(report.swaps, 5);
        assert!(report.score >= 5 * 300);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len() as u32, 1 + report.swaps + report.restarts);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["type"], "observation");
        }
    }
}
