//! Seeded autoplay runner (default binary).
//!
//! Deals a board from `MATCH3_*` environment settings overridden by flags,
//! plays hinted swaps, and prints every settled board.

use std::io::{self, BufWriter, Write};

use anyhow::Result;

use match_three::cli::{parse_autoplay_args, run_autoplay};
use match_three::engine::EngineConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = parse_autoplay_args(&args, EngineConfig::from_env())?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let report = run_autoplay(&parsed, &mut out)?;
    out.flush()?;

    eprintln!(
        "[match-three] {} swaps, {} restarts, final score {}",
        report.swaps, report.restarts, report.score
    );
    Ok(())
}
