//! JSON-lines driver: reads commands from stdin, writes acks, errors, and
//! observations to stdout. See `match_three::adapter` for the message format.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use match_three::adapter::{
    build_observation, create_ack, create_error, create_swap_ack, extract_seq, parse_command,
    spawn_engine, AdapterConfig, EngineCommand, EngineReply, ErrorCode,
};
use match_three::engine::{EngineConfig, EngineError};

#[tokio::main]
async fn main() -> Result<()> {
    let handle = spawn_engine(EngineConfig::from_env(), AdapterConfig::from_env())?;
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut obs_seq = 0u64;

    write_line(&mut stdout, &build_observation(&handle.latest(), obs_seq)).await?;

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let msg = match parse_command(trimmed) {
            Ok(msg) => msg,
            Err(e) => {
                let seq = extract_seq(trimmed).unwrap_or(0);
                let err = create_error(seq, ErrorCode::InvalidCommand, &e.to_string());
                write_line(&mut stdout, &err).await?;
                continue;
            }
        };
        let command = match msg.to_command() {
            Ok(command) => command,
            Err((code, message)) => {
                write_line(&mut stdout, &create_error(msg.seq, code, &message)).await?;
                continue;
            }
        };

        match handle.request(command).await {
            Ok(reply) => {
                let ack = match &reply {
                    EngineReply::Swap(outcome) => create_swap_ack(msg.seq, outcome),
                    EngineReply::Click(Some(outcome)) => create_swap_ack(msg.seq, outcome),
                    EngineReply::Hint(Some((a, b))) => {
                        let mut ack = create_ack(msg.seq);
                        ack.hint = Some([(*a).into(), (*b).into()]);
                        ack
                    }
                    _ => create_ack(msg.seq),
                };
                write_line(&mut stdout, &ack).await?;
            }
            Err(e) => {
                let code = e
                    .downcast_ref::<EngineError>()
                    .map(ErrorCode::from_engine)
                    .unwrap_or(ErrorCode::Internal);
                write_line(&mut stdout, &create_error(msg.seq, code, &e.to_string())).await?;
                continue;
            }
        }

        if matches!(command, EngineCommand::Hint) {
            continue;
        }
        let snap = handle.wait_idle().await?;
        obs_seq += 1;
        write_line(&mut stdout, &build_observation(&snap, obs_seq)).await?;
    }

    Ok(())
}

async fn write_line<T: serde::Serialize>(out: &mut tokio::io::Stdout, msg: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec(msg)?;
    bytes.push(b'\n');
    out.write_all(&bytes).await?;
    out.flush().await?;
    Ok(())
}
