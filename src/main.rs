use anyhow::{anyhow, Context};
use clap::Parser;
use rollbookd::config::Config;
use rollbookd::{ipc, logging};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Attendance and homework sidecar speaking JSON lines on stdin/stdout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref()).context("failed to start rollbookd")?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if args.log_dir.is_some() {
        config.log_dir = args.log_dir;
    }
    logging::init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|e| anyhow!(e))
        .context("failed to initialize logging")?;

    let mut state = ipc::AppState::from_config(&config);
    log::info!(
        "event=ready module=main students={} courses={} date_policy={}",
        state.book.roster().students().len(),
        state.book.roster().courses().len(),
        state.book.date_policy().as_str()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                log::error!("event=stdin_read module=main status=failed error={}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No id to echo back.
                let resp = ipc::err("", "bad_json", e.to_string(), None);
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(stdout, "{}", resp);
        let _ = stdout.flush();
    }

    log::info!("event=shutdown module=main status=ok");
    Ok(())
}
