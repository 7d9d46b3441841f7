use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use droidscope_lib::capture::{AdbTransport, CaptureTransport, FileTransport};
use droidscope_lib::config::{self, AppConfig};
use droidscope_lib::perception::render::render_records;
use droidscope_lib::{capture_and_perceive, DroidScopeResult};

#[derive(Parser)]
#[command(name = "droidscope")]
#[command(about = "Dump the current Android screen as an agent-ready element list")]
#[command(version)]
struct Cli {
    /// Configuration file path (default: search next to the binary, cwd, user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// adb binary
    #[arg(long, env = "DROIDSCOPE_ADB")]
    adb: Option<String>,

    /// Device serial passed to `adb -s`
    #[arg(short, long, env = "ANDROID_SERIAL")]
    serial: Option<String>,

    /// Read a saved `uiautomator dump` file instead of capturing from a device
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Print every structured record as JSON and skip the prompt
    #[arg(long)]
    json: bool,

    /// Number of structured records to print after the prompt
    #[arg(short, long)]
    records: Option<usize>,
}

fn load(cli: &Cli) -> DroidScopeResult<AppConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    if let Some(adb) = &cli.adb {
        cfg.capture.adb_path = adb.clone();
    }
    if let Some(serial) = &cli.serial {
        cfg.capture.serial = Some(serial.clone());
    }
    if let Some(n) = cli.records {
        cfg.output.records_preview = n;
    }
    Ok(cfg)
}

async fn run(cli: Cli) -> DroidScopeResult<()> {
    let cfg = load(&cli)?;

    let transport: Box<dyn CaptureTransport> = match &cli.dump {
        Some(path) => Box::new(FileTransport::new(path)),
        None => Box::new(AdbTransport::new(cfg.capture.clone())),
    };
    let perception = capture_and_perceive(transport.as_ref()).await?;

    if cli.json {
        println!("{}", render_records(&perception.elements, None)?);
        return Ok(());
    }

    if perception.is_empty() {
        tracing::info!("no elements on screen");
        return Ok(());
    }
    println!("{}", perception.prompt);

    let preview = cfg.output.records_preview;
    if preview > 0 {
        println!();
        println!("{}", render_records(&perception.elements, Some(preview))?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    droidscope_lib::init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "no perception available");
            ExitCode::FAILURE
        }
    }
}
