use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use signsheet::platform::{DeviceMetrics, StaticDevice};
use signsheet::rendering::layout::Rect;
use signsheet::{InputEvent, InputKind, PadConfig, SignatureImage};

#[derive(Parser)]
#[command(name = "signsheet", about = "Signature capture surface tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay recorded input events through a pad and export the signature
    Replay {
        /// JSON file with a list of `{ "action": ..., "kind": ... }` events
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 300.0)]
        width: f32,
        #[arg(long, default_value_t = 120.0)]
        height: f32,
        /// Device pixel ratio
        #[arg(long, default_value_t = 1.0)]
        ratio: f32,
        /// Optional pad configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Where to write the PNG
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also print the data URL to stdout
        #[arg(long)]
        data_url: bool,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Action {
    Down,
    Move,
    Up,
    Leave,
    Clear,
}

#[derive(Deserialize)]
struct Step {
    action: Action,
    #[serde(flatten)]
    kind: Option<InputKind>,
}

fn replay(
    input: PathBuf,
    bounds: Rect,
    ratio: f32,
    config: Option<PathBuf>,
) -> anyhow::Result<Option<SignatureImage>> {
    let config: PadConfig = match config {
        Some(path) => PadConfig::from_json_file(&path).with_context(|| format!("loading {}", path.display()))?,
        None => PadConfig::default(),
    };
    let raw = fs::read_to_string(&input).with_context(|| format!("reading {}", input.display()))?;
    let steps: Vec<Step> = serde_json::from_str(&raw).with_context(|| format!("parsing {}", input.display()))?;

    let device = StaticDevice::with_metrics(DeviceMetrics {
        dpr: ratio,
        ..Default::default()
    });
    let mut pad = signsheet::new_pad(config);
    let saved: Arc<Mutex<Option<SignatureImage>>> = Arc::new(Mutex::new(None));
    let on_save = saved.clone();
    pad.on_save(move |img| {
        *on_save.lock().unwrap_or_else(|p| p.into_inner()) = Some(img.clone());
    });
    let on_clear = saved.clone();
    pad.on_clear(move || {
        *on_clear.lock().unwrap_or_else(|p| p.into_inner()) = None;
    });
    pad.mount(bounds, &device);
    if !pad.is_mounted() {
        bail!("surface {}x{} has no drawable area", bounds.width, bounds.height);
    }

    for step in steps {
        let mut event = InputEvent::new(step.kind.unwrap_or(InputKind::Other));
        match step.action {
            Action::Down => pad.pointer_down(&mut event),
            Action::Move => pad.pointer_move(&mut event),
            Action::Up => pad.pointer_up(&mut event),
            Action::Leave => pad.pointer_leave(&mut event),
            Action::Clear => pad.clear(),
        }
    }

    let result = saved.lock().unwrap_or_else(|p| p.into_inner()).take();
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Replay {
            input,
            width,
            height,
            ratio,
            config,
            out,
            data_url,
        } => {
            let bounds = Rect::new(0.0, 0.0, width, height);
            let Some(image) = replay(input, bounds, ratio, config)? else {
                bail!("no signature was saved");
            };
            if data_url {
                println!("{}", image.to_data_url());
            }
            if let Some(out) = out {
                fs::write(&out, &image.png_data).with_context(|| format!("writing {}", out.display()))?;
                println!("wrote {}x{} signature to {}", image.width, image.height, out.display());
            }
        }
    }
    Ok(())
}
