use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cinescroll", version)]
struct Cli {
    /// Engine config JSON. Defaults to the built-in five-panel page.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine events to stderr (repeat for more detail).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the effect layers at one scroll position as a PNG.
    Frame(FrameArgs),
    /// Print panel channel values across the whole page as JSON lines.
    Sweep(SweepArgs),
    /// Run the burst at one scroll position and print per-tick counts as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ViewportArgs {
    /// Viewport width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

impl ViewportArgs {
    fn viewport(&self) -> cinescroll::Viewport {
        cinescroll::Viewport::new(self.width, self.height)
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    viewport: ViewportArgs,

    /// Scroll offset.
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Ticks to run before capturing.
    #[arg(long, default_value_t = 1)]
    ticks: u64,

    /// Opaque backdrop color (`#RRGGBB`); transparent when omitted.
    #[arg(long)]
    background: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    viewport: ViewportArgs,

    /// Number of evenly spaced scroll positions (including both ends).
    #[arg(long, default_value_t = 21)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    viewport: ViewportArgs,

    /// Scroll offset. Defaults to the bottom of the page.
    #[arg(long)]
    offset: Option<f64>,

    /// Ticks to run.
    #[arg(long, default_value_t = 500)]
    ticks: u64,
}

#[derive(serde::Serialize)]
struct PanelRecord<'a> {
    id: &'a str,
    #[serde(flatten)]
    state: cinescroll::PanelVisualState,
}

#[derive(serde::Serialize)]
struct SweepRecord<'a> {
    offset: f64,
    page_progress: f64,
    indicator: cinescroll::IndicatorState,
    panels: Vec<PanelRecord<'a>>,
}

#[derive(serde::Serialize)]
struct TickRecord {
    tick: u64,
    burst: cinescroll::BurstState,
    active: usize,
    covered_pixels: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Sweep(args) => cmd_sweep(&config, args),
        Command::Simulate(args) => cmd_simulate(&config, args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<cinescroll::EngineConfig> {
    let Some(path) = path else {
        return Ok(cinescroll::EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    cinescroll::EngineConfig::from_json(&text)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_frame(config: &cinescroll::EngineConfig, args: FrameArgs) -> anyhow::Result<()> {
    let mut stage = cinescroll::Stage::new(config, args.viewport.viewport())?;
    stage.on_scroll(args.offset);
    for _ in 1..args.ticks {
        stage.tick();
    }
    let frame = stage.tick();
    let layers = frame
        .composite()?
        .context("viewport is too small to rasterize")?;

    let out = match args.background.as_deref() {
        Some(hex) => {
            let tone = cinescroll::Tone::from_hex(hex)?;
            let mut backdrop = cinescroll::FrameRGBA::transparent(layers.canvas());
            for px in backdrop.data.chunks_exact_mut(4) {
                px.copy_from_slice(&tone.with_opacity(1.0));
            }
            backdrop.composite_over(&layers, 1.0)?;
            backdrop
        }
        None => layers,
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &out.to_straight_rgba8(),
        out.width,
        out.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(config: &cinescroll::EngineConfig, args: SweepArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("--steps must be at least 2");
    }
    let mut stage = cinescroll::Stage::new(config, args.viewport.viewport())?;
    let max = stage.snapshot().max_offset();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for i in 0..args.steps {
        let offset = max * f64::from(i) / f64::from(args.steps - 1);
        let states = stage.on_scroll(offset).to_vec();
        let snap = stage.snapshot();
        let page = stage.page();
        let record = SweepRecord {
            offset: snap.offset,
            page_progress: snap.page_progress(),
            indicator: page.indicator(&snap),
            panels: states
                .into_iter()
                .enumerate()
                .map(|(j, state)| PanelRecord {
                    id: page.id(j).unwrap_or_default(),
                    state,
                })
                .collect(),
        };
        serde_json::to_writer(&mut out, &record).context("encode sweep record")?;
        writeln!(out).context("write stdout")?;
    }
    Ok(())
}

fn cmd_simulate(config: &cinescroll::EngineConfig, args: SimulateArgs) -> anyhow::Result<()> {
    let mut stage = cinescroll::Stage::new(config, args.viewport.viewport())?;
    let offset = args
        .offset
        .unwrap_or_else(|| stage.snapshot().max_offset());
    stage.on_scroll(offset);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for _ in 0..args.ticks {
        let frame = stage.tick();
        let record = TickRecord {
            tick: frame.tick,
            burst: frame.burst_state,
            active: frame.burst_particles,
            covered_pixels: frame.burst.map_or(0, cinescroll::FrameRGBA::covered_pixels),
        };
        serde_json::to_writer(&mut out, &record).context("encode tick record")?;
        writeln!(out).context("write stdout")?;
    }
    Ok(())
}
