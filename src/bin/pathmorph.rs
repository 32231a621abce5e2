use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pathmorph::{Ease, Morph, MorphOptions, parse_path};

#[derive(Parser, Debug)]
#[command(name = "pathmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the interpolated path at a single progress value.
    Frame(FrameArgs),
    /// Emit a JSON array of interpolated paths across evenly spaced frames.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source path data.
    #[arg(long)]
    from: String,

    /// Target path data.
    #[arg(long)]
    to: String,

    /// Progress in 0..=1.
    #[arg(long)]
    progress: f64,

    #[command(flatten)]
    tween: TweenArgs,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Source path data.
    #[arg(long)]
    from: String,

    /// Target path data.
    #[arg(long)]
    to: String,

    /// Number of frames, endpoints included.
    #[arg(long)]
    frames: u32,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    tween: TweenArgs,
}

#[derive(Parser, Debug)]
struct TweenArgs {
    /// Timing curve applied to progress.
    #[arg(long, value_enum, default_value_t = EaseChoice::Linear)]
    ease: EaseChoice,

    /// Extra bezier segments per sub-path for smoother blending.
    #[arg(long, default_value_t = 0)]
    add_points: usize,

    /// Decimal places in emitted coordinates.
    #[arg(long, default_value_t = 6)]
    precision: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl From<EaseChoice> for Ease {
    fn from(c: EaseChoice) -> Self {
        match c {
            EaseChoice::Linear => Ease::Linear,
            EaseChoice::InQuad => Ease::InQuad,
            EaseChoice::OutQuad => Ease::OutQuad,
            EaseChoice::InOutQuad => Ease::InOutQuad,
            EaseChoice::InCubic => Ease::InCubic,
            EaseChoice::OutCubic => Ease::OutCubic,
            EaseChoice::InOutCubic => Ease::InOutCubic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn build_morph(from: &str, to: &str, tween: &TweenArgs) -> anyhow::Result<Morph> {
    let a = parse_path(from).with_context(|| "parse --from path")?;
    let b = parse_path(to).with_context(|| "parse --to path")?;
    let opts = MorphOptions {
        add_points: tween.add_points,
        precision: tween.precision,
        ..MorphOptions::default()
    };
    Ok(Morph::new(&[a, b], opts)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let morph = build_morph(&args.from, &args.to, &args.tween)?;
    println!("{}", morph.sample(args.progress, args.tween.ease.into()));
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.frames < 2 {
        anyhow::bail!("--frames must be at least 2");
    }
    let morph = build_morph(&args.from, &args.to, &args.tween)?;
    let ease: Ease = args.tween.ease.into();

    let frames: Vec<String> = (0..args.frames)
        .map(|i| {
            let t = f64::from(i) / f64::from(args.frames - 1);
            morph.sample(t, ease)
        })
        .collect();

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(f), &frames)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &frames)?;
            println!();
        }
    }
    Ok(())
}
