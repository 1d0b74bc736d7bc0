use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "moji", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every category's assets in selection order.
    List(SourceArgs),
    /// Pick a random combination and export it.
    Random(ExportArgs),
    /// Start from a random combination, apply explicit picks, and export.
    Compose(ComposeArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Asset root containing head/, eyebrows/, eyes/, mouth/ and details/.
    #[arg(long)]
    assets: PathBuf,

    /// Settings JSON. Flags below override its values.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Raster surface side length in pixels.
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Randomizer seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Which files to export.
    #[arg(long, value_enum, default_value_t = FormatChoice::Both)]
    format: FormatChoice,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    export: ExportArgs,

    /// CATEGORY=INDEX, repeatable (e.g. `--pick head=2 --pick eye=0`).
    #[arg(long = "pick", value_parser = parse_pick)]
    picks: Vec<(moji::Category, usize)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatChoice {
    Png,
    Svg,
    Both,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Random(args) => cmd_export(args, &[]),
        Command::Compose(args) => cmd_export(args.export, &args.picks),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn parse_pick(s: &str) -> Result<(moji::Category, usize), String> {
    let (category, index) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=INDEX, got '{s}'"))?;
    let category = category
        .parse::<moji::Category>()
        .map_err(|e| e.to_string())?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad index '{index}': {e}"))?;
    Ok((category, index))
}

fn resolve_settings(args: &SourceArgs) -> anyhow::Result<moji::Settings> {
    let mut settings = match &args.settings {
        Some(path) => moji::Settings::from_path(path)?,
        None => moji::Settings::default(),
    };
    if let Some(size) = args.canvas_size {
        settings.canvas_size = size;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;
    Ok(settings)
}

fn open_session(args: &SourceArgs) -> anyhow::Result<moji::Session> {
    let settings = resolve_settings(args)?;
    let source = Arc::new(moji::DirAssetSource::new(&args.assets));
    let mut session = moji::Session::new(settings, source)?;
    session
        .load()
        .with_context(|| format!("load assets from '{}'", args.assets.display()))?;
    Ok(session)
}

fn cmd_list(args: SourceArgs) -> anyhow::Result<()> {
    let session = open_session(&args)?;
    let catalog = session
        .catalog()
        .context("catalog missing after load (bug)")?;

    for category in moji::Category::ALL {
        let assets = catalog.assets(category);
        println!("{category} ({}):", assets.len());
        for (i, asset) in assets.iter().enumerate() {
            println!("  {i:>3}  {}", asset.reference);
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, picks: &[(moji::Category, usize)]) -> anyhow::Result<()> {
    let mut session = open_session(&args.source)?;
    for &(category, index) in picks {
        session
            .pick_category_index(category, index)
            .with_context(|| format!("pick {category}={index}"))?;
    }

    let composite = session.composite()?;
    for (category, asset) in composite.layers().iter() {
        match asset {
            Some(asset) => eprintln!("  {category:<8} {}", asset.reference),
            None => eprintln!("  {category:<8} (none)"),
        }
    }

    let mut downloads = Vec::new();
    if matches!(args.format, FormatChoice::Png | FormatChoice::Both) {
        downloads.push(session.export_png()?);
    }
    if matches!(args.format, FormatChoice::Svg | FormatChoice::Both) {
        downloads.push(session.export_svg()?);
    }

    for download in &downloads {
        let path = download.write_into(&args.out)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
