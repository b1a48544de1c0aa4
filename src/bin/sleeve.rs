use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sleeve", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a poster description JSON to PNG.
    Render(RenderArgs),
    /// Build a poster from catalog album or track JSON and render it to PNG.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Settings JSON; `SLEEVE_*` environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for palette extraction. Unseeded runs may pick different accent colors.
    #[arg(long)]
    seed: Option<u64>,

    /// Regular font file. Fonts are discovered when omitted.
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// Bold font file. Bold text uses the regular face when omitted.
    #[arg(long, requires = "font_regular")]
    font_bold: Option<PathBuf>,

    /// Print the layout report as JSON on stdout.
    #[arg(long)]
    report: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input poster description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Catalog album JSON.
    #[arg(long, conflicts_with = "track", required_unless_present = "track")]
    album: Option<PathBuf>,

    /// Catalog track JSON.
    #[arg(long)]
    track: Option<PathBuf>,

    /// Request a scan code for the record.
    #[arg(long)]
    scan_code: bool,

    /// Caption under the scan code.
    #[arg(long)]
    caption: Option<String>,

    /// Share URL or `spotify:` URI, used when the record JSON carries no `uri`.
    #[arg(long = "ref")]
    reference: Option<String>,

    /// Write the normalized poster description JSON here.
    #[arg(long)]
    dump_description: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let desc = sleeve::PosterDescription::from_path(&args.in_path)?;
    desc.validate()?;
    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    render_to_png(&desc, assets_root, &args.output)
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let code = sleeve::ScanCodeOptions {
        show: args.scan_code,
        caption: args.caption.clone(),
    };

    let (mut desc, source) = match (&args.album, &args.track) {
        (Some(path), _) => {
            let album = sleeve::CatalogAlbum::from_json(&read_text(path)?)?;
            (
                sleeve::PosterDescription::from_catalog_album(&album, &code),
                path,
            )
        }
        (None, Some(path)) => {
            let track = sleeve::CatalogTrack::from_json(&read_text(path)?)?;
            (
                sleeve::PosterDescription::from_catalog_track(&track, &code),
                path,
            )
        }
        (None, None) => anyhow::bail!("pass --album or --track"),
    };

    if let Some(reference) = &args.reference {
        let parsed = sleeve::CatalogRef::parse(reference)?;
        if desc.catalog_uri.is_none() {
            desc.catalog_uri = Some(parsed.uri());
        }
    }
    desc.validate()?;

    if let Some(path) = &args.dump_description {
        create_parent_dir(path)?;
        let f = std::fs::File::create(path)
            .with_context(|| format!("create '{}'", path.display()))?;
        serde_json::to_writer_pretty(f, &desc)
            .with_context(|| format!("write description '{}'", path.display()))?;
    }

    let assets_root = source.parent().unwrap_or_else(|| Path::new("."));
    render_to_png(&desc, assets_root, &args.output)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<sleeve::RenderSettings> {
    let settings = match path {
        Some(p) => sleeve::RenderSettings::from_path(p)?,
        None => sleeve::RenderSettings::default(),
    }
    .apply_env();
    settings.validate()?;
    Ok(settings)
}

fn load_fonts(
    args: &OutputArgs,
    settings: &sleeve::RenderSettings,
) -> anyhow::Result<sleeve::FontSet> {
    match (&args.font_regular, &args.font_bold) {
        (Some(regular), bold) => Ok(sleeve::FontSet::from_files(regular, bold.as_deref())?),
        _ => sleeve::FontSet::discover(settings.font_dir.as_deref())
            .context("find fonts (pass --font-regular/--font-bold or set SLEEVE_FONT_DIR)"),
    }
}

fn render_to_png(
    desc: &sleeve::PosterDescription,
    assets_root: &Path,
    args: &OutputArgs,
) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let fonts = load_fonts(args, &settings)?;

    let (width, height) = sleeve::PosterGeometry::for_variant(desc.variant).pixel_size();
    let mut surface = sleeve::CpuSurface::new(width, height, &fonts)?;
    let mut loader =
        sleeve::DefaultImageLoader::new(assets_root).with_timeout_secs(settings.http_timeout_secs);
    let mut rng = match args.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_os_rng(),
    };

    let report = sleeve::render_poster(desc, &mut surface, &mut loader, &settings, &mut rng)?;
    for degraded in &report.degraded {
        tracing::warn!(?degraded, "element rendered with fallback");
    }

    let frame = surface.to_rgba8();
    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
