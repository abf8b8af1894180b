use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lumina::{
    Canvas, CompositorOpts, DefaultAssetLoader, DirectorySink, FacingMode, FfmpegVideoSource,
    FrameCatalog, FrameContent, Session, SessionOpts, ShareOutcome, StillFrameSource, SystemClock,
    VideoSource,
};

#[derive(Parser, Debug)]
#[command(name = "lumina", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the frame catalog.
    Frames(FramesArgs),
    /// Capture a photo from an image or video file, frame it and save it as a PNG.
    Snap(SnapArgs),
    /// Frame an already captured photo and save it as a PNG.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Catalog JSON (defaults to the built-in frames).
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Frame id to overlay (defaults to the catalog's default).
    #[arg(long)]
    frame: Option<String>,

    /// Output resolution as WIDTHxHEIGHT.
    #[arg(long, default_value_t = Canvas::PORTRAIT_HD)]
    size: Canvas,

    /// Directory receiving downloads.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also share the photo.
    #[arg(long, default_value_t = false)]
    share: bool,

    /// Directory acting as the share target (sharing is unsupported without it).
    #[arg(long)]
    share_dir: Option<PathBuf>,

    /// Do not load system fonts for vector frames.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct SnapArgs {
    /// Image (or, with --video, video) file acting as the camera.
    #[arg(long)]
    source: PathBuf,

    /// Treat the source as a video file decoded with ffmpeg.
    #[arg(long, default_value_t = false)]
    video: bool,

    /// Timestamp in seconds to grab from a video source.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Camera direction; `user` captures mirrored.
    #[arg(long, value_enum, default_value_t = Facing::Environment)]
    facing: Facing,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Previously captured photo.
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Facing {
    User,
    Environment,
}

impl From<Facing> for FacingMode {
    fn from(f: Facing) -> Self {
        match f {
            Facing::User => FacingMode::User,
            Facing::Environment => FacingMode::Environment,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Snap(args) => cmd_snap(args).await,
        Command::Compose(args) => cmd_compose(args).await,
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (catalog, _) = load_catalog(&args.catalog)?;
    let active = catalog.active().id().clone();
    for asset in catalog.list() {
        let marker = if *asset.id() == active { "*" } else { " " };
        let detail = match asset.content() {
            FrameContent::None => String::new(),
            FrameContent::VectorMarkup { markup } => format!("{} bytes of markup", markup.len()),
            FrameContent::RasterReference { uri, .. } => uri.clone(),
        };
        println!(
            "{marker} {:<12} {:<18} {:?} {detail}",
            asset.id(),
            asset.name(),
            asset.kind()
        );
    }
    Ok(())
}

async fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    let mut source: Box<dyn VideoSource> = if args.video {
        Box::new(FfmpegVideoSource::new(&args.source, args.time))
    } else {
        Box::new(
            StillFrameSource::from_path(&args.source)
                .with_context(|| format!("open source '{}'", args.source.display()))?,
        )
    };

    let mut session = new_session(&args.output, args.facing.into())?;
    session.start_camera(source.as_mut()).await?;
    session.capture(source.as_mut()).await?;
    export(&session, &args.output).await
}

async fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let image = lumina::assets::decode::decode_image(&bytes)
        .with_context(|| format!("decode image '{}'", args.image.display()))?;

    let mut session = new_session(&args.output, FacingMode::default())?;
    session.adopt_capture(image)?;
    export(&session, &args.output).await
}

fn load_catalog(args: &CatalogArgs) -> anyhow::Result<(FrameCatalog, PathBuf)> {
    match &args.catalog {
        Some(path) => {
            let catalog = FrameCatalog::from_path(path)?;
            let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            Ok((catalog, root))
        }
        None => Ok((FrameCatalog::builtin(), PathBuf::from("."))),
    }
}

fn new_session(args: &OutputArgs, facing: FacingMode) -> anyhow::Result<Session> {
    let (mut catalog, root) = load_catalog(&args.catalog)?;
    if let Some(id) = &args.frame {
        catalog.set_active(id)?;
    }
    Ok(Session::new(
        catalog,
        Arc::new(DefaultAssetLoader::new(root)),
        SessionOpts {
            target: args.size,
            facing,
            compositor: CompositorOpts {
                load_system_fonts: !args.no_system_fonts,
            },
        },
    ))
}

async fn export(session: &Session, args: &OutputArgs) -> anyhow::Result<()> {
    let mut sink = DirectorySink::new(&args.out_dir);
    if let Some(dir) = &args.share_dir {
        sink = sink.with_outbox(dir);
    }

    let name = session.save(&sink, &SystemClock).await?;
    eprintln!("wrote {}", args.out_dir.join(name).display());

    if args.share {
        match session.share(&sink).await? {
            ShareOutcome::Shared => eprintln!("shared photo"),
            ShareOutcome::Failed(msg) => eprintln!("share failed: {msg}"),
            ShareOutcome::Unsupported => {}
        }
    }
    Ok(())
}
