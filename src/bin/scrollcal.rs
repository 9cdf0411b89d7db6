use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollcal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the calendar texture as a PNG.
    Generate(GenerateArgs),
    /// Decode the metadata block of a generated PNG.
    Inspect(InspectArgs),
    /// Write a grid of encoded values for checking a host's texture sampling.
    TestPattern(TestPatternArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background template PNG.
    #[arg(long)]
    template: PathBuf,

    /// Transparent day-header PNG.
    #[arg(long)]
    header: PathBuf,

    /// Events JSON (array of `{start, end?, title}`).
    #[arg(long)]
    events: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for calendar text. Without one, text is drawn as placeholder blocks.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Style overrides JSON.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Identifier printed in the footer.
    #[arg(long, default_value = "")]
    branch: String,

    /// Reference time (RFC 3339). Defaults to now.
    #[arg(long)]
    now: Option<DateTime<FixedOffset>>,

    /// Only keep events starting within this many days (plus those in progress).
    #[arg(long, default_value_t = 7)]
    window_days: u32,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Generated PNG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also list every text row.
    #[arg(long)]
    rows: bool,
}

#[derive(Parser, Debug)]
struct TestPatternArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Size of each grid cell in pixels.
    #[arg(long, default_value_t = 1)]
    cell: u32,
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
        Command::Generate(args) => cmd_generate(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::TestPattern(args) => cmd_test_pattern(args),
    }
}

fn read_image(path: &Path, what: &str) -> anyhow::Result<image::RgbaImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read {what} '{}'", path.display()))?;
    scrollcal::decode_image(&bytes).with_context(|| format!("decode {what} '{}'", path.display()))
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let style = match &args.style {
        Some(path) => scrollcal::Style::from_json_file(path)?,
        None => scrollcal::Style::default(),
    };
    let template = read_image(&args.template, "template")?;
    let day_header = read_image(&args.header, "day header")?;

    let json = std::fs::read(&args.events)
        .with_context(|| format!("read events '{}'", args.events.display()))?;
    let events = scrollcal::parse_events(&json)?;
    let now = args
        .now
        .unwrap_or_else(|| chrono::Local::now().fixed_offset());
    let events = scrollcal::select_window(events, now, args.window_days);
    let days = scrollcal::group_into_days(events);

    let mut shaper: Box<dyn scrollcal::TextShaper> = match &args.font {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
            Box::new(scrollcal::ParleyShaper::new(bytes)?)
        }
        None => {
            tracing::warn!("no --font given; drawing placeholder text");
            Box::new(scrollcal::PlaceholderShaper)
        }
    };

    let inputs = scrollcal::GenerateInputs {
        template: &template,
        day_header: &day_header,
        days: &days,
        generated_at: now,
        branch: &args.branch,
    };
    let tex = scrollcal::generate(&inputs, &style, shaper.as_mut())?;
    write_png(&args.out, &tex.image)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let img = read_image(&args.in_path, "texture")?;
    let block = scrollcal::read_block(&img)?;

    println!("block {}x{}", block.width, block.height);
    for (name, cells) in &block.fields {
        let rendered: Vec<String> = cells
            .iter()
            .map(|c| match c {
                scrollcal::Cell::Value(v) => v.to_string(),
                scrollcal::Cell::Color(rgb) => {
                    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
                }
            })
            .collect();
        println!("{name} = {}", rendered.join(", "));
    }

    if args.rows {
        for (y, row) in block.rows.rows().iter().enumerate() {
            let prior = row
                .prior_header
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            println!("row {y}: prior={prior} {:?}", row.kind);
        }
    }
    Ok(())
}

fn cmd_test_pattern(args: TestPatternArgs) -> anyhow::Result<()> {
    let img = scrollcal::test_pattern(args.cell)?;
    write_png(&args.out, &img)
}
