use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pixelpalette_wasm::export::{self, ExportKind};
use pixelpalette_wasm::{Palette, PaletteStore, Session, Settings, Tone, color, harmony, tone};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract and play with image color palettes.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Comma-separated hex colors to work on instead of the stored palette
    #[arg(short = 'c', long, global = true)]
    palette: Option<String>,

    /// Settings file (defaults to $PIXELPALETTE_CONFIG_PATH or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the dominant colors of an image and remember them
    Extract {
        input: PathBuf,
        /// Number of colors
        #[arg(short = 'k', long)]
        n_colors: Option<usize>,
        /// Print JSON instead of hex codes
        #[arg(long)]
        json: bool,
    },
    /// Sort the palette around the hue wheel
    Sort,
    /// Name every color
    Names,
    /// Names plus overall mood
    Meta,
    /// Poster title, mood and names
    Story,
    /// Harmonious colors around a seed
    Harmony {
        seed: String,
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Blend two colors
    Mix {
        a: String,
        b: String,
        #[arg(short, long)]
        steps: Option<usize>,
    },
    /// Build a theme; prints CSS unless output files are given
    Theme {
        #[arg(long)]
        css: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Closest brand color for each palette entry
    Brands,
    /// Render the palette to a PNG
    Render {
        kind: RenderKind,
        /// Output path (defaults to the usual download name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Pitch of the tone played for a color, or for every palette color
    Tone {
        hex: Option<String>,
        #[arg(short, long, default_value_t = tone::DEFAULT_DURATION)]
        duration: f32,
    },
    /// Show or forget the stored palette
    Last {
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderKind {
    Strip,
    Poster,
    Gradient,
    Wallpaper,
}

impl RenderKind {
    fn export_kind(self) -> ExportKind {
        match self {
            RenderKind::Strip => ExportKind::PaletteStrip,
            RenderKind::Poster => ExportKind::StoryPoster,
            RenderKind::Gradient => ExportKind::Gradient,
            RenderKind::Wallpaper => ExportKind::Wallpaper,
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_palette(palette: &[pixelpalette_wasm::Rgb]) {
    println!("{}", color::hex_list(palette));
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Saved → {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let store = settings.store();

    let mut session = match &args.palette {
        Some(list) => Session::with_palette(color::parse_hex_list(list).context("parsing --palette")?),
        None => {
            let mut session = Session::new(settings.extract.clone(), store.clone());
            session.restore();
            session
        }
    };
    let current = |session: &Session| -> Result<Palette> {
        if session.palette().is_empty() {
            bail!("no palette: run `extract <image>` first or pass --palette");
        }
        Ok(session.palette().to_vec())
    };

    match args.command {
        Command::Extract { input, n_colors, json } => {
            let mut opts = settings.extract.clone();
            if let Some(k) = n_colors {
                opts.k = k;
            }
            let bytes = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let mut session = Session::new(opts, store);
            let meta = session.analyze_image(&bytes).context("palette extraction failed")?;
            debug!(colors = session.palette().len(), "extraction done");
            if json {
                println!("{}", serde_json::to_string(session.palette())?);
            } else {
                print_palette(session.palette());
                println!("Names: {}", meta.names.join(", "));
                println!("Mood: {}", meta.mood);
            }
        }
        Command::Sort => {
            print_palette(session.sort()?);
        }
        Command::Names => {
            println!("{}", session.names()?.join(", "));
        }
        Command::Meta => {
            let meta = session.meta()?;
            println!("Names: {}", meta.names.join(", "));
            println!("Mood: {}", meta.mood);
        }
        Command::Story => {
            let story = session.story()?;
            println!("{}", story.title);
            println!("{}", story.mood);
            println!("{}", story.names.join(" · "));
        }
        Command::Harmony { seed, n } => {
            print_palette(&harmony::harmony_from_hex(&seed, n.unwrap_or(settings.generated_colors))?);
        }
        Command::Mix { a, b, steps } => {
            print_palette(&harmony::mix_hex(&a, &b, steps.unwrap_or(settings.generated_colors))?);
        }
        Command::Theme { css, json } => {
            let theme = session.theme();
            if css.is_none() && json.is_none() {
                print!("{}", theme.to_css());
            }
            if let Some(path) = css {
                write_output(&path, theme.to_css().as_bytes())?;
            }
            if let Some(path) = json {
                write_output(&path, theme.to_json()?.as_bytes())?;
            }
        }
        Command::Brands => {
            for m in session.brands()? {
                println!("{}\t{}\t{}", m.input, m.brand, m.hex);
            }
        }
        Command::Render { kind, output } => {
            let palette = current(&session)?;
            let sizes = &settings.render;
            let png = match kind {
                RenderKind::Strip => export::strip_png(&palette, sizes.strip.width, sizes.strip.height),
                RenderKind::Poster => export::poster_png(&palette),
                RenderKind::Gradient => export::gradient_png(&palette, sizes.gradient.width, sizes.gradient.height),
                RenderKind::Wallpaper => {
                    export::wallpaper_png(&palette, sizes.wallpaper.width, sizes.wallpaper.height)
                }
            }
            .context("render failed")?;
            let path = output.unwrap_or_else(|| PathBuf::from(kind.export_kind().file_name()));
            write_output(&path, &png)?;
        }
        Command::Tone { hex, duration } => {
            let tones = match hex {
                Some(hex) => vec![Tone::from_hex(&hex, duration)?],
                None => {
                    current(&session)?;
                    session.tones(duration)
                }
            };
            for tone in tones {
                println!("{:.1} Hz, {:.2} s, gain {}", tone.frequency, tone.duration, tone.gain);
            }
        }
        Command::Last { clear } => {
            let store: PaletteStore = store.context("no data directory available for the stored palette")?;
            if clear {
                store.clear()?;
                println!("Cleared {}", store.path().display());
            } else {
                match store.load() {
                    Some(palette) => print_palette(&palette),
                    None => println!("No stored palette"),
                }
            }
        }
    }

    Ok(())
}
