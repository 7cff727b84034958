use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use harmony_engine::logging::{init_logging, LoggingConfig};
use harmony_engine::{
    adaptive_sigma, CalibrationPoint, FalloffKind, HarmonyRenderer, RenderConfig, SourceState,
};

mod preset;

use preset::{Preset, RenderSettings};

/// Render triadic harmony fields to image files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log filter (env_logger syntax); overrides RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a state to an image file
    Render(RenderArgs),
    /// Print the imbalance score and adaptive sigma for a state
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// TOML preset providing render settings, state, calibration and labels
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Output path; the format follows the extension
    #[arg(short, long, default_value = "harmony.png")]
    out: PathBuf,

    /// Source strengths as r,g,b
    #[arg(long, value_parser = parse_triple)]
    state: Option<[f32; 3]>,

    /// White point as r,g,b
    #[arg(long, value_parser = parse_triple)]
    calibration: Option<[f32; 3]>,

    /// Image side length in pixels
    #[arg(long)]
    resolution: Option<u32>,

    /// gaussian or inverse_square
    #[arg(long)]
    falloff: Option<FalloffKind>,

    #[arg(long)]
    sigma: Option<f32>,

    #[arg(long)]
    intensity: Option<f32>,

    /// Final blur standard deviation in pixels
    #[arg(long)]
    blur: Option<f32>,

    /// Edge ring attenuation in [0, 1]
    #[arg(long)]
    attenuation: Option<f32>,

    /// Render with the configured sigma even for lopsided states
    #[arg(long)]
    no_adaptive: bool,

    /// Annotate vertices, sources and centroid
    #[arg(long)]
    labeled: bool,

    /// TrueType/OpenType font for labels (defaults to a system font)
    #[arg(long)]
    font: Option<PathBuf>,
}

impl RenderArgs {
    fn overrides(&self) -> RenderSettings {
        RenderSettings {
            resolution: self.resolution,
            falloff: self.falloff,
            sigma: self.sigma,
            intensity: self.intensity,
            edge_blur_radius: self.blur,
            edge_attenuation: self.attenuation,
            adaptive_sigma: self.no_adaptive.then_some(false),
        }
    }
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Source strengths as r,g,b
    #[arg(long, value_parser = parse_triple)]
    state: [f32; 3],

    /// Base sigma to compensate from
    #[arg(long, default_value_t = RenderConfig::DEFAULT_SIGMA)]
    sigma: f32,
}

fn parse_triple(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[r, g, b] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got '{s}'"));
    };
    let num = |v: &str| v.parse::<f32>().map_err(|e| format!("'{v}': {e}"));
    Ok([num(r)?, num(g)?, num(b)?])
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(match cli.log {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    match cli.command {
        Command::Render(args) => render(&args),
        Command::Inspect(args) => {
            inspect(&args);
            Ok(())
        }
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let preset = match &args.preset {
        Some(path) => Preset::load(path)?,
        None => Preset::default(),
    };

    let settings = preset.render.overlay(&args.overrides());
    let config = settings.to_config().context("invalid render settings")?;

    let state = args
        .state
        .map(|[r, g, b]| SourceState::new(r, g, b))
        .unwrap_or_else(|| preset.state());
    let calibration = args
        .calibration
        .map(|[r, g, b]| CalibrationPoint::new(r, g, b))
        .or(preset.calibration);

    let mut renderer = HarmonyRenderer::with_config(config)?;
    renderer.set_calibration(calibration);
    if let Some(names) = preset.labels.clone() {
        renderer.set_source_names(names);
    }

    // Labels only change the overlay, so adaptive sigma is folded into the config up front.
    if settings.adaptive() {
        let adaptive = adaptive_sigma(config.sigma, &state);
        if adaptive.compensating {
            log::warn!(
                "adaptive sigma active: {:.2} -> {:.2} (imbalance {:.1}%)",
                config.sigma,
                adaptive.sigma,
                adaptive.imbalance * 100.0
            );
        }
        renderer.set_config(config.with_sigma(adaptive.sigma)?)?;
    }

    if args.labeled {
        if let Some(bytes) = load_font(args.font.as_deref())? {
            renderer
                .set_label_font(&bytes)
                .context("loading label font")?;
        } else {
            log::warn!("no usable font found; labels will be drawn without text");
        }

        let diagram = renderer.render_labeled(&state, config.falloff);
        diagram
            .to_rgb()
            .save(&args.out)
            .with_context(|| format!("writing {}", args.out.display()))?;
        log::info!("saved {}", args.out.display());
    } else {
        renderer
            .save_image(&args.out, &state, config.falloff)
            .with_context(|| format!("writing {}", args.out.display()))?;
    }

    Ok(())
}

fn inspect(args: &InspectArgs) {
    let [r, g, b] = args.state;
    let state = SourceState::new(r, g, b);
    let adaptive = adaptive_sigma(args.sigma, &state);

    println!("state        {:.3}, {:.3}, {:.3}", state.r, state.g, state.b);
    println!("imbalance    {:.1}%", adaptive.imbalance * 100.0);
    println!("base sigma   {:.3}", args.sigma);
    println!(
        "sigma        {:.3}{}",
        adaptive.sigma,
        if adaptive.compensating { "  (compensating)" } else { "" }
    );
}

/// Reads `explicit`, or the first system font found when `None`.
fn load_font(explicit: Option<&Path>) -> Result<Option<Vec<u8>>> {
    if let Some(path) = explicit {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
        return Ok(Some(bytes));
    }

    Ok([
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_triple_accepts_spaces() {
        assert_eq!(parse_triple("1, 0.5,0"), Ok([1.0, 0.5, 0.0]));
    }

    #[test]
    fn parse_triple_rejects_wrong_arity() {
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("1,2,3,4").is_err());
        assert!(parse_triple("a,b,c").is_err());
    }

    #[test]
    fn cli_parses_render_overrides() {
        let cli = Cli::try_parse_from([
            "harmony-studio",
            "render",
            "--state",
            "1,0,0",
            "--falloff",
            "inverse_square",
            "--no-adaptive",
            "--resolution",
            "64",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else { panic!("expected render") };
        let o = args.overrides();
        assert_eq!(o.resolution, Some(64));
        assert_eq!(o.falloff, Some(FalloffKind::InverseSquare));
        assert_eq!(o.adaptive_sigma, Some(false));
        assert_eq!(args.state, Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn adaptive_flag_absent_leaves_preset_value() {
        let cli = Cli::try_parse_from(["harmony-studio", "render"]).unwrap();
        let Command::Render(args) = cli.command else { panic!("expected render") };
        assert_eq!(args.overrides().adaptive_sigma, None);
    }

    #[test]
    fn render_writes_png() {
        let out = std::env::temp_dir().join(format!("harmony-studio-{}.png", std::process::id()));
        let cli = Cli::try_parse_from([
            "harmony-studio",
            "render",
            "--resolution",
            "24",
            "--state",
            "0.2,0.9,0.4",
            "--out",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let Command::Render(args) = cli.command else { panic!("expected render") };
        render(&args).unwrap();
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
        let _ = std::fs::remove_file(&out);
    }
}
