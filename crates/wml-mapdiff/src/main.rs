//! wml-mapdiff: compare two tilemaps and render the result.
//!
//! ```text
//! wml-mapdiff <old-map> <new-map> <output.svg|output.json> [terrain.cfg]
//! ```
//!
//! With an `.svg` output the new map is drawn with every changed cell
//! outlined, using terrain images looked up in `terrain.cfg`. With a
//! `.json` output only the list of changed `[x, y]` cells is written.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `warn`)
//! - `WML_MAPDIFF_CONFIG`: JSON file with `RenderConfig` fields
//! - `WML_MAPDIFF_TILE_SIZE`, `WML_MAPDIFF_IMAGE_ROOT`: single overrides

use std::error::Error;
use std::path::{Path, PathBuf};
use wml_core::{diff_tilemaps, parse_tilemap};
use wml_render::{RenderConfig, TerrainCatalog, render_diff_svg};

const USAGE: &str = "usage: wml-mapdiff <old-map> <new-map> <output.svg|output.json> [terrain.cfg]";

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, PartialEq, Eq)]
struct Args {
    old_map: PathBuf,
    new_map: PathBuf,
    output: PathBuf,
    terrain: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    match args {
        [old, new, output] | [old, new, output, _] => Ok(Args {
            old_map: old.into(),
            new_map: new.into(),
            output: output.into(),
            terrain: args.get(3).map(PathBuf::from),
        }),
        _ => Err(USAGE.to_string()),
    }
}

fn wants_json(output: &Path) -> bool {
    output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Apply `WML_MAPDIFF_*` overrides, looked up through `lookup`.
fn apply_overrides(
    mut config: RenderConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RenderConfig, String> {
    if let Some(size) = lookup("WML_MAPDIFF_TILE_SIZE") {
        config.tile_size = size
            .parse()
            .map_err(|e| format!("WML_MAPDIFF_TILE_SIZE={size}: {e}"))?;
    }
    if let Some(root) = lookup("WML_MAPDIFF_IMAGE_ROOT") {
        config.image_root = root;
    }
    Ok(config)
}

async fn read(path: &Path) -> CliResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("{}: {e}", path.display()).into())
}

async fn load_config() -> CliResult<RenderConfig> {
    let base: RenderConfig = match std::env::var_os("WML_MAPDIFF_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            let text = read(&path).await?;
            serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    Ok(apply_overrides(base, |key| std::env::var(key).ok())?)
}

async fn run(args: Args) -> CliResult<()> {
    let (old_text, new_text) = tokio::try_join!(read(&args.old_map), read(&args.new_map))?;
    let old = parse_tilemap(&old_text);
    let new = parse_tilemap(&new_text);

    if wants_json(&args.output) {
        let diff = diff_tilemaps(&old, &new)?;
        tokio::fs::write(&args.output, serde_json::to_string_pretty(&diff)?).await?;
        println!("{} cell(s) differ; wrote {}", diff.len(), args.output.display());
        return Ok(());
    }

    let config = load_config().await?;
    let catalog = match &args.terrain {
        Some(path) => {
            let text = read(path).await?;
            TerrainCatalog::from_source(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => {
            log::warn!("no terrain config given; tiles will be drawn without images");
            TerrainCatalog::default()
        }
    };

    let (svg, diff) = render_diff_svg(&old, &new, &catalog, &config)?;
    tokio::fs::write(&args.output, svg).await?;
    println!("{} cell(s) differ; wrote {}", diff.len(), args.output.display());
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(usage) => {
            eprintln!("{usage}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("wml-mapdiff error: {e}");
        std::process::exit(1);
    }
}
