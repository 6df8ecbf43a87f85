use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use tile_core::{Cell, Color, TileStore, Toggle, WorkFile};

#[derive(Parser)]
struct Args {
    /// Command to run: "info", "dump", "toggle" or "normalize"
    command: String,

    /// Path to the work file
    file: String,

    /// Create the work file if it does not exist
    #[arg(long, default_value_t = false)]
    create: bool,

    /// Write the JSON dump to this file
    #[arg(long, default_value = "tiles.json")]
    out: String,

    /// World x coordinate for toggle (snapped to the tile grid)
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i32>,

    /// World y coordinate for toggle (snapped to the tile grid)
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i32>,

    /// Paint color for toggle as "r,g,b", each folded mod 256
    #[arg(long, default_value = "50,50,50", allow_hyphen_values = true)]
    color: String,
}

fn parse_color(text: &str) -> Result<Color> {
    let channels = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid color channel {:?}", part))
        })
        .collect::<Result<Vec<_>>>()?;
    match channels[..] {
        [r, g, b] => Ok(Color::from_channels(r, g, b)),
        _ => anyhow::bail!("color must have three channels, got {:?}", text),
    }
}

fn summary(store: &TileStore) -> String {
    let colors: HashSet<Color> = store.iter().map(|(_, color)| color).collect();
    let mut out = format!("tiles: {}\ncolors: {}\n", store.len(), colors.len());
    if let Some((min, max)) = store.bounds() {
        out.push_str(&format!(
            "bounds: ({}, {}) to ({}, {})\n",
            min.x, min.y, max.x, max.y
        ));
    }
    out
}

fn dump_json(store: &TileStore) -> Result<String> {
    let tiles: Vec<serde_json::Value> = store
        .iter()
        .map(|(cell, color)| serde_json::json!({ "cell": cell, "color": color }))
        .collect();
    Ok(serde_json::to_string_pretty(&tiles)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut work_file = if args.create {
        WorkFile::open_or_create(&args.file)?
    } else {
        WorkFile::open(&args.file)?
    };
    let mut store = work_file.load()?;

    match args.command.as_str() {
        "info" => {
            print!("{}", summary(&store));
        }
        "dump" => {
            let mut f = File::create(&args.out)
                .with_context(|| format!("cannot create {}", args.out))?;
            writeln!(f, "{}", dump_json(&store)?)?;
            info!("Wrote {} tile(s) to {}", store.len(), args.out);
        }
        "toggle" => {
            let (Some(x), Some(y)) = (args.x, args.y) else {
                anyhow::bail!("toggle needs both --x and --y");
            };
            let cell = Cell::containing(x, y);
            let color = parse_color(&args.color)?;
            match store.toggle(cell, color) {
                Toggle::Painted => println!("painted ({}, {})", cell.x, cell.y),
                Toggle::Erased(_) => println!("erased ({}, {})", cell.x, cell.y),
            }
            work_file.flush(&store)?;
        }
        "normalize" => {
            work_file.flush(&store)?;
            println!("rewrote {} tile(s)", store.len());
        }
        other => anyhow::bail!("Unsupported command: {}", other),
    }

    Ok(())
}
