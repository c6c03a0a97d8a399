mod script;

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use contour_edit::{Brush, Fill, StencilShape};
use contour_geom::Vec2;
use contour_world::{ChunkCoord, EditCommand, LogSink, MapConfig, VoxelMap};

#[derive(Parser, Debug)]
#[command(name = "contour", about = "Chunked marching-squares terrain editor")]
struct Args {
    /// Map configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edit script (TOML `[[edits]]` list), applied before --edit points
    #[arg(long)]
    script: Option<PathBuf>,

    /// Map-local point to edit, as X,Y; repeatable
    #[arg(long = "edit", value_name = "X,Y", value_parser = script::parse_point, allow_hyphen_values = true)]
    edits: Vec<Vec2>,

    #[arg(long, default_value_t = StencilShape::Square)]
    shape: StencilShape,

    #[arg(long, default_value_t = Fill::Filled)]
    fill: Fill,

    #[arg(long, default_value_t = 0)]
    radius: i32,

    /// Print the voxel states after all edits
    #[arg(long)]
    ascii: bool,

    /// Re-triangulate and publish every chunk at the end
    #[arg(long)]
    rebuild_all: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => MapConfig::load_from_path(path)?,
        None => MapConfig::default(),
    };
    let base = Brush::new(args.shape, args.fill, args.radius);

    let mut commands = Vec::new();
    if let Some(path) = &args.script {
        let s = script::load_script(path)?;
        log::info!("loaded {} edits from {}", s.edits.len(), path.display());
        commands.extend(s.edits.iter().map(|e| e.command(&base)));
    }
    commands.extend(args.edits.iter().map(|&p| EditCommand::new(p, base)));

    let mut map = VoxelMap::new(config);
    let mut sink = LogSink::default();
    let mut touched: Vec<ChunkCoord> = Vec::new();
    let mut changed = 0;
    for cmd in &commands {
        let report = map.edit(cmd);
        changed += report.changed;
        for c in report.touched {
            if !touched.contains(&c) {
                touched.push(c);
            }
        }
    }

    if args.rebuild_all {
        map.rebuild_all();
        map.publish_all(&mut sink);
    } else {
        touched.sort();
        map.publish(&touched, &mut sink);
    }
    log::info!(
        "{} edits changed {} voxels; published {} meshes with {} triangles, total area {:.4}",
        commands.len(),
        changed,
        sink.submitted,
        sink.triangles,
        map.mesh_area()
    );

    if args.ascii {
        print!("{}", map.render_ascii());
    }
    Ok(())
}
