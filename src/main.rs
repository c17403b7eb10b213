mod config;
mod world;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use blockworld_blocks::VoxelRegistry;
use blockworld_geom::Vec3;
use blockworld_mesh_cpu::{TextureAtlas, rebuild_dirty_with};
use blockworld_physics::{Agent, RegistryView};

use config::{ConfigError, HarnessConfig};

/// Headless run: build terrain, mesh it, drop an agent and report.
#[derive(Parser, Debug)]
#[command(name = "blockworld", version, about)]
struct Cli {
    /// TOML config file; defaults are used when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of physics updates to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Seconds per update.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Overrides RUST_LOG (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<log::LevelFilter>,
    /// Tick at which the agent attempts a jump.
    #[arg(long)]
    jump_at: Option<u32>,
}

fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if !(cli.dt.is_finite() && cli.dt > 0.0) {
        return Err(ConfigError::Invalid(format!("--dt must be positive, got {}", cli.dt)).into());
    }
    let cfg = match &cli.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };

    VoxelRegistry::ensure_initialised();
    let registry = match &cfg.registry_path {
        Some(path) => VoxelRegistry::from_path(path)?,
        None => VoxelRegistry::with_defaults(),
    };

    let mut store = world::build_world(&cfg.world)?;
    let atlas = TextureAtlas::new(cfg.atlas.clone());
    let rebuilt = rebuild_dirty_with(&mut store, &atlas, &registry);
    let (quads, bytes) = store
        .iter()
        .filter_map(|(_, c)| c.mesh())
        .fold((0, 0), |(q, b), m| {
            (q + m.quad_count(), b + m.vertex_bytes().len() + m.index_bytes().len())
        });
    log::info!(target: "mesher", "meshed {} chunks: {} quads, {} bytes", rebuilt, quads, bytes);

    let [sx, sy, sz] = cfg.world.spawn;
    let mut agent = Agent::with_params(Vec3::new(sx, sy, sz), cfg.physics.clone());
    let view = RegistryView::new(&store, &registry);
    let mut landed_at = None;
    for tick in 0..cli.ticks {
        if cli.jump_at == Some(tick) {
            agent.jump();
        }
        agent.update(cli.dt, Some(&view));
        if landed_at.is_none() && agent.is_grounded() {
            landed_at = Some(tick);
        }
    }

    let p = agent.position();
    log::info!(
        target: "physics",
        "after {} ticks: pos ({:.3}, {:.3}, {:.3}), {:?}, first grounded at tick {:?}",
        cli.ticks,
        p.x,
        p.y,
        p.z,
        agent.motion_state(),
        landed_at
    );
    let under = store.voxel_at_world(p.x.floor() as i32, p.y.floor() as i32 - 1, p.z.floor() as i32);
    if let Some(v) = under.filter(|v| !v.is_air()) {
        let props = registry.properties_of(v.ty);
        log::info!(
            target: "physics",
            "standing on {} (break time {:.2}s, solid: {})",
            v.ty,
            props.break_time,
            props.is_solid
        );
    }
    Ok(())
}
