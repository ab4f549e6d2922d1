use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use gravfrag::{Color, SimConfig, Vec2, World, config, scene};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    /// Planet with four moons
    Moons,
    /// Randomly scattered identical bodies
    Scatter,
}

/// Body injected before a given frame: `frame:x,y,mass`
#[derive(Clone, Debug)]
struct Spawn {
    frame: u64,
    position: Vec2,
    mass: f64,
}

impl FromStr for Spawn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (frame, rest) = s.split_once(':').unwrap_or(("0", s));
        let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
        let [x, y, mass] = parts.as_slice() else {
            bail!("expected frame:x,y,mass, got {s:?}");
        };
        Ok(Self {
            frame: frame.trim().parse().context("spawn frame")?,
            position: Vec2::new(x.parse().context("spawn x")?, y.parse().context("spawn y")?),
            mass: mass.parse().context("spawn mass")?,
        })
    }
}

/// Headless driver for the gravity + fragmentation engine
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// YAML config; defaults are used for missing keys
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Scene::Moons)]
    scene: Scene,

    /// Bodies for the scatter scene
    #[arg(long, default_value_t = 30)]
    count: usize,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    steps: u64,

    /// Timestep per frame; defaults to 1 / fps
    #[arg(long)]
    dt: Option<f64>,

    /// Seed for scene layout and fragmentation
    #[arg(long)]
    seed: Option<u64>,

    /// Log stats every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Inject a body, `frame:x,y,mass` (repeatable)
    #[arg(long)]
    spawn: Vec<Spawn>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    let dt = args.dt.unwrap_or_else(|| cfg.dt());
    let center = Vec2::new(cfg.width / 2.0, cfg.height / 2.0);

    let (mut world, mut rng) = match args.seed {
        Some(seed) => (World::with_seed(cfg, seed)?, StdRng::seed_from_u64(seed)),
        None => (World::new(cfg)?, StdRng::from_entropy()),
    };

    match args.scene {
        Scene::Moons => {
            scene::moons(&mut world, center)?;
        }
        Scene::Scatter => {
            scene::scatter(
                &mut world,
                &mut rng,
                args.count,
                scene::MOON_MASS,
                config::PARTICLE_RADIUS,
                None,
                None,
            )?;
        }
    }
    info!("scene {:?}: {} bodies, dt={dt}", args.scene, world.len());

    let mut pending = args.spawn;
    pending.sort_by_key(|s| s.frame);
    let mut pending = pending.into_iter().peekable();

    for frame in 0..args.steps {
        while let Some(spawn) = pending.next_if(|s| s.frame <= frame) {
            let radius = world.config().fragmentation.radius_for_mass(spawn.mass);
            match world.spawn_particle(spawn.mass, spawn.position, Vec2::ZERO, radius, Color::WHITE) {
                Ok(id) => info!(
                    "frame {frame}: spawned #{id} at ({:.1}, {:.1})",
                    spawn.position.x, spawn.position.y
                ),
                Err(e) => warn!("frame {frame}: spawn rejected: {e}"),
            }
        }

        world.step(dt);

        if args.report_every > 0 && world.frame() % args.report_every == 0 {
            let stats = world.stats();
            info!(
                "frame {}: n={} fragments={} mass={:.3} ke={:.3} pe={:.3} e={:.3} p=({:.3}, {:.3})",
                stats.frame,
                stats.particle_count,
                stats.fragment_count,
                stats.total_mass,
                stats.kinetic_energy,
                stats.potential_energy,
                stats.total_energy(),
                stats.momentum.x,
                stats.momentum.y,
            );
        }
    }

    Ok(())
}
