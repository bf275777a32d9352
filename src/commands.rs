use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use strata_blocks::TerrainType;
use strata_chunk::VoxelGrid;
use strata_geom::Vec3;
use strata_mesh_cpu::{MeshStats, SurfaceMeshBuilder};
use strata_runtime::ChunkStore;
use strata_world::{GridRegion, HeightField, TerrainProfile, WorldConfig};

use crate::cli::WorldPoint;

pub fn profile(config: &WorldConfig) -> anyhow::Result<()> {
    let profile = TerrainProfile::from_config(config).context("building terrain profile")?;
    println!(
        "levels={} height_offset={} weights={:?}",
        profile.levels(),
        profile.height_offset(),
        profile.weights()
    );
    println!("{:<12} {:>9} {:>11}", "band", "levels", "percentile");
    for band in profile.band_ranges() {
        let pct = band
            .terrain
            .bucket()
            .and_then(|b| profile.type_percentiles().get(b))
            .copied()
            .unwrap_or(1.0);
        println!(
            "{:<12} {:>4}..={:<3} {:>11.4}",
            band.terrain.name(),
            band.levels.start(),
            band.levels.end(),
            pct
        );
    }
    println!(
        "water_level={} water_row={}",
        profile.water_level(),
        profile.water_row()
    );
    Ok(())
}

pub fn world(config: WorldConfig, parallel: bool) -> anyhow::Result<()> {
    let config = config.with_resolved_seed();
    let seed = config.seed.unwrap_or_default();
    let profile = Arc::new(TerrainProfile::from_config(&config).context("building terrain profile")?);
    let field = HeightField::from_seed(&config, profile, seed);
    let region = GridRegion::for_world(&config);

    let t_gen = Instant::now();
    let grid = if parallel || config.parallel_columns {
        VoxelGrid::generate_par(region, &field)
    } else {
        VoxelGrid::generate(region, &field)
    }
    .context("generating world grid")?;
    let gen_ms = t_gen.elapsed().as_millis();

    let t_mesh = Instant::now();
    let mut mesher = SurfaceMeshBuilder::from_config(&config);
    let buffers = mesher.build(&grid);
    let mesh_ms = t_mesh.elapsed().as_millis();

    log::info!(
        target: "world",
        "seed={} region {}x{}x{} gen={}ms mesh={}ms",
        seed,
        region.size_x,
        region.size_y,
        region.size_z,
        gen_ms,
        mesh_ms
    );
    println!("seed={seed}");
    println!("{}", grid.stats());
    print_mesh_stats(&buffers.stats());
    if let Some(bb) = buffers.bounds() {
        println!(
            "bounds=({:.2}, {:.2}, {:.2})..({:.2}, {:.2}, {:.2})",
            bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
        );
    }
    Ok(())
}

pub fn stream(
    config: WorldConfig,
    from: WorldPoint,
    to: WorldPoint,
    steps: usize,
) -> anyhow::Result<()> {
    let mut store = ChunkStore::init(config).context("initializing chunk store")?;
    println!("seed={} initial_chunks={}", store.seed(), store.len());
    let steps = steps.max(1);
    for i in 0..=steps {
        let p = from.lerp(to, i as f32 / steps as f32);
        let report = store
            .tick(Vec3::new(p.x, 0.0, p.z))
            .with_context(|| format!("tick {i} at ({}, {})", p.x, p.z))?;
        println!("tick {i:>3} at ({:>8.2}, {:>8.2}): {report}", p.x, p.z);
    }
    let mut totals = MeshStats::default();
    for (_, chunk) in store.iter() {
        totals.accumulate(&chunk.mesh().stats());
    }
    println!("resident_chunks={}", store.len());
    print_mesh_stats(&totals);
    Ok(())
}

pub fn config(config: &WorldConfig) -> anyhow::Result<()> {
    let text = toml::to_string_pretty(config).context("serializing world config")?;
    print!("{text}");
    Ok(())
}

fn print_mesh_stats(stats: &MeshStats) {
    for t in TerrainType::ALL.iter().filter(|t| t.bucket().is_some()) {
        println!("{:<12} {:>8} quads", t.name(), stats.quads_for(*t));
    }
    println!("{:<12} {:>8} quads", "total", stats.total_quads());
}
