//! Skyscan entry point
//!
//! Headless demo: generates a seeded event field, sweeps the viewport across
//! it and logs what the sector map sees.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyscan (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => skyscan::Settings::load(path),
        None => skyscan::Settings::default(),
    };

    if let Err(e) = run_sweep(&settings) {
        log::error!("Sweep failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo on the web
}

#[cfg(not(target_arch = "wasm32"))]
fn run_sweep(settings: &skyscan::Settings) -> skyscan::SkyResult<()> {
    use skyscan::consts::*;
    use skyscan::renderer::sector_instances;
    use skyscan::sky::{
        EventSource, RotationInput, ScanState, SectorMapper, SeededEventGenerator,
        SphereSegmentation, TickInput, tick,
    };

    let field = SeededEventGenerator::new(settings.generator.clone()).generate();
    let mut state = ScanState::new(settings)?;
    let legacy = SphereSegmentation::default();

    let input = TickInput {
        rotation: RotationInput {
            azimuth_pos: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };

    // Start mid-field so events overlap
    state.time = settings.generator.time_span * 0.5;
    let sweep_ticks = (10.0 / SIM_DT) as u32;
    let mut agree = 0usize;
    let mut compared = 0usize;

    for _ in 0..sweep_ticks {
        tick(&mut state, &input, &field, SIM_DT);

        let mapper = state.mapper();
        for event in field.active_events(state.time) {
            let (theta, phi) = (event.position.theta, event.position.phi);
            let Some(sector) = mapper.sector(theta, phi) else {
                continue;
            };
            compared += 1;
            if legacy.sector(theta, phi) == Some(sector) {
                agree += 1;
            }
        }
    }

    let offsets = state.rotation.current();
    log::info!(
        "Swept {} ticks, rotation = ({:.3}, {:.3}), t = {:.1}s",
        state.ticks,
        offsets.theta,
        offsets.phi,
        state.time
    );
    for (i, value) in state.signals().as_slice().iter().enumerate() {
        log::info!("  sector {:2}: {:8.2}", i, value);
    }
    log::info!(
        "Total signal {:.2}, stats {:?}",
        state.signals().total(),
        state.aggregator.stats()
    );

    if compared > 0 {
        log::info!(
            "Legacy partition agrees on {}/{} samples ({:.1}%)",
            agree,
            compared,
            100.0 * agree as f32 / compared as f32
        );
    }

    if let Some(grid) = state.grid.grid() {
        let instances = sector_instances(grid, state.signals());
        log::debug!(
            "Prepared {} sector instances ({} bytes)",
            instances.len(),
            std::mem::size_of_val(instances.as_slice())
        );
    }

    Ok(())
}
