//! Dune Dash entry point
//!
//! The browser build is driven from JavaScript through `dune_dash::web`.
//! Natively this runs a headless demo: the autopilot plays one run and the
//! final frame is printed as JSON.
//!
//! Usage: `dune-dash [seed] [tuning.json] [max_frames] [--realtime]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dune_dash::consts::{DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH, TARGET_FPS};
    use dune_dash::sim::{GameEvent, Viewport, World, speed_after};
    use dune_dash::{FixedFrames, FrameDriver, RealtimeClock, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dune Dash (native) starting...");

    let mut realtime = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else {
            positional.push(arg);
        }
    }

    let seed = match positional.first() {
        Some(s) => match s.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("Seed must be an unsigned integer, got {:?}", s);
                std::process::exit(2);
            }
        },
        None => 42,
    };

    let tuning = match positional.get(1).map(String::as_str) {
        Some(path) if path != "-" => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        _ => Tuning::default(),
    };

    let max_frames = positional
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * TARGET_FPS as u64);

    let world = World::new(seed, tuning, Viewport::new(DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT));
    let mut driver = FrameDriver::new(world);
    driver.set_autopilot(true);

    let stepped = if realtime {
        driver.run(&mut RealtimeClock::new(TARGET_FPS).with_limit(max_frames))
    } else {
        driver.run(&mut FixedFrames::new(max_frames))
    };

    let events = driver.drain_events();
    let jumps = events.iter().filter(|e| **e == GameEvent::Jumped).count();
    let spawned: u32 = events
        .iter()
        .map(|e| match e {
            GameEvent::Spawned { count } => *count,
            _ => 0,
        })
        .sum();

    let world = driver.world();
    let expected = speed_after(u32::try_from(stepped).unwrap_or(u32::MAX), &world.tuning);
    log::info!(
        "Run finished after {} frames: {:?}, score {}, speed {:.2} (curve {:.2}), {} jumps, {} obstacles",
        stepped,
        world.run_state,
        world.score,
        world.speed,
        expected,
        jumps,
        spawned
    );

    match driver.view().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
