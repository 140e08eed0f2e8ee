use clap::Parser;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::IntoEnumIterator;
use winit::event_loop::EventLoop;

use rubik_lab::application::Application;
use rubik_lab::cube::sequencer::parse_sequence;
use rubik_lab::cube::{RotationOp, Wall};
use rubik_lab::messages::LabEvent;
use rubik_lab::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Moves to queue and play on startup, e.g. "top left' front"
    #[arg(long)]
    sequence: Option<String>,

    /// Queue this many random turns and play them on startup
    #[arg(long)]
    scramble: Option<usize>,

    /// Seed for --scramble, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Duration of one quarter turn in seconds
    #[arg(long, default_value_t = 0.4)]
    turn_seconds: f32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let mut startup_ops = match &args.sequence {
        Some(text) => parse_sequence(text).unwrap_or_else(|error| {
            eprintln!("{error}");
            std::process::exit(1);
        }),
        None => Vec::new(),
    };
    if let Some(count) = args.scramble {
        startup_ops.extend(scramble(count, args.seed));
    }

    let event_loop = EventLoop::<LabEvent>::with_user_event()
        .build()
        .expect("Could not build event loop");
    let event_loop_proxy = event_loop.create_proxy();
    let mut app = Application::new(
        event_loop_proxy,
        Settings {
            turn_seconds: args.turn_seconds,
        },
        startup_ops,
    );
    event_loop.run_app(&mut app).expect("Could not run app");
}

fn scramble(count: usize, seed: Option<u64>) -> Vec<RotationOp> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("Scrambling {count} turns with seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let walls: Vec<Wall> = Wall::iter().collect();
    (0..count)
        .map(|_| RotationOp {
            wall: walls[rng.random_range(0..walls.len())],
            negative: rng.random(),
        })
        .collect()
}
