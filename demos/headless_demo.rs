//! Runs the cube on a worker thread for a few seconds and prints what happens.
//!
//! Run with: `RUST_LOG=debug cargo run -p pulsecube --example headless_demo`

use std::time::{Duration, Instant};

use pulsecube::*;

fn main() -> std::result::Result<(), WorkerError> {
    init_logging();

    let options = Options::new().with_seed(42).with_viewport(720.0, 900.0, 2.0);
    let worker = Worker::spawn(options, HeadlessHost::new())?;

    worker.send(Message::MouseNdc { x: 0.1, y: 0.05 })?;
    worker.send(Message::Tap)?;

    let script = [
        (Duration::from_millis(800), Message::Theme { name: "tide".into() }),
        (Duration::from_millis(1500), Message::OrbitStart),
        (
            Duration::from_millis(1600),
            Message::OrbitMove {
                d_theta: 0.4,
                d_phi: -0.1,
            },
        ),
        (Duration::from_millis(1700), Message::OrbitEnd),
        (
            Duration::from_millis(2200),
            Message::Resize {
                width: 1200.0,
                height: 800.0,
                dpr: 1.0,
            },
        ),
        (Duration::from_millis(2600), Message::Theme { name: "void".into() }),
    ];

    let start = Instant::now();
    let mut next = 0;
    let mut frames = 0u32;
    let mut last_generation = 0;

    while start.elapsed() < Duration::from_secs(4) {
        while let Some((at, message)) = script.get(next) {
            if start.elapsed() < *at {
                break;
            }
            println!("{:>6.2}s  -> {message:?}", start.elapsed().as_secs_f32());
            worker.send(message.clone())?;
            next += 1;
        }

        match worker.events().recv_timeout(Duration::from_millis(50)) {
            Ok(Event::Frame(frame)) => {
                frames += 1;
                if frame.generation != last_generation {
                    last_generation = frame.generation;
                    let n = frame.grid_size;
                    println!(
                        "{:>6.2}s  cube generation {last_generation}: {n}x{n}x{n}, {} bytes of instances",
                        start.elapsed().as_secs_f32(),
                        frame.instance_bytes().len()
                    );
                }
            }
            Ok(Event::ThemeChanged { theme, origin }) => {
                println!("{:>6.2}s  theme {theme} ({origin:?})", start.elapsed().as_secs_f32());
            }
            Err(_) => {}
        }
    }

    println!("{frames} frames received");
    worker.shutdown()
}
