//! Headless demo: replays a scripted gesture sequence through the control
//! pipeline and writes the resulting annotated slide as a PNG.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;

use wavedeck::domain::{Hand, HandFrame, Handedness, Landmark, LANDMARK_COUNT};
use wavedeck::render::Background;
use wavedeck::slides::SlideRef;
use wavedeck::storage::JsonStore;
use wavedeck::{Controller, WaveDeckConfig};

/// Synthetic hand pose with the given fingers extended (thumb..pinky),
/// index fingertip at `(x, y)`
fn pose(fingers: [bool; 5], x: f32, y: f32) -> Hand {
    let wrist = Landmark::new(x, (y + 0.45).min(1.0));
    let mut landmarks = vec![wrist; LANDMARK_COUNT];

    landmarks[3] = Landmark::new(x - 0.05, wrist.y - 0.1);
    let thumb_x = if fingers[0] { x - 0.15 } else { x - 0.04 };
    landmarks[4] = Landmark::new(thumb_x, wrist.y - 0.1);

    for (slot, (joint, tip)) in [(6usize, 8usize), (10, 12), (14, 16), (18, 20)]
        .into_iter()
        .enumerate()
    {
        let fx = x - 0.06 + slot as f32 * 0.04;
        landmarks[joint] = Landmark::new(fx, wrist.y - 0.25);
        let tip_y = if fingers[slot + 1] {
            wrist.y - 0.45
        } else {
            wrist.y - 0.15
        };
        landmarks[tip] = Landmark::new(fx, tip_y);
    }
    // Keep the index tip exactly on the requested cursor position
    if fingers[1] {
        landmarks[8] = Landmark::new(x, y);
    }

    Hand {
        handedness: Handedness::Right,
        confidence: 0.95,
        landmarks,
    }
}

/// Hold one pose for `frames` frames at ~30 fps
fn hold(controller: &mut Controller, hand: Hand, frames: u32, at: &mut Instant) {
    for _ in 0..frames {
        let output = controller.process_frame(&HandFrame::new(vec![hand.clone()], *at));
        for request in &output.requests {
            log::info!("ui request: {request:?}");
        }
        *at += Duration::from_millis(33);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = WaveDeckConfig::load();
    let store = Arc::new(JsonStore::default_location());
    let mut controller = Controller::new(&config, store, 1);

    controller.load_slide_set(
        1,
        (0..5)
            .map(|i| SlideRef {
                id: i,
                image_path: PathBuf::from(format!("slide_{i}.png")),
                order_index: i as u32,
            })
            .collect(),
    );

    let mut at = Instant::now();

    // Advance two slides, enter drawing mode, sketch a diagonal line, then
    // let go so the stroke commits and saves
    hold(&mut controller, pose([false, true, false, false, false], 0.5, 0.3), 8, &mut at);
    at += Duration::from_secs(1);
    hold(&mut controller, pose([false, true, false, false, false], 0.5, 0.3), 8, &mut at);
    at += Duration::from_secs(1);
    hold(&mut controller, pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);

    for step in 0..20 {
        let t = step as f32 / 19.0;
        let hand = pose(
            [false, true, false, false, false],
            0.2 + 0.6 * t,
            0.3 + 0.4 * t,
        );
        controller.process_frame(&HandFrame::new(vec![hand], at));
        at += Duration::from_millis(33);
    }
    controller.process_frame(&HandFrame::empty(at));

    log::info!(
        "slide {} now carries {} strokes",
        controller.engine().active_slide(),
        controller.engine().committed_strokes().len()
    );

    let image = controller.render(Background::Solid([18, 18, 24, 255]), 1280, 720);
    let out = PathBuf::from("wavedeck-demo.png");
    image.save(&out).context("writing demo output")?;
    log::info!("wrote {}", out.display());

    controller.shutdown();
    Ok(())
}
