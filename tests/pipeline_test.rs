//! End-to-end pipeline tests: synthetic landmark frames in, mode changes,
//! annotations, and persisted files out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use wavedeck::domain::{Hand, HandFrame, Handedness, Landmark, LANDMARK_COUNT};
use wavedeck::render::Background;
use wavedeck::session::messages::StoreNotice;
use wavedeck::slides::SlideRef;
use wavedeck::storage::{AnnotationStore, JsonStore};
use wavedeck::{Controller, Key, Mode, UiRequest, WaveDeckConfig};

/// Build a synthetic right hand with the given fingers extended
/// (thumb..pinky) and the index fingertip at `(x, y)`.
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
    if fingers[1] {
        landmarks[8] = Landmark::new(x, y);
    }

    Hand {
        handedness: Handedness::Right,
        confidence: 0.95,
        landmarks,
    }
}

fn controller(dir: &std::path::Path) -> Controller {
    let store = Arc::new(JsonStore::new(dir));
    let mut c = Controller::new(&WaveDeckConfig::default(), store, 1);
    c.load_slide_set(
        1,
        (0..4)
            .map(|i| SlideRef {
                id: 100 + i,
                image_path: PathBuf::from(format!("slide_{i}.png")),
                order_index: i as u32,
            })
            .collect(),
    );
    c
}

/// Hold one pose for `frames` frames at ~30 fps, collecting UI requests
fn hold(c: &mut Controller, hand: &Hand, frames: u32, at: &mut Instant) -> Vec<UiRequest> {
    let mut requests = Vec::new();
    for _ in 0..frames {
        let output = c.process_frame(&HandFrame::new(vec![hand.clone()], *at));
        requests.extend(output.requests);
        *at += Duration::from_millis(33);
    }
    requests
}

/// Release the hand and let the cooldown lapse before the next gesture
fn rest(c: &mut Controller, at: &mut Instant) {
    c.process_frame(&HandFrame::empty(*at));
    *at += Duration::from_millis(800);
}

fn draw_line(c: &mut Controller, from: (f32, f32), to: (f32, f32), at: &mut Instant) {
    for step in 0..10 {
        let t = step as f32 / 9.0;
        let hand = pose(
            [false, true, false, false, false],
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
        );
        c.process_frame(&HandFrame::new(vec![hand], *at));
        *at += Duration::from_millis(33);
    }
    // Fist ends the stroke
    c.process_frame(&HandFrame::new(
        vec![pose([false; 5], to.0, to.1)],
        *at,
    ));
    *at += Duration::from_millis(33);
}

fn wait_for_notices(c: &Controller, count: usize) -> Vec<StoreNotice> {
    let mut collected = Vec::new();
    for _ in 0..200 {
        collected.extend(c.poll_notices());
        if collected.len() >= count {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    collected
}

#[test]
fn gesture_sequence_navigates_draws_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    // Next slide twice, gated by the cooldown between repeats
    hold(&mut c, &pose([false, true, false, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    hold(&mut c, &pose([false, true, false, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    assert_eq!(c.navigator().index(), 2);
    assert_eq!(c.engine().active_slide(), 102);

    // Enter drawing mode and sketch a line
    let requests = hold(&mut c, &pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);
    assert!(requests.contains(&UiRequest::ModeChanged(Mode::Drawing)));
    rest(&mut c, &mut at);
    draw_line(&mut c, (0.2, 0.2), (0.8, 0.8), &mut at);
    assert_eq!(c.engine().committed_strokes().len(), 1);

    // The commit queued a save; once it lands the file round-trips
    let notices = wait_for_notices(&c, 1);
    assert!(notices
        .iter()
        .any(|n| matches!(n, StoreNotice::AnnotationsSaved(102))));
    let store = JsonStore::new(dir.path());
    let persisted = store.load_annotations(102).unwrap();
    assert_eq!(persisted, c.engine().committed_strokes());
}

#[test]
fn mode_switch_commits_the_open_stroke() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    hold(&mut c, &pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);

    // Leave the stroke open (no fist), then switch back to presentation
    for step in 0..6 {
        let hand = pose([false, true, false, false, false], 0.3 + 0.05 * step as f32, 0.4);
        c.process_frame(&HandFrame::new(vec![hand], at));
        at += Duration::from_millis(33);
    }
    assert!(c.engine().canvas().unwrap().in_progress().is_some());

    hold(&mut c, &pose([true, true, false, false, false], 0.5, 0.3), 8, &mut at);
    assert_eq!(c.mode(), Mode::Presentation);
    assert!(c.engine().canvas().unwrap().in_progress().is_none());
    assert_eq!(c.engine().committed_strokes().len(), 1);
}

#[test]
fn open_palm_clears_and_undo_restores_stroke_by_stroke() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    hold(&mut c, &pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    draw_line(&mut c, (0.1, 0.1), (0.4, 0.1), &mut at);
    draw_line(&mut c, (0.1, 0.3), (0.4, 0.3), &mut at);
    assert_eq!(c.engine().committed_strokes().len(), 2);
    let before = c.engine().committed_strokes();

    // Erasing mode, then the open palm clears the canvas
    hold(&mut c, &pose([false, true, true, true, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    let requests = hold(&mut c, &pose([true; 5], 0.5, 0.3), 8, &mut at);
    assert!(c.engine().committed_strokes().is_empty());
    assert!(requests
        .iter()
        .any(|r| matches!(r, UiRequest::Toast(t) if t.contains("Cleared"))));

    // One undo per cleared stroke, original order restored
    assert!(c.undo());
    assert_eq!(c.engine().committed_strokes().len(), 1);
    assert!(c.undo());
    assert_eq!(c.engine().committed_strokes(), before);
    // Further undos keep unwinding into the original commits
    assert!(c.undo());
    assert_eq!(c.engine().committed_strokes().len(), 1);
}

#[test]
fn open_palm_cycles_color_while_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    hold(&mut c, &pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    assert_eq!(c.engine().active_color_name(), "Red");
    hold(&mut c, &pose([true; 5], 0.5, 0.3), 8, &mut at);
    assert_eq!(c.engine().active_color_name(), "Green");
}

#[test]
fn screenshot_gesture_ends_in_a_png_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    let requests = hold(&mut c, &pose([true, true, true, false, false], 0.5, 0.3), 8, &mut at);
    assert!(requests.contains(&UiRequest::CaptureScreenshot));

    // The shell answers the request with the current background
    c.capture_screenshot(Background::Solid([0, 0, 0, 255])).unwrap();
    let notices = wait_for_notices(&c, 1);
    match &notices[0] {
        StoreNotice::ScreenshotSaved(path) => {
            assert!(path.exists());
            let decoded = image::open(path).unwrap();
            assert_eq!(decoded.width(), 1920);
        }
        other => panic!("unexpected notice: {other:?}"),
    }
}

#[test]
fn keyboard_and_gestures_share_the_clamped_navigator() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    c.handle_key(Key::ArrowRight);
    hold(&mut c, &pose([false, true, false, false, false], 0.5, 0.3), 8, &mut at);
    assert_eq!(c.navigator().index(), 2);

    // Arrow left past the start clamps silently
    for _ in 0..5 {
        c.handle_key(Key::ArrowLeft);
    }
    assert_eq!(c.navigator().index(), 0);
}

#[test]
fn erasing_punches_through_existing_ink() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = controller(dir.path());
    let mut at = Instant::now();

    hold(&mut c, &pose([false, true, true, false, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    draw_line(&mut c, (0.2, 0.5), (0.8, 0.5), &mut at);
    rest(&mut c, &mut at);

    hold(&mut c, &pose([false, true, true, true, false], 0.5, 0.3), 8, &mut at);
    rest(&mut c, &mut at);
    // Erase straight across the middle of the line
    draw_line(&mut c, (0.45, 0.5), (0.55, 0.5), &mut at);

    let white = Background::Solid([255, 255, 255, 255]);
    let img = c.render(white, 200, 100);
    // Ink survives at the ends, background shows through the erased middle
    assert_ne!(img.get_pixel(50, 50).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(100, 50).0, [255, 255, 255, 255]);
}
