//! The controller: one detector frame in, mode-scoped effects out
//!
//! Each call to [`Controller::process_frame`] runs the full pipeline: pick
//! the controlling hand, extract its finger vector, classify, interpret the
//! gesture against the current mode, apply the resulting action, and drive
//! the live draw/erase cursor. Side effects the core cannot perform itself
//! (fullscreen, screenshot capture, toasts) come back as [`UiRequest`]s.

use std::io::Cursor;
use std::sync::Arc;

use image::RgbaImage;

use crate::annotations::AnnotationEngine;
use crate::config::WaveDeckConfig;
use crate::domain::{HandFrame, Tool, UserId};
use crate::gesture::{finger_vector, fingers, GestureClassifier, GestureEvent};
use crate::render::{composite_canvas, Background};
use crate::session::messages::StoreNotice;
use crate::session::{shortcuts, ControlMsg, Key, Mode, ModeMachine, UiRequest};
use crate::slides::{NavigationError, SlideNavigator, SlideRef};
use crate::storage::{AnnotationStore, SaveQueue};

/// Everything one processed frame produced
#[derive(Debug)]
pub struct FrameOutput {
    /// Mode after the frame was applied
    pub mode: Mode,
    /// The gesture event that fired this frame, if any
    pub event: Option<GestureEvent>,
    /// Side effects for the display shell, in emission order
    pub requests: Vec<UiRequest>,
}

/// Central coordinator for the gesture presentation session
pub struct Controller {
    classifier: GestureClassifier,
    modes: ModeMachine,
    engine: AnnotationEngine,
    navigator: SlideNavigator,
    store: Arc<dyn AnnotationStore>,
    queue: SaveQueue,
    user_id: UserId,
    min_confidence: f32,
    screenshot_size: (u32, u32),
    /// Drawing tool to restore when erasing mode ends
    remembered_tool: Tool,
}

impl Controller {
    pub fn new(config: &WaveDeckConfig, store: Arc<dyn AnnotationStore>, user_id: UserId) -> Self {
        let mut engine = AnnotationEngine::new(
            config.palette.clone(),
            config.blackboard_palette.clone(),
        );
        engine.set_brush_size(config.brush_size);
        engine.set_opacity(config.opacity);
        let queue = SaveQueue::spawn(store.clone());
        Self {
            classifier: GestureClassifier::new(config.classifier()),
            modes: ModeMachine::new(),
            engine,
            navigator: SlideNavigator::new(),
            store,
            queue,
            user_id,
            min_confidence: config.min_confidence,
            screenshot_size: (config.screenshot_width, config.screenshot_height),
            remembered_tool: Tool::Pen,
        }
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn engine(&self) -> &AnnotationEngine {
        &self.engine
    }

    pub fn navigator(&self) -> &SlideNavigator {
        &self.navigator
    }

    // ========================================================================
    // Frame pipeline
    // ========================================================================

    /// Run the full pipeline for one detector frame
    pub fn process_frame(&mut self, frame: &HandFrame) -> FrameOutput {
        let mut requests = Vec::new();

        let hand = frame.controlling_hand();
        let vector = hand.and_then(|h| finger_vector(h, self.min_confidence));

        let event = self.classifier.observe(vector, frame.captured_at);
        if let Some(event) = event
            && let Some(msg) = self.modes.interpret(event.pattern)
        {
            self.apply(msg, &mut requests);
        }

        // The live cursor runs in parallel with classification: a pointer
        // pose extends the open stroke, anything else closes it.
        if matches!(self.modes.mode(), Mode::Drawing | Mode::Erasing) {
            match (vector, hand) {
                (Some(v), Some(h)) if v.is_pointer() => {
                    if let Some(tip) = h.landmark(fingers::INDEX_TIP) {
                        self.engine.extend_stroke(tip.point().clamped());
                    }
                }
                _ => {
                    if self.engine.commit_stroke() {
                        self.save_active_slide();
                    }
                }
            }
        }

        FrameOutput {
            mode: self.modes.mode(),
            event,
            requests,
        }
    }

    /// Apply one mode-scoped action
    pub fn apply(&mut self, msg: ControlMsg, requests: &mut Vec<UiRequest>) {
        match msg {
            ControlMsg::SwitchMode(mode) => self.switch_mode(mode, requests),
            ControlMsg::NextSlide => {
                self.finish_active_stroke();
                if self.navigator.next() {
                    self.activate_current_slide();
                }
            }
            ControlMsg::PrevSlide => {
                self.finish_active_stroke();
                if self.navigator.prev() {
                    self.activate_current_slide();
                }
            }
            ControlMsg::Screenshot => {
                requests.push(UiRequest::CaptureScreenshot);
            }
            ControlMsg::ToggleFullscreen => {
                requests.push(UiRequest::ToggleFullscreen);
            }
            ControlMsg::ExitFullscreen => {
                requests.push(UiRequest::ExitFullscreen);
            }
            ControlMsg::CycleColor => {
                self.finish_active_stroke();
                let name = self.engine.cycle_color().to_string();
                requests.push(UiRequest::Toast(format!("Color: {name}")));
            }
            ControlMsg::ClearCanvas => {
                let removed = self.engine.clear();
                if removed > 0 {
                    self.save_active_slide();
                    requests.push(UiRequest::Toast(format!("Cleared {removed} strokes")));
                }
            }
        }
    }

    fn switch_mode(&mut self, mode: Mode, requests: &mut Vec<UiRequest>) {
        self.finish_active_stroke();
        if !self.modes.transition(mode) {
            return;
        }
        // Erasing borrows the tool slot; the drawing tool comes back on exit
        match mode {
            Mode::Erasing => {
                if self.engine.tool() != Tool::Eraser {
                    self.remembered_tool = self.engine.tool();
                }
                self.engine.set_tool(Tool::Eraser);
            }
            Mode::Drawing | Mode::Presentation => {
                if self.engine.tool() == Tool::Eraser {
                    self.engine.set_tool(self.remembered_tool);
                }
            }
        }
        requests.push(UiRequest::ModeChanged(mode));
        requests.push(UiRequest::Toast(format!("{} mode", mode.label())));
    }

    /// Commit any open stroke and persist the slide if one was committed
    fn finish_active_stroke(&mut self) {
        if self.engine.flush() {
            self.save_active_slide();
        }
    }

    // ========================================================================
    // Slides
    // ========================================================================

    /// Install a slide set and activate its first slide
    pub fn load_slide_set(&mut self, set_id: u64, slides: Vec<SlideRef>) {
        self.finish_active_stroke();
        self.navigator.load_set(set_id, slides);
        self.activate_current_slide();
    }

    /// Jump to an absolute slide index
    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        self.finish_active_stroke();
        self.navigator.jump_to(index)?;
        self.activate_current_slide();
        Ok(())
    }

    /// Point the annotation engine at the navigator's current slide, pulling
    /// persisted strokes for slides not yet visited this session
    fn activate_current_slide(&mut self) {
        let Some(slide) = self.navigator.current() else {
            return;
        };
        let id = slide.id;
        self.engine.set_active_slide(id);
        match self.store.load_annotations(id) {
            Ok(strokes) if !strokes.is_empty() => self.engine.load_slide(id, strokes),
            Ok(_) => {}
            Err(err) => log::warn!("failed to load annotations for slide {id}: {err}"),
        }
    }

    // ========================================================================
    // Direct operations (keyboard, GUI buttons)
    // ========================================================================

    /// Resolve a keyboard fallback event and apply it
    pub fn handle_key(&mut self, key: Key) -> Vec<UiRequest> {
        let mut requests = Vec::new();
        if let Some(msg) = shortcuts::handle_key_event(key) {
            self.apply(msg, &mut requests);
        }
        requests
    }

    /// Undo the latest annotation operation on the active slide
    pub fn undo(&mut self) -> bool {
        self.finish_active_stroke();
        let undone = self.engine.undo();
        if undone {
            self.save_active_slide();
        }
        undone
    }

    /// Change the drawing tool (keeps erasing mode's tool override intact)
    pub fn set_tool(&mut self, tool: Tool) {
        if self.modes.mode() == Mode::Erasing {
            self.remembered_tool = tool;
        } else {
            self.finish_active_stroke();
            self.engine.set_tool(tool);
        }
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.engine.set_brush_size(size);
    }

    pub fn set_blackboard(&mut self, blackboard: bool) {
        self.engine.set_blackboard(blackboard);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Queue a fire-and-forget full-snapshot save of the active slide
    fn save_active_slide(&mut self) {
        self.queue.save_annotations(
            self.engine.active_slide(),
            self.user_id,
            self.engine.committed_strokes(),
        );
    }

    /// Composite the active canvas over `background`, encode as PNG, and
    /// queue the write. Called by the shell in answer to
    /// [`UiRequest::CaptureScreenshot`].
    pub fn capture_screenshot(&mut self, background: Background) -> anyhow::Result<()> {
        let (width, height) = self.screenshot_size;
        let image = self.render(background, width, height);
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        self.queue.save_screenshot(bytes);
        Ok(())
    }

    /// Render the active slide's annotations over a background
    pub fn render(&self, background: Background, width: u32, height: u32) -> RgbaImage {
        match self.engine.canvas() {
            Some(canvas) => composite_canvas(background, canvas, width, height),
            None => composite_canvas(background, &Default::default(), width, height),
        }
    }

    /// Drain completion notices from the background save worker
    pub fn poll_notices(&self) -> Vec<StoreNotice> {
        self.queue.poll_notices()
    }

    /// Flush in-flight work and wait for queued saves to land
    pub fn shutdown(mut self) {
        self.finish_active_stroke();
        self.queue.shutdown();
    }
}
