//! Frame hand-off from the external capture loop
//!
//! The video pipeline produces landmark frames faster than the core may be
//! able to consume them; the slot here implements the newest-frame-wins
//! backpressure policy so frames are dropped, never queued unboundedly.

pub mod slot;

pub use slot::{frame_slot, FrameConsumer, FramePublisher};
