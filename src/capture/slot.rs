//! Bounded size-1 frame slot, newest frame wins
//!
//! The capture thread publishes frames without ever blocking; the pipeline
//! thread takes whatever is freshest. A frame that arrives while the slot is
//! full replaces the stale one.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

use crate::domain::HandFrame;

/// Create a connected publisher/consumer pair
pub fn frame_slot() -> (FramePublisher, FrameConsumer) {
    let (tx, rx) = bounded(1);
    (
        FramePublisher { tx, rx: rx.clone() },
        FrameConsumer { rx },
    )
}

/// Capture-side handle
#[derive(Clone)]
pub struct FramePublisher {
    tx: Sender<HandFrame>,
    rx: Receiver<HandFrame>,
}

impl FramePublisher {
    /// Publish a frame, displacing any undelivered older one.
    /// Returns true when a stale frame was dropped.
    pub fn publish(&self, frame: HandFrame) -> bool {
        let mut dropped = false;
        // Evict the stale frame so try_send below cannot fail on a full slot
        while self.rx.try_recv().is_ok() {
            dropped = true;
        }
        if self.tx.try_send(frame).is_err() {
            // The consumer hung up or raced a publish; either way the frame
            // is intentionally lost, not queued
            dropped = true;
        }
        dropped
    }
}

/// Pipeline-side handle
pub struct FrameConsumer {
    rx: Receiver<HandFrame>,
}

impl FrameConsumer {
    /// Take the freshest frame, if one is waiting
    pub fn take(&self) -> Option<HandFrame> {
        match self.rx.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn newest_frame_wins() {
        let (publisher, consumer) = frame_slot();
        let t0 = Instant::now();
        let t1 = t0 + std::time::Duration::from_millis(33);

        assert!(!publisher.publish(HandFrame::empty(t0)));
        assert!(publisher.publish(HandFrame::empty(t1)), "older frame dropped");

        let frame = consumer.take().unwrap();
        assert_eq!(frame.captured_at, t1);
        assert!(consumer.take().is_none());
    }

    #[test]
    fn empty_slot_yields_nothing() {
        let (_publisher, consumer) = frame_slot();
        assert!(consumer.take().is_none());
    }
}
