//! Fire-and-forget persistence worker
//!
//! Saves are dispatched from the per-frame pipeline without blocking it.
//! A single writer drains jobs in FIFO order on a dedicated runtime thread,
//! which also guarantees per-slide ordering: a save for slide N can never be
//! reordered behind a later save for the same slide. Outcomes flow back as
//! [`StoreNotice`]s that the pipeline polls between frames.

use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::mpsc;

use crate::domain::{SlideId, Stroke, UserId};
use crate::session::messages::StoreNotice;
use crate::storage::AnnotationStore;

/// One unit of background work
#[derive(Debug)]
pub enum SaveJob {
    Annotations {
        slide_id: SlideId,
        user_id: UserId,
        strokes: Vec<Stroke>,
    },
    Screenshot {
        bytes: Vec<u8>,
    },
}

/// Handle to the background save worker
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<SaveJob>,
    notices: crossbeam_channel::Receiver<StoreNotice>,
    worker: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Spawn the worker thread with its own single-threaded runtime
    pub fn spawn(store: Arc<dyn AnnotationStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveJob>();
        let (notice_tx, notices) = crossbeam_channel::unbounded();

        let worker = std::thread::Builder::new()
            .name("wavedeck-saves".into())
            .spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .expect("save worker runtime");
                rt.block_on(async move {
                    while let Some(job) = rx.recv().await {
                        let notice = run_job(store.as_ref(), job);
                        if notice_tx.send(notice).is_err() {
                            break;
                        }
                    }
                });
            })
            .expect("spawn save worker");

        Self {
            tx,
            notices,
            worker: Some(worker),
        }
    }

    /// Enqueue a full-snapshot annotation save for one slide
    pub fn save_annotations(&self, slide_id: SlideId, user_id: UserId, strokes: Vec<Stroke>) {
        let job = SaveJob::Annotations {
            slide_id,
            user_id,
            strokes,
        };
        if self.tx.send(job).is_err() {
            log::error!("save worker gone; dropping annotation save for slide {slide_id}");
        }
    }

    /// Enqueue an encoded screenshot write
    pub fn save_screenshot(&self, bytes: Vec<u8>) {
        if self.tx.send(SaveJob::Screenshot { bytes }).is_err() {
            log::error!("save worker gone; dropping screenshot");
        }
    }

    /// Drain any completed-work notices without blocking
    pub fn poll_notices(&self) -> Vec<StoreNotice> {
        self.notices.try_iter().collect()
    }

    /// Close the queue and wait for pending saves to finish.
    ///
    /// Dropping the queue instead detaches the worker; it still drains any
    /// queued jobs before exiting, but nothing waits for it.
    pub fn shutdown(mut self) {
        let worker = self.worker.take();
        // Dropping self closes the sender, letting the worker drain and exit
        drop(self);
        if let Some(handle) = worker {
            let _ = handle.join();
        }
    }
}

fn run_job(store: &dyn AnnotationStore, job: SaveJob) -> StoreNotice {
    match job {
        SaveJob::Annotations {
            slide_id,
            user_id,
            strokes,
        } => match store.save_annotations(slide_id, user_id, &strokes) {
            Ok(()) => StoreNotice::AnnotationsSaved(slide_id),
            Err(err) => {
                log::warn!("annotation save failed for slide {slide_id}: {err}");
                StoreNotice::Failed {
                    what: format!("annotations for slide {slide_id}"),
                    error: err.to_string(),
                    retryable: err.is_retryable(),
                }
            }
        },
        SaveJob::Screenshot { bytes } => match store.save_screenshot(&bytes) {
            Ok(path) => StoreNotice::ScreenshotSaved(path),
            Err(err) => {
                log::warn!("screenshot save failed: {err}");
                StoreNotice::Failed {
                    what: "screenshot".to_string(),
                    error: err.to_string(),
                    retryable: err.is_retryable(),
                }
            }
        },
    }
}
