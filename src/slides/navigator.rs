//! Slide-set navigation
//!
//! Caches the ordered slide list of the loaded set and the current index.
//! CRUD over sets and slides belongs to the external persistence
//! collaborator; the core only moves the cursor.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::SlideId;

/// Navigation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("slide index {index} out of range (set has {len} slides)")]
    OutOfRange { index: usize, len: usize },
    #[error("no slide set loaded")]
    NoSlideSet,
}

/// One slide of the loaded set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideRef {
    pub id: SlideId,
    /// Background image path, resolved by the display collaborator
    pub image_path: PathBuf,
    pub order_index: u32,
}

/// Tracks `(slide_set_id, current_index)` over the cached slide list
#[derive(Debug, Default)]
pub struct SlideNavigator {
    set_id: Option<u64>,
    slides: Vec<SlideRef>,
    index: usize,
}

impl SlideNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a slide set, sorting by order index and resetting the cursor
    pub fn load_set(&mut self, set_id: u64, mut slides: Vec<SlideRef>) {
        slides.sort_by_key(|s| s.order_index);
        log::info!("loaded slide set {} with {} slides", set_id, slides.len());
        self.set_id = Some(set_id);
        self.slides = slides;
        self.index = 0;
    }

    pub fn set_id(&self) -> Option<u64> {
        self.set_id
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The slide under the cursor
    pub fn current(&self) -> Option<&SlideRef> {
        self.slides.get(self.index)
    }

    /// Advance one slide; clamped at the end of the set.
    /// Returns true when the slide changed.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.slides.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one slide; clamped at the start of the set.
    /// Returns true when the slide changed.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an absolute index, failing on out-of-range targets
    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        if self.slides.is_empty() {
            return Err(NavigationError::NoSlideSet);
        }
        if index >= self.slides.len() {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(count: usize) -> SlideNavigator {
        let slides = (0..count)
            .map(|i| SlideRef {
                id: 100 + i as u64,
                image_path: PathBuf::from(format!("slide_{i}.png")),
                order_index: i as u32,
            })
            .collect();
        let mut nav = SlideNavigator::new();
        nav.load_set(1, slides);
        nav
    }

    #[test]
    fn prev_at_start_is_a_noop() {
        let mut nav = navigator(3);
        assert!(!nav.prev());
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn next_at_end_is_a_noop() {
        let mut nav = navigator(3);
        nav.jump_to(2).unwrap();
        assert!(!nav.next());
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn next_and_prev_move_the_cursor() {
        let mut nav = navigator(3);
        assert!(nav.next());
        assert_eq!(nav.current().unwrap().id, 101);
        assert!(nav.prev());
        assert_eq!(nav.current().unwrap().id, 100);
    }

    #[test]
    fn jump_out_of_range_fails() {
        let mut nav = navigator(2);
        assert_eq!(
            nav.jump_to(5),
            Err(NavigationError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn load_set_sorts_by_order_index() {
        let mut nav = SlideNavigator::new();
        nav.load_set(
            7,
            vec![
                SlideRef {
                    id: 2,
                    image_path: PathBuf::from("b.png"),
                    order_index: 1,
                },
                SlideRef {
                    id: 1,
                    image_path: PathBuf::from("a.png"),
                    order_index: 0,
                },
            ],
        );
        assert_eq!(nav.current().unwrap().id, 1);
    }
}
