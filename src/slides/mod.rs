//! Slide set navigation

pub mod navigator;

pub use navigator::{NavigationError, SlideNavigator, SlideRef};
