//! Seams to the presentation layer.
//!
//! The queue never talks to a windowing system directly. A host implements
//! [`Presenter`] to build surfaces and [`Surface`] to show, move, animate and
//! close them. All calls happen on the host's UI thread.

use crate::models::{Point, Size, Thickness, WindowId};

pub trait Surface {
    fn show(&mut self);

    fn close(&mut self);

    fn set_position(&mut self, position: Point);

    /// Whether the pointer is currently over the surface.
    fn is_pointer_over(&self) -> bool;

    fn set_opacity(&mut self, opacity: f64);

    fn set_translation(&mut self, x: f64, y: f64);

    fn set_hit_test_visible(&mut self, visible: bool);

    fn outer_margin(&self) -> Thickness {
        Thickness::default()
    }
}

/// Builds a surface for a content payload rendered with a template.
pub trait Presenter {
    type Content;
    type Template;
    type Surface: Surface;

    fn create_surface(
        &mut self,
        id: WindowId,
        content: Self::Content,
        template: &Self::Template,
        size: Size,
    ) -> Self::Surface;
}
