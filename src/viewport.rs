//! Pan/zoom animators that settle immediately instead of animating over time.
//!
//! All animators built by one [`ViewportFactory`] share a single
//! [`ImageTransform`], the same way the horizontal, vertical and scale
//! animators of an interactive view all act on one image.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::{AnimatorFactory, MoveAnimator, ScaleAnimator};
use crate::geometry::CropRect;

/// Seconds of travel a fling is projected over before it comes to rest.
const FLING_PROJECTION_SECS: f32 = 0.25;
/// How far a pinch may overshoot the scale limits before snapping back.
const SCALE_OVERSHOOT: f32 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    base: CropRect,
    translate_x: f32,
    translate_y: f32,
    scale: f32,
}

impl ImageTransform {
    /// `base` is where the image sits at scale 1 with no pan.
    pub const fn new(base: CropRect) -> Self {
        Self {
            base,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// On-screen bounds of the image, scaled around the base centre.
    pub fn displayed_rect(&self) -> CropRect {
        let center = self.base.center();
        let half_width = self.base.width() * self.scale / 2.0;
        let half_height = self.base.height() * self.scale / 2.0;
        CropRect::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
        .translated(self.translate_x, self.translate_y)
    }

    fn translate(&mut self, axis: Axis, delta: f32) {
        match axis {
            Axis::Horizontal => self.translate_x += delta,
            Axis::Vertical => self.translate_y += delta,
        }
    }
}

pub type SharedTransform = Rc<RefCell<ImageTransform>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn span(self, rect: &CropRect) -> (f32, f32) {
        match self {
            Self::Horizontal => (rect.left, rect.right),
            Self::Vertical => (rect.top, rect.bottom),
        }
    }
}

#[derive(Debug)]
pub struct SettlingMoveAnimator {
    axis: Axis,
    transform: SharedTransform,
    restriction: CropRect,
}

impl SettlingMoveAnimator {
    /// Shift that brings the image back over the restriction on this axis.
    fn snap_delta(&self, target_offset: f32) -> f32 {
        let (image_start, image_end) = self.axis.span(&self.transform.borrow().displayed_rect());
        let (limit_start, limit_end) = self.axis.span(&self.restriction);
        let slack = target_offset.max(0.0);

        if image_end - image_start < limit_end - limit_start {
            return (limit_start + limit_end) / 2.0 - (image_start + image_end) / 2.0;
        }
        if image_start > limit_start + slack {
            return limit_start + slack - image_start;
        }
        if image_end < limit_end - slack {
            return limit_end - slack - image_end;
        }
        0.0
    }
}

impl MoveAnimator for SettlingMoveAnimator {
    fn move_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.transform.borrow_mut().translate(self.axis, delta);
        }
    }

    fn fling(&mut self, velocity: f32) {
        self.move_by(velocity * FLING_PROJECTION_SECS);
        self.re_move_if_needed(0.0);
    }

    fn re_move_if_needed(&mut self, target_offset: f32) {
        let delta = self.snap_delta(target_offset);
        if delta != 0.0 {
            tracing::trace!(axis = ?self.axis, delta, "image snapped back over crop region");
            self.transform.borrow_mut().translate(self.axis, delta);
        }
    }

    fn is_not_flinging(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct SettlingScaleAnimator {
    transform: SharedTransform,
    max_scale: f32,
}

impl ScaleAnimator for SettlingScaleAnimator {
    fn scale(&mut self, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let mut transform = self.transform.borrow_mut();
        transform.scale = (transform.scale * factor)
            .clamp(1.0 / SCALE_OVERSHOOT, self.max_scale * SCALE_OVERSHOOT);
    }

    fn re_scale_if_needed(&mut self) {
        let mut transform = self.transform.borrow_mut();
        transform.scale = transform.scale.clamp(1.0, self.max_scale);
    }
}

#[derive(Debug, Clone)]
pub struct ViewportFactory {
    transform: SharedTransform,
}

impl ViewportFactory {
    pub fn new(image_base: CropRect) -> Self {
        Self {
            transform: Rc::new(RefCell::new(ImageTransform::new(image_base))),
        }
    }

    /// Handle for reading the displayed image rectangle after the factory moves into a controller.
    pub fn transform(&self) -> SharedTransform {
        Rc::clone(&self.transform)
    }
}

impl AnimatorFactory for ViewportFactory {
    type Move = SettlingMoveAnimator;
    type Scale = SettlingScaleAnimator;

    fn horizontal(&mut self, restriction: CropRect) -> SettlingMoveAnimator {
        SettlingMoveAnimator {
            axis: Axis::Horizontal,
            transform: Rc::clone(&self.transform),
            restriction,
        }
    }

    fn vertical(&mut self, restriction: CropRect) -> SettlingMoveAnimator {
        SettlingMoveAnimator {
            axis: Axis::Vertical,
            transform: Rc::clone(&self.transform),
            restriction,
        }
    }

    fn scale(&mut self, max_scale: u8) -> SettlingScaleAnimator {
        SettlingScaleAnimator {
            transform: Rc::clone(&self.transform),
            max_scale: f32::from(max_scale),
        }
    }
}
