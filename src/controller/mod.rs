//! Crop region state machine.
//!
//! A touch-down decides the whole gesture: landing in a corner zone starts a
//! corner-drag resize, anywhere else pans the image through the animators.

mod collaborators;
mod event;

use image::RgbaImage;

use crate::config::{validate_container, ConfigError, CropConfig};
use crate::extract::{extract_crop, CropResult};
use crate::geometry::{ContainerBounds, CropRect, Point};
use crate::guard::{AspectRatioBand, CornerRow, DragDirection, ASPECT_RATIO_BAND};
use crate::handles::{CornerZones, DragCorner};

pub use collaborators::{
    AnimatorFactory, MoveAnimator, OverlayAttrs, OverlayRenderer, ScaleAnimator,
};
pub use event::{GestureEvent, GestureOutcome};

pub struct CropController<F: AnimatorFactory, R: OverlayRenderer> {
    config: CropConfig,
    container: ContainerBounds,
    rect: CropRect,
    drag_corner: DragCorner,
    resizing: bool,
    /// The current gesture already ran its end transition.
    settled: bool,
    factory: F,
    horizontal: F::Move,
    vertical: F::Move,
    scale: F::Scale,
    renderer: R,
}

impl<F: AnimatorFactory, R: OverlayRenderer> CropController<F, R> {
    /// Lays out the initial crop rectangle. Nothing is built when the
    /// configuration or container is invalid.
    pub fn new(
        config: CropConfig,
        container: ContainerBounds,
        mut factory: F,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_container(container)?;

        let rect = container.centered_fraction(config.width_fraction, config.height_fraction);
        let horizontal = factory.horizontal(rect);
        let vertical = factory.vertical(rect);
        let scale = factory.scale(config.max_scale);
        let mut controller = Self {
            config,
            container,
            rect,
            drag_corner: DragCorner::None,
            resizing: false,
            settled: true,
            factory,
            horizontal,
            vertical,
            scale,
            renderer,
        };
        controller.renderer.set_attrs(controller.overlay_attrs());
        tracing::info!(rect = ?rect, ?container, "crop region laid out");
        Ok(controller)
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn container(&self) -> ContainerBounds {
        self.container
    }

    pub fn drag_corner(&self) -> DragCorner {
        self.drag_corner
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn corner_zones(&self) -> CornerZones {
        CornerZones::for_rect(&self.rect, self.config.corner_drag_size())
    }

    pub fn overlay_attrs(&self) -> OverlayAttrs {
        OverlayAttrs {
            rect: self.rect,
            background_alpha: self.config.background_alpha_u8(),
            with_border: self.config.with_border,
            corners: self.corner_zones(),
        }
    }

    pub fn handle_event(&mut self, event: GestureEvent) -> GestureOutcome {
        tracing::trace!(?event, resizing = self.resizing, "gesture event");
        match event {
            GestureEvent::TouchDown { x, y } => self.touch_down(Point::new(x, y)),
            GestureEvent::Moved { dx, dy } => self.moved(dx, dy),
            GestureEvent::Flinged { vx, vy } => {
                if self.resizing {
                    return GestureOutcome::Ignored;
                }
                self.settled = false;
                self.horizontal.fling(vx);
                self.vertical.fling(vy);
                GestureOutcome::Flung
            }
            GestureEvent::Scaled { factor } => {
                if self.resizing {
                    return GestureOutcome::Ignored;
                }
                self.scale.scale(factor);
                GestureOutcome::Scaled
            }
            GestureEvent::ScaleEnded => {
                if self.resizing {
                    return GestureOutcome::Ignored;
                }
                self.scale.re_scale_if_needed();
                GestureOutcome::Settled
            }
            GestureEvent::MoveEnded | GestureEvent::TouchUp => self.finish_gesture(),
        }
    }

    /// Extracts the pixels under the crop rectangle from `source` as shown at `displayed`.
    pub fn request_crop(&self, displayed: &CropRect, source: &RgbaImage) -> CropResult {
        let result = extract_crop(&self.rect, displayed, source);
        match &result {
            Ok(image) => tracing::info!(
                width = image.width(),
                height = image.height(),
                "crop extracted"
            ),
            Err(err) => tracing::warn!(%err, crop = ?self.rect, ?displayed, "crop extraction failed"),
        }
        result
    }

    fn touch_down(&mut self, point: Point) -> GestureOutcome {
        self.drag_corner = if self.config.adjustable {
            self.corner_zones().corner_at(point)
        } else {
            DragCorner::None
        };
        self.resizing = self.drag_corner != DragCorner::None;
        self.settled = false;
        tracing::debug!(corner = ?self.drag_corner, x = point.x, y = point.y, "touch down");
        if self.resizing {
            GestureOutcome::DragStarted(self.drag_corner)
        } else {
            GestureOutcome::PanStarted
        }
    }

    fn moved(&mut self, dx: f32, dy: f32) -> GestureOutcome {
        if !self.resizing {
            self.settled = false;
            self.horizontal.move_by(dx);
            self.vertical.move_by(dy);
            return GestureOutcome::Panned;
        }
        if !dy.is_finite() {
            return GestureOutcome::Ignored;
        }

        let direction = DragDirection::from_delta(dy);
        if ASPECT_RATIO_BAND.should_veto(&self.rect, direction, self.drag_corner) {
            tracing::debug!(
                corner = ?self.drag_corner,
                ?direction,
                ratio = self.rect.aspect_ratio(),
                "resize vetoed at aspect ratio band edge"
            );
            return GestureOutcome::Vetoed;
        }

        let candidate = match resized_rect(
            &self.rect,
            self.drag_corner,
            dy,
            self.container,
            &ASPECT_RATIO_BAND,
        ) {
            Some(candidate) if candidate != self.rect => candidate,
            _ => return GestureOutcome::Ignored,
        };

        debug_assert!(candidate.is_valid(), "resize produced {candidate:?}");
        debug_assert!(self.container.rect().contains_rect(&candidate));
        self.rect = candidate;
        self.rebuild_animators();
        self.renderer.set_attrs(self.overlay_attrs());
        self.renderer.request_redraw();
        tracing::debug!(corner = ?self.drag_corner, dy, rect = ?candidate, "crop region resized");
        GestureOutcome::Resized(candidate)
    }

    /// Move-ended and touch-up both end a gesture; only the first one to arrive
    /// snaps a panned image back.
    fn finish_gesture(&mut self) -> GestureOutcome {
        let was_resizing = self.resizing;
        self.resizing = false;
        self.drag_corner = DragCorner::None;
        if self.settled {
            return GestureOutcome::Ignored;
        }
        self.settled = true;
        if !was_resizing {
            if self.horizontal.is_not_flinging() {
                self.horizontal.re_move_if_needed(0.0);
            }
            if self.vertical.is_not_flinging() {
                self.vertical.re_move_if_needed(0.0);
            }
        }
        GestureOutcome::Settled
    }

    fn rebuild_animators(&mut self) {
        self.horizontal = self.factory.horizontal(self.rect);
        self.vertical = self.factory.vertical(self.rect);
        self.scale = self.factory.scale(self.config.max_scale);
    }
}

/// Moves the edge owned by `corner` vertically by `dy`. The moved edge stays
/// inside the container, never crosses the opposite edge, and cannot take the
/// ratio further outside `band`. Horizontal edges are anchored.
pub fn resized_rect(
    current: &CropRect,
    corner: DragCorner,
    dy: f32,
    container: ContainerBounds,
    band: &AspectRatioBand,
) -> Option<CropRect> {
    if !dy.is_finite() {
        return None;
    }
    let (min_height, max_height) = band.height_range(current);
    match CornerRow::of(corner)? {
        CornerRow::Top => {
            let lowest = current.bottom - min_height;
            let highest = current.bottom - max_height;
            let top = (current.top + dy).clamp(highest, lowest).max(0.0);
            Some(current.with_top(top))
        }
        CornerRow::Bottom => {
            let highest = current.top + min_height;
            let lowest = current.top + max_height;
            let bottom = (current.bottom + dy)
                .clamp(highest, lowest)
                .min(container.height);
            Some(current.with_bottom(bottom))
        }
    }
}
