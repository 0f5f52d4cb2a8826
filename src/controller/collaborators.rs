use crate::geometry::CropRect;
use crate::handles::CornerZones;

/// Pans the image along one axis.
pub trait MoveAnimator {
    fn move_by(&mut self, delta: f32);
    fn fling(&mut self, velocity: f32);
    /// Snaps the image back so it covers the crop rectangle, leaving at most
    /// `target_offset` pixels of gap.
    fn re_move_if_needed(&mut self, target_offset: f32);
    fn is_not_flinging(&self) -> bool;
}

pub trait ScaleAnimator {
    fn scale(&mut self, factor: f32);
    fn re_scale_if_needed(&mut self);
}

/// Builds animators bound to the current crop rectangle. Called at layout
/// time and again after every accepted resize.
pub trait AnimatorFactory {
    type Move: MoveAnimator;
    type Scale: ScaleAnimator;

    fn horizontal(&mut self, restriction: CropRect) -> Self::Move;
    fn vertical(&mut self, restriction: CropRect) -> Self::Move;
    fn scale(&mut self, max_scale: u8) -> Self::Scale;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayAttrs {
    pub rect: CropRect,
    pub background_alpha: u8,
    pub with_border: bool,
    pub corners: CornerZones,
}

pub trait OverlayRenderer {
    fn set_attrs(&mut self, attrs: OverlayAttrs);
    fn request_redraw(&mut self);
}
