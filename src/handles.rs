use crate::geometry::{CropRect, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragCorner {
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Square hit zones anchored inside each corner of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerZones {
    pub top_left: CropRect,
    pub top_right: CropRect,
    pub bottom_left: CropRect,
    pub bottom_right: CropRect,
}

impl CornerZones {
    pub fn for_rect(rect: &CropRect, size: f32) -> Self {
        Self {
            top_left: CropRect::new(rect.left, rect.top, rect.left + size, rect.top + size),
            top_right: CropRect::new(rect.right - size, rect.top, rect.right, rect.top + size),
            bottom_left: CropRect::new(
                rect.left,
                rect.bottom - size,
                rect.left + size,
                rect.bottom,
            ),
            bottom_right: CropRect::new(
                rect.right - size,
                rect.bottom - size,
                rect.right,
                rect.bottom,
            ),
        }
    }

    /// Zones in the order they are tested.
    pub fn iter(&self) -> [(DragCorner, CropRect); 4] {
        [
            (DragCorner::TopLeft, self.top_left),
            (DragCorner::TopRight, self.top_right),
            (DragCorner::BottomLeft, self.bottom_left),
            (DragCorner::BottomRight, self.bottom_right),
        ]
    }

    pub fn corner_at(&self, point: Point) -> DragCorner {
        self.iter()
            .into_iter()
            .find(|(_, zone)| zone.contains(point))
            .map_or(DragCorner::None, |(corner, _)| corner)
    }
}

pub fn corner_at_point(rect: &CropRect, corner_drag_size: f32, point: Point) -> DragCorner {
    CornerZones::for_rect(rect, corner_drag_size).corner_at(point)
}
