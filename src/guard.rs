//! Aspect-ratio band enforcement for corner-drag resizing.
//!
//! The guard looks at the rectangle *before* a drag is applied. Once the
//! rectangle sits on an edge of the band, any drag that would push the ratio
//! further out of the band is vetoed as a whole.

use crate::geometry::CropRect;
use crate::handles::DragCorner;

/// Comparison slack for ratios computed in `f32`.
pub const RATIO_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatioBand {
    pub min_ratio: f32,
    pub max_ratio: f32,
}

pub const ASPECT_RATIO_BAND: AspectRatioBand = AspectRatioBand {
    min_ratio: 1.0,
    max_ratio: 16.0 / 9.0,
};

/// Edge of the band the current rectangle has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandEdge {
    /// Ratio at or below 1:1; further height growth is forbidden.
    Square,
    /// Ratio at or above 16:9; further height shrinking is forbidden.
    Wide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    Downward,
    Upward,
}

impl DragDirection {
    /// Zero counts as downward.
    pub fn from_delta(dy: f32) -> Self {
        if dy >= 0.0 {
            Self::Downward
        } else {
            Self::Upward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRow {
    Top,
    Bottom,
}

impl CornerRow {
    pub const fn of(corner: DragCorner) -> Option<Self> {
        match corner {
            DragCorner::TopLeft | DragCorner::TopRight => Some(Self::Top),
            DragCorner::BottomLeft | DragCorner::BottomRight => Some(Self::Bottom),
            DragCorner::None => None,
        }
    }
}

/// Veto table: `true` means the drag would move the ratio past `edge`.
pub const fn vetoes(edge: BandEdge, direction: DragDirection, row: CornerRow) -> bool {
    use BandEdge::*;
    use CornerRow::*;
    use DragDirection::*;
    match (edge, direction, row) {
        (Wide, Downward, Top) => true,
        (Wide, Downward, Bottom) => false,
        (Wide, Upward, Top) => false,
        (Wide, Upward, Bottom) => true,
        (Square, Downward, Top) => false,
        (Square, Downward, Bottom) => true,
        (Square, Upward, Top) => true,
        (Square, Upward, Bottom) => false,
    }
}

impl AspectRatioBand {
    /// Band edges the ratio currently sits on. Both are reported for a band
    /// that has collapsed to a single ratio.
    pub fn edges_reached(&self, ratio: f32) -> [Option<BandEdge>; 2] {
        [
            (ratio >= self.max_ratio - RATIO_EPSILON).then_some(BandEdge::Wide),
            (ratio <= self.min_ratio + RATIO_EPSILON).then_some(BandEdge::Square),
        ]
    }

    pub fn contains(&self, ratio: f32) -> bool {
        ratio >= self.min_ratio - RATIO_EPSILON && ratio <= self.max_ratio + RATIO_EPSILON
    }

    /// Whether a drag of `corner` in `direction` must be discarded for `current`.
    pub fn should_veto(&self, current: &CropRect, direction: DragDirection, corner: DragCorner) -> bool {
        let Some(row) = CornerRow::of(corner) else {
            return false;
        };
        self.edges_reached(current.aspect_ratio())
            .into_iter()
            .flatten()
            .any(|edge| vetoes(edge, direction, row))
    }

    /// Height range a resize may land in without leaving the band. A rectangle
    /// already outside the band may keep its height but not drift further out.
    pub fn height_range(&self, current: &CropRect) -> (f32, f32) {
        let width = current.width();
        let height = current.height();
        let min_height = width / self.max_ratio;
        let max_height = width / self.min_ratio;
        (height.min(min_height), height.max(max_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: AspectRatioBand = ASPECT_RATIO_BAND;

    const CORNERS: [DragCorner; 4] = [
        DragCorner::TopLeft,
        DragCorner::TopRight,
        DragCorner::BottomLeft,
        DragCorner::BottomRight,
    ];

    fn wide() -> CropRect {
        CropRect::new(0.0, 0.0, 1600.0, 900.0)
    }

    fn square() -> CropRect {
        CropRect::new(0.0, 0.0, 800.0, 800.0)
    }

    fn assert_table(rect: CropRect, expected: [(DragDirection, DragCorner, bool); 8]) {
        for (direction, corner, veto) in expected {
            assert_eq!(
                BAND.should_veto(&rect, direction, corner),
                veto,
                "{direction:?} {corner:?} on {rect:?}"
            );
        }
    }

    #[test]
    fn wide_edge_veto_table_is_exhaustive() {
        use DragCorner::*;
        use DragDirection::*;
        assert_table(
            wide(),
            [
                (Downward, TopLeft, true),
                (Downward, TopRight, true),
                (Downward, BottomLeft, false),
                (Downward, BottomRight, false),
                (Upward, TopLeft, false),
                (Upward, TopRight, false),
                (Upward, BottomLeft, true),
                (Upward, BottomRight, true),
            ],
        );
    }

    #[test]
    fn square_edge_veto_table_is_exhaustive() {
        use DragCorner::*;
        use DragDirection::*;
        assert_table(
            square(),
            [
                (Downward, TopLeft, false),
                (Downward, TopRight, false),
                (Downward, BottomLeft, true),
                (Downward, BottomRight, true),
                (Upward, TopLeft, true),
                (Upward, TopRight, true),
                (Upward, BottomLeft, false),
                (Upward, BottomRight, false),
            ],
        );
    }

    #[test]
    fn inside_band_never_vetoes() {
        let rect = CropRect::new(0.0, 0.0, 1400.0, 1000.0);
        for direction in [DragDirection::Downward, DragDirection::Upward] {
            for corner in CORNERS {
                assert!(!BAND.should_veto(&rect, direction, corner));
            }
        }
    }

    #[test]
    fn no_active_corner_never_vetoes() {
        for rect in [wide(), square()] {
            for direction in [DragDirection::Downward, DragDirection::Upward] {
                assert!(!BAND.should_veto(&rect, direction, DragCorner::None));
            }
        }
    }

    #[test]
    fn band_is_closed_at_exact_boundaries() {
        assert_eq!(BAND.edges_reached(1.0), [None, Some(BandEdge::Square)]);
        assert_eq!(BAND.edges_reached(16.0 / 9.0), [Some(BandEdge::Wide), None]);
        assert_eq!(BAND.edges_reached(1.5), [None, None]);
        assert!(BAND.contains(1.0));
        assert!(BAND.contains(16.0 / 9.0));
        assert!(!BAND.contains(0.9));
        assert!(!BAND.contains(1.8));
    }

    #[test]
    fn zero_delta_counts_as_downward() {
        assert_eq!(DragDirection::from_delta(0.0), DragDirection::Downward);
        assert_eq!(DragDirection::from_delta(-0.5), DragDirection::Upward);
    }

    #[test]
    fn height_range_never_forces_a_jump_from_outside_the_band() {
        let too_wide = CropRect::new(0.0, 0.0, 2000.0, 500.0);
        let (min, max) = BAND.height_range(&too_wide);
        assert_eq!(min, 500.0);
        assert_eq!(max, 2000.0);

        let (min, max) = BAND.height_range(&CropRect::new(0.0, 0.0, 1600.0, 1000.0));
        assert!((min - 900.0).abs() < 0.01, "min={min}");
        assert_eq!(max, 1600.0);
    }
}
