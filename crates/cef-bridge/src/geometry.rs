//! Rectangles and draggable regions

use cef_sys::{cef_draggable_region_t, cef_rect_t};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty()
            && x >= self.x
            && y >= self.y
            && i64::from(x) < i64::from(self.x) + i64::from(self.width)
            && i64::from(y) < i64::from(self.y) + i64::from(self.height)
    }
}

impl From<cef_rect_t> for Rect {
    fn from(raw: cef_rect_t) -> Self {
        Self::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl From<Rect> for cef_rect_t {
    fn from(rect: Rect) -> Self {
        cef_rect_t {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// A window area that does or does not act as a title bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DraggableRegion {
    pub bounds: Rect,
    pub draggable: bool,
}

impl From<cef_draggable_region_t> for DraggableRegion {
    fn from(raw: cef_draggable_region_t) -> Self {
        Self {
            bounds: raw.bounds.into(),
            draggable: raw.draggable != 0,
        }
    }
}

impl From<DraggableRegion> for cef_draggable_region_t {
    fn from(region: DraggableRegion) -> Self {
        cef_draggable_region_t {
            bounds: region.bounds.into(),
            draggable: i32::from(region.draggable),
        }
    }
}

/// Convert a borrowed region array
///
/// # Safety
///
/// `regions` must point to `count` initialised regions, or be null with
/// `count` zero.
pub unsafe fn read_regions(
    regions: *const cef_draggable_region_t,
    count: usize,
) -> Vec<DraggableRegion> {
    if regions.is_null() || count == 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(regions, count)
        .iter()
        .copied()
        .map(DraggableRegion::from)
        .collect()
}
