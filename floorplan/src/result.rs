use eda_common::geom::point::Point;
use eda_common::geom::rect::Rect;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct BlockPlacement {
    pub name: String,
    pub x1: u64,
    pub y1: u64,
    pub x2: u64,
    pub y2: u64,
}

/// Final outcome of a floorplanning run. `legal` is false when the round
/// budget elapsed before the packing fit the outline; the coordinates are
/// then the best effort found.
#[derive(Clone, Debug, Serialize)]
pub struct FloorplanResult {
    pub cost: f64,
    pub wirelength: f64,
    pub chip_area: u64,
    pub chip_width: u64,
    pub chip_height: u64,
    pub runtime_seconds: f64,
    pub legal: bool,
    pub placements: Vec<BlockPlacement>,
}

impl FloorplanResult {
    pub fn rects(&self) -> Vec<Rect> {
        self.placements
            .iter()
            .map(|p| Rect::new(Point::new(p.x1, p.y1), Point::new(p.x2, p.y2)))
            .collect()
    }
}
