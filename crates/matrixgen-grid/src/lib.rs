use serde::{Deserialize, Serialize};
use thiserror::Error;

mod transform;
pub use transform::Transform;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid needs at least one row (got {0})")]
    NoRows(usize),

    #[error("grid needs at least one column (got {0})")]
    NoCols(usize),

    #[error("copy region min ({0}, {1}) exceeds max ({2}, {3})")]
    InvertedRegion(f64, f64, f64, f64),
}

/// Replication grid settings. Spacings are per-step offsets between
/// neighbouring positions, signed, in the document's native units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridOptions {
    pub rows: usize,
    pub cols: usize,
    /// Board-space step, `[x, y]`.
    pub spacing: [f64; 2],
    /// Schematic-space step, `[x, y]`.
    pub schematic_spacing: [f64; 2],
    /// Serpentine placement: odd rows run right-to-left, turned 180 degrees.
    #[serde(default)]
    pub zigzag: bool,
    /// Shared-signal artwork fully inside this box is replicated per
    /// position instead of staying a single shared drawing artifact.
    #[serde(default)]
    pub copy_region: Option<Region>,
}

impl GridOptions {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows < 1 {
            return Err(GridError::NoRows(self.rows));
        }
        if self.cols < 1 {
            return Err(GridError::NoCols(self.cols));
        }
        if let Some(r) = &self.copy_region {
            if r.min[0] > r.max[0] || r.min[1] > r.max[1] {
                return Err(GridError::InvertedRegion(
                    r.min[0], r.min[1], r.max[0], r.max[1],
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn last_position(&self) -> usize {
        self.rows * self.cols
    }

    /// Grid cell for 1-based row-major position index `p`.
    #[must_use]
    pub fn position(&self, p: usize) -> Position {
        let row = (p - 1) / self.cols;
        let col = (p - 1) % self.cols;
        let flipped = self.zigzag && row % 2 == 1;
        let placed_col = if flipped { self.cols - col - 1 } else { col };
        Position {
            index: p,
            row,
            col,
            placed_col,
            flipped,
        }
    }

    /// All positions in increasing row-major order. Interconnect synthesis
    /// reads position p-1 while building position p, so callers must not
    /// reorder.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.last_position()).map(|p| self.position(p))
    }
}

/// One cell of the replication grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based row-major index; replica names append this.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Column used for geometry; differs from `col` on flipped zigzag rows.
    pub placed_col: usize,
    pub flipped: bool,
}

impl Position {
    #[must_use]
    pub fn board_transform(&self, options: &GridOptions) -> Transform {
        self.transform(options.spacing)
    }

    #[must_use]
    pub fn schematic_transform(&self, options: &GridOptions) -> Transform {
        self.transform(options.schematic_spacing)
    }

    fn transform(&self, spacing: [f64; 2]) -> Transform {
        let angle = if self.flipped { 180.0 } else { 0.0 };
        Transform::new(
            angle,
            self.placed_col as f64 * spacing[0],
            self.row as f64 * spacing[1],
        )
    }
}

/// Axis-aligned bounding box, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Region {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min[0] && x <= self.max[0] && y >= self.min[1] && y <= self.max[1]
    }
}
