use crate::input::Direction;

/// Position in pixel units. Grid-aligned points are multiples of the cell
/// size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved `distance` units along `direction`.
    #[must_use]
    pub fn shifted(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Playfield extents in pixels together with the cell size that tiles them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Returns true when `point` lies inside the playfield.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }

    #[must_use]
    pub fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    #[must_use]
    pub fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::try_from(self.columns() * self.rows()).unwrap_or(0)
    }

    /// Pixel origin of the cell at (`column`, `row`).
    #[must_use]
    pub fn cell(self, column: i32, row: i32) -> Point {
        Point::new(column * self.cell_size, row * self.cell_size)
    }

    /// Cell coordinates of `point`, or `None` when it is off the grid.
    #[must_use]
    pub fn cell_of(self, point: Point) -> Option<(u16, u16)> {
        if !self.contains(point) {
            return None;
        }

        let column = u16::try_from(point.x / self.cell_size).ok()?;
        let row = u16::try_from(point.y / self.cell_size).ok()?;
        Some((column, row))
    }

    /// Cell nearest the middle of the grid, aligned to the cell size.
    #[must_use]
    pub fn center(self) -> Point {
        self.cell(self.columns() / 2, self.rows() / 2)
    }

    /// Iterates every cell from the top-left corner, row by row.
    pub fn cells(self) -> impl Iterator<Item = Point> {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |column| self.cell(column, row)))
    }
}
