use crate::algorithms::common::{Observation, MOVES};
use crate::config::Config;
use crate::error::{ConfigError, ParsePositionError};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A (row, col) grid coordinate. Ordering is row-major, which is also the
/// tie-breaker uniform-cost search uses between equal-cost entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Applies a move offset, returning `None` when it would leave the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    pub fn offset(self, (dr, dc): (isize, isize)) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// True when `other` is exactly one move-set offset away.
    pub fn is_adjacent(self, other: Position) -> bool {
        MOVES.iter().any(|&m| self.offset(m) == Some(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Sentinels for the two endpoints; never Empty, so never a spawn target.
    Start,
    Target,
    StaticWall,
    DynamicWall,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::StaticWall | Cell::DynamicWall)
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
    start: Position,
    target: Position,
    dynamic_probability: f64,
}

impl Grid {
    /// Creates a wall-free grid with the endpoints tagged.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Position,
        target: Position,
        dynamic_probability: f64,
    ) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        for (name, position) in [("start", start), ("target", target)] {
            if position.row >= rows || position.col >= cols {
                return Err(ConfigError::PositionOutOfBounds {
                    name,
                    position,
                    rows,
                    cols,
                });
            }
        }
        if !(0.0..=1.0).contains(&dynamic_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                name: "dynamic probability",
                value: dynamic_probability,
            });
        }

        let mut cells = vec![vec![Cell::Empty; cols]; rows];
        cells[start.row][start.col] = Cell::Start;
        cells[target.row][target.col] = Cell::Target;

        Ok(Grid {
            rows,
            cols,
            cells,
            start,
            target,
            dynamic_probability,
        })
    }

    /// Builds the grid described by `config` and scatters static walls.
    pub fn generate<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid = Grid::new(
            config.rows,
            config.cols,
            config.start,
            config.target,
            config.dynamic_probability,
        )?;
        grid.generate_static_walls(config.wall_probability, rng);
        Ok(grid)
    }

    /// Parses a text layout: `.` empty, `#` static wall, `%` dynamic wall,
    /// `S` start, `T` target, `*` start and target on the same cell.
    pub fn from_layout(layout: &[&str], dynamic_probability: f64) -> Result<Self, ConfigError> {
        let rows = layout.len();
        let cols = layout.first().map_or(0, |line| line.chars().count());
        let mut start = None;
        let mut target = None;
        let mut walls = Vec::new();

        for (row, line) in layout.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(ConfigError::InvalidLayout(format!(
                    "row {row} has {} columns, expected {cols}",
                    line.chars().count()
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                match ch {
                    '.' => {}
                    '#' => walls.push((pos, Cell::StaticWall)),
                    '%' => walls.push((pos, Cell::DynamicWall)),
                    'S' => start = Some(pos),
                    'T' => target = Some(pos),
                    '*' => {
                        start = Some(pos);
                        target = Some(pos);
                    }
                    other => {
                        return Err(ConfigError::InvalidLayout(format!(
                            "unexpected `{other}` at {pos}"
                        )))
                    }
                }
            }
        }

        let start = start.ok_or_else(|| ConfigError::InvalidLayout("missing start".into()))?;
        let target = target.ok_or_else(|| ConfigError::InvalidLayout("missing target".into()))?;
        let mut grid = Grid::new(rows, cols, start, target, dynamic_probability)?;
        for (pos, cell) in walls {
            grid.cells[pos.row][pos.col] = cell;
        }
        Ok(grid)
    }

    fn generate_static_walls<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                // One draw per cell, endpoints included.
                let hit = rng.gen_bool(probability);
                if hit && self.cells[row][col] == Cell::Empty {
                    self.cells[row][col] = Cell::StaticWall;
                }
            }
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Read access to the cell matrix, row-major.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// In bounds and not a wall of either kind.
    pub fn is_valid(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| !cell.is_wall())
    }

    /// Valid neighbours of `pos` in move-set order, read from the live grid.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        MOVES
            .iter()
            .filter_map(move |&m| pos.offset(m))
            .filter(move |&n| self.is_valid(n))
    }

    /// Marks `pos` as a dynamic wall if it is currently Empty.
    pub fn place_dynamic_obstacle(&mut self, pos: Position) -> bool {
        if !self.contains(pos) || self.cells[pos.row][pos.col] != Cell::Empty {
            return false;
        }
        self.cells[pos.row][pos.col] = Cell::DynamicWall;
        true
    }

    /// With the configured probability, picks a uniformly random cell and
    /// turns it into a dynamic wall when it is Empty.
    pub fn spawn_dynamic_obstacle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        if !rng.gen_bool(self.dynamic_probability) {
            return None;
        }
        let pos = Position::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols));
        if self.place_dynamic_obstacle(pos) {
            log::debug!("dynamic obstacle spawned at {pos}");
            Some(pos)
        } else {
            None
        }
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == kind).count()
    }

    /// Text frame of the grid with an optional search overlay.
    pub fn render(&self, observation: Option<&Observation>, path: Option<&[Position]>) -> String {
        let mut out = String::new();
        out.push_str("Legend: S=Start T=Target #=Wall %=Dynamic +=Frontier ~=Visited @=Current *=Path\n");

        out.push_str("   ");
        for col in 0..self.cols {
            out.push_str(&format!("{:2}", col % 10));
        }
        out.push('\n');

        for row in 0..self.rows {
            out.push_str(&format!("{:2} ", row));
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                out.push(' ');
                out.push(self.glyph(pos, observation, path));
            }
            out.push('\n');
        }
        out
    }

    fn glyph(
        &self,
        pos: Position,
        observation: Option<&Observation>,
        path: Option<&[Position]>,
    ) -> char {
        match self.cells[pos.row][pos.col] {
            Cell::Start => return 'S',
            Cell::Target => return 'T',
            Cell::StaticWall => return '#',
            Cell::DynamicWall => return '%',
            Cell::Empty => {}
        }
        if path.is_some_and(|p| p.contains(&pos)) {
            return '*';
        }
        match observation {
            Some(obs) if obs.current == pos => '@',
            Some(obs) if obs.frontier.contains(&pos) => '+',
            Some(obs) if obs.visited.contains(&pos) => '~',
            _ => '.',
        }
    }
}
