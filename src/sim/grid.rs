//! Maze layout and collectibles
//!
//! The wall layout is fixed once loaded. Pellet and power pellet cells are the
//! only cells that ever change, and only through [`GridMap::consume_pellet`].

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::motion::Direction;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::error::MapError;
use crate::{cell_center, world_to_cell};

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Wall,
    Pellet,
    PowerPellet,
    PlayerSpawn,
    AdversarySpawn,
}

impl CellKind {
    /// Decode a layout code (0 empty, 1 wall, 2 pellet, 3 power pellet,
    /// 4 player spawn, 5 adversary spawn)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Empty),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Pellet),
            3 => Some(CellKind::PowerPellet),
            4 => Some(CellKind::PlayerSpawn),
            5 => Some(CellKind::AdversarySpawn),
            _ => None,
        }
    }

    pub fn collectible(self) -> Option<Collectible> {
        match self {
            CellKind::Pellet => Some(Collectible::Pellet),
            CellKind::PowerPellet => Some(Collectible::PowerPellet),
            _ => None,
        }
    }
}

/// Something the player can eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collectible {
    Pellet,
    PowerPellet,
}

/// The reference 20x15 maze
#[rustfmt::skip]
pub const REFERENCE_LAYOUT: [[u8; GRID_WIDTH]; GRID_HEIGHT] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 3, 1, 1, 2, 1, 1, 1, 2, 1, 1, 2, 1, 1, 1, 2, 1, 1, 3, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 2, 1, 2, 1, 1, 1, 1, 1, 1, 2, 1, 2, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 1, 2, 2, 2, 1, 1, 2, 2, 2, 1, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 2, 1, 1, 1, 0, 1, 1, 0, 1, 1, 1, 2, 1, 1, 1, 1],
    [0, 0, 0, 1, 2, 1, 0, 0, 0, 5, 5, 0, 0, 0, 1, 2, 1, 0, 0, 0],
    [1, 1, 1, 1, 2, 1, 0, 1, 1, 5, 5, 1, 1, 0, 1, 2, 1, 1, 1, 1],
    [0, 0, 0, 0, 2, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 2, 0, 0, 0, 0],
    [1, 1, 1, 1, 2, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 2, 1, 1, 1, 1],
    [0, 0, 0, 1, 2, 1, 0, 0, 0, 4, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0],
    [1, 1, 1, 1, 2, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 2, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Static maze plus the live collectible registries
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    cell_size: f32,
    /// Current cells, row-major
    cells: Vec<CellKind>,
    /// Cells as loaded, for restoring collectibles on restart
    initial: Vec<CellKind>,
    /// Remaining pellets, row-major order
    pellets: Vec<IVec2>,
    /// Remaining power pellets, row-major order
    power_pellets: Vec<IVec2>,
    total_collectibles: usize,
    player_spawn: Vec2,
    adversary_spawns: Vec<Vec2>,
}

impl GridMap {
    /// Build the reference maze
    pub fn reference(cell_size: f32) -> Result<Self, MapError> {
        Self::from_rows(&REFERENCE_LAYOUT, cell_size)
    }

    /// Build a maze from rows of layout codes
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R], cell_size: f32) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut player_cells = Vec::new();
        let mut adversary_spawns = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MapError::RaggedRow {
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            for (x, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or(MapError::UnknownCell { code, x, y })?;
                let cell = IVec2::new(x as i32, y as i32);
                match kind {
                    CellKind::PlayerSpawn => player_cells.push(cell),
                    CellKind::AdversarySpawn => {
                        adversary_spawns.push(cell_center(cell, cell_size))
                    }
                    _ => {}
                }
                cells.push(kind);
            }
        }

        let player_spawn = match player_cells.as_slice() {
            [] => return Err(MapError::MissingPlayerSpawn),
            [cell] => cell_center(*cell, cell_size),
            many => return Err(MapError::DuplicatePlayerSpawn { count: many.len() }),
        };
        if adversary_spawns.is_empty() {
            return Err(MapError::MissingAdversarySpawn);
        }

        let mut grid = Self {
            width,
            height,
            cell_size,
            initial: cells.clone(),
            cells,
            pellets: Vec::new(),
            power_pellets: Vec::new(),
            total_collectibles: 0,
            player_spawn,
            adversary_spawns,
        };
        grid.rebuild_registries();
        grid.total_collectibles = grid.remaining_collectibles();

        log::debug!(
            "Maze {}x{}: {} pellets, {} power pellets, {} adversary spawns",
            width,
            height,
            grid.pellets.len(),
            grid.power_pellets.len(),
            grid.adversary_spawns.len()
        );

        Ok(grid)
    }

    /// Put every collectible back where the layout originally had it
    pub fn restore(&mut self) {
        self.cells.clone_from(&self.initial);
        self.rebuild_registries();
    }

    fn rebuild_registries(&mut self) {
        self.pellets.clear();
        self.power_pellets.clear();
        for (i, kind) in self.cells.iter().enumerate() {
            let cell = IVec2::new((i % self.width) as i32, (i / self.width) as i32);
            match kind.collectible() {
                Some(Collectible::Pellet) => self.pellets.push(cell),
                Some(Collectible::PowerPellet) => self.power_pellets.push(cell),
                None => {}
            }
        }
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        let in_bounds = cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height;
        in_bounds.then(|| cell.y as usize * self.width + cell.x as usize)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell kind, or `None` off-grid
    pub fn cell_kind(&self, cell: IVec2) -> Option<CellKind> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Off-grid cells are walls
    pub fn cell_is_wall(&self, cell: IVec2) -> bool {
        self.cell_kind(cell).is_none_or(|kind| kind == CellKind::Wall)
    }

    /// Whether the cell containing `pos` is a wall (off-grid counts as wall)
    pub fn is_wall(&self, pos: Vec2) -> bool {
        self.cell_is_wall(world_to_cell(pos, self.cell_size))
    }

    /// Directions whose neighbor cell is on-grid and not a wall, in
    /// [`Direction::CARDINALS`] order
    pub fn valid_directions(&self, pos: Vec2) -> Vec<Direction> {
        let cell = world_to_cell(pos, self.cell_size);
        Direction::CARDINALS
            .into_iter()
            .filter(|dir| !self.cell_is_wall(cell + dir.offset()))
            .collect()
    }

    /// Eat whatever collectible sits in the cell containing `pos`
    ///
    /// Returns the collectible exactly once; later calls on the same cell
    /// return `None`.
    pub fn consume_pellet(&mut self, pos: Vec2) -> Option<Collectible> {
        let cell = world_to_cell(pos, self.cell_size);
        let index = self.index(cell)?;
        let collectible = self.cells[index].collectible()?;

        self.cells[index] = CellKind::Empty;
        let registry = match collectible {
            Collectible::Pellet => &mut self.pellets,
            Collectible::PowerPellet => &mut self.power_pellets,
        };
        registry.retain(|&c| c != cell);

        Some(collectible)
    }

    /// Collectibles present when the maze was loaded
    #[inline]
    pub fn total_collectible_count(&self) -> usize {
        self.total_collectibles
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    pub fn pellets(&self) -> &[IVec2] {
        &self.pellets
    }

    pub fn power_pellets(&self) -> &[IVec2] {
        &self.power_pellets
    }

    /// Row-major cell snapshot
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// World position of the player spawn cell's center
    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    /// Adversary spawn centers, row-major
    pub fn adversary_spawns(&self) -> &[Vec2] {
        &self.adversary_spawns
    }

    /// Spawn for the adversary at `index`; extra adversaries share the last spawn
    pub fn adversary_spawn(&self, index: usize) -> Vec2 {
        let last = self.adversary_spawns.len() - 1;
        self.adversary_spawns[index.min(last)]
    }
}
