use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use core::fmt;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Moves are accepted
    Active,
    /// Every safe tile is open and every mine is flagged
    Won,
    /// A mine was revealed
    Lost,
}

impl BoardState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Active
    }
}

/// Outcome of revealing a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Continue,
    Win,
    Loss,
    AlreadyOpen,
    /// Board is finished or the tile is flagged
    Rejected,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Continue => true,
            Win => true,
            Loss => true,
            AlreadyOpen => false,
            Rejected => false,
        }
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    /// Board is finished or the tile is open
    Rejected,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// A single game session: the tile grid plus its win/loss state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    tiles: Array2<Tile>,
    total_mines: CellCount,
    safe_cells: CellCount,
    opened_count: CellCount,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Generates a fresh board, one independent mine draw per tile from `rng`.
    pub fn build<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Result<Self> {
        BernoulliGenerator::new(rng).generate(config).map(Self::new)
    }

    pub fn new(layout: MineLayout) -> Self {
        let tiles = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Tile::new(
                coords,
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            )
        });

        Self {
            tiles,
            total_mines: layout.mine_count(),
            safe_cells: layout.safe_cell_count(),
            opened_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.tiles.dim();
        (x as Coord, y as Coord)
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.safe_cells
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Mines that carry a flag, recomputed on every call.
    pub fn score(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_scored()).count() as CellCount
    }

    pub fn missed_mines(&self) -> CellCount {
        self.total_mines - self.score()
    }

    /// Tiles a renderer still draws as closed, flags included.
    pub fn closed_tiles(&self) -> CellCount {
        let terminal = self.is_terminal();
        self.tiles
            .iter()
            .filter(|tile| TileState::from_tile(tile, terminal).appearance().is_closed())
            .count() as CellCount
    }

    /// All flags placed, right or wrong.
    pub fn flag_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_flagged).count() as CellCount
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.total_mines as isize) - (self.flag_count() as isize)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Full tile data, including whether it hides a mine.
    pub fn tile(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.tiles[coords.to_nd_index()])
    }

    pub fn tile_state(&self, coords: Coord2) -> Result<TileState> {
        let tile = self.tile(coords)?;
        Ok(TileState::from_tile(tile, self.is_terminal()))
    }

    /// In-bounds neighbors in N, NE, E, SE, S, SW, W, NW order.
    pub fn neighbors_of(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles.iter_neighbors(coords))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(Rejected);
        }

        let tile = self.tiles[coords.to_nd_index()];
        if tile.is_open() {
            return Ok(AlreadyOpen);
        }
        if tile.is_flagged() {
            log::debug!("Reveal of flagged tile at {:?} rejected", coords);
            return Ok(Rejected);
        }

        if tile.has_mine() {
            self.expose_mines(coords);
            self.end_game(BoardState::Lost);
            return Ok(Loss);
        }

        self.open_tiles(coords);

        Ok(if self.check_won() { Win } else { Continue })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(Rejected);
        }

        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.is_open {
            return Ok(Rejected);
        }

        tile.is_flagged = !tile.is_flagged;
        let outcome = if tile.is_flagged { Flagged } else { Unflagged };
        log::debug!("Toggled flag at {:?}: {:?}", coords, outcome);

        // flagging the last mine can finish an otherwise solved board
        self.check_won();
        Ok(outcome)
    }

    pub fn outcome_message(&self) -> Option<String> {
        match self.state {
            BoardState::Active => None,
            BoardState::Won => Some(String::from("You Won!")),
            BoardState::Lost => Some(format!(
                "Boom! You missed {} bombs",
                self.missed_mines()
            )),
        }
    }

    pub fn intro_message(&self) -> String {
        format!("You need to flag {} bombs.  Good luck!", self.total_mines)
    }

    /// Opens `start` and flood-fills through zero-count tiles.
    fn open_tiles(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let tile = &mut self.tiles[coords.to_nd_index()];

            // each tile opens once
            if tile.is_open || tile.has_mine() {
                continue;
            }

            // the cascade sweeps flags off safe tiles
            if tile.is_flagged {
                log::debug!("Flood cleared flag at {:?}", coords);
                tile.is_flagged = false;
            }
            tile.is_open = true;
            self.opened_count += 1;
            let adjacent_mines = tile.adjacent_mines();

            if coords == start {
                log::debug!("Open tile at {:?}, mine count: {}", coords, adjacent_mines);
            } else {
                log::trace!(
                    "Flood opened tile at {:?}, mine count: {}",
                    coords,
                    adjacent_mines
                );
            }

            if adjacent_mines == 0 {
                let tiles = &self.tiles;
                to_visit.extend(
                    tiles
                        .iter_neighbors(coords)
                        .filter(|&pos| !tiles[pos.to_nd_index()].is_open),
                );
            }
        }
    }

    /// Marks missed mines and clears wrong flags after a mine went off.
    fn expose_mines(&mut self, triggered: Coord2) {
        for tile in self.tiles.iter_mut() {
            match (tile.has_mine(), tile.is_flagged) {
                (true, false) => tile.revealed_as_mine = true,
                (false, true) => {
                    tile.is_flagged = false;
                    tile.flag_cleared = true;
                }
                _ => {}
            }
        }

        self.tiles[triggered.to_nd_index()].triggered = true;
        self.triggered_mine = Some(triggered);
    }

    fn check_won(&mut self) -> bool {
        let won = self.opened_count == self.safe_cell_count() && self.score() == self.total_mines;
        if won {
            self.end_game(BoardState::Won);
        }
        won
    }

    fn end_game(&mut self, state: BoardState) {
        if self.state.is_finished() {
            return;
        }

        log::debug!(
            "Game ended: {:?}, {} of {} mines flagged",
            state,
            self.score(),
            self.total_mines
        );
        self.state = state;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terminal = self.is_terminal();
        let (x_end, y_end) = self.size();
        for y in 0..y_end {
            for x in 0..x_end {
                let tile = &self.tiles[(x, y).to_nd_index()];
                let symbol = TileState::from_tile(tile, terminal).appearance().symbol();
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
