use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One cell of the board, owned by [`Board`](crate::Board).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    coords: Coord2,
    has_mine: bool,
    adjacent_mines: u8,
    pub(crate) is_open: bool,
    pub(crate) is_flagged: bool,
    pub(crate) revealed_as_mine: bool,
    pub(crate) flag_cleared: bool,
    pub(crate) triggered: bool,
}

impl Tile {
    pub(crate) const fn new(coords: Coord2, has_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            coords,
            has_mine,
            adjacent_mines,
            is_open: false,
            is_flagged: false,
            revealed_as_mine: false,
            flag_cleared: false,
            triggered: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn revealed_as_mine(&self) -> bool {
        self.revealed_as_mine
    }

    pub const fn flag_cleared(&self) -> bool {
        self.flag_cleared
    }

    pub const fn triggered(&self) -> bool {
        self.triggered
    }

    /// A correctly placed flag.
    pub(crate) const fn is_scored(&self) -> bool {
        self.has_mine && self.is_flagged
    }
}

/// Read-only snapshot of a tile handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub is_open: bool,
    pub is_flagged: bool,
    /// Only known once the tile was exposed or the game is over.
    pub has_mine: Option<bool>,
    pub adjacent_mines: u8,
    pub revealed_as_mine: bool,
    pub flag_cleared: bool,
    pub triggered: bool,
}

impl TileState {
    pub(crate) fn from_tile(tile: &Tile, terminal: bool) -> Self {
        let exposed = terminal || tile.revealed_as_mine;
        Self {
            is_open: tile.is_open,
            is_flagged: tile.is_flagged,
            has_mine: exposed.then_some(tile.has_mine),
            adjacent_mines: tile.adjacent_mines,
            revealed_as_mine: tile.revealed_as_mine,
            flag_cleared: tile.flag_cleared,
            triggered: tile.triggered,
        }
    }

    pub fn appearance(&self) -> TileAppearance {
        use TileAppearance::*;

        if self.triggered {
            Exploded
        } else if self.revealed_as_mine {
            Mine
        } else if self.flag_cleared {
            ClearedFlag
        } else if self.is_open {
            Open(self.adjacent_mines)
        } else if self.is_flagged {
            Flagged
        } else {
            Closed
        }
    }
}

// what a renderer should draw for a tile
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAppearance {
    Closed,
    Open(u8),
    Flagged,
    /// Unflagged mine exposed after a loss
    Mine,
    /// The mine that ended the game
    Exploded,
    /// False flag removed after a loss
    ClearedFlag,
}

impl TileAppearance {
    // whether the tile is visually closed
    pub const fn is_closed(self) -> bool {
        use TileAppearance::*;
        match self {
            Closed => true,
            Open(_) => false,
            Flagged => true,
            Mine => false,
            Exploded => false,
            ClearedFlag => true,
        }
    }

    pub const fn symbol(self) -> char {
        use TileAppearance::*;
        match self {
            Closed => '#',
            Open(0) => '.',
            Open(count) => (b'0' + count) as char,
            Flagged => 'F',
            Mine => 'X',
            Exploded => '*',
            ClearedFlag => '!',
        }
    }
}
