//! WASM bindings for fling-core
//!
//! Provides a JavaScript-friendly API for a board editor and solution player.

use wasm_bindgen::prelude::*;

use crate::{solve, Board, Direction, Location, Move};

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a new empty board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard { inner: Board::new() }
    }

    /// Create board from u64 encoding. Bits beyond the 56 cells are dropped.
    #[wasm_bindgen(js_name = fromBits)]
    pub fn from_bits(bits: u64) -> WasmBoard {
        WasmBoard {
            inner: Board::from_bits(bits & Board::GRID_MASK).unwrap_or_default(),
        }
    }

    /// Get u64 encoding of board
    #[wasm_bindgen(js_name = toBits)]
    pub fn to_bits(&self) -> u64 {
        self.inner.bits()
    }

    /// Check a cell. Off-grid cells read as empty.
    #[wasm_bindgen(js_name = isOccupied)]
    pub fn is_occupied(&self, x: u8, y: u8) -> bool {
        Location::new(x, y).is_some_and(|loc| self.inner.is_occupied_at(loc))
    }

    /// Set or clear a cell. Returns false if (x, y) is off the grid.
    #[wasm_bindgen(js_name = setUnit)]
    pub fn set_unit(&mut self, x: u8, y: u8, occupied: bool) -> bool {
        match Location::new(x, y) {
            Some(loc) => {
                self.inner = self.inner.with_unit_at(loc, occupied);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = unitCount)]
    pub fn unit_count(&self) -> u32 {
        self.inner.unit_count()
    }

    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    /// Get legal moves as an array of { unit: {x, y}, direction }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves: Vec<Move> = self.inner.moves().collect();
        serde_wasm_bindgen::to_value(&moves).map_err(JsValue::from)
    }

    /// Apply a move. Returns true if the move was legal.
    /// Direction is one of "up", "down", "left", "right".
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, x: u8, y: u8, direction: &str) -> bool {
        let (Some(unit), Ok(direction)) = (Location::new(x, y), direction.parse::<Direction>())
        else {
            return false;
        };
        let mov = Move::new(unit, direction);

        // Verify move is legal
        if !self.inner.legal_moves().contains(&mov) {
            return false;
        }

        self.inner = self.inner.apply_move(mov);
        true
    }

    /// Solve the board. Returns an array of moves, or null if unsolvable.
    pub fn solve(&self) -> Result<JsValue, JsValue> {
        match solve(self.inner) {
            Some(moves) => serde_wasm_bindgen::to_value(&moves).map_err(JsValue::from),
            None => Ok(JsValue::NULL),
        }
    }

    /// Board as text, one row per line
    #[wasm_bindgen(js_name = toString)]
    pub fn to_text(&self) -> String {
        self.inner.to_string()
    }

    /// Clone the board
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_board(&self) -> WasmBoard {
        WasmBoard { inner: self.inner }
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}
