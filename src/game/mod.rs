//! Core Connect Four game logic: the 6×7 board, the two sides, and the
//! four-axis win scan. Pure geometry; turn order, scoring, and rounds live
//! in [`crate::engine`].

mod board;
mod player;

pub use board::{Board, Cell, MoveError, WinLine, COLS, ROWS};
pub use player::Player;
