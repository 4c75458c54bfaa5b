//! Coder's Quest, the text adventure reachable with `play adventure`.

pub mod engine;
pub mod rooms;

pub use engine::{advance, AdventureState, DISK_USED};
pub use rooms::{room, Room, RoomId, END_ROOM, START_ROOM};
