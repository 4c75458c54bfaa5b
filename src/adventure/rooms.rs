//! The Coder's Quest map.
//!
//! Intended solution: take the disk in the study, climb to the server room and
//! use it, fetch the key from the garden, come back and use the key.

use strum::{Display, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RoomId {
    Start,
    Corridor,
    Garden,
    Shed,
    ServerRoom,
    SecretRoom,
    End,
}

pub const START_ROOM: RoomId = RoomId::Start;
pub const END_ROOM: RoomId = RoomId::End;
pub const PUZZLE_ROOM: RoomId = RoomId::ServerRoom;

pub const DISK: &str = "old floppy disk";
pub const KEY: &str = "encryption key";

/// Static room data. Exits and interactions keep their declaration order, which
/// is the tie-break for prefix matching.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub description: &'static str,
    pub exits: &'static [(&'static str, RoomId)],
    pub items: &'static [&'static str],
    pub interactions: &'static [(&'static str, &'static str)],
}

impl Room {
    pub fn exit(&self, direction: &str) -> Option<RoomId> {
        self.exits
            .iter()
            .find(|(name, _)| *name == direction)
            .map(|(_, to)| *to)
    }

    pub fn interaction(&self, keyword: &str) -> Option<&'static str> {
        self.interactions
            .iter()
            .find(|(key, _)| *key == keyword)
            .map(|(_, text)| *text)
    }
}

static START: Room = Room {
    id: RoomId::Start,
    description: "You find yourself in a dimly lit study. An old computer sits on a desk, its screen flickering with an eerie glow. There's a door to the north and a window to the east.",
    exits: &[("north", RoomId::Corridor), ("east", RoomId::Garden)],
    items: &[DISK],
    interactions: &[
        ("computer", "The computer seems to be running an ancient operating system. Maybe it could read a floppy disk?"),
        ("desk", "The desk is cluttered with papers and old technology. You notice an old floppy disk."),
    ],
};

static CORRIDOR: Room = Room {
    id: RoomId::Corridor,
    description: "You're in a long, dark corridor. Strange symbols flicker on the walls, reminiscent of matrix code. There's a door to the south and a staircase going up.",
    exits: &[("south", RoomId::Start), ("up", RoomId::ServerRoom)],
    items: &[],
    interactions: &[
        ("symbols", "The symbols seem to shift and change as you look at them. They're mesmerizing."),
        ("walls", "The walls are covered in constantly changing symbols. It's disorienting."),
    ],
};

static GARDEN: Room = Room {
    id: RoomId::Garden,
    description: "You step into a beautiful digital garden. Pixelated flowers sway in a non-existent breeze. There's a shed to the north and a window back to the west.",
    exits: &[("north", RoomId::Shed), ("west", RoomId::Start)],
    items: &[KEY],
    interactions: &[(
        "flowers",
        "As you touch a flower, it dissolves into a shower of pixels, revealing an encryption key.",
    )],
};

static SHED: Room = Room {
    id: RoomId::Shed,
    description: "You're in a virtual shed. A large server rack hums in the corner. There's a rusty lever on the wall.",
    exits: &[("south", RoomId::Garden)],
    items: &[],
    interactions: &[
        ("lever", "You pull the lever. A hidden panel slides open, revealing a passage to a secret room."),
        ("server rack", "The server rack is filled with blinking lights. It seems to be processing something important."),
    ],
};

static SERVER_ROOM: Room = Room {
    id: RoomId::ServerRoom,
    description: "You're in a high-tech server room. Rows of servers line the walls, blinking and humming. A large mainframe dominates the center of the room.",
    exits: &[("down", RoomId::Corridor)],
    items: &[],
    interactions: &[(
        "mainframe",
        "The mainframe has a slot for a floppy disk and a keypad for entering an encryption key.",
    )],
};

static SECRET_ROOM: Room = Room {
    id: RoomId::SecretRoom,
    description: "You've discovered a hidden room! It's filled with ancient technology and modern gadgets. A glowing portal shimmers in one corner.",
    exits: &[("out", RoomId::Shed)],
    items: &[],
    interactions: &[(
        "portal",
        "The portal seems to lead to another dimension. It might be your way out of this digital world.",
    )],
};

static END: Room = Room {
    id: RoomId::End,
    description: "Congratulations! You've completed the Coder's Quest and escaped the digital labyrinth!",
    exits: &[],
    items: &[],
    interactions: &[],
};

pub fn room(id: RoomId) -> &'static Room {
    match id {
        RoomId::Start => &START,
        RoomId::Corridor => &CORRIDOR,
        RoomId::Garden => &GARDEN,
        RoomId::Shed => &SHED,
        RoomId::ServerRoom => &SERVER_ROOM,
        RoomId::SecretRoom => &SECRET_ROOM,
        RoomId::End => &END,
    }
}
