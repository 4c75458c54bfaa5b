use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::rooms::{room, RoomId, DISK, END_ROOM, KEY, PUZZLE_ROOM, START_ROOM};
use crate::command::{first_prefix_match, first_substring_match, Command};

const MOVE_VERBS: [&str; 6] = ["go", "move", "walk", "run", "travel", "head"];
const TAKE_VERBS: [&str; 5] = ["take", "grab", "pick", "get", "acquire"];
const USE_VERBS: [&str; 4] = ["use", "utilize", "activate", "operate"];
const LOOK_VERBS: [&str; 4] = ["look", "examine", "inspect", "check"];

pub const DISK_USED: &str = "diskUsed";

const CANT_GO: &str = "You can't go that way. Try another direction.";
const CANT_TAKE: &str = "You can't take that.";
const CANT_USE: &str = "You can't use that here.";
const NOT_HELD: &str = "You don't have that item.";
const NOTHING_SPECIAL: &str = "You don't see anything special about that.";
const UNKNOWN_VERB: &str =
    "I don't understand that command. Try 'look', 'go', 'take', 'use', or 'inventory'.";

const DISK_INSERTED: &str = "You insert the floppy disk into the mainframe. It whirs to life, but seems to be waiting for an encryption key.";
const ESCAPED: &str = "You enter the encryption key. The mainframe processes the data from the floppy disk. Suddenly, a portal opens! You step through and find yourself back in the real world.";

/// One player's progress through the adventure.
///
/// Items left in each room are tracked here rather than in the static map, so
/// every session starts from a full set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventureState {
    pub current: RoomId,
    pub inventory: Vec<&'static str>,
    pub flags: HashMap<&'static str, bool>,
    room_items: HashMap<RoomId, Vec<&'static str>>,
}

impl Default for AdventureState {
    fn default() -> Self {
        Self::new()
    }
}

impl AdventureState {
    pub fn new() -> Self {
        let room_items = RoomId::iter()
            .map(|id| (id, room(id).items.to_vec()))
            .collect();
        AdventureState {
            current: START_ROOM,
            inventory: Vec::new(),
            flags: HashMap::new(),
            room_items,
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Items still lying in `id`, in the room's own order.
    pub fn items_in(&self, id: RoomId) -> &[&'static str] {
        self.room_items.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_finished(&self) -> bool {
        self.current == END_ROOM
    }
}

/// Apply one player command. Every branch yields a message; nothing panics.
pub fn advance(mut state: AdventureState, raw: &str) -> (AdventureState, String) {
    let Some(cmd) = Command::parse(raw) else {
        return (state, UNKNOWN_VERB.to_string());
    };
    let verb = cmd.verb.as_str();
    let target = cmd.argument.as_str();

    let message = if MOVE_VERBS.contains(&verb) {
        go(&mut state, target)
    } else if TAKE_VERBS.contains(&verb) {
        take(&mut state, target)
    } else if USE_VERBS.contains(&verb) {
        use_item(&mut state, target)
    } else if LOOK_VERBS.contains(&verb) {
        look(&state, target)
    } else if verb == "inventory" {
        inventory(&state)
    } else {
        UNKNOWN_VERB.to_string()
    };
    (state, message)
}

fn go(state: &mut AdventureState, direction: &str) -> String {
    let here = room(state.current);
    let matched = first_prefix_match(here.exits.iter().map(|(name, _)| *name), direction);
    match matched.and_then(|name| here.exit(name)) {
        Some(next) => {
            state.current = next;
            room(next).description.to_string()
        }
        None => CANT_GO.to_string(),
    }
}

fn take(state: &mut AdventureState, target: &str) -> String {
    let items = state.room_items.entry(state.current).or_default();
    let Some(item) = first_substring_match(items.iter().copied(), target) else {
        return CANT_TAKE.to_string();
    };
    items.retain(|i| *i != item);
    if !state.inventory.contains(&item) {
        state.inventory.push(item);
    }
    format!("You picked up the {}.", item)
}

fn use_item(state: &mut AdventureState, target: &str) -> String {
    let Some(item) = first_substring_match(state.inventory.iter().copied(), target) else {
        return NOT_HELD.to_string();
    };
    if state.current != PUZZLE_ROOM {
        return CANT_USE.to_string();
    }
    if item == DISK {
        state.flags.insert(DISK_USED, true);
        DISK_INSERTED.to_string()
    } else if item == KEY && state.flag(DISK_USED) {
        state.current = END_ROOM;
        ESCAPED.to_string()
    } else {
        CANT_USE.to_string()
    }
}

fn look(state: &AdventureState, target: &str) -> String {
    let here = room(state.current);
    if target.is_empty() {
        return here.description.to_string();
    }
    here.interaction(&target.to_lowercase())
        .unwrap_or(NOTHING_SPECIAL)
        .to_string()
}

fn inventory(state: &AdventureState) -> String {
    if state.inventory.is_empty() {
        "You are carrying: nothing".to_string()
    } else {
        format!("You are carrying: {}", state.inventory.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: AdventureState, commands: &[&str]) -> (AdventureState, String) {
        commands
            .iter()
            .fold((state, String::new()), |(s, _), cmd| advance(s, cmd))
    }

    #[test]
    fn new_state_starts_in_study() {
        let state = AdventureState::new();
        assert_eq!(state.current, RoomId::Start);
        assert!(state.inventory.is_empty());
        assert!(state.flags.is_empty());
        assert_eq!(state.items_in(RoomId::Start), &[DISK]);
    }

    #[test]
    fn movement_by_prefix() {
        let (state, msg) = advance(AdventureState::new(), "go n");
        assert_eq!(state.current, RoomId::Corridor);
        assert_eq!(msg, room(RoomId::Corridor).description);

        let (state, _) = advance(state, "CLIMB up");
        assert_eq!(state.current, RoomId::Corridor);
        let (state, _) = advance(state, "head UP");
        assert_eq!(state.current, RoomId::ServerRoom);
    }

    #[test]
    fn invalid_direction_leaves_state_unchanged() {
        let before = AdventureState::new();
        let (after, msg) = advance(before.clone(), "go west");
        assert_eq!(after, before);
        assert_eq!(msg, CANT_GO);
        let (again, msg) = advance(after, "go west");
        assert_eq!(again, before);
        assert_eq!(msg, CANT_GO);
    }

    #[test]
    fn empty_direction_never_moves() {
        let (state, msg) = advance(AdventureState::new(), "go");
        assert_eq!(state.current, RoomId::Start);
        assert_eq!(msg, CANT_GO);
    }

    #[test]
    fn take_moves_item_from_room_to_inventory() {
        let (state, msg) = advance(AdventureState::new(), "grab Floppy");
        assert_eq!(msg, "You picked up the old floppy disk.");
        assert_eq!(state.inventory, vec![DISK]);
        assert!(state.items_in(RoomId::Start).is_empty());

        let (state, msg) = advance(state, "take disk");
        assert_eq!(msg, CANT_TAKE);
        assert_eq!(state.inventory, vec![DISK]);
    }

    #[test]
    fn taking_in_one_session_leaves_others_untouched() {
        let (taken, _) = advance(AdventureState::new(), "take disk");
        assert!(taken.items_in(RoomId::Start).is_empty());
        assert_eq!(AdventureState::new().items_in(RoomId::Start), &[DISK]);
    }

    #[test]
    fn use_requires_holding_the_item() {
        let (_, msg) = advance(AdventureState::new(), "use disk");
        assert_eq!(msg, NOT_HELD);
    }

    #[test]
    fn use_outside_server_room_does_nothing() {
        let (state, msg) = run(AdventureState::new(), &["take disk", "use disk"]);
        assert_eq!(msg, CANT_USE);
        assert!(!state.flag(DISK_USED));
    }

    #[test]
    fn solution_path_reaches_end() {
        let (state, msg) = run(
            AdventureState::new(),
            &[
                "take disk",
                "go north",
                "go up",
                "use disk",
                "go down",
                "go south",
                "go east",
                "take key",
                "go west",
                "go north",
                "go up",
                "use key",
            ],
        );
        assert_eq!(msg, ESCAPED);
        assert!(state.is_finished());
        assert_eq!(state.inventory, vec![DISK, KEY]);
    }

    #[test]
    fn key_before_disk_does_not_finish() {
        let (state, msg) = run(
            AdventureState::new(),
            &[
                "take disk",
                "go east",
                "take key",
                "go west",
                "go north",
                "go up",
                "use key",
            ],
        );
        assert_eq!(msg, CANT_USE);
        assert_eq!(state.current, RoomId::ServerRoom);

        let (state, _) = advance(state, "use disk");
        assert!(state.flag(DISK_USED));
        let (state, msg) = advance(state, "use key");
        assert_eq!(msg, ESCAPED);
        assert_eq!(state.current, RoomId::End);
    }

    #[test]
    fn look_at_room_and_objects() {
        let state = AdventureState::new();
        let (state, msg) = advance(state, "look");
        assert_eq!(msg, room(RoomId::Start).description);
        let (state, msg) = advance(state, "examine COMPUTER");
        assert!(msg.starts_with("The computer seems"));
        let (_, msg) = advance(state, "inspect comp");
        assert_eq!(msg, NOTHING_SPECIAL);
    }

    #[test]
    fn inventory_lists_items() {
        let (state, msg) = advance(AdventureState::new(), "inventory");
        assert_eq!(msg, "You are carrying: nothing");
        let (_, msg) = run(state, &["take disk", "inventory"]);
        assert_eq!(msg, "You are carrying: old floppy disk");
    }

    #[test]
    fn unknown_verb_gets_guidance() {
        let before = AdventureState::new();
        let (after, msg) = advance(before.clone(), "dance");
        assert_eq!(after, before);
        assert_eq!(msg, UNKNOWN_VERB);
    }
}
