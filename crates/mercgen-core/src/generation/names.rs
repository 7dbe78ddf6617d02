//! Name and callsign generation

use crate::components::Name;
use crate::dice::Dice;

/// Generate a random name
pub fn generate_name(dice: &mut dyn Dice) -> Name {
    let given = pick(GIVEN_NAMES, dice);
    let family = pick(FAMILY_NAMES, dice);

    Name::new(given, family)
}

/// Generate a random callsign
pub fn generate_callsign(dice: &mut dyn Dice) -> String {
    pick(CALLSIGNS, dice).to_string()
}

fn pick(list: &'static [&'static str], dice: &mut dyn Dice) -> &'static str {
    list[dice.random_int(list.len() as u32) as usize % list.len()]
}

// Built-in pools; a faction-aware name generator can replace them
static GIVEN_NAMES: &[&str] = &[
    "Aaron", "Alexei", "Amara", "Anastasius", "Brandon", "Caitlin", "Carlos", "Charles",
    "Daniel", "Dmitri", "Elena", "Evan", "Fatima", "Grayson", "Hanse", "Hiroshi", "Ian",
    "Ingrid", "Jaime", "Joshua", "Katrina", "Kenji", "Leila", "Melissa", "Ming", "Morgan",
    "Natasha", "Omar", "Pavel", "Priya", "Raj", "Romano", "Ryan", "Sven", "Takashi", "Thomas",
    "Victor", "Yuki", "Zara",
];

static FAMILY_NAMES: &[&str] = &[
    "Ahmed", "Allard", "Carlyle", "Chen", "Davion", "Garcia", "Hasek", "Ivanov", "Kell",
    "Kerensky", "Kurita", "Liao", "Marik", "McKinnon", "Mueller", "Nakamura", "Nguyen",
    "O'Brien", "Okonkwo", "Patel", "Petrov", "Santos", "Singh", "Steiner", "Tanaka", "Volkov",
    "Wolf", "Yamamoto",
];

static CALLSIGNS: &[&str] = &[
    "Ace", "Banshee", "Bishop", "Blackjack", "Boomer", "Cutter", "Deadeye", "Falcon", "Ghost",
    "Gunslinger", "Hammer", "Hatchet", "Iceman", "Jester", "Lucky", "Maverick", "Nomad",
    "Outlaw", "Paladin", "Raven", "Reaper", "Saint", "Sparrow", "Stinger", "Tank", "Viper",
    "Warden", "Wraith",
];
