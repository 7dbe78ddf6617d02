//! Force naming: alphabets for company/lance designators and
//! faction-appropriate formation names.

use serde::{Deserialize, Serialize};

use crate::faction::{Faction, FactionFamily};

/// Alphabet used to designate companies and lances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForceNamingMethod {
    /// Able, Baker, Charlie, ...
    #[default]
    Ccb1943,
    /// Alfa, Bravo, Charlie, ...
    Icao1956,
    /// Alpha, Beta, Gamma, ...
    GreekAlphabet,
    /// A, B, C, ...
    EnglishAlphabet,
}

const CCB_1943: &[&str] = &[
    "Able", "Baker", "Charlie", "Dog", "Easy", "Fox", "George", "How", "Item", "Jig", "King",
    "Love", "Mike", "Nan", "Oboe", "Peter", "Queen", "Roger", "Sugar", "Tare", "Uncle",
    "Victor", "William", "X-ray", "Yoke", "Zebra",
];

const ICAO_1956: &[&str] = &[
    "Alfa", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
    "Juliett", "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo",
    "Sierra", "Tango", "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

const GREEK: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi",
    "Chi", "Psi", "Omega",
];

const ENGLISH: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

impl ForceNamingMethod {
    fn alphabet(&self) -> &'static [&'static str] {
        match self {
            ForceNamingMethod::Ccb1943 => CCB_1943,
            ForceNamingMethod::Icao1956 => ICAO_1956,
            ForceNamingMethod::GreekAlphabet => GREEK,
            ForceNamingMethod::EnglishAlphabet => ENGLISH,
        }
    }

    /// Designator for the zero-based `index`. Past the end of the alphabet a
    /// cycle number is appended ("Able 2", "Baker 2", ...).
    pub fn designator(&self, index: usize) -> String {
        let alphabet = self.alphabet();
        let word = alphabet[index % alphabet.len()];
        let cycle = index / alphabet.len();
        if cycle == 0 {
            word.to_string()
        } else {
            format!("{} {}", word, cycle + 1)
        }
    }
}

/// Whether a formation is the smallest unit or a group of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormationLevel {
    Lance,
    Company,
}

/// Formation name for a faction family ("Lance"/"Company", "Star"/"Trinary",
/// "Level II"/"Level III").
pub fn formation_name(faction: &Faction, level: FormationLevel) -> &'static str {
    match (faction.family, level) {
        (FactionFamily::Clan, FormationLevel::Lance) => "Star",
        (FactionFamily::Clan, FormationLevel::Company) => "Trinary",
        (FactionFamily::ComStar | FactionFamily::WordOfBlake, FormationLevel::Lance) => "Level II",
        (FactionFamily::ComStar | FactionFamily::WordOfBlake, FormationLevel::Company) => {
            "Level III"
        }
        (_, FormationLevel::Lance) => "Lance",
        (_, FormationLevel::Company) => "Company",
    }
}
