//! Scoring categories.
//!
//! Categories are addressed by name everywhere in the engine. Index order
//! (`Category::index`) is only used for fixed-size arrays.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_CATS: usize = 14;

/// Number of categories in the minor section (`ones..=sixes`).
pub const NUM_MINOR: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    TwoOfKind,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yatzy,
    Chance,
}

impl Category {
    /// All categories in scorecard order.
    pub const ALL: [Category; NUM_CATS] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::TwoOfKind,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yatzy,
        Category::Chance,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Category> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::TwoOfKind => "twoOfKind",
            Category::ThreeOfAKind => "threeOfAKind",
            Category::FourOfAKind => "fourOfAKind",
            Category::FullHouse => "fullHouse",
            Category::SmallStraight => "smallStraight",
            Category::LargeStraight => "largeStraight",
            Category::Yatzy => "yatzy",
            Category::Chance => "chance",
        }
    }

    /// Face value for minor-section categories (`ones` → 1 ... `sixes` → 6).
    pub fn face(self) -> Option<u8> {
        if self.is_minor() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    pub fn is_minor(self) -> bool {
        self.index() < NUM_MINOR
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive; accepts both `fullHouse` and `full_house` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_order_matches_all() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Category::from_index(i), Some(*c));
        }
        assert_eq!(Category::from_index(NUM_CATS), None);
    }

    #[test]
    fn parse_accepts_camel_and_snake_case() {
        assert_eq!("fullHouse".parse::<Category>(), Ok(Category::FullHouse));
        assert_eq!("full_house".parse::<Category>(), Ok(Category::FullHouse));
        assert_eq!("YATZY".parse::<Category>(), Ok(Category::Yatzy));
        assert!("pair".parse::<Category>().is_err());
    }

    #[test]
    fn minor_faces() {
        assert_eq!(Category::Ones.face(), Some(1));
        assert_eq!(Category::Sixes.face(), Some(6));
        assert_eq!(Category::Chance.face(), None);
        assert_eq!(Category::ALL.iter().filter(|c| c.is_minor()).count(), NUM_MINOR);
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let s = serde_json::to_string(&Category::ThreeOfAKind).unwrap();
        assert_eq!(s, "\"threeOfAKind\"");
    }
}
