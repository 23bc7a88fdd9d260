//! Legacy scoreboard grid numbering.
//!
//! The scoreboard is drawn as an 8x4 grid, cells numbered row-major from 0.
//! Column 0/2 hold labels, column 1 the minor section and column 3 everything
//! else, which is where the sparse 1..=31 field numbers come from. Players who
//! learned those numbers can still type `select 15`; the engine itself only
//! ever sees a `Category`.

use yatzy_core::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Field(Category),
    /// Minor-section running total and bonus.
    MinorBonus,
    Total,
}

const CELLS: [(u8, GridCell); 16] = [
    (1, GridCell::Field(Category::Ones)),
    (3, GridCell::Field(Category::TwoOfKind)),
    (5, GridCell::Field(Category::Twos)),
    (7, GridCell::Field(Category::ThreeOfAKind)),
    (9, GridCell::Field(Category::Threes)),
    (11, GridCell::Field(Category::FourOfAKind)),
    (13, GridCell::Field(Category::Fours)),
    (15, GridCell::Field(Category::FullHouse)),
    (17, GridCell::Field(Category::Fives)),
    (19, GridCell::Field(Category::SmallStraight)),
    (21, GridCell::Field(Category::Sixes)),
    (23, GridCell::Field(Category::LargeStraight)),
    (25, GridCell::MinorBonus),
    (27, GridCell::Field(Category::Yatzy)),
    (29, GridCell::Total),
    (31, GridCell::Field(Category::Chance)),
];

pub fn cell_at(index: u8) -> Option<GridCell> {
    CELLS.iter().find(|(i, _)| *i == index).map(|(_, c)| *c)
}

/// Category drawn at grid cell `index`, if that cell is a scoring field.
pub fn category_at(index: u8) -> Option<Category> {
    match cell_at(index)? {
        GridCell::Field(c) => Some(c),
        GridCell::MinorBonus | GridCell::Total => None,
    }
}

pub fn index_of(category: Category) -> u8 {
    CELLS
        .iter()
        .find(|(_, c)| *c == GridCell::Field(category))
        .map(|(i, _)| *i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_unique_cell() {
        let mut seen = std::collections::HashSet::new();
        for c in Category::ALL {
            let idx = index_of(c);
            assert!((1..=31).contains(&idx), "{c} not on grid");
            assert!(seen.insert(idx));
            assert_eq!(category_at(idx), Some(c));
        }
    }

    #[test]
    fn derived_and_empty_cells_are_not_fields() {
        assert_eq!(cell_at(25), Some(GridCell::MinorBonus));
        assert_eq!(category_at(25), None);
        assert_eq!(category_at(29), None);
        assert_eq!(cell_at(2), None);
        assert_eq!(cell_at(0), None);
        assert_eq!(cell_at(32), None);
    }
}
