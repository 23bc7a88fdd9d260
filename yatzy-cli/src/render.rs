//! Plain-text scoreboard.

use std::fmt::Write as _;

use yatzy_core::{BoardView, MINOR_BONUS_POINTS, MINOR_BONUS_THRESHOLD};

use crate::grid;

pub fn dice_line(view: &BoardView) -> String {
    let mut s = String::from("Dice:");
    for (d, held) in view.hand.iter().zip(view.held) {
        let face = if *d == 0 {
            "-".to_string()
        } else {
            d.to_string()
        };
        if held {
            let _ = write!(s, " [{face}]");
        } else {
            let _ = write!(s, "  {face} ");
        }
    }
    s
}

pub fn board(view: &BoardView) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", dice_line(view));
    let _ = writeln!(
        s,
        "Throws left: {}   Rounds left: {}",
        view.throws_remaining, view.rounds_remaining
    );
    let _ = writeln!(s, "  #  {:<15}{:>7}{:>9}", "Field", "Points", "Preview");
    for c in &view.categories {
        let marker = if view.selected == Some(c.category) {
            '>'
        } else {
            ' '
        };
        let points = if c.locked || c.points > 0 {
            c.points.to_string()
        } else {
            "-".to_string()
        };
        let preview = c.preview.map(|p| p.to_string()).unwrap_or_default();
        let _ = writeln!(
            s,
            "{marker}{:>2}  {:<15}{:>7}{:>9}",
            grid::index_of(c.category),
            c.category.name(),
            points,
            preview
        );
    }
    let bonus = if view.bonus_applied {
        MINOR_BONUS_POINTS.to_string()
    } else {
        "-".to_string()
    };
    let _ = writeln!(
        s,
        "Minor: {}/{}   Bonus: {}   Total: {}",
        view.minor_total, MINOR_BONUS_THRESHOLD, bonus, view.total_points
    );
    s
}
