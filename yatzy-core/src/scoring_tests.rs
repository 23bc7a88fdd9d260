#[cfg(test)]
mod tests {
    use crate::{score, scores_for_hand, Category};

    #[test]
    fn minor_categories_count_matching_faces() {
        for c in Category::ALL.iter().copied().filter(|c| c.is_minor()) {
            let face = c.face().unwrap();
            let other = if face == 6 { 1 } else { 6 };

            // zero, one and five matching dice
            assert_eq!(score(c, [other; 5]), 0, "{c} with no match");
            assert_eq!(
                score(c, [face, other, other, other, other]),
                face as u32,
                "{c} with one match"
            );
            assert_eq!(score(c, [face; 5]), 5 * face as u32, "{c} with five matches");
        }
    }

    #[test]
    fn of_a_kind_scores() {
        assert_eq!(score(Category::TwoOfKind, [3, 3, 5, 5, 1]), 10);
        assert_eq!(score(Category::TwoOfKind, [1, 2, 3, 4, 6]), 0);
        assert_eq!(score(Category::TwoOfKind, [4, 4, 4, 4, 4]), 8);
        assert_eq!(score(Category::ThreeOfAKind, [2, 2, 2, 6, 6]), 6);
        assert_eq!(score(Category::ThreeOfAKind, [2, 2, 6, 6, 1]), 0);
        assert_eq!(score(Category::FourOfAKind, [5, 5, 5, 5, 2]), 20);
        assert_eq!(score(Category::FourOfAKind, [5, 5, 5, 2, 2]), 0);
        assert_eq!(score(Category::FourOfAKind, [3, 3, 3, 3, 3]), 12);
    }

    #[test]
    fn full_house() {
        assert_eq!(score(Category::FullHouse, [2, 2, 3, 3, 3]), 25);
        assert_eq!(score(Category::FullHouse, [1, 1, 1, 1, 2]), 0);
        assert_eq!(score(Category::FullHouse, [4, 4, 4, 4, 4]), 0);
    }

    #[test]
    fn straights() {
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, [6, 5, 4, 3, 3]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 5, 6]), 0);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 5]), 40);
        assert_eq!(score(Category::LargeStraight, [6, 2, 5, 3, 4]), 40);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 6]), 0);
        // A large straight also counts as a small one.
        assert_eq!(score(Category::SmallStraight, [2, 3, 4, 5, 6]), 30);
    }

    #[test]
    fn yatzy_and_chance() {
        assert_eq!(score(Category::Yatzy, [5, 5, 5, 5, 5]), 50);
        assert_eq!(score(Category::Yatzy, [5, 5, 5, 5, 4]), 0);
        assert_eq!(score(Category::Chance, [1, 2, 3, 4, 6]), 16);
    }

    #[test]
    fn unrolled_dice_are_absent() {
        let empty = [0u8; 5];
        assert_eq!(scores_for_hand(empty), [0; crate::NUM_CATS]);
        // Zeros never form a yatzy or a pair of "0".
        assert_eq!(score(Category::Yatzy, [0, 0, 0, 0, 0]), 0);
        assert_eq!(score(Category::TwoOfKind, [0, 0, 3, 4, 5]), 0);
        assert_eq!(score(Category::Chance, [0, 6, 0, 6, 1]), 13);
        assert_eq!(score(Category::FullHouse, [0, 0, 3, 3, 3]), 0);
    }

    #[test]
    fn scores_for_hand_matches_single_category_scoring() {
        for a in 1u8..=6 {
            for b in 1u8..=6 {
                for c in 1u8..=6 {
                    let hand = [a, b, c, a, b];
                    let all = scores_for_hand(hand);
                    for cat in Category::ALL {
                        assert_eq!(all[cat.index()], score(cat, hand), "{cat} {hand:?}");
                    }
                }
            }
        }
    }
}
