/// Computes the score bonus for a line clear.
///
/// The formula is a pure function of the combo value *before* the move:
///
/// - 0 lines cleared: 0 points
/// - otherwise `base = 10 * cleared`, `bonus = base * (combo + 1)`
/// - clearing more than 2 lines multiplies the bonus by `cleared - 1`
///
/// The per-cell placement score is not part of this formula; callers add
/// `piece.len()` separately when computing a move's total gain.
#[must_use]
pub fn score_gain(cleared: usize, combo: u32) -> u64 {
    if cleared == 0 {
        return 0;
    }
    let base = 10 * cleared as u64;
    let mut bonus = base * (u64::from(combo) + 1);
    if cleared > 2 {
        bonus *= cleared as u64 - 1;
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clear_scores_zero() {
        assert_eq!(score_gain(0, 0), 0);
        assert_eq!(score_gain(0, 7), 0);
    }

    #[test]
    fn test_single_clear_no_combo() {
        assert_eq!(score_gain(1, 0), 10);
    }

    #[test]
    fn test_combo_multiplies_base() {
        assert_eq!(score_gain(1, 3), 40);
        assert_eq!(score_gain(2, 1), 40);
    }

    #[test]
    fn test_multi_clear_branch() {
        // cleared > 2 multiplies by (cleared - 1)
        assert_eq!(score_gain(3, 1), 120);
        assert_eq!(score_gain(4, 0), 120);
    }
}
