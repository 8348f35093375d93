//! Tutor reputation: the mean of every rating the tutor has received.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::foundation::Rating;

/// Decimal places kept for a tutor's average rating.
pub const AVERAGE_RATING_SCALE: u32 = 1;

/// Unweighted mean of `ratings`, rounded once to one decimal place
/// (midpoint away from zero). No ratings gives zero.
pub fn average_rating<I>(ratings: I) -> Decimal
where
    I: IntoIterator<Item = Rating>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), rating| {
            (sum + u64::from(rating.value()), count + 1)
        });

    if count == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(AVERAGE_RATING_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ratings(values: &[i64]) -> Vec<Rating> {
        values.iter().map(|v| Rating::new(*v).unwrap()).collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(average_rating(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn four_five_three_is_four() {
        assert_eq!(average_rating(ratings(&[4, 5, 3])), dec("4.0"));
    }

    #[test]
    fn four_five_five_rounds_to_four_point_seven() {
        assert_eq!(average_rating(ratings(&[4, 5, 5])), dec("4.7"));
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 4.25 -> 4.3
        assert_eq!(average_rating(ratings(&[4, 4, 4, 5])), dec("4.3"));
    }

    #[test]
    fn single_rating_is_itself() {
        assert_eq!(average_rating(ratings(&[2])), dec("2.0"));
    }
}
