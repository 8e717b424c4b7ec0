//! Power-up: the reward weight of an LP position, boosted by the Power Tokens
//! delegated to it.

use crate::utils::math::{mul_div_floor, D18};

/// `(delegated / lp ratio, multiplier)` breakpoints, both scaled by 1e18.
///
/// Each multiplier is `1 + log2(1 + ratio)` truncated to 18 decimals. Values
/// between two breakpoints are interpolated linearly; ratios past the last
/// breakpoint are capped.
///
/// This curve is the project's own choice; it has not been checked against
/// any reference power-up fixtures.
pub const POWER_UP_TIERS: [(u128, u128); 6] = [
    (0, 1_000_000_000_000_000_000),
    (250_000_000_000_000_000, 1_321_928_094_887_362_347),
    (500_000_000_000_000_000, 1_584_962_500_721_156_181),
    (1_000_000_000_000_000_000, 2_000_000_000_000_000_000),
    (2_000_000_000_000_000_000, 2_584_962_500_721_156_181),
    (3_000_000_000_000_000_000, 3_000_000_000_000_000_000),
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerUpCalculator;

impl PowerUpCalculator {
    /// Multiplier (1e18 scale) for a given `delegated / lp` ratio.
    pub fn multiplier(ratio: u128) -> Option<u128> {
        let (last_ratio, last_multiplier) = POWER_UP_TIERS[POWER_UP_TIERS.len() - 1];
        if ratio >= last_ratio {
            return Some(last_multiplier);
        }
        for window in POWER_UP_TIERS.windows(2) {
            let (low_ratio, low_multiplier) = window[0];
            let (high_ratio, high_multiplier) = window[1];
            if ratio < high_ratio {
                let step = mul_div_floor(
                    high_multiplier.checked_sub(low_multiplier)?,
                    ratio.checked_sub(low_ratio)?,
                    high_ratio.checked_sub(low_ratio)?,
                )?;
                return low_multiplier.checked_add(step);
            }
        }
        Some(last_multiplier)
    }

    /// Power-up of a position holding `lp_token_balance` LP tokens with
    /// `delegated_pw_token_balance` Power Tokens delegated to it.
    pub fn power_up(lp_token_balance: u128, delegated_pw_token_balance: u128) -> Option<u128> {
        if lp_token_balance == 0 {
            return Some(0);
        }
        if delegated_pw_token_balance == 0 {
            return Some(lp_token_balance);
        }
        let ratio = mul_div_floor(delegated_pw_token_balance, D18, lp_token_balance)?;
        mul_div_floor(lp_token_balance, Self::multiplier(ratio)?, D18)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn empty_position_has_no_power() {
        assert_eq!(PowerUpCalculator::power_up(0, 0), Some(0));
        assert_eq!(PowerUpCalculator::power_up(0, 500 * D18), Some(0));
    }

    #[test]
    fn undelegated_position_weighs_its_lp_balance() {
        assert_eq!(PowerUpCalculator::power_up(100 * D18, 0), Some(100 * D18));
        assert_eq!(PowerUpCalculator::power_up(1, 0), Some(1));
    }

    #[test]
    fn breakpoints_are_exact() {
        for (ratio, multiplier) in POWER_UP_TIERS {
            assert_eq!(PowerUpCalculator::multiplier(ratio), Some(multiplier));
        }
        assert_eq!(PowerUpCalculator::power_up(100 * D18, 100 * D18), Some(200 * D18));
    }

    #[test]
    fn interpolates_between_breakpoints() {
        // halfway between ratio 1.0 (x2.0) and 2.0 (x2.584962500721156181)
        assert_eq!(
            PowerUpCalculator::multiplier(1_500_000_000_000_000_000),
            Some(2_292_481_250_360_578_090)
        );
    }

    #[test]
    fn multiplier_is_capped() {
        assert_eq!(PowerUpCalculator::multiplier(3 * D18), Some(3 * D18));
        assert_eq!(PowerUpCalculator::multiplier(u128::MAX), Some(3 * D18));
        assert_eq!(PowerUpCalculator::power_up(D18, 1_000_000 * D18), Some(3 * D18));
    }

    quickcheck! {
        fn power_up_stays_between_one_and_three_times_lp(lp: u64, delegated: u64) -> bool {
            let lp = u128::from(lp) * 1_000_000;
            let delegated = u128::from(delegated) * 1_000_000;
            let power_up = PowerUpCalculator::power_up(lp, delegated).unwrap();
            power_up >= lp && power_up <= 3 * lp
        }

        fn more_delegation_never_lowers_power_up(lp: u64, delegated: u64, extra: u32) -> bool {
            let lp = u128::from(lp);
            let delegated = u128::from(delegated);
            let before = PowerUpCalculator::power_up(lp, delegated).unwrap();
            let after = PowerUpCalculator::power_up(lp, delegated + u128::from(extra)).unwrap();
            after >= before
        }
    }
}
