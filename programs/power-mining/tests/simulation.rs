use power_mining::calculator::PowerUpCalculator;
use power_mining::states::{AccountIndicators, GlobalIndicators, PowerToken, PowerTokenAccount};
use power_mining::utils::D18;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const START_BLOCK: u64 = 1_000;

fn pool(rewards_per_block: u64) -> GlobalIndicators {
    GlobalIndicators {
        supported: true,
        lp_decimals: 9,
        rewards_per_block,
        last_rebalance_block_number: START_BLOCK,
        ..Default::default()
    }
}

/// Drives random stakes, unstakes, delegations and rate changes through one
/// pool and checks what the positions earned against what the pool emitted.
fn run_pool(seed: u64, accounts: usize, steps: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut global = pool(rng.random_range(1..1_000_000_000));
    let mut positions = vec![AccountIndicators::default(); accounts];
    let mut block_number = START_BLOCK;
    let mut settlements = 0u128;

    for _ in 0..steps {
        block_number += rng.random_range(0..50);
        let index = rng.random_range(0..accounts);
        let position = &mut positions[index];
        match rng.random_range(0..5) {
            0 => {
                let amount = rng.random_range(1..1_000_000) * D18;
                position.stake_lp(&mut global, block_number, amount).unwrap();
            }
            1 if position.lp_token_balance > 0 => {
                let amount = rng.random_range(1..=position.lp_token_balance);
                position.unstake_lp(&mut global, block_number, amount).unwrap();
            }
            2 => {
                let amount = rng.random_range(1..1_000_000) * D18;
                position.delegate(&mut global, block_number, amount).unwrap();
            }
            3 if position.delegated_pw_token_balance > 0 => {
                let amount = rng.random_range(1..=position.delegated_pw_token_balance);
                position.undelegate(&mut global, block_number, amount).unwrap();
            }
            4 => {
                global
                    .set_rewards_per_block(block_number, rng.random_range(0..1_000_000_000))
                    .unwrap();
                continue;
            }
            _ => position.settle(&mut global, block_number).unwrap(),
        }
        settlements += 1;
    }

    block_number += rng.random_range(1..500);
    for position in positions.iter_mut() {
        position.settle(&mut global, block_number).unwrap();
        settlements += 1;
    }

    let aggregated: u128 = positions.iter().map(|position| position.power_up).sum();
    assert_eq!(global.aggregated_power_up, aggregated);
    for position in &positions {
        assert_eq!(
            Some(position.power_up),
            PowerUpCalculator::power_up(
                position.lp_token_balance,
                position.delegated_pw_token_balance
            )
        );
    }

    let distributed: u128 = positions.iter().map(|position| position.rewards).sum();
    assert!(distributed <= global.accrued_rewards);
    // Each settlement truncates at most one unit.
    assert!(global.accrued_rewards - distributed <= settlements + 1);
}

#[test]
fn pool_distributes_what_it_accrues() {
    for seed in 0..32 {
        run_pool(seed, 4, 200);
    }
}

#[test]
fn crowded_pool_distributes_what_it_accrues() {
    run_pool(7, 40, 2_000);
}

#[test]
fn lone_staker_collects_the_whole_emission() {
    let mut global = pool(250_000_000);
    let mut alice = AccountIndicators::default();
    alice.stake_lp(&mut global, START_BLOCK, 10 * D18).unwrap();
    alice.delegate(&mut global, START_BLOCK + 3, 5 * D18).unwrap();
    alice.settle(&mut global, START_BLOCK + 10).unwrap();

    assert_eq!(global.accrued_rewards, 25 * D18);
    assert!(25 * D18 - alice.rewards <= 2);
}

#[test]
fn vault_stays_solvent_through_random_exits() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut power_token = PowerToken {
        staked_token_decimals: 9,
        unstake_without_cooldown_fee: D18 / 2,
        ..Default::default()
    };
    let mut holders = vec![PowerTokenAccount::default(); 6];
    let mut backing = 0u128;
    let now = 1_700_000_000;

    for _ in 0..500 {
        let holder = &mut holders[rng.random_range(0..6)];
        if rng.random_bool(0.5) {
            let amount = rng.random_range(1..1_000_000u128) * D18 / 1_000;
            power_token.mint(holder, backing, amount).unwrap();
            backing += amount;
        } else {
            let rate = power_token.exchange_rate(backing).unwrap();
            let balance = holder.balance(rate).unwrap();
            if balance == 0 {
                continue;
            }
            let amount = rng.random_range(1..=balance);
            let outcome = power_token.unstake(holder, backing, amount, now).unwrap();
            backing = backing
                .checked_sub(outcome.amount_returned)
                .expect("payout exceeds vault");
        }
    }

    let supply: u128 = holders.iter().map(|holder| holder.base_balance).sum();
    assert_eq!(power_token.total_supply_base, supply);

    for holder in holders.iter_mut() {
        let rate = power_token.exchange_rate(backing).unwrap();
        let balance = holder.balance(rate).unwrap();
        if balance > 0 {
            let outcome = power_token.unstake(holder, backing, balance, now).unwrap();
            backing = backing
                .checked_sub(outcome.amount_returned)
                .expect("payout exceeds vault");
        }
    }
}
