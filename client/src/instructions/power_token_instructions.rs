use anchor_lang::prelude::AccountMeta;
use anyhow::{format_err, Result};
use power_mining::accounts as power_mining_accounts;
use power_mining::instruction as power_mining_instructions;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use spl_associated_token_account::get_associated_token_address;

use super::super::ClientConfig;
use super::mining_instructions::position_metas;
use super::utils::{
    get_account_indicators_address, get_authority_address, get_global_config_address,
    get_global_indicators_address, get_liquidity_mining_address, get_lp_vault_address,
    get_power_token_account_address, get_power_token_address, get_staked_token_vault_address,
    power_mining_program,
};

pub fn initialize_power_token_account_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::InitializePowerTokenAccount {
            owner: program.payer(),
            power_token_account: get_power_token_account_address(&program.id(), &program.payer()),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::InitializePowerTokenAccount {})
        .instructions()?;
    Ok(instructions)
}

pub fn stake_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::StakePowerToken {
            owner,
            global_config: get_global_config_address(&program_id),
            power_token: get_power_token_address(&program_id),
            power_token_account: get_power_token_account_address(&program_id, &owner),
            staked_token_mint: config.staked_token_mint,
            owner_staked_token: get_associated_token_address(&owner, &config.staked_token_mint),
            staked_token_vault: get_staked_token_vault_address(&program_id),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::Stake { amount })
        .instructions()?;
    Ok(instructions)
}

fn unstake_power_token_accounts(
    config: &ClientConfig,
    program_id: &Pubkey,
    owner: Pubkey,
) -> power_mining_accounts::UnstakePowerToken {
    power_mining_accounts::UnstakePowerToken {
        owner,
        global_config: get_global_config_address(program_id),
        authority: get_authority_address(program_id),
        power_token: get_power_token_address(program_id),
        power_token_account: get_power_token_account_address(program_id, &owner),
        staked_token_mint: config.staked_token_mint,
        owner_staked_token: get_associated_token_address(&owner, &config.staked_token_mint),
        staked_token_vault: get_staked_token_vault_address(program_id),
        token_program: spl_token::id(),
    }
}

pub fn unstake_instr(config: &ClientConfig, amount: u128) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(unstake_power_token_accounts(
            config,
            &program.id(),
            program.payer(),
        ))
        .args(power_mining_instructions::Unstake { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn redeem_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(unstake_power_token_accounts(
            config,
            &program.id(),
            program.payer(),
        ))
        .args(power_mining_instructions::Redeem {})
        .instructions()?;
    Ok(instructions)
}

/// Starts a cooldown for `amount`, or cancels the active one when `None`.
pub fn cooldown_instr(config: &ClientConfig, amount: Option<u128>) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();
    let accounts = power_mining_accounts::ChangeCooldown {
        owner,
        global_config: get_global_config_address(&program_id),
        power_token: get_power_token_address(&program_id),
        power_token_account: get_power_token_account_address(&program_id, &owner),
        staked_token_vault: get_staked_token_vault_address(&program_id),
    };

    let request = program.request().accounts(accounts);
    let instructions = match amount {
        Some(amount) => request
            .args(power_mining_instructions::Cooldown { amount })
            .instructions()?,
        None => request
            .args(power_mining_instructions::CancelCooldown {})
            .instructions()?,
    };
    Ok(instructions)
}

fn delegation_accounts(program_id: &Pubkey, owner: Pubkey) -> power_mining_accounts::Delegation {
    power_mining_accounts::Delegation {
        owner,
        global_config: get_global_config_address(program_id),
        power_token: get_power_token_address(program_id),
        liquidity_mining: get_liquidity_mining_address(program_id),
        power_token_account: get_power_token_account_address(program_id, &owner),
        staked_token_vault: get_staked_token_vault_address(program_id),
    }
}

pub fn delegate_instr(
    config: &ClientConfig,
    lp_mints: Vec<Pubkey>,
    pw_token_amounts: Vec<u128>,
    undelegate: bool,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let request = program
        .request()
        .accounts(delegation_accounts(&program_id, owner))
        .accounts(position_metas(&program_id, &owner, &lp_mints));
    let instructions = if undelegate {
        request
            .args(power_mining_instructions::UndelegateFromLiquidityMining {
                lp_mints,
                pw_token_amounts,
            })
            .instructions()?
    } else {
        request
            .args(power_mining_instructions::DelegateToLiquidityMining {
                lp_mints,
                pw_token_amounts,
            })
            .instructions()?
    };
    Ok(instructions)
}

pub fn delegate_and_stake_instr(
    config: &ClientConfig,
    lp_mints: Vec<Pubkey>,
    pw_token_amounts: Vec<u128>,
    lp_token_amounts: Vec<u64>,
) -> Result<Vec<Instruction>> {
    if lp_mints.len() != pw_token_amounts.len() || lp_mints.len() != lp_token_amounts.len() {
        return Err(format_err!("every lp mint needs one amount of each kind"));
    }
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();
    let entries: Vec<AccountMeta> = lp_mints
        .iter()
        .flat_map(|lp_mint| {
            [
                AccountMeta::new(get_global_indicators_address(&program_id, lp_mint), false),
                AccountMeta::new(
                    get_account_indicators_address(&program_id, lp_mint, &owner),
                    false,
                ),
                AccountMeta::new_readonly(*lp_mint, false),
                AccountMeta::new(get_associated_token_address(&owner, lp_mint), false),
                AccountMeta::new(get_lp_vault_address(&program_id, lp_mint), false),
            ]
        })
        .collect();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::DelegateAndStake {
            delegation: delegation_accounts(&program_id, owner),
            token_program: spl_token::id(),
        })
        .accounts(entries)
        .args(power_mining_instructions::DelegateAndStakeToLiquidityMining {
            lp_mints,
            pw_token_amounts,
            lp_token_amounts,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn calculate_exchange_rate_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ViewPowerToken {
            power_token: get_power_token_address(&program_id),
            staked_token_vault: get_staked_token_vault_address(&program_id),
        })
        .args(power_mining_instructions::CalculateExchangeRate {})
        .instructions()?;
    Ok(instructions)
}

pub fn power_token_balance_of_instr(
    config: &ClientConfig,
    owner: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ViewHolder {
            power_token: get_power_token_address(&program_id),
            staked_token_vault: get_staked_token_vault_address(&program_id),
            power_token_account: get_power_token_account_address(&program_id, &owner),
        })
        .args(power_mining_instructions::PowerTokenBalanceOf {})
        .instructions()?;
    Ok(instructions)
}
