use anchor_lang::prelude::AccountMeta;
use anyhow::Result;
use power_mining::accounts as power_mining_accounts;
use power_mining::instruction as power_mining_instructions;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};
use spl_associated_token_account::get_associated_token_address;

use super::super::ClientConfig;
use super::utils::{
    get_account_indicators_address, get_authority_address, get_global_config_address,
    get_global_indicators_address, get_liquidity_mining_address, get_lp_vault_address,
    get_power_token_account_address, get_power_token_address, get_reward_vault_address,
    get_staked_token_vault_address, power_mining_program,
};

/// `[global_indicators, account_indicators]` of `owner` for every pool.
pub fn position_metas(program_id: &Pubkey, owner: &Pubkey, lp_mints: &[Pubkey]) -> Vec<AccountMeta> {
    lp_mints
        .iter()
        .flat_map(|lp_mint| {
            [
                AccountMeta::new(get_global_indicators_address(program_id, lp_mint), false),
                AccountMeta::new(
                    get_account_indicators_address(program_id, lp_mint, owner),
                    false,
                ),
            ]
        })
        .collect()
}

pub fn initialize_account_indicators_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::InitializeAccountIndicators {
            owner: program.payer(),
            global_indicators: get_global_indicators_address(&program_id, &lp_mint),
            account_indicators: get_account_indicators_address(
                &program_id,
                &lp_mint,
                &program.payer(),
            ),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::InitializeAccountIndicators {})
        .instructions()?;
    Ok(instructions)
}

pub fn stake_lp_tokens_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
    amount: u64,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::StakeLpTokens {
            owner,
            global_config: get_global_config_address(&program_id),
            global_indicators: get_global_indicators_address(&program_id, &lp_mint),
            account_indicators: get_account_indicators_address(&program_id, &lp_mint, &owner),
            lp_mint,
            owner_lp_token: get_associated_token_address(&owner, &lp_mint),
            lp_vault: get_lp_vault_address(&program_id, &lp_mint),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::StakeLpTokens { amount })
        .instructions()?;
    Ok(instructions)
}

fn unstake_lp_tokens_accounts(
    program_id: &Pubkey,
    owner: Pubkey,
    lp_mint: Pubkey,
) -> power_mining_accounts::UnstakeLpTokens {
    power_mining_accounts::UnstakeLpTokens {
        owner,
        global_config: get_global_config_address(program_id),
        authority: get_authority_address(program_id),
        global_indicators: get_global_indicators_address(program_id, &lp_mint),
        account_indicators: get_account_indicators_address(program_id, &lp_mint, &owner),
        lp_mint,
        owner_lp_token: get_associated_token_address(&owner, &lp_mint),
        lp_vault: get_lp_vault_address(program_id, &lp_mint),
        token_program: spl_token::id(),
    }
}

/// With `allocate`, pending rewards are parked in the allocated bucket
/// instead of being claimed later.
pub fn unstake_lp_tokens_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
    amount: u64,
    allocate: bool,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();
    let unstake = unstake_lp_tokens_accounts(&program_id, owner, lp_mint);

    let instructions = if allocate {
        program
            .request()
            .accounts(power_mining_accounts::UnstakeLpTokensAndAllocate {
                payer: owner,
                unstake,
                power_token_account: get_power_token_account_address(&program_id, &owner),
                system_program: system_program::id(),
            })
            .args(power_mining_instructions::UnstakeLpTokensAndAllocatePwTokens { amount })
            .instructions()?
    } else {
        program
            .request()
            .accounts(unstake)
            .args(power_mining_instructions::UnstakeLpTokens { amount })
            .instructions()?
    };
    Ok(instructions)
}

fn reward_settlement_accounts(
    config: &ClientConfig,
    program_id: &Pubkey,
    owner: Pubkey,
) -> power_mining_accounts::RewardSettlement {
    power_mining_accounts::RewardSettlement {
        owner,
        global_config: get_global_config_address(program_id),
        authority: get_authority_address(program_id),
        power_token: get_power_token_address(program_id),
        liquidity_mining: get_liquidity_mining_address(program_id),
        power_token_account: get_power_token_account_address(program_id, &owner),
        staked_token_mint: config.staked_token_mint,
        reward_vault: get_reward_vault_address(program_id),
        staked_token_vault: get_staked_token_vault_address(program_id),
        token_program: spl_token::id(),
        system_program: system_program::id(),
    }
}

pub fn claim_instr(config: &ClientConfig, lp_mint: Pubkey) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let owner = program.payer();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::Claim {
            settlement: reward_settlement_accounts(config, &program_id, owner),
            global_indicators: get_global_indicators_address(&program_id, &lp_mint),
            account_indicators: get_account_indicators_address(&program_id, &lp_mint, &owner),
        })
        .args(power_mining_instructions::Claim {})
        .instructions()?;
    Ok(instructions)
}

pub fn claim_allocated_pw_tokens_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(reward_settlement_accounts(
            config,
            &program_id,
            program.payer(),
        ))
        .args(power_mining_instructions::ClaimAllocatedPwTokens {})
        .instructions()?;
    Ok(instructions)
}

pub fn update_indicators_instr(
    config: &ClientConfig,
    account: Pubkey,
    lp_mints: Vec<Pubkey>,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdateIndicators {
            caller: program.payer(),
            global_config: get_global_config_address(&program_id),
        })
        .accounts(position_metas(&program_id, &account, &lp_mints))
        .args(power_mining_instructions::UpdateIndicators { account, lp_mints })
        .instructions()?;
    Ok(instructions)
}

pub fn calculate_account_rewards_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
    owner: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ViewPosition {
            global_indicators: get_global_indicators_address(&program_id, &lp_mint),
            account_indicators: get_account_indicators_address(&program_id, &lp_mint, &owner),
        })
        .args(power_mining_instructions::CalculateAccountRewards {})
        .instructions()?;
    Ok(instructions)
}

pub fn calculate_accrued_rewards_instr(
    config: &ClientConfig,
    lp_mints: &[Pubkey],
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let program_id = program.id();
    let pools: Vec<AccountMeta> = lp_mints
        .iter()
        .map(|lp_mint| {
            AccountMeta::new_readonly(get_global_indicators_address(&program_id, lp_mint), false)
        })
        .collect();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ViewAccruedRewards {
            liquidity_mining: get_liquidity_mining_address(&program_id),
        })
        .accounts(pools)
        .args(power_mining_instructions::CalculateAccruedRewards {})
        .instructions()?;
    Ok(instructions)
}

pub fn is_lp_token_supported_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ViewLpTokenSupport {
            global_indicators: get_global_indicators_address(&program.id(), &lp_mint),
        })
        .args(power_mining_instructions::IsLpTokenSupported { lp_mint })
        .instructions()?;
    Ok(instructions)
}
