use anyhow::Result;
use power_mining::accounts as power_mining_accounts;
use power_mining::instruction as power_mining_instructions;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};

use super::super::ClientConfig;
use super::utils::{
    get_authority_address, get_global_config_address, get_global_indicators_address,
    get_liquidity_mining_address, get_lp_vault_address, get_power_token_address,
    get_reward_vault_address, get_staked_token_vault_address, power_mining_program,
};

pub fn initialise_configs_instr(
    config: &ClientConfig,
    admin: Pubkey,
    pause_manager: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::InitialiseConfigs {
            owner: program.payer(),
            authority: get_authority_address(&program_id),
            global_config: get_global_config_address(&program_id),
            power_token: get_power_token_address(&program_id),
            liquidity_mining: get_liquidity_mining_address(&program_id),
            staked_token_mint: config.staked_token_mint,
            staked_token_vault: get_staked_token_vault_address(&program_id),
            reward_vault: get_reward_vault_address(&program_id),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::InitialiseConfigs {
            admin,
            pause_manager,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn transfer_ownership_instr(
    config: &ClientConfig,
    appointed_admin: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdateConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
        })
        .args(power_mining_instructions::TransferOwnership { appointed_admin })
        .instructions()?;
    Ok(instructions)
}

/// Signed by the appointed admin, which is the configured payer.
pub fn confirm_transfer_ownership_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::ConfirmTransferOwnership {
            appointed_admin: program.payer(),
            global_config: get_global_config_address(&program.id()),
        })
        .args(power_mining_instructions::ConfirmTransferOwnership {})
        .instructions()?;
    Ok(instructions)
}

pub fn set_pause_manager_instr(
    config: &ClientConfig,
    pause_manager: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdateConfig {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
        })
        .args(power_mining_instructions::SetPauseManager { pause_manager })
        .instructions()?;
    Ok(instructions)
}

/// Signed by the pause manager, which is the configured payer.
pub fn set_paused_instr(config: &ClientConfig, paused: bool) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.payer_path)?;
    let accounts = power_mining_accounts::SetPaused {
        pause_manager: program.payer(),
        global_config: get_global_config_address(&program.id()),
    };

    let request = program.request().accounts(accounts);
    let instructions = if paused {
        request.args(power_mining_instructions::Pause {}).instructions()?
    } else {
        request
            .args(power_mining_instructions::Unpause {})
            .instructions()?
    };
    Ok(instructions)
}

pub fn set_unstake_without_cooldown_fee_instr(
    config: &ClientConfig,
    fee: u128,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdatePowerToken {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            power_token: get_power_token_address(&program.id()),
        })
        .args(power_mining_instructions::SetUnstakeWithoutCooldownFee { fee })
        .instructions()?;
    Ok(instructions)
}

pub fn set_liquidity_mining_instr(
    config: &ClientConfig,
    liquidity_mining: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdatePowerToken {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            power_token: get_power_token_address(&program.id()),
        })
        .args(power_mining_instructions::SetLiquidityMining { liquidity_mining })
        .instructions()?;
    Ok(instructions)
}

pub fn set_power_token_instr(
    config: &ClientConfig,
    power_token: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(power_mining_accounts::UpdateLiquidityMining {
            owner: program.payer(),
            global_config: get_global_config_address(&program.id()),
            liquidity_mining: get_liquidity_mining_address(&program.id()),
        })
        .args(power_mining_instructions::SetPowerToken { power_token })
        .instructions()?;
    Ok(instructions)
}

pub fn add_lp_token_instr(config: &ClientConfig, lp_mint: Pubkey) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;
    let program_id = program.id();

    let instructions = program
        .request()
        .accounts(power_mining_accounts::AddLpToken {
            owner: program.payer(),
            global_config: get_global_config_address(&program_id),
            authority: get_authority_address(&program_id),
            liquidity_mining: get_liquidity_mining_address(&program_id),
            lp_mint,
            global_indicators: get_global_indicators_address(&program_id, &lp_mint),
            lp_vault: get_lp_vault_address(&program_id, &lp_mint),
            token_program: spl_token::id(),
            system_program: system_program::id(),
        })
        .args(power_mining_instructions::AddLpToken {})
        .instructions()?;
    Ok(instructions)
}

fn update_lp_token_accounts(
    program_id: &Pubkey,
    owner: Pubkey,
    lp_mint: &Pubkey,
) -> power_mining_accounts::UpdateLpToken {
    power_mining_accounts::UpdateLpToken {
        owner,
        global_config: get_global_config_address(program_id),
        liquidity_mining: get_liquidity_mining_address(program_id),
        global_indicators: get_global_indicators_address(program_id, lp_mint),
    }
}

pub fn remove_lp_token_instr(config: &ClientConfig, lp_mint: Pubkey) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(update_lp_token_accounts(
            &program.id(),
            program.payer(),
            &lp_mint,
        ))
        .args(power_mining_instructions::RemoveLpToken {})
        .instructions()?;
    Ok(instructions)
}

pub fn set_rewards_per_block_instr(
    config: &ClientConfig,
    lp_mint: Pubkey,
    rewards_per_block: u64,
) -> Result<Vec<Instruction>> {
    let program = power_mining_program(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(update_lp_token_accounts(
            &program.id(),
            program.payer(),
            &lp_mint,
        ))
        .args(power_mining_instructions::SetRewardsPerBlock { rewards_per_block })
        .instructions()?;
    Ok(instructions)
}
