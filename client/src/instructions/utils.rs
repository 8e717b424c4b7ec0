use anchor_client::{Client, Cluster, Program};
use anchor_lang::AccountDeserialize;
use anyhow::Result;
use power_mining::states::{
    ACCOUNT_INDICATORS_SEED, GLOBAL_CONFIG_SEED, GLOBAL_INDICATORS_SEED, LIQUIDITY_MINING_SEED,
    POWER_TOKEN_ACCOUNT_SEED, POWER_TOKEN_SEED,
};
use solana_sdk::{account::Account, pubkey::Pubkey, signature::Keypair};
use std::rc::Rc;

use super::super::{read_keypair_file, ClientConfig};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

/// Program handle whose payer is the keypair at `signer_path`.
pub fn power_mining_program(
    config: &ClientConfig,
    signer_path: &str,
) -> Result<Program<Rc<Keypair>>> {
    let signer = read_keypair_file(signer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(signer));
    Ok(client.program(config.power_mining_program)?)
}

pub fn get_authority_address(program_id: &Pubkey) -> Pubkey {
    let (authority, _bump) =
        Pubkey::find_program_address(&[power_mining::AUTH_SEED.as_bytes()], program_id);
    authority
}

pub fn get_global_config_address(program_id: &Pubkey) -> Pubkey {
    let (global_config, _bump) =
        Pubkey::find_program_address(&[GLOBAL_CONFIG_SEED.as_bytes()], program_id);
    global_config
}

pub fn get_power_token_address(program_id: &Pubkey) -> Pubkey {
    let (power_token, _bump) =
        Pubkey::find_program_address(&[POWER_TOKEN_SEED.as_bytes()], program_id);
    power_token
}

pub fn get_liquidity_mining_address(program_id: &Pubkey) -> Pubkey {
    let (liquidity_mining, _bump) =
        Pubkey::find_program_address(&[LIQUIDITY_MINING_SEED.as_bytes()], program_id);
    liquidity_mining
}

pub fn get_staked_token_vault_address(program_id: &Pubkey) -> Pubkey {
    let (vault, _bump) = Pubkey::find_program_address(
        &[power_mining::STAKED_TOKEN_VAULT_SEED.as_bytes()],
        program_id,
    );
    vault
}

pub fn get_reward_vault_address(program_id: &Pubkey) -> Pubkey {
    let (vault, _bump) =
        Pubkey::find_program_address(&[power_mining::REWARD_VAULT_SEED.as_bytes()], program_id);
    vault
}

pub fn get_lp_vault_address(program_id: &Pubkey, lp_mint: &Pubkey) -> Pubkey {
    let (vault, _bump) = Pubkey::find_program_address(
        &[power_mining::LP_VAULT_SEED.as_bytes(), lp_mint.as_ref()],
        program_id,
    );
    vault
}

pub fn get_global_indicators_address(program_id: &Pubkey, lp_mint: &Pubkey) -> Pubkey {
    let (global_indicators, _bump) = Pubkey::find_program_address(
        &[GLOBAL_INDICATORS_SEED.as_bytes(), lp_mint.as_ref()],
        program_id,
    );
    global_indicators
}

pub fn get_account_indicators_address(
    program_id: &Pubkey,
    lp_mint: &Pubkey,
    owner: &Pubkey,
) -> Pubkey {
    let (account_indicators, _bump) = Pubkey::find_program_address(
        &[
            ACCOUNT_INDICATORS_SEED.as_bytes(),
            lp_mint.as_ref(),
            owner.as_ref(),
        ],
        program_id,
    );
    account_indicators
}

pub fn get_power_token_account_address(program_id: &Pubkey, owner: &Pubkey) -> Pubkey {
    let (power_token_account, _bump) = Pubkey::find_program_address(
        &[POWER_TOKEN_ACCOUNT_SEED.as_bytes(), owner.as_ref()],
        program_id,
    );
    power_token_account
}
