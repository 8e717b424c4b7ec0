use anyhow::{format_err, Result};
use clap::Parser;
use configparser::ini::Ini;
use power_mining::states::{AccountIndicators, GlobalIndicators, PowerTokenAccount};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

mod instructions;
use instructions::config_instructions::*;
use instructions::mining_instructions::*;
use instructions::power_token_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    power_mining_program: Pubkey,
    staked_token_mint: Pubkey,
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config.load(client_config).map_err(|err| format_err!(err))?;
    let get = |key: &str| -> Result<String> {
        config
            .get("Global", key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format_err!("{} must not be empty", key))
    };

    Ok(ClientConfig {
        http_url: get("http_url")?,
        ws_url: get("ws_url")?,
        payer_path: get("payer_path")?,
        admin_path: get("admin_path")?,
        power_mining_program: Pubkey::from_str(&get("power_mining_program")?)?,
        staked_token_mint: Pubkey::from_str(&get("staked_token_mint")?)?,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

fn send_instructions(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
) -> Result<()> {
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn =
        Transaction::new_signed_with_payer(instructions, Some(&payer.pubkey()), signers, recent_hash);
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn view_transaction(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &Keypair,
) -> Result<Transaction> {
    let recent_hash = rpc_client.get_latest_blockhash()?;
    Ok(Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        &[payer],
        recent_hash,
    ))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: PowerMiningCommands,
}

#[derive(Debug, Parser)]
pub enum PowerMiningCommands {
    InitialiseConfigs {
        #[arg(long)]
        admin: Pubkey,
        #[arg(long)]
        pause_manager: Pubkey,
    },
    TransferOwnership {
        #[arg(long)]
        appointed_admin: Pubkey,
    },
    ConfirmTransferOwnership {},
    SetPauseManager {
        #[arg(long)]
        pause_manager: Pubkey,
    },
    Pause {},
    Unpause {},
    SetUnstakeWithoutCooldownFee {
        #[arg(long)]
        fee: u128,
    },
    SetLiquidityMining {
        #[arg(long)]
        liquidity_mining: Pubkey,
    },
    SetPowerToken {
        #[arg(long)]
        power_token: Pubkey,
    },
    AddLpToken {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    RemoveLpToken {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    SetRewardsPerBlock {
        #[arg(long)]
        lp_mint: Pubkey,
        #[arg(long)]
        rewards_per_block: u64,
    },
    OpenPosition {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    StakeLp {
        #[arg(long)]
        lp_mint: Pubkey,
        #[arg(long)]
        amount: u64,
    },
    UnstakeLp {
        #[arg(long)]
        lp_mint: Pubkey,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        allocate: bool,
    },
    Claim {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    ClaimAllocated {},
    UpdateIndicators {
        #[arg(long)]
        account: Pubkey,
        #[arg(long, num_args = 1..)]
        lp_mints: Vec<Pubkey>,
    },
    OpenPowerTokenAccount {},
    Stake {
        #[arg(long)]
        amount: u64,
    },
    Unstake {
        #[arg(long)]
        amount: u128,
    },
    Cooldown {
        #[arg(long)]
        amount: u128,
    },
    CancelCooldown {},
    Redeem {},
    Delegate {
        #[arg(long, num_args = 1..)]
        lp_mints: Vec<Pubkey>,
        #[arg(long, num_args = 1..)]
        amounts: Vec<u128>,
    },
    Undelegate {
        #[arg(long, num_args = 1..)]
        lp_mints: Vec<Pubkey>,
        #[arg(long, num_args = 1..)]
        amounts: Vec<u128>,
    },
    DelegateAndStake {
        #[arg(long, num_args = 1..)]
        lp_mints: Vec<Pubkey>,
        #[arg(long, num_args = 1..)]
        pw_token_amounts: Vec<u128>,
        #[arg(long, num_args = 1..)]
        lp_token_amounts: Vec<u64>,
    },
    ShowPool {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    ShowPosition {
        #[arg(long)]
        lp_mint: Pubkey,
        #[arg(long)]
        owner: Pubkey,
    },
    ShowHolder {
        #[arg(long)]
        owner: Pubkey,
    },
    AccountRewards {
        #[arg(long)]
        lp_mint: Pubkey,
        #[arg(long)]
        owner: Pubkey,
    },
    AccruedRewards {
        #[arg(long, num_args = 1..)]
        lp_mints: Vec<Pubkey>,
    },
    IsLpTokenSupported {
        #[arg(long)]
        lp_mint: Pubkey,
    },
    ExchangeRate {},
    BalanceOf {
        #[arg(long)]
        owner: Pubkey,
    },
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let config = load_cfg(client_config)?;
    let payer = read_keypair_file(&config.payer_path)?;
    let admin = read_keypair_file(&config.admin_path)?;
    let rpc_client = RpcClient::new(config.http_url.to_string());
    let program_id = config.power_mining_program;

    let opts = Opts::parse();
    match opts.command {
        PowerMiningCommands::InitialiseConfigs {
            admin: new_admin,
            pause_manager,
        } => {
            let ixs = initialise_configs_instr(&config, new_admin, pause_manager)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::TransferOwnership { appointed_admin } => {
            let ixs = transfer_ownership_instr(&config, appointed_admin)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::ConfirmTransferOwnership {} => {
            let ixs = confirm_transfer_ownership_instr(&config)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::SetPauseManager { pause_manager } => {
            let ixs = set_pause_manager_instr(&config, pause_manager)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::Pause {} => {
            let ixs = set_paused_instr(&config, true)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Unpause {} => {
            let ixs = set_paused_instr(&config, false)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::SetUnstakeWithoutCooldownFee { fee } => {
            let ixs = set_unstake_without_cooldown_fee_instr(&config, fee)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::SetLiquidityMining { liquidity_mining } => {
            let ixs = set_liquidity_mining_instr(&config, liquidity_mining)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::SetPowerToken { power_token } => {
            let ixs = set_power_token_instr(&config, power_token)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::AddLpToken { lp_mint } => {
            let ixs = add_lp_token_instr(&config, lp_mint)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::RemoveLpToken { lp_mint } => {
            let ixs = remove_lp_token_instr(&config, lp_mint)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::SetRewardsPerBlock {
            lp_mint,
            rewards_per_block,
        } => {
            let ixs = set_rewards_per_block_instr(&config, lp_mint, rewards_per_block)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer, &admin])?;
        }
        PowerMiningCommands::OpenPosition { lp_mint } => {
            let ixs = initialize_account_indicators_instr(&config, lp_mint)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::StakeLp { lp_mint, amount } => {
            let ixs = stake_lp_tokens_instr(&config, lp_mint, amount)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::UnstakeLp {
            lp_mint,
            amount,
            allocate,
        } => {
            let ixs = unstake_lp_tokens_instr(&config, lp_mint, amount, allocate)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Claim { lp_mint } => {
            let ixs = claim_instr(&config, lp_mint)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::ClaimAllocated {} => {
            let ixs = claim_allocated_pw_tokens_instr(&config)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::UpdateIndicators { account, lp_mints } => {
            let ixs = update_indicators_instr(&config, account, lp_mints)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::OpenPowerTokenAccount {} => {
            let ixs = initialize_power_token_account_instr(&config)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Stake { amount } => {
            let ixs = stake_instr(&config, amount)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Unstake { amount } => {
            let ixs = unstake_instr(&config, amount)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Cooldown { amount } => {
            let ixs = cooldown_instr(&config, Some(amount))?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::CancelCooldown {} => {
            let ixs = cooldown_instr(&config, None)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Redeem {} => {
            let ixs = redeem_instr(&config)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Delegate { lp_mints, amounts } => {
            let ixs = delegate_instr(&config, lp_mints, amounts, false)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::Undelegate { lp_mints, amounts } => {
            let ixs = delegate_instr(&config, lp_mints, amounts, true)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::DelegateAndStake {
            lp_mints,
            pw_token_amounts,
            lp_token_amounts,
        } => {
            let ixs =
                delegate_and_stake_instr(&config, lp_mints, pw_token_amounts, lp_token_amounts)?;
            send_instructions(&rpc_client, &ixs, &payer, &[&payer])?;
        }
        PowerMiningCommands::ShowPool { lp_mint } => {
            let address = get_global_indicators_address(&program_id, &lp_mint);
            let account = get_account(&rpc_client, &address)?
                .ok_or_else(|| format_err!("pool {} not found", lp_mint))?;
            let global_indicators = deserialize_anchor_account::<GlobalIndicators>(&account)?;
            println!("{:#?}", global_indicators);
        }
        PowerMiningCommands::ShowPosition { lp_mint, owner } => {
            let address = get_account_indicators_address(&program_id, &lp_mint, &owner);
            let account = get_account(&rpc_client, &address)?
                .ok_or_else(|| format_err!("no position of {} in {}", owner, lp_mint))?;
            let account_indicators = deserialize_anchor_account::<AccountIndicators>(&account)?;
            println!("{:#?}", account_indicators);
        }
        PowerMiningCommands::ShowHolder { owner } => {
            let address = get_power_token_account_address(&program_id, &owner);
            let account = get_account(&rpc_client, &address)?
                .ok_or_else(|| format_err!("{} holds no Power Token", owner))?;
            let power_token_account = deserialize_anchor_account::<PowerTokenAccount>(&account)?;
            println!("{:#?}", power_token_account);
        }
        PowerMiningCommands::AccountRewards { lp_mint, owner } => {
            let ixs = calculate_account_rewards_instr(&config, lp_mint, owner)?;
            let txn = view_transaction(&rpc_client, &ixs, &payer)?;
            println!("{}", simulate_view::<u128>(&rpc_client, &txn)?);
        }
        PowerMiningCommands::AccruedRewards { lp_mints } => {
            let ixs = calculate_accrued_rewards_instr(&config, &lp_mints)?;
            let txn = view_transaction(&rpc_client, &ixs, &payer)?;
            println!("{}", simulate_view::<u128>(&rpc_client, &txn)?);
        }
        PowerMiningCommands::IsLpTokenSupported { lp_mint } => {
            let ixs = is_lp_token_supported_instr(&config, lp_mint)?;
            let txn = view_transaction(&rpc_client, &ixs, &payer)?;
            println!("{}", simulate_view::<bool>(&rpc_client, &txn)?);
        }
        PowerMiningCommands::ExchangeRate {} => {
            let ixs = calculate_exchange_rate_instr(&config)?;
            let txn = view_transaction(&rpc_client, &ixs, &payer)?;
            println!("{}", simulate_view::<u128>(&rpc_client, &txn)?);
        }
        PowerMiningCommands::BalanceOf { owner } => {
            let ixs = power_token_balance_of_instr(&config, owner)?;
            let txn = view_transaction(&rpc_client, &ixs, &payer)?;
            println!("{}", simulate_view::<u128>(&rpc_client, &txn)?);
        }
    }
    Ok(())
}
