use anchor_lang::AnchorDeserialize;
use anyhow::{format_err, Result};
use base64::Engine;
use solana_client::{
    rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig},
};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        RpcSendTransactionConfig {
            skip_preflight: true,
            ..RpcSendTransactionConfig::default()
        },
    )?)
}

/// Simulates a view instruction and decodes the value it returned.
pub fn simulate_view<T: AnchorDeserialize>(client: &RpcClient, txn: &Transaction) -> Result<T> {
    let result = client
        .simulate_transaction_with_config(
            txn,
            RpcSimulateTransactionConfig {
                sig_verify: false,
                replace_recent_blockhash: true,
                ..RpcSimulateTransactionConfig::default()
            },
        )?
        .value;
    if let Some(err) = result.err {
        return Err(format_err!("simulation failed: {:?} {:?}", err, result.logs));
    }
    let return_data = result
        .return_data
        .ok_or_else(|| format_err!("view returned no data"))?;
    let bytes = base64::engine::general_purpose::STANDARD.decode(return_data.data.0)?;
    Ok(T::try_from_slice(&bytes)?)
}

pub fn get_account(client: &RpcClient, addr: &Pubkey) -> Result<Option<Account>> {
    Ok(client
        .get_account_with_commitment(addr, CommitmentConfig::confirmed())?
        .value)
}
