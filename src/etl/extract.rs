/// Extract Module
///
/// Validates Geyser stream updates into the transaction shape used by the rest
/// of the pipeline. Wire-level byte fields are checked once here.
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use yellowstone_grpc_proto::prelude::{
    subscribe_update::UpdateOneof, CompiledInstruction as GrpcCompiledInstruction, Message as GrpcMessage,
    SubscribeUpdate,
};

use crate::models::{CompiledInstruction, Message, TransactionUpdate};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("signature has {0} bytes, expected 64")]
    InvalidSignature(usize),

    #[error("account key {index} has {len} bytes, expected 32")]
    InvalidAccountKey { index: usize, len: usize },
}

/// Pull the transaction out of a stream update
///
/// Updates that are not transactions (pings, slots, ...) or that carry no
/// message yield `Ok(None)`.
pub fn transaction_from_update(update: SubscribeUpdate) -> Result<Option<TransactionUpdate>, ExtractError> {
    let Some(UpdateOneof::Transaction(tx_update)) = update.update_oneof else {
        return Ok(None);
    };
    let Some(info) = tx_update.transaction else {
        return Ok(None);
    };
    let Some(message) = info.transaction.and_then(|tx| tx.message) else {
        return Ok(None);
    };

    let signature = Signature::try_from(info.signature.as_slice())
        .map_err(|_| ExtractError::InvalidSignature(info.signature.len()))?
        .to_string();

    Ok(Some(TransactionUpdate { signature, slot: tx_update.slot, message: convert_message(message)? }))
}

fn convert_message(message: GrpcMessage) -> Result<Message, ExtractError> {
    let account_keys = message
        .account_keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            Pubkey::try_from(key.as_slice()).map_err(|_| ExtractError::InvalidAccountKey { index, len: key.len() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let instructions = message.instructions.into_iter().map(convert_instruction).collect();

    Ok(Message { account_keys, instructions })
}

fn convert_instruction(ix: GrpcCompiledInstruction) -> CompiledInstruction {
    CompiledInstruction { program_id_index: ix.program_id_index, accounts: ix.accounts, data: ix.data }
}
