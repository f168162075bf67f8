/// Data Models Module
///
/// This module defines the core data structures used throughout the application.
/// These models represent the validated transaction shape handed over by the
/// ingress layer and the records produced for every detected mint.
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// A single program call inside a transaction message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u32,
    /// Positions into the owning message's account key table
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// Transaction message with every account key already validated to 32 bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub account_keys: Vec<Pubkey>,
    pub instructions: Vec<CompiledInstruction>,
}

/// A transaction update as seen by the core, independent of the wire format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub signature: String,
    pub slot: u64,
    pub message: Message,
}

/// Arguments of the pump.fun `create` instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCreateArgs {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub image: String,
    pub creator: String,
}

/// Named accounts picked out of the `create` instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAccounts {
    pub mint: String,
    pub bonding_curve: String,
    pub associated_bonding_curve: String,
    pub user: String,
}

/// Record emitted once per transaction that creates a new mint
///
/// Serializes flat: `signature, slot, mint, bonding_curve, associated_bonding_curve,
/// user, name, symbol, uri, image, creator`. The argument fields are absent when
/// the instruction payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintEventRecord {
    pub signature: String,
    pub slot: String,
    #[serde(flatten)]
    pub accounts: ResolvedAccounts,
    #[serde(flatten)]
    pub args: Option<DecodedCreateArgs>,
}

/// Semantic role of an account slot in the `create` instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRole {
    Mint,
    BondingCurve,
    AssociatedBondingCurve,
    User,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::BondingCurve => "bonding_curve",
            Self::AssociatedBondingCurve => "associated_bonding_curve",
            Self::User => "user",
        }
    }
}

/// Maps an instruction account slot to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSelector {
    pub role: AccountRole,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_accounts() -> ResolvedAccounts {
        ResolvedAccounts {
            mint: "mint111".to_string(),
            bonding_curve: "curve111".to_string(),
            associated_bonding_curve: "assoc111".to_string(),
            user: "user111".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = MintEventRecord {
            signature: "sig".to_string(),
            slot: "42".to_string(),
            accounts: sample_accounts(),
            args: Some(DecodedCreateArgs {
                name: "pump".to_string(),
                symbol: "P".to_string(),
                uri: "https://ipfs.io/ipfs/Qm".to_string(),
                image: "https://img".to_string(),
                creator: "creator111".to_string(),
            }),
        };

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 11);
        assert_eq!(obj["slot"], "42");
        assert_eq!(obj["mint"], "mint111");
        assert_eq!(obj["name"], "pump");
        assert_eq!(obj["creator"], "creator111");
    }

    #[test]
    fn test_record_without_args_omits_arg_fields() {
        let record =
            MintEventRecord { signature: "sig".to_string(), slot: "1".to_string(), accounts: sample_accounts(), args: None };

        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert!(obj.get("name").is_none());
        assert_eq!(obj["user"], "user111");
    }

    #[test]
    fn test_account_role_names() {
        assert_eq!(AccountRole::Mint.as_str(), "mint");
        assert_eq!(AccountRole::AssociatedBondingCurve.as_str(), "associated_bonding_curve");
    }
}
