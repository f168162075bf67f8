/// Instruction Account Resolver
///
/// Compiled instructions reference accounts by position in the message's account
/// key table. This resolves the selected slots to base58 public keys.
use solana_sdk::pubkey::Pubkey;

use crate::models::{AccountRole, AccountSelector, CompiledInstruction, ResolvedAccounts};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountResolveError {
    #[error("{role} slot {index} out of range, instruction has {available} accounts")]
    SlotOutOfRange { role: &'static str, index: usize, available: usize },

    #[error("{role} account index {key_index} out of range, message has {available} keys")]
    KeyOutOfRange { role: &'static str, key_index: usize, available: usize },

    #[error("no selector for {0}")]
    MissingRole(&'static str),
}

/// Look up the public key behind one instruction account slot
pub fn resolve_account(
    ix: &CompiledInstruction,
    account_keys: &[Pubkey],
    selector: &AccountSelector,
) -> Result<Pubkey, AccountResolveError> {
    let role = selector.role.as_str();
    let key_index = *ix.accounts.get(selector.index).ok_or(AccountResolveError::SlotOutOfRange {
        role,
        index: selector.index,
        available: ix.accounts.len(),
    })? as usize;

    account_keys.get(key_index).copied().ok_or(AccountResolveError::KeyOutOfRange {
        role,
        key_index,
        available: account_keys.len(),
    })
}

/// Resolve every selector; any failure rejects the whole instruction
pub fn resolve_accounts(
    ix: &CompiledInstruction,
    account_keys: &[Pubkey],
    selectors: &[AccountSelector],
) -> Result<ResolvedAccounts, AccountResolveError> {
    let mut mint = None;
    let mut bonding_curve = None;
    let mut associated_bonding_curve = None;
    let mut user = None;

    for selector in selectors {
        let key = resolve_account(ix, account_keys, selector)?.to_string();
        match selector.role {
            AccountRole::Mint => mint = Some(key),
            AccountRole::BondingCurve => bonding_curve = Some(key),
            AccountRole::AssociatedBondingCurve => associated_bonding_curve = Some(key),
            AccountRole::User => user = Some(key),
        }
    }

    Ok(ResolvedAccounts {
        mint: mint.ok_or(AccountResolveError::MissingRole("mint"))?,
        bonding_curve: bonding_curve.ok_or(AccountResolveError::MissingRole("bonding_curve"))?,
        associated_bonding_curve: associated_bonding_curve
            .ok_or(AccountResolveError::MissingRole("associated_bonding_curve"))?,
        user: user.ok_or(AccountResolveError::MissingRole("user"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CREATE_ACCOUNT_SELECTORS;

    fn keys(n: u8) -> Vec<Pubkey> {
        (0..n).map(|i| Pubkey::new_from_array([i; 32])).collect()
    }

    fn ix(accounts: Vec<u8>) -> CompiledInstruction {
        CompiledInstruction { program_id_index: 0, accounts, data: vec![] }
    }

    #[test]
    fn test_resolve_mint_slot() {
        let account_keys = keys(10);
        let selector = AccountSelector { role: AccountRole::Mint, index: 0 };

        let key = resolve_account(&ix(vec![5, 2, 9]), &account_keys, &selector).unwrap();
        assert_eq!(key, account_keys[5]);
        assert_eq!(key.to_string(), Pubkey::new_from_array([5; 32]).to_string());
    }

    #[test]
    fn test_resolve_create_accounts() {
        let account_keys = keys(16);
        let ix = ix(vec![10, 11, 12, 13, 14, 1, 2, 3]);

        let accounts = resolve_accounts(&ix, &account_keys, &CREATE_ACCOUNT_SELECTORS).unwrap();
        assert_eq!(accounts.mint, account_keys[10].to_string());
        assert_eq!(accounts.bonding_curve, account_keys[12].to_string());
        assert_eq!(accounts.associated_bonding_curve, account_keys[13].to_string());
        assert_eq!(accounts.user, account_keys[3].to_string());
    }

    #[test]
    fn test_slot_out_of_range() {
        let err = resolve_accounts(&ix(vec![0, 1, 2, 3]), &keys(4), &CREATE_ACCOUNT_SELECTORS).unwrap_err();
        assert_eq!(err, AccountResolveError::SlotOutOfRange { role: "user", index: 7, available: 4 });
    }

    #[test]
    fn test_key_out_of_range() {
        let err =
            resolve_accounts(&ix(vec![0, 1, 2, 3, 4, 5, 6, 40]), &keys(8), &CREATE_ACCOUNT_SELECTORS).unwrap_err();
        assert_eq!(err, AccountResolveError::KeyOutOfRange { role: "user", key_index: 40, available: 8 });
    }

    #[test]
    fn test_missing_role() {
        let selectors = [AccountSelector { role: AccountRole::Mint, index: 0 }];
        let err = resolve_accounts(&ix(vec![0]), &keys(1), &selectors).unwrap_err();
        assert_eq!(err, AccountResolveError::MissingRole("bonding_curve"));
    }
}
