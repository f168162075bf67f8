/// Transform Module
///
/// Turns a transaction that invokes pump.fun `create` into a [`MintEventRecord`].
use crate::config::Config;
use crate::metadata::ImageResolver;
use crate::models::{AccountSelector, Message, MintEventRecord};

use super::parsers::{decode_create_instruction_args, resolve_accounts, AccountResolveError, DiscriminatorMatcher};

/// Builds mint records out of transaction messages
pub struct EventFormatter {
    matcher: DiscriminatorMatcher,
    selectors: Vec<AccountSelector>,
    resolver: ImageResolver,
}

impl EventFormatter {
    pub fn new(matcher: DiscriminatorMatcher, selectors: Vec<AccountSelector>, resolver: ImageResolver) -> Self {
        Self { matcher, selectors, resolver }
    }

    pub fn from_config(config: &Config, resolver: ImageResolver) -> Self {
        Self::new(DiscriminatorMatcher::new(config.discriminators.clone()), config.selectors.clone(), resolver)
    }

    /// Format the first matching instruction of a message
    ///
    /// `Ok(None)` when nothing in the message matches. Account resolution errors
    /// reject the event; undecodable arguments leave `args` empty.
    pub async fn format(
        &self,
        message: &Message,
        signature: &str,
        slot: &str,
    ) -> Result<Option<MintEventRecord>, AccountResolveError> {
        let Some(ix) = self.matcher.find_first(&message.instructions) else {
            return Ok(None);
        };

        let accounts = resolve_accounts(ix, &message.account_keys, &self.selectors)?;
        let args = decode_create_instruction_args(&ix.data, &self.resolver).await;

        Ok(Some(MintEventRecord { signature: signature.to_string(), slot: slot.to_string(), accounts, args }))
    }
}
