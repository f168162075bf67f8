/// Parsers Module
///
/// Instruction-level parsing for the pump.fun program: discriminator matching,
/// account slot resolution and `create` argument decoding.
pub mod accounts;
pub mod create;
pub mod discriminator;

// Re-export commonly used parsers
pub use accounts::{resolve_accounts, AccountResolveError};
pub use create::decode_create_instruction_args;
pub use discriminator::DiscriminatorMatcher;
