/// Instruction Discriminator Matcher
///
/// Anchor programs prefix instruction data with an 8-byte tag identifying the
/// instruction variant. This matcher recognises the variants we care about.
use crate::models::CompiledInstruction;

pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct DiscriminatorMatcher {
    discriminators: Vec<[u8; DISCRIMINATOR_LEN]>,
}

impl DiscriminatorMatcher {
    pub fn new(discriminators: Vec<[u8; DISCRIMINATOR_LEN]>) -> Self {
        Self { discriminators }
    }

    /// True when the first 8 bytes of the instruction data equal a configured discriminator
    pub fn matches(&self, ix: &CompiledInstruction) -> bool {
        match ix.data.get(..DISCRIMINATOR_LEN) {
            Some(prefix) => self.discriminators.iter().any(|d| d.as_slice() == prefix),
            None => false,
        }
    }

    /// First instruction of the message that matches, in message order
    pub fn find_first<'a>(&self, instructions: &'a [CompiledInstruction]) -> Option<&'a CompiledInstruction> {
        instructions.iter().find(|ix| self.matches(ix))
    }
}
