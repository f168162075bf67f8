/// Pump.fun `create` Instruction Parser
///
/// Decodes the Borsh-style argument layout of `create`:
/// `[8-byte discriminator][u32 len][name][u32 len][symbol][u32 len][uri][32-byte creator]`
/// with lengths little-endian. Every read is bounds checked, a short or corrupt
/// buffer is reported as a [`DecodeError`].
use solana_sdk::pubkey::Pubkey;

use super::discriminator::DISCRIMINATOR_LEN;
use crate::metadata::ImageResolver;
use crate::models::DecodedCreateArgs;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("need {needed} bytes at offset {offset}, only {remaining} remaining")]
    UnexpectedEof { offset: usize, needed: usize, remaining: usize },

    #[error("field `{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
}

/// Byte layout of `create` before the metadata lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgsLayout {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub creator: Pubkey,
}

struct ArgReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ArgReader<'a> {
    fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.data.len().saturating_sub(self.offset);
        if len > remaining {
            return Err(DecodeError::UnexpectedEof { offset: self.offset, needed: len, remaining });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u32_le()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    fn read_pubkey(&mut self) -> Result<Pubkey, DecodeError> {
        let bytes = self.take(32)?;
        let mut key = [0u8; 32];
        key.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(key))
    }
}

/// Parse the positional arguments of a `create` instruction
pub fn parse_create_layout(data: &[u8]) -> Result<CreateArgsLayout, DecodeError> {
    let mut reader = ArgReader::new(data, 0);
    reader.take(DISCRIMINATOR_LEN)?;

    let name = reader.read_string("name")?;
    let symbol = reader.read_string("symbol")?;
    let uri = reader.read_string("uri")?;
    let creator = reader.read_pubkey()?;

    Ok(CreateArgsLayout { name, symbol, uri, creator })
}

/// Decode `create` arguments and resolve the token image from its metadata URI
///
/// Returns `None` when the payload is malformed; the failure is logged and the
/// caller carries on with the next event.
pub async fn decode_create_instruction_args(data: &[u8], resolver: &ImageResolver) -> Option<DecodedCreateArgs> {
    let layout = match parse_create_layout(data) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!("Error decoding instruction args: {}", e);
            return None;
        }
    };

    let image = resolver.resolve(&layout.uri).await;

    Some(DecodedCreateArgs {
        name: layout.name,
        symbol: layout.symbol,
        uri: layout.uri,
        image,
        creator: layout.creator.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn encode_create_args(name: &str, symbol: &str, uri: &str, creator: [u8; 32]) -> Vec<u8> {
    let mut data = crate::config::PUMP_FUN_CREATE_IX_DISCRIMINATOR.to_vec();
    for field in [name, symbol, uri] {
        data.extend_from_slice(&(field.len() as u32).to_le_bytes());
        data.extend_from_slice(field.as_bytes());
    }
    data.extend_from_slice(&creator);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tests::StubFetcher;
    use crate::metadata::INVALID_URI;
    use std::sync::Arc;

    #[test]
    fn test_parse_create_layout() {
        let data = encode_create_args("Pepe Coin", "PEPE", "https://ipfs.io/ipfs/QmPepe", [7u8; 32]);

        let layout = parse_create_layout(&data).unwrap();
        assert_eq!(layout.name, "Pepe Coin");
        assert_eq!(layout.symbol, "PEPE");
        assert_eq!(layout.uri, "https://ipfs.io/ipfs/QmPepe");
        assert_eq!(layout.creator, Pubkey::new_from_array([7u8; 32]));
    }

    #[test]
    fn test_parse_ignores_trailing_bytes() {
        let mut data = encode_create_args("a", "b", "c", [1u8; 32]);
        data.extend_from_slice(&[0xff; 16]);

        assert_eq!(parse_create_layout(&data).unwrap().name, "a");
    }

    #[test]
    fn test_length_past_end_is_error() {
        let mut data = crate::config::PUMP_FUN_CREATE_IX_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&1000u32.to_le_bytes());
        data.extend_from_slice(b"short");

        let err = parse_create_layout(&data).unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedEof { offset: 12, needed: 1000, remaining: 5 });
    }

    #[test]
    fn test_huge_length_does_not_overflow() {
        let mut data = crate::config::PUMP_FUN_CREATE_IX_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&u32::MAX.to_le_bytes());

        assert!(matches!(parse_create_layout(&data), Err(DecodeError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_missing_creator_is_error() {
        let mut data = encode_create_args("a", "b", "c", [1u8; 32]);
        data.truncate(data.len() - 1);

        assert!(matches!(parse_create_layout(&data), Err(DecodeError::UnexpectedEof { needed: 32, .. })));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let mut data = crate::config::PUMP_FUN_CREATE_IX_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&[0xc3, 0x28]);

        assert_eq!(parse_create_layout(&data).unwrap_err(), DecodeError::InvalidUtf8 { field: "name" });
    }

    #[test]
    fn test_data_shorter_than_discriminator() {
        assert!(parse_create_layout(&[24, 30, 200]).is_err());
    }

    #[tokio::test]
    async fn test_decode_with_empty_uri() {
        let fetcher = Arc::new(StubFetcher::default());
        let resolver = ImageResolver::with_fetcher(fetcher.clone(), Default::default());
        let data = encode_create_args("pump", "P", "", [0u8; 32]);

        let args = decode_create_instruction_args(&data, &resolver).await.unwrap();
        assert_eq!(args.name, "pump");
        assert_eq!(args.symbol, "P");
        assert_eq!(args.uri, "");
        assert_eq!(args.image, INVALID_URI);
        assert_eq!(args.creator, "11111111111111111111111111111111");
        assert_eq!(fetcher.calls().len(), 0);
    }

    #[tokio::test]
    async fn test_decode_resolves_image() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .respond("https://dweb.link/ipfs/QmMeta", serde_json::json!({ "image": "ipfs://QmImage" })),
        );
        let resolver = ImageResolver::with_fetcher(fetcher, Default::default());
        let data = encode_create_args("Dog", "DOG", "https://ipfs.io/ipfs/QmMeta", [3u8; 32]);

        let args = decode_create_instruction_args(&data, &resolver).await.unwrap();
        assert_eq!(args.image, "https://cloudflare-ipfs.com/ipfs/QmImage");
        assert_eq!(args.creator, Pubkey::new_from_array([3u8; 32]).to_string());
    }

    #[tokio::test]
    async fn test_decode_failure_returns_none_without_fetching() {
        let fetcher = Arc::new(StubFetcher::default());
        let resolver = ImageResolver::with_fetcher(fetcher.clone(), Default::default());
        let mut data = encode_create_args("a", "b", "https://ipfs.io/ipfs/Qm", [1u8; 32]);
        data.truncate(data.len() - 10);

        assert!(decode_create_instruction_args(&data, &resolver).await.is_none());
        assert!(fetcher.calls().is_empty());
    }
}
