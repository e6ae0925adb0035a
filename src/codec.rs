use hex::FromHexError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("Address must start with {expected:?}")]
    MissingPrefix { expected: String },
    #[error("Address payload is not valid hex: {0}")]
    InvalidHex(#[from] FromHexError),
}

/// Converts between the textual address form callers use and raw
/// account bytes. Length checks are left to [`crate::account::AccountId`].
pub trait AddressCodec {
    fn string_to_bytes(&self, address: &str) -> Result<Vec<u8>, CodecError>;

    fn bytes_to_string(&self, bytes: &[u8]) -> String;
}

/// `<prefix><lowercase hex>`, e.g. `leo0a0a...0a`.
#[derive(Debug, Clone)]
pub struct HexAddressCodec {
    prefix: String,
}

impl HexAddressCodec {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl AddressCodec for HexAddressCodec {
    fn string_to_bytes(&self, address: &str) -> Result<Vec<u8>, CodecError> {
        let Some(payload) = address.strip_prefix(self.prefix.as_str()) else {
            return Err(CodecError::MissingPrefix {
                expected: self.prefix.clone(),
            });
        };
        Ok(hex::decode(payload)?)
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> String {
        format!("{}{}", self.prefix, hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_addresses() {
        let codec = HexAddressCodec::new("leo");
        let address = codec.bytes_to_string(&[0xab, 0x01]);
        assert_eq!(address, "leoab01");
        assert_eq!(codec.string_to_bytes(&address).unwrap(), vec![0xab, 0x01]);
        // uppercase hex is accepted on input
        assert_eq!(codec.string_to_bytes("leoAB01").unwrap(), vec![0xab, 0x01]);

        let err = codec.string_to_bytes("cosmosab01").unwrap_err();
        assert_eq!(
            err,
            CodecError::MissingPrefix {
                expected: "leo".to_string()
            }
        );
        assert!(matches!(
            codec.string_to_bytes("leozz"),
            Err(CodecError::InvalidHex(_))
        ));
        assert!(matches!(
            codec.string_to_bytes("leoabc"),
            Err(CodecError::InvalidHex(FromHexError::OddLength))
        ));
    }
}
