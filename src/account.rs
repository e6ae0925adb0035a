use std::{borrow::Borrow, fmt};

use rust_decimal::Decimal;

use crate::ledger::{AmountViolation, LedgerAction, LedgerError};

/// Width of every account identifier, in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;

/// Opaque fixed-width account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for AccountId {
    type Error = LedgerError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; ACCOUNT_ID_LEN]>::try_from(bytes).map_err(|_| {
            LedgerError::InvalidAccount {
                expected: ACCOUNT_ID_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

/// Currency unit name. Case-sensitive, never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub fn parse(denom: &str) -> Result<Self, LedgerError> {
        if denom.is_empty() {
            return Err(LedgerError::InvalidDenomination {
                denom: denom.to_owned(),
            });
        }
        Ok(Self(denom.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Denom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Decimal,
}

impl Coin {
    pub fn parse(denom: &str, amount: Decimal, action: LedgerAction) -> Result<Self, LedgerError> {
        let denom = Denom::parse(denom)?;
        let amount = validate_amount(amount, action)?;
        Ok(Self { denom, amount })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Accepts non-negative integers only; the result is normalized so that
/// `5.0` and `5` are stored and printed identically.
pub fn validate_amount(amount: Decimal, action: LedgerAction) -> Result<Decimal, LedgerError> {
    let violation = if amount.is_sign_negative() && !amount.is_zero() {
        Some(AmountViolation::Negative)
    } else if !amount.fract().is_zero() {
        Some(AmountViolation::Fractional)
    } else {
        None
    };
    match violation {
        Some(reason) => Err(LedgerError::InvalidAmount {
            action,
            amount,
            reason,
        }),
        None => Ok(amount.abs().normalize()),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn account_id_from_slice() {
        let id = AccountId::try_from([7u8; ACCOUNT_ID_LEN].as_slice()).unwrap();
        assert_eq!(id, AccountId::new([7; ACCOUNT_ID_LEN]));
        assert_eq!(id.to_string(), "07".repeat(ACCOUNT_ID_LEN));

        let err = AccountId::try_from([1u8; 4].as_slice()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidAccount {
                expected: ACCOUNT_ID_LEN,
                actual: 4
            }
        );
    }

    #[test]
    fn denom_must_not_be_empty() {
        assert_eq!(Denom::parse("leo").unwrap().as_str(), "leo");
        // denominations are case-sensitive
        assert_ne!(Denom::parse("LEO").unwrap(), Denom::parse("leo").unwrap());
        assert!(matches!(
            Denom::parse(""),
            Err(LedgerError::InvalidDenomination { .. })
        ));
    }

    #[test]
    fn amount_validation() {
        let amount = validate_amount(Decimal::new(50, 1), LedgerAction::Mint).unwrap();
        assert_eq!(amount.to_string(), "5");

        let err = validate_amount(Decimal::from_i32(-3).unwrap(), LedgerAction::Mint).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount {
                reason: AmountViolation::Negative,
                ..
            }
        ));

        let err = validate_amount(Decimal::new(55, 1), LedgerAction::Transfer).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidAmount {
                action: LedgerAction::Transfer,
                reason: AmountViolation::Fractional,
                ..
            }
        ));

        // negative zero is still zero
        let zero = validate_amount(-Decimal::ZERO, LedgerAction::Mint).unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_sign_negative());
    }

    #[test]
    fn coin_display() {
        let coin = Coin::parse("leo", Decimal::from_u32(100).unwrap(), LedgerAction::Mint).unwrap();
        assert_eq!(coin.to_string(), "100leo");
    }
}
