use crate::constants::FIELD_ELEMENT_SIZE;
use crate::error::{RouteGuardError, RouteGuardResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use starknet_types_core::felt::Felt;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// Element of the STARK field.
///
/// Parsing is strict: text naming a value at or above the field prime is
/// rejected instead of reduced. Signed integers are encoded the way the
/// ledger encodes them, as `x mod P`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Zeroize)]
pub struct FieldElement(Felt);

impl FieldElement {
    pub const ZERO: FieldElement = FieldElement(Felt::ZERO);

    /// Fails unless `bytes` is already the canonical encoding of a field value.
    pub fn from_bytes_be(bytes: [u8; FIELD_ELEMENT_SIZE]) -> RouteGuardResult<Self> {
        let felt = Felt::from_bytes_be(&bytes);
        if felt.to_bytes_be() != bytes {
            return Err(RouteGuardError::InvalidInput(
                "value is not below the field modulus".into(),
            ));
        }
        Ok(Self(felt))
    }

    /// Reduces any 256-bit value modulo the field prime.
    pub fn from_bytes_be_reduced(bytes: [u8; FIELD_ELEMENT_SIZE]) -> Self {
        Self(Felt::from_bytes_be(&bytes))
    }

    pub fn to_bytes_be(self) -> [u8; FIELD_ELEMENT_SIZE] {
        self.0.to_bytes_be()
    }

    pub fn as_felt(&self) -> &Felt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Felt::ZERO
    }

    /// Parses `0x`-prefixed hex or plain decimal text.
    pub fn parse(s: &str) -> RouteGuardResult<Self> {
        if s.is_empty() {
            return Err(RouteGuardError::InvalidInput("empty field element".into()));
        }

        if let Some(hex_part) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Self::parse_hex(hex_part)
        } else {
            Self::parse_decimal(s)
        }
    }

    fn parse_hex(digits: &str) -> RouteGuardResult<Self> {
        if digits.is_empty() {
            return Err(RouteGuardError::InvalidInput("empty hex literal".into()));
        }

        let trimmed = digits.trim_start_matches('0').to_ascii_lowercase();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }

        let felt = Felt::from_hex(&trimmed)
            .map_err(|e| RouteGuardError::InvalidInput(format!("invalid hex: {}", e)))?;
        if felt.to_hex_string()[2..] != trimmed {
            return Err(RouteGuardError::InvalidInput(
                "hex literal is not below the field modulus".into(),
            ));
        }
        Ok(Self(felt))
    }

    fn parse_decimal(digits: &str) -> RouteGuardResult<Self> {
        if let Some(ch) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(RouteGuardError::InvalidInput(format!(
                "non-numeric character {:?}",
                ch
            )));
        }

        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }

        let felt = Felt::from_dec_str(trimmed)
            .map_err(|e| RouteGuardError::InvalidInput(format!("invalid decimal: {}", e)))?;
        if felt.to_string() != trimmed {
            return Err(RouteGuardError::InvalidInput(
                "decimal literal is not below the field modulus".into(),
            ));
        }
        Ok(Self(felt))
    }

    /// Minimal lowercase hex, e.g. `0x0` or `0x1a2b`.
    pub fn to_hex(&self) -> String {
        self.0.to_hex_string()
    }

    /// Zero-padded 64-digit hex.
    pub fn to_fixed_hex(&self) -> String {
        self.0.to_fixed_hex_string()
    }

    /// Additive inverse modulo the field prime.
    pub fn negate(&self) -> Self {
        Self(-self.0)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Felt::from(value))
    }

    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    pub fn to_u128(&self) -> Option<u128> {
        u128::try_from(self.0).ok()
    }

    /// Reads the element as a signed integer using the `x mod P` convention.
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(self.0).ok()
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Felt::from(value))
    }
}

impl From<u128> for FieldElement {
    fn from(value: u128) -> Self {
        Self(Felt::from(value))
    }
}

impl From<Felt> for FieldElement {
    fn from(felt: Felt) -> Self {
        Self(felt)
    }
}

impl From<FieldElement> for Felt {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl FromStr for FieldElement {
    type Err = RouteGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_decimal_agree() {
        let hex = FieldElement::parse("0xff").unwrap();
        let dec = FieldElement::parse("255").unwrap();
        assert_eq!(hex, dec);
        assert_eq!(hex, FieldElement::from(255u64));
        assert_eq!(FieldElement::parse("0X00ff").unwrap(), hex);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FieldElement::parse("").is_err());
        assert!(FieldElement::parse("0x").is_err());
        assert!(FieldElement::parse("0xzz").is_err());
        assert!(FieldElement::parse("12a").is_err());
        assert!(FieldElement::parse("-5").is_err());
        assert!(matches!(
            FieldElement::parse("abc"),
            Err(RouteGuardError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_modulus_is_rejected() {
        let p = "0x800000000000011000000000000000000000000000000000000000000000001";
        assert!(FieldElement::parse(p).is_err());
        assert!(FieldElement::parse(&format!("0x{}", "f".repeat(64))).is_err());
        assert!(FieldElement::parse(
            "3618502788666131213697322783095070105623107215331596699973092056135872020481"
        )
        .is_err());

        let p_minus_one = "0x800000000000011000000000000000000000000000000000000000000000000";
        assert!(FieldElement::parse(p_minus_one).is_ok());
    }

    #[test]
    fn test_bytes_must_be_canonical() {
        let mut p = [0u8; FIELD_ELEMENT_SIZE];
        p[0] = 0x08;
        p[7] = 0x11;
        p[31] = 0x01;
        assert!(FieldElement::from_bytes_be(p).is_err());
        assert_eq!(FieldElement::from_bytes_be_reduced(p), FieldElement::ZERO);

        let seven = FieldElement::from(7u64);
        assert_eq!(FieldElement::from_bytes_be(seven.to_bytes_be()).unwrap(), seven);
    }

    #[test]
    fn test_leading_zeros_accepted() {
        assert_eq!(FieldElement::parse("0x000").unwrap(), FieldElement::ZERO);
        assert_eq!(FieldElement::parse("000").unwrap(), FieldElement::ZERO);
        assert_eq!(FieldElement::parse("0042").unwrap(), FieldElement::from(42u64));
    }

    #[test]
    fn test_decimal_overflow() {
        let too_big = "1".repeat(80);
        assert!(FieldElement::parse(&too_big).is_err());
    }

    #[test]
    fn test_hex_rendering() {
        assert_eq!(FieldElement::ZERO.to_hex(), "0x0");
        assert_eq!(FieldElement::from(0x1a2bu64).to_hex(), "0x1a2b");
        assert_eq!(FieldElement::from(1u64).to_fixed_hex().len(), 66);
        assert_eq!(FieldElement::parse("0x0001a2b").unwrap().to_string(), "0x1a2b");
    }

    #[test]
    fn test_negate() {
        let one = FieldElement::from(1u64);
        let minus_one = one.negate();
        assert_eq!(
            minus_one.to_hex(),
            "0x800000000000011000000000000000000000000000000000000000000000000"
        );
        assert_eq!(minus_one.negate(), one);
        assert_eq!(FieldElement::ZERO.negate(), FieldElement::ZERO);
    }

    #[test]
    fn test_signed_roundtrip() {
        for v in [0i64, 1, -1, 1_943_260_000, -9_913_320_000, i64::MAX, i64::MIN] {
            assert_eq!(FieldElement::from_i64(v).to_i64(), Some(v));
        }
    }

    #[test]
    fn test_unsigned_accessors() {
        let big = FieldElement::from(u128::MAX);
        assert_eq!(big.to_u128(), Some(u128::MAX));
        assert_eq!(big.to_u64(), None);
        assert_eq!(FieldElement::from(42u64).to_u64(), Some(42));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let fe = FieldElement::from(0xabcu64);
        let json = serde_json::to_string(&fe).unwrap();
        assert_eq!(json, "\"0xabc\"");
        let back: FieldElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fe);
        assert!(serde_json::from_str::<FieldElement>("\"nope\"").is_err());
    }
}
