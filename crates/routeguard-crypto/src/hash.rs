use routeguard_types::FieldElement;
use sha3::{Digest, Keccak256};

/// Keeps the low 250 bits of the big-endian keccak digest.
const KECCAK_TOP_BYTE_MASK: u8 = 0b0000_0011;

/// Starknet keccak: keccak-256 truncated to 250 bits, so the result is always
/// a canonical field element.
pub fn domain_hash(data: &[u8]) -> FieldElement {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Keccak256::digest(data));
    digest[0] &= KECCAK_TOP_BYTE_MASK;
    FieldElement::from_bytes_be_reduced(digest)
}

/// Pedersen hash over the STARK curve, the ledger's native builtin.
pub fn bind_hash(a: &FieldElement, b: &FieldElement) -> FieldElement {
    starknet_crypto::pedersen_hash(a.as_felt(), b.as_felt()).into()
}

/// Pedersen chain over a slice, ending with the element count.
pub fn bind_hash_many(elements: &[FieldElement]) -> FieldElement {
    let acc = elements
        .iter()
        .fold(FieldElement::ZERO, |acc, e| bind_hash(&acc, e));
    bind_hash(&acc, &FieldElement::from(elements.len() as u64))
}

/// Contract entry point selector for a function name.
pub fn selector(name: &str) -> FieldElement {
    domain_hash(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(s: &str) -> FieldElement {
        FieldElement::parse(s).unwrap()
    }

    #[test]
    fn test_domain_hash_selector_vector() {
        assert_eq!(
            selector("transfer"),
            fe("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e")
        );
    }

    #[test]
    fn test_domain_hash_is_250_bits() {
        for input in [&b""[..], b"alpha", b"alpha-bravo-carbon-delta_salt"] {
            let h = domain_hash(input);
            assert!(h.to_bytes_be()[0] <= KECCAK_TOP_BYTE_MASK);
        }
    }

    #[test]
    fn test_domain_hash_deterministic() {
        assert_eq!(domain_hash(b"route"), domain_hash(b"route"));
        assert_ne!(domain_hash(b"route"), domain_hash(b"guard"));
    }

    #[test]
    fn test_bind_hash_vector() {
        let a = fe("0x03d937c035c878245caf64531a5756109c53068da139362728feb561405371cb");
        let b = fe("0x0208a0a10250e382e1e4bbe2880906c2791bf6275695e02fbbc6aeff9cd8b31a");
        assert_eq!(
            bind_hash(&a, &b),
            fe("0x030e480bed5fe53fa909cc0f8c4d99b8f9f2c016be4c41e13a4848797979c662")
        );
    }

    #[test]
    fn test_bind_hash_order_matters() {
        let a = FieldElement::from(1u64);
        let b = FieldElement::from(2u64);
        assert_ne!(bind_hash(&a, &b), bind_hash(&b, &a));
    }

    #[test]
    fn test_bind_hash_many_length_binding() {
        let one = [FieldElement::from(5u64)];
        let two = [FieldElement::from(5u64), FieldElement::ZERO];
        assert_ne!(bind_hash_many(&one), bind_hash_many(&two));
    }
}
