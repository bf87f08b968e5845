use crate::hash::{bind_hash, domain_hash};
use crate::passphrase::Passphrase;
use routeguard_types::{FieldElement, SALT_SUFFIX};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Everything derived from a passphrase at report time.
///
/// `secret` and `salt` are what a later claim reveals to the ledger so it can
/// recompute `commitment`. They are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CommitmentSecrets {
    pub secret: FieldElement,
    pub salt: FieldElement,
    #[zeroize(skip)]
    pub commitment: FieldElement,
}

impl fmt::Debug for CommitmentSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentSecrets")
            .field("secret", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("commitment", &self.commitment)
            .finish()
    }
}

pub fn derive_secret(passphrase: &Passphrase) -> FieldElement {
    domain_hash(passphrase.as_bytes())
}

pub fn derive_salt(passphrase: &Passphrase) -> FieldElement {
    let mut salted = Vec::with_capacity(passphrase.as_bytes().len() + SALT_SUFFIX.len());
    salted.extend_from_slice(passphrase.as_bytes());
    salted.extend_from_slice(SALT_SUFFIX.as_bytes());
    let salt = domain_hash(&salted);
    salted.zeroize();
    salt
}

pub fn compute_commitment(secret: &FieldElement, salt: &FieldElement) -> FieldElement {
    bind_hash(secret, salt)
}

/// `secret = H(p)`, `salt = H(p || "_salt")`, `commitment = Pedersen(secret, salt)`.
pub fn derive_commitment(passphrase: &Passphrase) -> CommitmentSecrets {
    let secret = derive_secret(passphrase);
    let salt = derive_salt(passphrase);
    let commitment = compute_commitment(&secret, &salt);
    CommitmentSecrets {
        secret,
        salt,
        commitment,
    }
}

/// Recomputes the commitment from a re-entered passphrase and compares it
/// with a published one in constant time.
pub fn verify_ownership(passphrase: &Passphrase, published: &FieldElement) -> bool {
    let derived = derive_commitment(passphrase);
    crate::constant_time_eq(&derived.commitment.to_bytes_be(), &published.to_bytes_be())
}
