#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod hash;
pub mod passphrase;
pub mod commitment;
pub mod nullifier;

pub use hash::{bind_hash, bind_hash_many, domain_hash, selector};
pub use passphrase::{
    generate_default_passphrase, generate_passphrase, is_known_word, suggest_words, Passphrase,
    WORDLIST, WORDLIST_SIZE,
};
pub use commitment::{
    compute_commitment, derive_commitment, derive_salt, derive_secret, verify_ownership,
    CommitmentSecrets,
};
pub use nullifier::{derive_nullifier, verify_nullifier, ClaimBundle, ClaimContext};

pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
