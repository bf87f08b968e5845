use crate::commitment::{derive_commitment, CommitmentSecrets};
use crate::hash::bind_hash;
use crate::passphrase::Passphrase;
use routeguard_types::{FieldElement, RouteGuardError, RouteGuardResult};
use serde::Serialize;
use std::fmt;

/// Identifies the claim being redeemed. Today that is the report id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimContext(FieldElement);

impl ClaimContext {
    pub fn for_report(report_id: u64) -> Self {
        Self(FieldElement::from(report_id))
    }

    pub fn from_field(value: FieldElement) -> Self {
        Self(value)
    }

    pub fn as_field(&self) -> &FieldElement {
        &self.0
    }
}

/// `nullifier = Pedersen(secret, context)`.
pub fn derive_nullifier(secret: &FieldElement, context: &ClaimContext) -> FieldElement {
    bind_hash(secret, context.as_field())
}

pub fn verify_nullifier(
    secret: &FieldElement,
    context: &ClaimContext,
    nullifier: &FieldElement,
) -> bool {
    let expected = derive_nullifier(secret, context);
    crate::constant_time_eq(&expected.to_bytes_be(), &nullifier.to_bytes_be())
}

/// Arguments for the ledger's `claim_rewards`, rebuilt from a passphrase.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBundle {
    pub report_id: u64,
    pub secret: FieldElement,
    pub salt: FieldElement,
    pub commitment: FieldElement,
    pub nullifier: FieldElement,
    pub recipient: FieldElement,
}

impl ClaimBundle {
    pub fn prepare(
        passphrase: &Passphrase,
        report_id: u64,
        recipient: FieldElement,
    ) -> RouteGuardResult<Self> {
        if recipient.is_zero() {
            return Err(RouteGuardError::InvalidArgument(
                "recipient address must be non-zero".into(),
            ));
        }

        let derived: CommitmentSecrets = derive_commitment(passphrase);
        let nullifier = derive_nullifier(&derived.secret, &ClaimContext::for_report(report_id));

        Ok(Self {
            report_id,
            secret: derived.secret,
            salt: derived.salt,
            commitment: derived.commitment,
            nullifier,
            recipient,
        })
    }
}

impl fmt::Debug for ClaimBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimBundle")
            .field("report_id", &self.report_id)
            .field("commitment", &self.commitment)
            .field("nullifier", &self.nullifier)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}
