use super::commands::OutputFormat;
use super::utils::emit;
use routeguard_crypto::{derive_commitment, generate_passphrase, ClaimBundle, ClaimContext, Passphrase};
use routeguard_crypto::derive_nullifier;
use routeguard_types::{FieldElement, RouteGuardResult};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PassphraseView<'a> {
    passphrase: &'a str,
    words: usize,
    entropy_bits: f64,
}

pub fn new_passphrase(words: usize, format: OutputFormat) -> RouteGuardResult<()> {
    let passphrase = generate_passphrase(words)?;
    let view = PassphraseView {
        passphrase: passphrase.as_str(),
        words: passphrase.word_count(),
        entropy_bits: passphrase.entropy_bits(),
    };

    emit(format, &view, |v| {
        println!("\x1b[38;5;51m{}\x1b[0m", v.passphrase);
        println!(
            "\x1b[38;5;245m{} words, ~{:.0} bits. Write it down: it is the only way to claim rewards.\x1b[0m",
            v.words, v.entropy_bits
        );
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitmentView {
    commitment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
}

pub fn show_commitment(passphrase: String, reveal: bool, format: OutputFormat) -> RouteGuardResult<()> {
    let passphrase = Passphrase::new(passphrase)?;
    let derived = derive_commitment(&passphrase);
    let view = CommitmentView {
        commitment: derived.commitment.to_hex(),
        secret: reveal.then(|| derived.secret.to_hex()),
        salt: reveal.then(|| derived.salt.to_hex()),
    };

    emit(format, &view, |v| {
        println!("Commitment: {}", v.commitment);
        if let (Some(secret), Some(salt)) = (&v.secret, &v.salt) {
            println!("Secret:     {}", secret);
            println!("Salt:       {}", salt);
        }
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NullifierView {
    report_id: u64,
    nullifier: String,
}

pub fn show_nullifier(
    passphrase: String,
    report_id: u64,
    recipient: Option<String>,
    format: OutputFormat,
) -> RouteGuardResult<()> {
    let passphrase = Passphrase::new(passphrase)?;

    match recipient {
        Some(recipient) => {
            let recipient = FieldElement::parse(&recipient)?;
            let bundle = ClaimBundle::prepare(&passphrase, report_id, recipient)?;
            // Always JSON: this is the claim request body.
            emit(OutputFormat::Json, &bundle, |_| {})
        }
        None => {
            let secret = derive_commitment(&passphrase).secret;
            let nullifier = derive_nullifier(&secret, &ClaimContext::for_report(report_id));
            let view = NullifierView {
                report_id,
                nullifier: nullifier.to_hex(),
            };
            emit(format, &view, |v| {
                println!("Report:    {}", v.report_id);
                println!("Nullifier: {}", v.nullifier);
            })
        }
    }
}
