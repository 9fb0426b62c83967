//! Sign and verify PDFs from the command line
//!
//! Usage:
//!   pdf_seal keygen <dir> --pin PIN [--bits N] [--dev]
//!   pdf_seal sign <input.pdf> <output.pdf> --key FILE [--pin PIN] [--name NAME]
//!                 [--reason R] [--location L] [--contact C] [--dev]
//!   pdf_seal verify <input.pdf> --key FILE [--json]
//!
//! `--dev` uses unprotected PEM private keys. Exit status is 0 on success or
//! a valid signature, 1 for an invalid signature and 2 for any error.
//! Set `RUST_LOG=debug` for diagnostics.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pdf_seal::keys::generate_key_pair;
use pdf_seal::{
    Error, KeyProtection, PdfDocument, PdfSigner, SealConfig, SignRequest, SignatureDescriptor,
    SignatureVerifier,
};

const USAGE: &str = "\
Usage:
  pdf_seal keygen <dir> --pin PIN [--bits N] [--dev]
  pdf_seal sign <input.pdf> <output.pdf> --key FILE [--pin PIN] [--name NAME]
                [--reason R] [--location L] [--contact C] [--dev]
  pdf_seal verify <input.pdf> --key FILE [--json]";

const DEFAULT_SIGNER_NAME: &str = "SIG TEST";

#[derive(Debug, Default)]
struct CliArgs {
    positional: Vec<String>,
    pin: Option<String>,
    key: Option<PathBuf>,
    bits: Option<usize>,
    name: Option<String>,
    reason: Option<String>,
    location: Option<String>,
    contact: Option<String>,
    dev: bool,
    json: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = Self::default();

        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let mut value = || {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| format!("{} needs a value", arg))
            };

            match arg {
                "--pin" => parsed.pin = Some(value()?),
                "--key" => parsed.key = Some(PathBuf::from(value()?)),
                "--bits" => {
                    let bits = value()?;
                    parsed.bits =
                        Some(bits.parse().map_err(|_| format!("invalid key size: {}", bits))?);
                },
                "--name" => parsed.name = Some(value()?),
                "--reason" => parsed.reason = Some(value()?),
                "--location" => parsed.location = Some(value()?),
                "--contact" => parsed.contact = Some(value()?),
                "--dev" => parsed.dev = true,
                "--json" => parsed.json = true,
                flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
                _ => parsed.positional.push(args[i].clone()),
            }
            i += 1;
        }

        Ok(parsed)
    }

    fn config(&self) -> SealConfig {
        let mut config = SealConfig::new();
        if let Some(bits) = self.bits {
            config = config.with_key_bits(bits);
        }
        if self.dev {
            config = config.with_key_protection(KeyProtection::Plaintext);
        }
        config
    }

    fn key_path(&self) -> Result<&Path, String> {
        self.key.as_deref().ok_or_else(|| "--key is required".to_string())
    }

    fn positional(&self, count: usize) -> Result<&[String], String> {
        if self.positional.len() != count {
            return Err(format!(
                "expected {} argument(s), got {}",
                count,
                self.positional.len()
            ));
        }
        Ok(&self.positional)
    }
}

/// Failure of a command: bad usage or a library error.
enum Failure {
    Usage(String),
    Seal(Error),
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Seal(e)
    }
}

impl From<String> for Failure {
    fn from(msg: String) -> Self {
        Failure::Usage(msg)
    }
}

fn keygen(args: &CliArgs) -> Result<bool, Failure> {
    let dir = PathBuf::from(&args.positional(1)?[0]);
    let config = args.config();

    let pair = generate_key_pair(config.key_bits)?;
    let exported = match config.key_protection {
        KeyProtection::Plaintext => pair.export_plaintext()?,
        KeyProtection::Encrypted => {
            let pin = args.pin.as_deref().ok_or(Error::EmptyPin)?;
            pair.export_protected(pin)?
        },
    };

    let (private_path, public_path) = exported.write_to_dir(&dir)?;
    println!("Private key: {}", private_path.display());
    println!("Public key:  {}", public_path.display());
    Ok(true)
}

fn sign(args: &CliArgs) -> Result<bool, Failure> {
    let paths = args.positional(2)?;
    let config = args.config();

    if !PdfDocument::probe(&paths[0]) {
        log::warn!("{} does not look like a loadable .pdf file", paths[0]);
    }

    let pin = args.pin.as_deref().unwrap_or_default();
    let key = config
        .key_loader()
        .load_private_key_file(args.key_path()?, pin)?;

    let mut descriptor =
        SignatureDescriptor::new(args.name.as_deref().unwrap_or(DEFAULT_SIGNER_NAME));
    if let Some(reason) = &args.reason {
        descriptor = descriptor.with_reason(reason);
    }
    if let Some(location) = &args.location {
        descriptor = descriptor.with_location(location);
    }
    if let Some(contact) = &args.contact {
        descriptor = descriptor.with_contact_info(contact);
    }

    PdfSigner::with_config(&config).sign(
        SignRequest::new()
            .input(&paths[0])
            .output(&paths[1])
            .key(&key)
            .descriptor(descriptor),
    )?;

    println!("Signed document written to {}", paths[1]);
    Ok(true)
}

fn verify(args: &CliArgs) -> Result<bool, Failure> {
    let input = &args.positional(1)?[0];
    let key = args
        .config()
        .key_loader()
        .load_public_key_file(args.key_path()?)?;

    let document = PdfDocument::open(input)?;
    let report = SignatureVerifier::new().verify_detailed(&document, &key)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| Failure::Usage(format!("couldn't serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        let signer = report.signature.signer_name.as_deref().unwrap_or("(unnamed)");
        let verdict = if report.valid { "VALID" } else { "INVALID" };
        println!("Signature by {}: {}", signer, verdict);
        if let Some(time) = &report.signature.signing_time {
            println!("Signed at: {}", time);
        }
        if !report.covers_whole_file {
            println!("Warning: document was modified after signing");
        }
    }

    Ok(report.valid)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let result = CliArgs::parse(rest).map_err(Failure::Usage).and_then(|cli| {
        match command.as_str() {
            "keygen" => keygen(&cli),
            "sign" => sign(&cli),
            "verify" => verify(&cli),
            other => Err(Failure::Usage(format!("unknown command: {}", other))),
        }
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(Failure::Usage(msg)) => {
            eprintln!("Error: {}\n\n{}", msg, USAGE);
            ExitCode::from(2)
        },
        Err(Failure::Seal(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        },
    }
}
