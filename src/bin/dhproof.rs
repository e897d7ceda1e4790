use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use verifiable_dh::config::CliConfig;
use verifiable_dh::{
    CertifiedSecret, DiffieHellman, Group, Modp1024, Proof, SecureRng, Statement, Transcript,
    Verifier,
};

#[derive(Parser)]
#[command(name = "dhproof")]
#[command(about = "Diffie-Hellman key agreement with provable shared secrets", long_about = None)]
#[command(version)]
struct Cli {
    /// Context bound into proof transcripts (overrides DHPROOF_CONTEXT)
    #[arg(short, long)]
    context: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair; prints the private exponent and public value in hex
    Keygen {
        #[arg(short, long, help = "Derive the key deterministically from this seed")]
        seed: Option<String>,
    },

    /// Derive the secret shared with a remote public value
    Secret {
        #[arg(short, long, help = "Hex private exponent")]
        private_key: String,

        #[arg(short, long, help = "Hex remote public value")]
        remote: String,
    },

    /// Prove the secret shared with a remote public value
    Prove {
        #[arg(short, long, help = "Hex private exponent")]
        private_key: String,

        #[arg(short, long, help = "Hex remote public value")]
        remote: String,
    },

    /// Verify a proof; prints the certified shared secret on success
    Verify {
        #[arg(long, help = "Hex public value of the prover")]
        prover: String,

        #[arg(short, long, help = "Hex remote public value")]
        remote: String,

        #[arg(short, long, help = "Hex proof or certified-secret bundle")]
        proof: String,

        #[arg(short, long, help = "Hex claimed secret (required for bare proofs)")]
        secret: Option<String>,
    },
}

fn transcript(context: &str) -> Transcript {
    let mut transcript = Transcript::new();
    if !context.is_empty() {
        transcript.append_context(context.as_bytes());
    }
    transcript
}

fn prove(
    config: &CliConfig,
    private_key: &str,
    remote: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let key = DiffieHellman::from_private_key(&hex::decode(private_key)?)?;
    let prover = key.prover(&hex::decode(remote)?)?;

    let mut rng = SecureRng::new();
    let proof = prover.prove_with_transcript(&mut rng, &mut transcript(&config.context))?;

    if config.bundle {
        let shared_secret = prover.statement().shared_secret().clone();
        Ok(CertifiedSecret::new(shared_secret, proof).to_bytes())
    } else {
        Ok(proof.to_bytes())
    }
}

fn verify(
    config: &CliConfig,
    prover: &str,
    remote: &str,
    proof: &str,
    secret: Option<&str>,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let prover = hex::decode(prover)?;
    let remote = hex::decode(remote)?;
    let proof = hex::decode(proof)?;

    let (statement, proof) = match secret {
        Some(secret) => (
            Statement::<Modp1024>::from_bytes(&prover, &remote, &hex::decode(secret)?)?,
            Proof::<Modp1024>::from_bytes(&proof)?,
        ),
        None => {
            let certified = CertifiedSecret::<Modp1024>::from_bytes(&proof)?;
            let statement = Statement::new(
                Modp1024::element_from_bytes(&prover)?,
                Modp1024::element_from_bytes(&remote)?,
                certified.shared_secret().clone(),
            );
            (statement, certified.proof().clone())
        }
    };

    Verifier::new(statement.clone())
        .verify_with_transcript(&proof, &mut transcript(&config.context))?;
    Ok(Modp1024::element_to_bytes(statement.shared_secret()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env()?;
    if let Some(context) = cli.context {
        config.context = context;
    }
    config.validate()?;

    match cli.command {
        Commands::Keygen { seed } => {
            let key = match seed {
                Some(seed) => DiffieHellman::from_seed(seed.as_bytes()),
                None => DiffieHellman::generate()?,
            };
            println!("private: {}", hex::encode(key.private_component()));
            println!("public:  {}", hex::encode(key.public_component()));
        }

        Commands::Secret {
            private_key,
            remote,
        } => {
            let key = DiffieHellman::from_private_key(&hex::decode(private_key)?)?;
            let secret = key.shared_secret(&hex::decode(remote)?)?;
            println!("{}", hex::encode(secret));
        }

        Commands::Prove {
            private_key,
            remote,
        } => {
            let bytes = prove(&config, &private_key, &remote)?;
            info!(bundle = config.bundle, len = bytes.len(), "proof generated");
            println!("{}", hex::encode(bytes));
        }

        Commands::Verify {
            prover,
            remote,
            proof,
            secret,
        } => match verify(&config, &prover, &remote, &proof, secret.as_deref()) {
            Ok(secret) => {
                info!("proof accepted");
                println!("{}", hex::encode(secret));
            }
            Err(e) => {
                eprintln!("Verification failed: {e}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
