// File:    main.rs
// Author:  apezoo
// Date:    2025-08-15
//
// Description: Command-line front end for running ciphers and printing their encryption tables.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! A command-line interface for the didactic ciphers.

use std::path::PathBuf;

use cipher_core::rsa::DEFAULT_PUBLIC_EXPONENT;
use cipher_core::{Cipher, CipherConfig, RsaCipher, TranspositionCipher, recover_primes};
use clap::{Args, Parser, Subcommand};
use log::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Caesar shift by 5\ncipher-cli encrypt --text abc caesar --shift 5\n\n# Show every pipeline step of a Vigenère run\ncipher-cli encrypt --text 'hello world' --table --steps vigenere --key abcde\n\n# Decrypt RSA, factoring the modulus first\ncipher-cli decrypt --text 0981 rsa --n 2537 --e 13\n\n# Run a cipher chain described in a JSON file\ncipher-cli encrypt --text hello config --path ./chain.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with the chosen cipher
    Encrypt(RunArgs),
    /// Decrypt text with the chosen cipher's decryption cipher
    Decrypt(RunArgs),
    /// Recover the RSA primes and private exponent from a public key
    Crack {
        /// The RSA modulus
        #[arg(long)]
        n: u64,
        /// The RSA public exponent
        #[arg(long)]
        e: u64,
    },
    /// Print a random permutation of 0..SIZE, usable as a transposition sigma
    Permutation {
        /// The block size
        #[arg(short, long)]
        size: usize,
    },
}

#[derive(Args)]
struct RunArgs {
    /// The text to process
    #[arg(short, long, allow_hyphen_values = true)]
    text: String,

    /// Print the encryption table instead of only the result
    #[arg(long)]
    table: bool,

    /// Include every intermediate pipeline step in the table
    #[arg(long, requires = "table")]
    steps: bool,

    /// Width of each table cell
    #[arg(long, value_name = "WIDTH", default_value_t = 5)]
    cell_width: usize,

    #[command(subcommand)]
    cipher: CipherCommand,
}

#[derive(Subcommand)]
enum CipherCommand {
    /// Caesar shift cipher
    Caesar {
        /// Distance each letter moves; may be negative
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i64,
    },
    /// Block transposition cipher
    Transposition {
        /// Comma-separated permutation, e.g. 3,2,1,0,4
        #[arg(long, value_delimiter = ',', required = true)]
        sigma: Vec<usize>,
    },
    /// Vigenère cipher
    Vigenere {
        /// The key word
        #[arg(short, long)]
        key: String,
    },
    /// Textbook RSA. Without --p and --q the modulus is factored to find them.
    Rsa {
        /// The modulus; defaults to p * q
        #[arg(long, required_unless_present_all = ["p", "q"])]
        n: Option<u64>,
        /// The public exponent
        #[arg(long, default_value_t = DEFAULT_PUBLIC_EXPONENT)]
        e: u64,
        /// First prime
        #[arg(long, requires = "q")]
        p: Option<u64>,
        /// Second prime
        #[arg(long, requires = "p")]
        q: Option<u64>,
    },
    /// A cipher or cipher chain described in a JSON file
    Config {
        /// Path to the JSON configuration
        #[arg(long, value_name = "FILE")]
        path: PathBuf,
    },
}

impl CipherCommand {
    fn build(&self) -> cipher_core::Result<Cipher> {
        let config = match self {
            Self::Caesar { shift } => CipherConfig::Shift { shift: *shift },
            Self::Transposition { sigma } => CipherConfig::Transposition {
                sigma: sigma.clone(),
            },
            Self::Vigenere { key } => CipherConfig::Vigenere { key: key.clone() },
            Self::Rsa { n, e, p, q } => CipherConfig::Rsa {
                n: *n,
                e: *e,
                p: *p,
                q: *q,
                recover: true,
            },
            Self::Config { path } => CipherConfig::load(path)?,
        };
        config.build()
    }
}

fn run_cipher(args: &RunArgs, decrypt: bool) -> cipher_core::Result<()> {
    let cipher = args.cipher.build()?;
    info!("using {cipher}");
    if args.table {
        let trace = if decrypt {
            cipher.decryption_trace(&args.text, args.steps)?
        } else {
            cipher.trace(&args.text, args.steps)?
        };
        print!("{}", trace.render(args.cell_width));
        println!("{}", trace.output);
    } else if decrypt {
        println!("{}", cipher.decrypt(&args.text)?);
    } else {
        println!("{}", cipher.encrypt(&args.text)?);
    }
    Ok(())
}

fn crack(n: u64, e: u64) -> cipher_core::Result<bool> {
    let Some((p, q)) = recover_primes(n, e) else {
        return Ok(false);
    };
    let rsa = RsaCipher::new(n, e, Some((p, q)))?;
    println!("p = {p}");
    println!("q = {q}");
    if let Some(d) = rsa.private_exponent() {
        println!("d = {d}");
    }
    Ok(true)
}

fn permutation(size: usize) -> cipher_core::Result<()> {
    let cipher = TranspositionCipher::random(size)?;
    let sigma: Vec<String> = cipher.sigma().iter().map(ToString::to_string).collect();
    println!("{}", sigma.join(","));
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Encrypt(args) => run_cipher(args, false),
        Commands::Decrypt(args) => run_cipher(args, true),
        Commands::Crack { n, e } => match crack(*n, *e) {
            Ok(true) => Ok(()),
            Ok(false) => {
                error!("No usable factorisation found for n={n}, e={e}");
                std::process::exit(1);
            }
            Err(err) => Err(err),
        },
        Commands::Permutation { size } => permutation(*size),
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}
