//! revertscope CLI — decode EVM custom errors from the terminal.
//!
//! # Commands
//! ```text
//! revertscope decode   --data <hex> [--errors <file|->]... [--error <decl>]... [--abi <path.json>]
//! revertscope selector <decl>...
//! revertscope standard
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::PathBuf;

use revertscope_core::render::{render_html, render_json, render_text};
use revertscope_core::{
    selector_hex, ChainedSource, DeclarationSource, ErrorDecoder, FileSource, Strictness,
};
use revertscope_evm::{selector_of_declaration, EvmErrorDecoder, JsonAbiSource, STANDARD_ERRORS};

mod config;
mod tracing_setup;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "revertscope",
    about = "Decode EVM revert data against Solidity custom error declarations",
    long_about = "
revertscope: turn raw revert data (0x-prefixed hex) into a readable error.

Declarations are lines of the form `error Name(type name, ...);`, read from
files, stdin, the command line, or the `error` items of an ABI JSON file.
Error(string) and Panic(uint256) are recognised without declarations.
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// JSON config file: { \"decoder\": {...}, \"log\": {...} }
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode raw revert data
    Decode {
        /// Raw revert data (hex)
        #[arg(long)]
        data: String,
        /// File of error declarations, one per line (`-` for stdin)
        #[arg(long = "errors")]
        errors: Vec<String>,
        /// A single inline declaration
        #[arg(long = "error")]
        error: Vec<String>,
        /// ABI JSON file whose `error` items are used as declarations
        #[arg(long)]
        abi: Option<PathBuf>,
        /// Accept unprefixed data and declarations without `);`
        #[arg(long)]
        lenient: bool,
        /// Omit the declaration/selector table from unmatched reports
        #[arg(long)]
        no_reference: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the canonical signature and selector of each declaration
    Selector {
        /// Declarations, e.g. 'error Unauthorized();'
        #[arg(required = true)]
        declarations: Vec<String>,
    },

    /// List the built-in standard errors
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = CliConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        cfg.log.level = "debug".into();
    }
    if cli.log_json {
        cfg.log.json = true;
    }
    tracing_setup::init_tracing(&cfg.log);

    match cli.command {
        Commands::Decode {
            data,
            errors,
            error,
            abi,
            lenient,
            no_reference,
            format,
        } => {
            if lenient {
                cfg.decoder.strictness = Strictness::Lenient;
            }
            if no_reference {
                cfg.decoder.reference_table = false;
            }
            let ok = cmd_decode(&cfg, &data, &errors, error, abi, format)?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Selector { declarations } => cmd_selector(&declarations),

        Commands::Standard => cmd_standard(),
    }
}

// ─── decode ───────────────────────────────────────────────────────────────────

/// Returns whether the decode succeeded; the report is printed either way.
fn cmd_decode(
    cfg: &CliConfig,
    data: &str,
    errors: &[String],
    inline: Vec<String>,
    abi: Option<PathBuf>,
    format: OutputFormat,
) -> Result<bool> {
    let mut sources: Vec<Box<dyn DeclarationSource>> = Vec::new();
    for path in errors {
        if path == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading declarations from stdin")?;
            sources.push(Box::new(text));
        } else {
            sources.push(Box::new(FileSource::new(path)));
        }
    }
    if !inline.is_empty() {
        sources.push(Box::new(inline));
    }
    if let Some(path) = abi {
        let abi = JsonAbiSource::from_file(&path)
            .with_context(|| format!("loading ABI {}", path.display()))?;
        sources.push(Box::new(abi));
    }

    let mut chained = ChainedSource::new();
    for source in &sources {
        chained.push(source.as_ref());
    }

    tracing::debug!(sources = sources.len(), strictness = %cfg.decoder.strictness, "decoding");
    let decoder = EvmErrorDecoder::with_config(cfg.decoder.clone());
    let result = decoder.decode(data, &chained);
    if let Err(e) = &result {
        tracing::warn!(kind = e.kind(), error = %e, "decode failed");
    }

    let rendered = match format {
        OutputFormat::Text => render_text(&result, &cfg.decoder),
        OutputFormat::Json => render_json(&result).context("serializing report")?,
        OutputFormat::Html => render_html(&result, &cfg.decoder),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(result.is_ok())
}

// ─── selector ─────────────────────────────────────────────────────────────────

fn cmd_selector(declarations: &[String]) -> Result<()> {
    for decl in declarations {
        let (signature, selector) =
            selector_of_declaration(decl).with_context(|| format!("parsing {decl:?}"))?;
        println!("{}  {signature}", selector_hex(&selector));
    }
    Ok(())
}

// ─── standard ─────────────────────────────────────────────────────────────────

fn cmd_standard() -> Result<()> {
    println!("{:<12} {:<16} DESCRIPTION", "SELECTOR", "SIGNATURE");
    for entry in &STANDARD_ERRORS {
        println!(
            "{:<12} {:<16} {}",
            selector_hex(&entry.selector),
            entry.signature,
            entry.description
        );
    }
    Ok(())
}
