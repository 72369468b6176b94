//! F3DEX2 display-list command-line tool.
//!
//! This binary wraps the codec for use on ROM dumps and hand-written lists. It provides:
//! 1. **Decode:** Disassemble big-endian words from a file, or hex words from the command line.
//! 2. **Encode:** Pack a JSON array of commands into words.
//! 3. **Walk:** Follow one display list from a byte offset and report its child lists.
//! 4. **Throttle:** Print the `G_LOADBLOCK` dxt and TMEM line size for a texture width.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use f3dex2_codec::common::bits::words_from_be_bytes;
use f3dex2_codec::common::constants::WORD_BYTES;
use f3dex2_codec::config::Config;
use f3dex2_codec::isa::macros::{dxt_for_depth, line_size};
use f3dex2_codec::stats::DecodeStats;
use f3dex2_codec::{
    Arg, Command, Decoded, Diagnostic, DisplayListWalker, decode_with, disassemble_with, encode_all,
};

#[derive(Parser, Debug)]
#[command(
    name = "gbi",
    author,
    version,
    about = "F3DEX2 display-list encoder and disassembler",
    long_about = "Decode, encode and walk F3DEX2 display lists.\n\nExamples:\n  gbi decode dl.bin --offset 0x40 --count 16\n  gbi decode --hex \"0500020400000000 DF00000000000000\"\n  gbi encode commands.json\n  gbi walk segment6.bin --offset 0x1A30\n  gbi throttle 32 16"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Disassemble words from a binary file, stdin, or `--hex`.
    Decode {
        /// Big-endian binary to decode; stdin when omitted.
        file: Option<PathBuf>,

        /// Hex words to decode instead of a file, separated by spaces or commas.
        #[arg(long, conflicts_with = "file")]
        hex: Option<String>,

        /// Byte offset of the first command.
        #[arg(long, default_value = "0", value_parser = parse_number)]
        offset: usize,

        /// Stop after this many commands.
        #[arg(long)]
        count: Option<usize>,

        /// Print one JSON object per command instead of gbi text.
        #[arg(long)]
        json: bool,

        /// Print decode statistics at the end.
        #[arg(long)]
        stats: bool,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Encode a JSON array of `{ "name": ..., "args": [...] }` commands.
    Encode {
        /// JSON command file.
        file: PathBuf,

        /// Write big-endian words here instead of printing hex.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Walk one display list and list the child lists it calls.
    Walk {
        /// Big-endian binary holding the display list.
        file: PathBuf,

        /// Byte offset of the list.
        #[arg(long, default_value = "0", value_parser = parse_number)]
        offset: usize,

        /// Print decode statistics at the end.
        #[arg(long)]
        stats: bool,

        /// JSON configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the `G_LOADBLOCK` dxt and TMEM line size for a texture row.
    Throttle {
        /// Texture width in texels.
        width: i64,

        /// Bits per texel (4, 8, 16 or 32).
        bits: i64,
    },
}

/// One decoded command as printed by `decode --json`.
#[derive(Serialize)]
struct Row<'a> {
    offset: usize,
    words: Vec<String>,
    name: &'static str,
    args: &'a [Arg],
    text: String,
    #[serde(skip_serializing_if = "no_diagnostics")]
    diagnostics: &'a [Diagnostic],
}

fn no_diagnostics(diagnostics: &&[Diagnostic]) -> bool {
    diagnostics.is_empty()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            file,
            hex,
            offset,
            count,
            json,
            stats,
            config,
        } => cmd_decode(
            file.as_deref(),
            hex.as_deref(),
            offset,
            count,
            json,
            stats,
            config.as_deref(),
        ),
        Commands::Encode { file, output } => cmd_encode(&file, output.as_deref()),
        Commands::Walk {
            file,
            offset,
            stats,
            config,
        } => cmd_walk(&file, offset, stats, config.as_deref()),
        Commands::Throttle { width, bits } => cmd_throttle(width, bits),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses decimal or `0x` hex command-line numbers.
fn parse_number(text: &str) -> Result<usize, String> {
    f3dex2_codec::common::parse_int(text)
        .and_then(|value| usize::try_from(value).ok())
        .ok_or_else(|| format!("`{text}` is not a non-negative number"))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    Config::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            let _ = io::stdin()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
            Ok(bytes)
        }
    }
}

fn parse_hex_words(text: &str) -> Result<Vec<u64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let digits = part.trim_start_matches("0x").replace('_', "");
            u64::from_str_radix(&digits, 16).with_context(|| format!("`{part}` is not a hex word"))
        })
        .collect()
}

fn cmd_decode(
    file: Option<&Path>,
    hex: Option<&str>,
    offset: usize,
    count: Option<usize>,
    json: bool,
    print_stats: bool,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let words = match hex {
        Some(text) => parse_hex_words(text)?,
        None => {
            let bytes = read_input(file)?;
            if offset > bytes.len() {
                bail!("offset {offset:#x} is past the end of the input ({} bytes)", bytes.len());
            }
            words_from_be_bytes(&bytes[offset..])
        }
    };
    let base = if hex.is_some() { 0 } else { offset };
    debug!("decoding {} words", words.len());

    let mut stats = DecodeStats::default();
    let mut pos = 0;
    let mut decoded_count = 0;
    while pos < words.len() && count.is_none_or(|limit| decoded_count < limit) {
        let at = base + pos * WORD_BYTES;
        let decoded = match decode_with(&words[pos..], &config.decode) {
            Ok(decoded) => decoded,
            Err(err) => {
                stats.record_error();
                if print_stats {
                    stats.print();
                }
                return Err(err).with_context(|| format!("decoding at byte offset {at:#x}"));
            }
        };
        print_decoded(&decoded, at, json, &config)?;
        stats.record(&decoded);
        pos += decoded.len();
        decoded_count += 1;
    }

    if print_stats {
        stats.print();
    }
    Ok(())
}

fn print_decoded(decoded: &Decoded, offset: usize, json: bool, config: &Config) -> Result<()> {
    let text = disassemble_with(decoded, &config.render);
    if json {
        let row = Row {
            offset,
            words: decoded.words.iter().map(|w| format!("{w:016X}")).collect(),
            name: decoded.name,
            args: &decoded.args,
            text,
            diagnostics: &decoded.diagnostics,
        };
        println!("{}", serde_json::to_string(&row)?);
    } else {
        println!("{offset:08X}: {text},");
        for diagnostic in &decoded.diagnostics {
            println!("          // {diagnostic}");
        }
    }
    Ok(())
}

fn cmd_encode(file: &Path, output: Option<&Path>) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let commands: Vec<Command> = serde_json::from_str(&text)
        .with_context(|| format!("parsing commands in {}", file.display()))?;
    let words = encode_all(&commands).context("encoding commands")?;
    info!("encoded {} commands into {} words", commands.len(), words.len());

    match output {
        Some(path) => {
            let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
            fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            for word in words {
                println!("{word:016X}");
            }
        }
    }
    Ok(())
}

fn cmd_walk(file: &Path, offset: usize, print_stats: bool, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let result = DisplayListWalker::new(&bytes, &config)
        .walk(offset)
        .with_context(|| format!("walking display list at {offset:#x}"))?;

    let mut at = offset;
    for decoded in &result.commands {
        println!("{at:08X}: {},", disassemble_with(decoded, &config.render));
        at += decoded.len() * WORD_BYTES;
    }
    if !result.terminated {
        println!("// list does not end within the buffer or command limit");
    }
    for target in &result.dl_targets {
        println!("// calls {target:#010X}");
    }
    if print_stats {
        result.stats.print();
    }
    Ok(())
}

fn cmd_throttle(width: i64, bits: i64) -> Result<()> {
    if width < 1 {
        bail!("width must be positive, got {width}");
    }
    if !matches!(bits, 4 | 8 | 16 | 32) {
        bail!("bits per texel must be 4, 8, 16 or 32, got {bits}");
    }
    let dxt = dxt_for_depth(width, bits).context("width overflows the dxt calculation")?;
    let line = line_size(width, bits).context("width overflows the line size")?;
    println!("dxt  {dxt}");
    println!("line {line}");
    Ok(())
}
