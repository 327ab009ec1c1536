//! Pipeline simulator CLI.
//!
//! This binary runs one program image through the simulator. It performs:
//! 1. **Setup:** Reads an optional JSON configuration and applies command-line overrides.
//! 2. **Loading:** Loads a raw binary at an address or a 32-bit ELF executable.
//! 3. **Run:** Steps until the run finishes, reporting every error surfaced on the way.
//! 4. **Report:** Prints the halt reason, console output, registers and statistics, as
//!    text or JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use pipesim_core::common::error::{ConfigError, LoadError};
use pipesim_core::config::IsaMode;
use pipesim_core::sim::loader;
use pipesim_core::{Config, HaltReason, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate 5-stage pipeline simulator",
    long_about = "Run a RISC-V, MIPS or DLX program through a cycle-accurate 5-stage pipeline.\n\nExamples:\n  pipesim run prog.bin\n  pipesim run --elf prog.elf --config pipeline.json\n  pipesim run --isa mips --load-addr 0x400000 prog.bin --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it halts or the cycle budget is used up.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Program image.
    file: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Instruction set, overriding the configuration.
    #[arg(long, value_enum)]
    isa: Option<IsaArg>,

    /// Cycle budget (0 = unlimited), overriding the configuration.
    #[arg(long)]
    cycles: Option<u64>,

    /// Treat the file as an ELF executable.
    #[arg(long)]
    elf: bool,

    /// Load and entry address of a raw binary.
    #[arg(long, value_parser = parse_addr, default_value = "0")]
    load_addr: u32,

    /// Log every stage of every cycle.
    #[arg(long)]
    trace: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IsaArg {
    Riscv,
    Mips,
    Dlx,
}

impl From<IsaArg> for IsaMode {
    fn from(isa: IsaArg) -> Self {
        match isa {
            IsaArg::Riscv => Self::RiscV,
            IsaArg::Mips => Self::Mips,
            IsaArg::Dlx => Self::Dlx,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &RunArgs) -> Result<Config, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Config::from_json(&json)?
        }
        None => Config::default(),
    };
    if let Some(isa) = args.isa {
        config.general.isa = isa.into();
    }
    if let Some(cycles) = args.cycles {
        config.general.cycles = cycles;
    }
    Ok(config)
}

fn print_text(sim: &Simulator, reason: HaltReason) {
    println!("[*] Halted: {reason} after {} cycles", sim.cycle());
    let console = sim.console_output();
    if !console.is_empty() {
        println!("\n--- console ---\n{}", String::from_utf8_lossy(console));
    }
    println!("\n--- registers ---\n{}", sim.registers());
    println!("\n--- pipeline ---\n{}", sim.stats());

    let bp = sim.branch_predictor().stats();
    println!(
        "\n--- branch prediction ---\nlookups {}  hits {}  correct {}  incorrect {}  accuracy {:.1}%",
        bp.lookups,
        bp.hits,
        bp.correct,
        bp.incorrect,
        bp.accuracy() * 100.0
    );

    let memory = sim.memory();
    for (name, cache) in [("I-cache", memory.icache()), ("D-cache", memory.dcache())] {
        if !cache.enabled {
            continue;
        }
        let s = cache.stats();
        println!(
            "{name}: reads {}  writes {}  hits {}  misses {}  write-backs {}  hit rate {:.1}%",
            s.reads,
            s.writes,
            s.hits,
            s.misses,
            s.writebacks,
            s.hit_rate() * 100.0
        );
    }
}

fn print_json(sim: &Simulator, reason: HaltReason) {
    let stats = sim.stats();
    let bp = sim.branch_predictor().stats();
    let report = serde_json::json!({
        "halt": reason.to_string(),
        "cycles": stats.cycles,
        "retired": stats.instructions_retired,
        "cpi": stats.cpi(),
        "stalls": {
            "load_use": stats.stalls_load_use,
            "memory": stats.stalls_mem,
            "fetch": stats.fetch_bubbles,
        },
        "flushes": stats.flushes,
        "squashed": stats.squashed,
        "syscalls": stats.syscalls,
        "exceptions": stats.exceptions,
        "branch_prediction": {
            "lookups": bp.lookups,
            "hits": bp.hits,
            "correct": bp.correct,
            "incorrect": bp.incorrect,
        },
        "icache_hit_rate": sim.memory().icache().stats().hit_rate(),
        "dcache_hit_rate": sim.memory().dcache().stats().hit_rate(),
        "console": String::from_utf8_lossy(sim.console_output()),
    });
    println!("{report:#}");
}

fn cmd_run(args: &RunArgs) -> Result<ExitCode, CliError> {
    let config = load_config(args)?;
    let image = if args.elf {
        loader::load_elf(&args.file)?
    } else {
        loader::load_raw(&args.file, args.load_addr)?
    };
    tracing::info!(
        file = %args.file.display(),
        entry = format_args!("{:#010x}", image.entry_pc),
        segments = image.segments.len(),
        "image loaded"
    );

    let mut sim = Simulator::new(config, image)?;
    while !sim.is_finished() {
        if let Err(error) = sim.step() {
            eprintln!("[!] cycle {}: {error}", sim.cycle());
        }
    }
    let reason = sim.halt_reason().unwrap_or(HaltReason::Fault);

    if args.json {
        print_json(&sim, reason);
    } else {
        print_text(&sim, reason);
    }

    Ok(match reason {
        HaltReason::SyscallExit(code) => ExitCode::from(code as u8),
        HaltReason::Fault => ExitCode::FAILURE,
        HaltReason::CycleBudget | HaltReason::Break | HaltReason::TrapStop => ExitCode::SUCCESS,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => {
            init_tracing(args.trace);
            cmd_run(&args).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            })
        }
    }
}
