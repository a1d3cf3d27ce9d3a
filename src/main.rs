use anyhow::{Context, Result};
use clap::Parser;
use smbios_probe::config::{ProbeConfig, ScanConfig};
use smbios_probe::{log_error, logging, privilege, DevMem, Probe};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Locate the SMBIOS entry point in physical memory and dump its header.
#[derive(Parser, Debug)]
#[command(name = "smbios-probe", version, about)]
struct Cli {
    /// Physical memory device node to read.
    #[arg(long, default_value = smbios_probe::io::DEFAULT_DEVICE)]
    device: PathBuf,

    /// First physical address scanned (hex with 0x prefix, or decimal).
    #[arg(long, value_parser = parse_address)]
    start: Option<u64>,

    /// End of the scanned window, exclusive.
    #[arg(long, value_parser = parse_address)]
    end: Option<u64>,

    /// Emit diagnostics as JSON.
    #[arg(long)]
    log_json: bool,

    /// Do not require root, e.g. when probing a memory dump file.
    #[arg(long)]
    skip_privilege_check: bool,
}

fn parse_address(s: &str) -> std::result::Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

impl Cli {
    fn config(&self) -> ProbeConfig {
        let defaults = ScanConfig::default();
        ProbeConfig {
            device: self.device.clone(),
            scan: ScanConfig {
                start: self.start.unwrap_or(defaults.start),
                end: self.end.unwrap_or(defaults.end),
                ..defaults
            },
            ..ProbeConfig::default()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.skip_privilege_check {
        privilege::ensure_root().map_err(|e| log_error!(e))?;
    }

    let config = cli.config();
    let probe = Probe::from_config(DevMem::new(&config.device), &config)?;
    let report = probe
        .run()
        .map_err(|e| log_error!(e))
        .with_context(|| format!("probing {}", config.device.display()))?;

    let mut stdout = std::io::stdout().lock();
    report.render(&mut stdout).context("writing report")?;
    stdout.flush().context("writing report")?;

    report.ensure_valid()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.log_json {
        logging::init_tracing_json();
    } else {
        logging::init_tracing();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
