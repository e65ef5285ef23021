/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use clap::Parser;
use fetch_ident::{
    ContainerConfigBuilder, IdentityReportingService, MemoryUnit, NeofetchOptions, ParserConfig,
    ReportError, ServiceContainer, SystemIdentity,
};
use log::debug;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
    Toml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            _ => Err("Output format must be one of 'text', 'json' or 'toml'".to_string()),
        }
    }
}

/// Resolve this machine's neofetch report to asset identifiers
#[derive(Parser)]
#[command(name = "fetch_ident", version)]
struct Opt {
    /// Show memory in GiB ('gb') or as reported ('mb')
    #[arg(short = 'm', long, value_name = "TYPE")]
    memtype: Option<String>,

    /// Disable the neofetch custom config, for configurations that break parsing
    #[arg(long)]
    noconfig: bool,

    /// Custom neofetch config path
    #[arg(short = 'c', long, value_name = "PATH")]
    config_path: Option<String>,

    /// Reference table JSON file
    #[arg(
        long,
        env = "FETCH_IDENT_REFERENCE",
        default_value = fetch_ident::container::DEFAULT_REFERENCE_PATH
    )]
    reference: PathBuf,

    /// Read a saved neofetch report instead of running neofetch
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Report this terminal instead of the probed one
    #[arg(long, value_name = "TERMINAL")]
    terminal: Option<String>,

    /// Report this terminal font instead of the probed one
    #[arg(long, value_name = "TERMFONT")]
    termfont: Option<String>,

    /// Output format (text, json or toml)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// neofetch timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn render(identity: &SystemIdentity, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Text => Ok(render_text(identity)),
        OutputFormat::Json => serde_json::to_string_pretty(identity)
            .map_err(|e| ReportError::SerializationFailed(e.to_string())),
        OutputFormat::Toml => toml::to_string_pretty(identity)
            .map_err(|e| ReportError::SerializationFailed(e.to_string())),
    }
}

fn render_text(identity: &SystemIdentity) -> String {
    let desktop = format!("{}\n{}", identity.de, identity.wm);
    let rows = [
        ("OS", &identity.os, identity.os_id.clone()),
        ("Kernel", &identity.kernel, String::new()),
        ("Host", &identity.host, identity.host_id.clone()),
        ("Motherboard", &identity.motherboard, identity.motherboard_id.clone()),
        ("CPU", &identity.cpu, identity.cpu_id.clone()),
        ("GPU", &identity.gpu, identity.gpu_ids.join(", ")),
        ("Memory", &identity.memory, String::new()),
        ("Disk", &identity.disks, String::new()),
        ("Shell", &identity.shell, identity.shell_id.clone()),
        ("Terminal", &identity.terminal, identity.terminal_id.clone()),
        ("Font", &identity.terminal_font, String::new()),
        ("DE/WM", &desktop, identity.desktop_id.clone()),
        ("Battery", &identity.battery, String::new()),
    ];

    let mut out = String::from("System Identity:\n================\n");
    for (label, value, id) in rows {
        for (i, line) in value.lines().enumerate() {
            let label = if i == 0 { label } else { "" };
            out.push_str(&format!("{label:<12} {line}\n"));
        }
        if !id.is_empty() {
            out.push_str(&format!("{:<12} -> {id}\n", ""));
        }
    }
    out.push_str(&format!("{:<12} {}\n", "Chassis", identity.chassis.as_str()));
    out
}

#[tokio::main]
async fn main() {
    let opt = Opt::parse();
    init_logging(opt.debug);

    if let Err(e) = run(opt).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let parser = ParserConfig {
        memory_unit: MemoryUnit::from_flag(opt.memtype.as_deref()),
        terminal_override: opt.terminal,
        terminal_font_override: opt.termfont,
    };
    let config = ContainerConfigBuilder::new()
        .command_timeout(Duration::from_secs(opt.timeout))
        .reference_path(opt.reference)
        .probe_input(opt.input)
        .neofetch(NeofetchOptions {
            disable_config: opt.noconfig,
            config_path: opt.config_path,
        })
        .parser(parser)
        .build();
    debug!("Container configuration: {config:?}");

    let service = ServiceContainer::new(config)
        .create_identity_service()
        .await?;

    println!("{}", render(&service.snapshot(), opt.format)?);
    Ok(())
}
