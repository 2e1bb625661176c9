//! flatpak-dotnet-generator CLI
//!
//! Restores .NET projects in the flatpak SDK sandbox and writes the NuGet
//! packages they need as a flatpak-builder sources file.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use flatpak_dotnet_generator::{
    config::{DEFAULT_DESTDIR, DEFAULT_DOTNET, DEFAULT_FLATPAK, DEFAULT_FREEDESKTOP},
    Config, Interrupt, Pipeline,
};

#[derive(Parser)]
#[command(name = "flatpak-dotnet-generator")]
#[command(about = "Generate flatpak-builder NuGet sources for .NET projects", long_about = None)]
#[command(version)]
struct Cli {
    /// The output JSON sources file
    output: PathBuf,

    /// The project file(s)
    #[arg(required = true, num_args = 1..)]
    project: Vec<PathBuf>,

    /// The target runtime to restore packages for
    #[arg(short, long)]
    runtime: Option<String>,

    /// The target version of the freedesktop sdk to use
    #[arg(short, long, default_value = DEFAULT_FREEDESKTOP)]
    freedesktop: String,

    /// The target version of dotnet to use
    #[arg(short, long, default_value_t = DEFAULT_DOTNET)]
    dotnet: u32,

    /// The directory the generated sources file will save sources to
    #[arg(long, default_value = DEFAULT_DESTDIR)]
    destdir: String,

    /// flatpak executable used to enter the sandbox
    #[arg(long, env = "FLATPAK", default_value = DEFAULT_FLATPAK)]
    flatpak: String,

    /// Keep the scratch directory holding restored packages
    #[arg(short, long)]
    keep: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new(self.output, self.project);
        config.runtime = self.runtime;
        config.freedesktop = self.freedesktop;
        config.dotnet = self.dotnet;
        config.destdir = self.destdir;
        config.flatpak = self.flatpak;
        config.keep_scratch = self.keep;
        config
    }
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config = cli.into_config();
    let interrupt = Interrupt::new();
    if let Err(e) = interrupt.install() {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }

    match Pipeline::new(&config).with_interrupt(interrupt).run() {
        Ok(count) => {
            println!(
                "[{}] {} sources written to {}",
                "+".bright_blue().bold(),
                count,
                config.output.display()
            );
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
