use clap::{Parser, Subcommand};

mod errors;
mod log;
mod model;
mod render;

use errors::TraceError;

pub type Result<T> = anyhow::Result<T>;

/// Where the simulator's build tree drops its debug log.
const DEFAULT_LOG_PATH: &str = "../_build/bin/debug_output.txt";

#[derive(Parser)]
#[command(name = "particle-trace")]
#[command(about = "Particle simulation debug-log trace visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render per-particle position/momenta traces to an HTML report.
    Report {
        #[arg(long, default_value = DEFAULT_LOG_PATH)]
        log: String,

        #[arg(short = 'o', long)]
        out: String,
    },
    /// Print the first parsed data records to stdout.
    Head {
        #[arg(long, default_value = DEFAULT_LOG_PATH)]
        log: String,

        #[arg(short = 'n', long, default_value_t = 5)]
        rows: usize,
    },
}

fn main() {
    if let Err(err) = run() {
        // The file-access failure keeps its fixed, user-facing message.
        match err.downcast_ref::<TraceError>() {
            Some(TraceError::FileAccess { path, .. }) => {
                eprintln!("Failed to open {}", path);
            }
            _ => eprintln!("ERROR: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report { log, out } => {
            let table = log::parse_log_file(&log)?;
            let data = model::build_report_data(&table)?;
            let html = render::render_html_report(&data)?;
            std::fs::write(&out, html)?;
            println!("Wrote {}", out);
        }
        Commands::Head { log, rows } => {
            let table = log::parse_log_file(&log)?;
            print!("{}", render::render_head(&table, rows));
        }
    }

    Ok(())
}
