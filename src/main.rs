use amr_aggregator::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("AMR Aggregator - Antimicrobial Resistance Data Extraction");
    println!("=========================================================");
    println!();
    println!("Extract resistance test results from semi-structured spreadsheet");
    println!("reports and aggregate them into a normalized CSV dataset.");
    println!();
    println!("USAGE:");
    println!("    amr-aggregator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    aggregate   Aggregate resistance data from spreadsheets (main command)");
    println!("    resolve     Resolve a single name to its AMR code");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Aggregate all reports matching a glob pattern:");
    println!("    amr-aggregator aggregate 'import/*.xlsx' -o aggregated.csv");
    println!();
    println!("    # Aggregate a whole directory with custom lookup scripts:");
    println!("    amr-aggregator aggregate reports/ -o aggregated.csv \\");
    println!("                             --organism-script get_amr_code.R \\");
    println!("                             --antibiotic-script get_antibiotic_amr_code.R");
    println!();
    println!("    # Check what a name resolves to:");
    println!("    amr-aggregator resolve 'Cefepim (Non-meningitis)' --kind antibiotic");
    println!();
    println!("For detailed help on any command, use:");
    println!("    amr-aggregator <COMMAND> --help");
}
