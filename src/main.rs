use clap::Parser;

use iconfix::defaults::FixerDefaults;

mod commands;
mod output;

use commands::fix;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "iconfix")]
#[command(version = VERSION)]
#[command(
    about = "Prefix digit-leading symbols in src/weather_icons/icon_*.c so they are valid C identifiers"
)]
struct Cli {
    /// Print the result as a JSON envelope instead of one line per file
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let defaults = FixerDefaults::default();

    iconfix::log_status!("iconfix", "Scanning {}", defaults.directory.display());

    let exit_code = if cli.json {
        output::print_cmd_result(fix::run(&defaults))
    } else {
        fix::run_console(&defaults, &mut std::io::stdout().lock())
    };

    std::process::ExitCode::from(output::exit_code_to_u8(exit_code))
}
