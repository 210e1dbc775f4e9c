use std::io;

fn main() {
    // A broken configuration is reported by the command itself; logging
    // falls back to the default filter meanwhile.
    let filter = phud_cli::config::load()
        .map(|c| c.log_filter)
        .unwrap_or_else(|_| phud_cli::config::Config::default().log_filter);
    phud_cli::logging::init_logging(&filter);

    let code = phud_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
