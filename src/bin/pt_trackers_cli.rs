use pt_trackers::cli::run_cli;

fn main() {
    // Tracing is initialised inside `run_cli` once the config filter is known.
    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
