//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = portwise_cli::run() {
        eprintln!("portwise: {err}");
        std::process::exit(1);
    }
}
