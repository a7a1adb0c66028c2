//! Entry point for the `clubfeed` binary.
#![forbid(unsafe_code)]

use clubfeed_server::CliError;

fn main() {
    match clubfeed_server::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("clubfeed: {err}");
            std::process::exit(1);
        }
    }
}
