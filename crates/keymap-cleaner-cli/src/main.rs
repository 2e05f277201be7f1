// keymap-cleaner CLI entry point

use keymap_cleaner_cli::{output, router::CommandRouter, CliError, VerbosityLevel};

#[tokio::main]
async fn main() {
    // Route and execute command
    let result = CommandRouter::route().await;

    // Exit with appropriate code
    if let Err(e) = result {
        report(&e);
        std::process::exit(e.exit_code());
    }
}

fn report(error: &CliError) {
    output::print_error(&error.user_message());
    if VerbosityLevel::Verbose.should_output() {
        eprintln!("{}", error.technical_details());
    }
}
