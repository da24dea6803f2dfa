//! bomuml CLI - Render business object models as PlantUML class diagrams

mod cli;

use bomuml::core::logging::init_logging;
use bomuml::ModelError;
use clap::Parser;

fn main() {
    // Parse CLI args first to get logging configuration
    let args = cli::Cli::parse();

    // Initialize logging early; run() reinitializes with CLI flags if needed
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if let Err(err) = cli::run(args) {
        // input-syntax failures surface one diagnostic per line
        match err.downcast_ref::<ModelError>() {
            Some(ModelError::Syntax { messages }) => {
                for message in messages {
                    eprintln!("{}", message);
                }
            }
            _ => eprintln!("Error: {}", err),
        }
        std::process::exit(1);
    }
}
