//! scaffoldpy CLI - Interactive scaffolding for Python projects

use anyhow::Result;
use clap::Parser;
use scaffold_core::CreateArgs;

#[derive(Parser, Debug)]
#[command(name = "scaffoldpy")]
#[command(about = "Generate a Python project directory from your saved preferences")]
#[command(version)]
pub struct Args {
    /// The name of the project to be created
    pub project_name: Option<String>,

    /// Skip the configuration process and generate a basic project
    #[arg(short, long)]
    pub skip_config: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            skip_config: args.skip_config,
        }
    }
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = scaffold_core::run(args.into());

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
