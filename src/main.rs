//! CLI entry point: three positional arguments (original, instrumental,
//! output), wired to the `vocalign` library's pipeline.

use std::path::PathBuf;

use vocalign::error::AlignError;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(err) = run(&args) {
        println!("{err:#}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    if args.len() != 4 {
        return Err(AlignError::Argument.into());
    }

    let original = PathBuf::from(&args[1]);
    let instrumental = PathBuf::from(&args[2]);
    let output = PathBuf::from(&args[3]);

    vocalign::pipeline::run(&original, &instrumental, &output)?;
    Ok(())
}
