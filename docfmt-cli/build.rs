use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

include!("src/cli.rs");

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "docfmt", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "docfmt", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "docfmt", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
