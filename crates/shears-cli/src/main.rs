mod cli;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use clap::Parser;

use shears_core::reducer::{Options, Reducer};
use shears_core::{template, Node};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Reduce {
            input,
            vars_file,
            cwd,
            templatize,
            compiler,
            output,
        } => reduce(input, vars_file, cwd, templatize, compiler, output),
    }
}

fn reduce(
    input: String,
    vars_file: String,
    cwd: Option<String>,
    templatize: bool,
    compiler: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let source = read_input(&input)?;
    let mut root: Node =
        serde_json::from_str(&source).with_context(|| format!("invalid syntax tree in {input}"))?;

    let mut reducer = Reducer::new(Options {
        vars_file: Some(PathBuf::from(vars_file)),
        cwd: cwd.map(PathBuf::from),
        templatize,
    })?;
    let kept = reducer.reduce(&mut root);
    if !kept {
        log::warn!("nothing in {input} is reachable from the override set");
    }

    let rendered = if templatize {
        let command = match compiler {
            Some(command) => command,
            None => bail!("--templatize requires --compiler"),
        };
        template::templatize(&root, |source| compile_with(&command, source))?
    } else {
        serde_json::to_string_pretty(&root)?
    };
    write_output(output.as_deref(), &rendered)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

/// Runs the user-supplied compiler command as a shell pipeline stage.
fn compile_with(command: &str, source: &str) -> io::Result<String> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }
    let out = child.wait_with_output()?;
    if !out.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("compiler exited with {}", out.status),
        ));
    }
    String::from_utf8(out.stdout)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn write_output(output: Option<&str>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write {path}"))
        }
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
