//! # VFS Console
//!
//! Reads commands from stdin, one per line, and runs them against a freshly
//! booted in-memory filesystem.

use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vfs_console::{bootstrap, MOTD};
use vfs_types::VfsConfig;

fn main() {
    set_up_logging();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut console = bootstrap(config).unwrap_or_else(|e| {
        eprintln!("Failed to boot filesystem: {}", e);
        process::exit(1);
    });

    print!("{}", MOTD);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        let _ = write!(stdout, "> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                process::exit(1);
            }
        }
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        match console.handler.execute(&line) {
            Ok(Some(output)) if !output.is_empty() => println!("{}", output),
            Ok(_) => {}
            Err(e) => eprintln!("{}", e),
        }
    }
}

/// Logs go to stderr, filtered by `$RUST_LOG`
fn set_up_logging() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}

fn parse_args(args: &[String]) -> Result<VfsConfig, String> {
    let mut config = VfsConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                config = VfsConfig::load(&args[i]).map_err(|e| e.to_string())?;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--config <file.json>]", program);
}
