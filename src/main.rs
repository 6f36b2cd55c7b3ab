use clap::Parser;
use eslint_suppress::cli::Args;
use eslint_suppress::config;
use eslint_suppress::instrument_block;
use eslint_suppress::linter::EslintCommand;
use eslint_suppress::{Outcome, SuppressEngine, SuppressOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    eslint_suppress::telemetry::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let start_dir = infer_start_dir(&args)?;
    let loaded_cfg = config::load_config(args.config.as_deref(), &start_dir)?;
    let file_cfg = loaded_cfg.map(|(_path, cfg)| cfg.suppress).unwrap_or_default();

    // CLI flags take precedence over config file values.
    let rules = if args.rules.is_empty() {
        file_cfg.rules
    } else {
        args.rules
    };
    let message = args.message.or(file_cfg.message);
    let eslint_bin = args
        .eslint_bin
        .or(file_cfg.eslint_bin)
        .unwrap_or_else(|| "eslint".to_string());

    let mut linter = EslintCommand::new(eslint_bin);
    if let Some(base_config) = &args.base_config {
        linter = linter.with_base_config(base_config)?;
    }

    let engine = SuppressEngine::new(linter, SuppressOptions { rules, message });

    let files = collect_source_files(&args.paths)?;
    let mut modified = 0usize;
    let mut skipped = 0usize;

    for path in &files {
        let source = std::fs::read_to_string(path)?;
        let outcome = instrument_block!("process_file", {
            engine.run(path, &source)
        })?;

        match outcome {
            Outcome::Modified { text, directives } => {
                if args.dry_run {
                    println!(
                        "{}: would add or update {} directive(s)",
                        path.display(),
                        directives
                    );
                } else {
                    std::fs::write(path, text)?;
                    println!(
                        "{}: added or updated {} directive(s)",
                        path.display(),
                        directives
                    );
                }
                modified += 1;
            }
            Outcome::Unchanged => {
                skipped += 1;
            }
            Outcome::ParseFailed => {
                eprintln!("{}: skipped, file could not be parsed", path.display());
                skipped += 1;
            }
        }
    }

    if args.dry_run {
        println!("{} file(s) would be modified, {} unchanged", modified, skipped);
    } else {
        println!("{} file(s) modified, {} unchanged", modified, skipped);
    }

    Ok(ExitCode::SUCCESS)
}

fn collect_source_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        collect_from_path(path, &mut out)?;
    }

    out.sort();
    out.dedup();
    Ok(out)
}

fn collect_from_path(path: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let meta = std::fs::metadata(path)?;
    if meta.is_dir() {
        collect_from_dir(path, out)
    } else {
        out.push(path.to_path_buf());
        Ok(())
    }
}

fn collect_from_dir(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            collect_from_dir(&path, out)?;
            continue;
        }

        if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("js" | "jsx" | "mjs" | "cjs")
        ) {
            out.push(path);
        }
    }

    Ok(())
}

fn should_skip_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return false;
    };

    matches!(name, ".git" | "node_modules" | "build" | "dist")
}

fn infer_start_dir(args: &Args) -> anyhow::Result<PathBuf> {
    let base = if let Some(p) = args.paths.first() {
        p.clone()
    } else {
        std::env::current_dir()?
    };

    let base = if base.is_file() {
        base.parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        base
    };

    Ok(base)
}
