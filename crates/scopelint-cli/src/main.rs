use anyhow::{Context, Result};
use scopelint_config::{Config, FileFilter, Rule};
use scopelint_engine::io::{self, DEFAULT_EXTENSIONS};
use scopelint_engine::{
    Alert, BlockLinter, Document, ScopedBlock, SegmentTagger, WalkerConfig, extract_tagged_spans,
    lint_file,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: scopelint [--config PATH] [--words] PATH...";

#[derive(Debug, Default, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    words: bool,
    paths: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--words" => options.words = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => options.paths.push(PathBuf::from(path)),
        }
    }

    if options.paths.is_empty() {
        return Err("no paths given".to_string());
    }
    Ok(options)
}

/// Records an alert for every rule whose scope matches a block.
struct RuleLinter<'r> {
    rules: &'r [Rule],
    words: bool,
}

impl BlockLinter for RuleLinter<'_> {
    fn lint_block(&mut self, doc: &mut Document, block: &ScopedBlock) -> Result<()> {
        for rule in self.rules {
            if rule.scope.matches(&block.scope) && doc.comments().allows(&rule.name) {
                doc.add_alert(Alert {
                    check: rule.name.clone(),
                    scope: block.scope.to_string(),
                    line: block.line,
                    message: block.text.trim().to_string(),
                });
            }
        }

        if self.words && !is_whole_document(block) {
            for word in extract_tagged_spans(&block.text, &SegmentTagger) {
                println!(
                    "{}:{}:{}-{} {} {}",
                    doc.path().display(),
                    block.line + word.line - 1,
                    word.span.0,
                    word.span.1,
                    word.token.tag,
                    word.token.text
                );
            }
        }
        Ok(())
    }
}

fn is_whole_document(block: &ScopedBlock) -> bool {
    matches!(block.scope.segments().next(), Some("raw" | "summary"))
}

fn collect_files(paths: &[PathBuf], filter: &FileFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let found = io::scan_documents(path, &DEFAULT_EXTENSIONS)
            .with_context(|| format!("Failed to scan {}", path.display()))?;
        files.extend(found.into_iter().filter(|file| filter.matches(file)));
    }
    Ok(files)
}

/// Lints one file, printing its alerts. Returns the number of alerts.
fn report_file(path: &Path, walker: &WalkerConfig, linter: &mut RuleLinter<'_>) -> Result<usize> {
    let Some(doc) = lint_file(path, walker, linter)? else {
        return Ok(0);
    };

    let mut alerts = doc.alerts().to_vec();
    alerts.sort_by_key(|alert| alert.line);
    for alert in &alerts {
        println!(
            "{}:{} {} {}",
            path.display(),
            alert.line,
            alert.scope,
            alert.check
        );
    }
    Ok(alerts.len())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    let config = match &options.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    let rules = config.rules()?;
    let walker = config.walker_config();
    let filter = config.file_filter()?;

    let files = collect_files(&options.paths, &filter)?;
    log::info!("Linting {} file(s) against {} rule(s)", files.len(), rules.len());

    let mut linter = RuleLinter {
        rules: &rules,
        words: options.words,
    };
    let mut failed = false;
    let mut total = 0;
    for path in &files {
        match report_file(path, &walker, &mut linter) {
            Ok(count) => total += count,
            Err(e) => {
                log::error!("{e:#}");
                failed = true;
            }
        }
    }
    log::info!("{total} alert(s)");

    if failed {
        process::exit(1);
    }
    Ok(())
}
