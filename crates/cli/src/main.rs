// ABOUTME: CLI driver for the corpus extraction core.
// ABOUTME: Loads a document file through a registry-constructed loader and prints ExtractedContent as JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use corpus_extract::{builtin_registry, HtmlLoader};

#[derive(Parser, Debug)]
#[command(name = "corpus-cli")]
#[command(about = "Extract normalized text segments from a document file")]
struct Args {
    /// Document file to load
    #[arg(long = "input")]
    input: Option<PathBuf>,

    /// Source URL of the document (selection rules are scoped by URL)
    #[arg(long = "url")]
    url: Option<String>,

    /// JSON file with component options (default: empty options)
    #[arg(long = "options")]
    options: Option<PathBuf>,

    /// Component identifier to construct
    #[arg(long = "component", default_value = HtmlLoader::IDENTIFIER)]
    component: String,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,

    /// List registered components and exit
    #[arg(long = "list")]
    list: bool,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let registry = builtin_registry();

    if args.list {
        for (identifier, result) in registry.create_all() {
            let definition = registry
                .definition(&identifier)
                .expect("enumerated identifier is registered");
            match result {
                Ok(component) => println!(
                    "{identifier}\t{}\t{}",
                    component.kind(),
                    definition.display_name()
                ),
                Err(e) => println!("{identifier}\terror\t{e}"),
            }
        }
        return Ok(());
    }

    let input = args
        .input
        .as_ref()
        .context("--input is required unless --list is given")?;
    let url = args
        .url
        .as_ref()
        .context("--url is required unless --list is given")?;
    url::Url::parse(url).with_context(|| format!("invalid --url `{url}`"))?;

    let raw_options = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {path:?}"))?;
            serde_json::from_str(&text)
                .with_context(|| format!("options file {path:?} is not valid JSON"))?
        }
        None => serde_json::json!({}),
    };

    let component = registry.create(&args.component, &raw_options)?;
    let Some(loader) = component.as_loader() else {
        bail!(
            "component `{}` is a {}, not a loader",
            args.component,
            component.kind()
        );
    };

    let bytes = fs::read(input).with_context(|| format!("failed to read {input:?}"))?;
    let content = loader.load(&bytes, url)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&content)?
    } else {
        serde_json::to_string(&content)?
    };
    println!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
