//! Codetrace CLI
//!
//! Analyze a snippet and print the trace, or replay it step by step.
//!
//! # Usage
//!
//! ```bash
//! # JSON trace, language inferred from the extension
//! codetrace analyze snippet.java --pretty
//!
//! # From stdin
//! echo 'let x = 5; console.log(x);' | codetrace analyze --language javascript
//!
//! # What the player shows at every step
//! codetrace replay snippet.cpp --config analyzer.yaml
//! ```

use clap::{Args, Parser, Subcommand};
use codetrace_ir::{AnalysisResult, AnalyzerConfig, Dispatcher, Language};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codetrace")]
#[command(about = "Turn a code snippet into a replayable execution trace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analysis result as JSON
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print what the player shows after each step
    Replay {
        #[command(flatten)]
        input: InputArgs,
    },

    /// List supported language tags
    Languages,
}

#[derive(Args)]
struct InputArgs {
    /// Source file (stdin when omitted)
    file: Option<PathBuf>,

    /// Language tag; inferred from the file extension when omitted
    #[arg(short, long)]
    language: Option<String>,

    /// Analyzer config (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn read_source(&self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut source = String::new();
                std::io::stdin().read_to_string(&mut source)?;
                Ok(source)
            }
        }
    }

    fn language(&self) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(tag) = &self.language {
            return Ok(tag.clone());
        }
        self.file
            .as_ref()
            .and_then(|path| Language::from_file_path(&path.to_string_lossy()))
            .map(|language| language.name().to_string())
            .ok_or_else(|| "cannot infer the language; pass --language".into())
    }

    fn config(&self) -> Result<AnalyzerConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => Ok(AnalyzerConfig::from_yaml(path)?),
            None => Ok(AnalyzerConfig::default()),
        }
    }

    fn analyze(&self) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
        let source = self.read_source()?;
        let language = self.language()?;
        let dispatcher = Dispatcher::new(&self.config()?);
        Ok(dispatcher.analyze(&source, &language))
    }
}

fn print_replay(result: &AnalysisResult) {
    println!("Structures: {}", join(result.structures.iter().map(|s| s.to_string())));
    for step in &result.steps {
        let Some(snapshot) = result.snapshot(step.index) else {
            continue;
        };
        println!("\n[step {}]", step.index);
        println!("  nodes: {}", join(snapshot.nodes.iter().map(|n| n.label.clone())));
        if !snapshot.variables.is_empty() {
            let vars = snapshot.variables.iter().map(|(name, value)| format!("{name}={value}"));
            println!("  variables: {}", join(vars));
        }
        if let Some(node) = snapshot.active_node_id {
            println!("  active node: {node}");
        }
        if let Some(edge) = snapshot.active_edge_id {
            println!("  active edge: {edge}");
        }
        if let Some(output) = &step.output {
            println!("  output: {output}");
        }
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, pretty } => {
            let result = input.analyze()?;
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }

        Commands::Replay { input } => {
            let result = input.analyze()?;
            print_replay(&result);
        }

        Commands::Languages => {
            for language in Language::ALL {
                println!("{:<12} {}", language.name(), language.extensions().join(", "));
            }
        }
    }

    Ok(())
}
