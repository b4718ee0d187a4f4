use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sensei_core::config::Config;
use sensei_core::corpus::CorpusHandle;
use sensei_core::review::NO_COVERAGE_SUMMARY;
use sensei_core::types::ReviewRequest;
use sensei_retrieval::prompt::{system_prompt, user_prompt};
use sensei_retrieval::{RetrievalOutcome, ReviewPipeline, Retriever};

#[derive(Parser)]
#[command(name = "sensei", about = "Retrieve the coding standards that apply to a piece of code")]
struct Cli {
    /// Directory holding config.toml (defaults to the current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Standards directory, overriding `corpus.standards_dir`
    #[arg(long, global = true)]
    standards_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List loaded rules, optionally scoped to a language
    Rules {
        #[arg(long)]
        language: Option<String>,
    },
    /// Show the review facets planned for a request
    Facets(RequestArgs),
    /// Rank the rules that apply to a request
    Retrieve {
        #[command(flatten)]
        request: RequestArgs,
        /// Print rules as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the prompts the reasoning step would receive
    Prompt(RequestArgs),
}

#[derive(Args)]
struct RequestArgs {
    #[arg(long)]
    language: String,
    /// File with the code to review; stdin when omitted
    #[arg(long)]
    code_file: Option<PathBuf>,
    #[arg(long)]
    context: Option<String>,
}

impl RequestArgs {
    fn into_request(self) -> anyhow::Result<ReviewRequest> {
        let code = match &self.code_file {
            Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("reading code from stdin")?;
                buf
            }
        };
        let mut request = ReviewRequest::new(self.language, code);
        request.context = self.context;
        Ok(request)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config_dir {
        Some(dir) => Config::load_from(dir),
        None => Config::load(),
    }
    .map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    let standards_dir = match cli.standards_dir {
        Some(dir) => dir,
        None => config.standards_dir()?,
    };

    let corpus = Arc::new(CorpusHandle::new(standards_dir));
    // Refuse to serve anything without a usable corpus.
    let loaded = corpus.get()?;
    let pipeline: ReviewPipeline = ReviewPipeline::new(Arc::clone(&corpus), Retriever::new(settings.retrieval));

    match cli.command {
        Command::Rules { language } => {
            let rules = match language.as_deref() {
                Some(lang) => loaded.scoped_to(lang),
                None => loaded.chunks().to_vec(),
            };
            for rule in &rules {
                println!("{:<16} {:<36} {} / {}", rule.rule_id, rule.scope, rule.doc_name, rule.section_title);
            }
            println!("\n📊 {} of {} rules", rules.len(), loaded.len());
        }
        Command::Facets(args) => {
            let request = args.into_request()?;
            for (i, facet) in pipeline.retriever().planner().plan_for(&request).iter().enumerate() {
                println!("  {}. {}", i + 1, facet);
            }
        }
        Command::Retrieve { request, json } => {
            let request = request.into_request()?;
            let scored = pipeline.retriever().retrieve_scored(&request, loaded.chunks())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scored)?);
            } else if scored.is_empty() {
                println!("{}", NO_COVERAGE_SUMMARY);
            } else {
                println!("🔍 {} rules for language '{}'", scored.len(), request.language);
                for (i, hit) in scored.iter().enumerate() {
                    println!("\n  {}. score={:.4}  id={}  doc={}", i + 1, hit.score, hit.chunk.rule_id, hit.chunk.doc_name);
                    println!("     {}", hit.chunk.text.replace('\n', "\n     "));
                }
            }
        }
        Command::Prompt(args) => {
            let request = args.into_request()?;
            match pipeline.outcome(&request)? {
                RetrievalOutcome::NoCoverage => println!("{}", NO_COVERAGE_SUMMARY),
                RetrievalOutcome::Rules(rules) => {
                    println!("=== system ===\n{}", system_prompt());
                    println!("=== user ===\n{}", user_prompt(&request, &rules));
                }
            }
        }
    }
    Ok(())
}
