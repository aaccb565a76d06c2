//! Command-line entry point
//!
//! `crag [--config PATH] [--corpus PATH] [--verbose] [--json] <QUERY>`

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use crate::config::AppConfig;
use crate::domain::CragOutcome;
use crate::infrastructure::corpus::JsonCorpusSource;
use crate::infrastructure::credentials::{load_secrets, CredentialProviderFactory};
use crate::infrastructure::logging;

/// Corrective RAG - answer a question from a local corpus, falling back to web search
#[derive(Debug, Parser)]
#[command(name = "crag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON question/answer corpus, overrides `corpus.path`
    #[arg(long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Log the judge prompt and raw reply
    #[arg(long)]
    pub verbose: bool,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// The question to answer
    pub query: String,
}

impl Cli {
    /// Layer command-line overrides over the loaded configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref path) = self.corpus {
            config.corpus.path = path.clone();
        }

        if self.verbose {
            config.crag.verbose = true;
        }
    }
}

/// Load everything, answer the query once and print the result
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    logging::init_logging(&config.logging)?;

    let credentials = CredentialProviderFactory::create(&config.credentials);
    let secrets = load_secrets(credentials.as_ref()).await.map_err(|e| {
        error!(error = %e, "Startup aborted");
        e
    })?;

    let corpus = crate::load_corpus(&JsonCorpusSource::new(&config.corpus.path)).await?;

    let pipeline = crate::build_pipeline(&config, &secrets, corpus)?;
    let outcome = pipeline.answer(&cli.query).await?;

    print_outcome(&outcome, cli.json)
}

fn print_outcome(outcome: &CragOutcome, json: bool) -> anyhow::Result<()> {
    write_outcome(outcome, json, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())
}

/// The answer goes to `out`, the untrusted-source warning to `err`
fn write_outcome(
    outcome: &CragOutcome,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(outcome)?)?;
        return Ok(());
    }

    if outcome.advisory {
        writeln!(
            err,
            "Warning: no results came from a trusted domain, verify this answer independently."
        )?;
    }

    writeln!(out, "{}", outcome.answer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn render(outcome: &CragOutcome, json: bool) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_outcome(outcome, json, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_advisory_warning_goes_to_stderr() {
        let outcome = CragOutcome::web("Keytruda is given by IV infusion.", true, 1);

        let (out, err) = render(&outcome, false);

        assert_eq!(out, "Keytruda is given by IV infusion.\n");
        assert!(err.contains("no results came from a trusted domain"));
    }

    #[test]
    fn test_trusted_answer_prints_without_warning() {
        let outcome = CragOutcome::local("Keytruda is manufactured by Merck & Co.", 2);

        let (out, err) = render(&outcome, false);

        assert_eq!(out, "Keytruda is manufactured by Merck & Co.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_json_output_carries_the_advisory_flag() {
        let outcome = CragOutcome::web("Keytruda is given by IV infusion.", true, 1);

        let (out, err) = render(&outcome, true);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["answer"], "Keytruda is given by IV infusion.");
        assert_eq!(value["advisory"], true);
        assert_eq!(value["went_to_web"], true);
        assert_eq!(value["ranked_index"], 1);
        assert!(err.is_empty());
    }

    #[test]
    fn test_parses_query_and_flags() {
        let cli = Cli::try_parse_from([
            "crag",
            "--corpus",
            "keytruda.json",
            "--verbose",
            "--json",
            "How is Keytruda administered?",
        ])
        .unwrap();

        assert_eq!(cli.query, "How is Keytruda administered?");
        assert_eq!(cli.corpus, Some(PathBuf::from("keytruda.json")));
        assert!(cli.verbose);
        assert!(cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_missing_query_is_a_usage_error() {
        let error = Cli::try_parse_from(["crag"]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_extra_positional_is_a_usage_error() {
        let error = Cli::try_parse_from(["crag", "first", "second"]).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_overrides_applied_to_config() {
        let cli = Cli::try_parse_from(["crag", "--corpus", "other.json", "--verbose", "q"]).unwrap();
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.corpus.path, PathBuf::from("other.json"));
        assert!(config.crag.verbose);
    }

    #[test]
    fn test_overrides_leave_config_alone_when_absent() {
        let cli = Cli::try_parse_from(["crag", "q"]).unwrap();
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.corpus.path, PathBuf::from("data/corpus.json"));
        assert!(!config.crag.verbose);
    }
}
