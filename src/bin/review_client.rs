//! Command-line review client.
//!
//! Sends reviews to the sentiment API and prints the verdict. When the API is
//! unreachable, slow or broken, results come from the local lexicon classifier.
//!
//! Usage:
//! ```
//! cargo run --bin review_client -- status
//! cargo run --bin review_client -- analyze --phone samsung "Smooth and fast, worth it."
//! cargo run --bin review_client -- analyze --sample negative
//! cargo run --bin review_client -- compare "Love the camera" "Battery is a problem"
//! ```

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use review_sentiment::remote::{Analysis, Source};
use review_sentiment::session::{random_sample, NoticeKind};
use review_sentiment::{
    ClassificationResult, Comparison, Config, Notice, PhoneModel, RemoteClassifier, ReviewSession,
    SentimentLabel,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify phone reviews with the sentiment API")]
struct Cli {
    /// Base URL of the sentiment API (overrides SENTIMENT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds (overrides SENTIMENT_API_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether the API is online, in demo mode or unreachable
    Status,
    /// Classify a single review
    Analyze {
        /// Phone the review is about
        #[arg(long, value_enum, default_value_t = Phone::Iphone)]
        phone: Phone,

        /// Use a random built-in review of this polarity instead of TEXT
        #[arg(long, value_enum, conflicts_with = "text")]
        sample: Option<Polarity>,

        /// Review text
        text: Option<String>,
    },
    /// Classify an iPhone 15 review and a Galaxy S24 review side by side
    Compare {
        iphone_review: String,
        samsung_review: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Phone {
    Iphone,
    Samsung,
    General,
}

impl From<Phone> for PhoneModel {
    fn from(phone: Phone) -> Self {
        match phone {
            Phone::Iphone => PhoneModel::Iphone,
            Phone::Samsung => PhoneModel::Samsung,
            Phone::General => PhoneModel::General,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl From<Polarity> for SentimentLabel {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Positive => SentimentLabel::Positive,
            Polarity::Neutral => SentimentLabel::Neutral,
            Polarity::Negative => SentimentLabel::Negative,
        }
    }
}

fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn print_result(heading: &str, result: &ClassificationResult) {
    println!("{}: {} ({}% confidence)", heading, result.sentiment, percent(result.confidence));
    let probs = &result.probabilities;
    println!(
        "  Positive {:>3}%  Neutral {:>3}%  Negative {:>3}%",
        percent(probs.positive),
        percent(probs.neutral),
        percent(probs.negative)
    );
    if !result.cleaned_text.is_empty() {
        println!("  Cleaned: {}", result.cleaned_text);
    }
}

fn print_notice(notice: &Notice) {
    let icon = match notice.kind {
        NoticeKind::Success if notice.celebrate => "🎉",
        NoticeKind::Success => "✅",
        NoticeKind::Error => "❌",
    };
    println!("{} {}", icon, notice.message);
}

fn print_source(source: Source) {
    if source == Source::Fallback {
        println!("  (offline: local keyword analysis)");
    }
}

fn render_analysis(phone: PhoneModel, analysis: &Analysis) {
    print_result(phone.display_name(), &analysis.result);
    print_source(analysis.source);
}

fn render_comparison(iphone: &ClassificationResult, samsung: &ClassificationResult, comparison: &Comparison) {
    print_result("iPhone 15", iphone);
    print_result("Galaxy S24", samsung);
    println!();
    println!("{}", comparison.summary);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs.max(1));
    }

    let client = RemoteClassifier::from_config(&config)?;

    match cli.command {
        Commands::Status => {
            let status = client.health().await;
            println!("{}: {}", client.base_url(), status);
        }
        Commands::Analyze { phone, sample, text } => {
            let text = match (sample, text) {
                (Some(polarity), _) => random_sample(polarity.into()).to_string(),
                (None, Some(text)) => text,
                (None, None) => bail!("Provide review text or --sample"),
            };
            let phone = PhoneModel::from(phone);
            let mut session = ReviewSession::new(phone);
            let analysis = session.analyze(&client, &text).await?;

            render_analysis(phone, &analysis);
            print_notice(&Notice::for_result(&analysis.result));
        }
        Commands::Compare {
            iphone_review,
            samsung_review,
        } => {
            let mut session = ReviewSession::default();
            let (pair, comparison) = session.compare(&client, &iphone_review, &samsung_review).await?;

            render_comparison(&pair.iphone, &pair.samsung, &comparison);
            print_source(pair.source);
        }
    }

    Ok(())
}
