use advisor_core::config::Settings;
use advisor_core::llm::openai::OpenAiCompatClient;
use advisor_core::workflow::FinancialAdvisor;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "financial-advisor", about = "Market analysis with short- and long-term investment recommendations")]
struct Args {
    /// Model identifier to request (overrides LLM_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Base URL of an OpenAI-compatible endpoint (overrides LLM_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Sampling temperature (overrides LLM_TEMPERATURE).
    #[arg(long)]
    temperature: Option<f32>,

    /// Maximum tokens per response (overrides LLM_MAX_TOKENS).
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Extra attempts for a recommendation that fails validation (overrides RECOMMENDATION_RETRIES).
    #[arg(long)]
    retries: Option<u32>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(model) = &self.model {
            settings.llm_model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.llm_base_url = base_url.clone();
        }
        if let Some(temperature) = self.temperature {
            settings.llm_temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.llm_max_tokens = max_tokens;
        }
        if let Some(retries) = self.retries {
            settings.recommendation_retries = retries;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    args.apply(&mut settings);

    tracing::info!(
        model = %settings.llm_model,
        base_url = %settings.llm_base_url,
        retries = settings.recommendation_retries,
        "starting financial advisor"
    );

    let client = OpenAiCompatClient::from_settings(&settings)?;
    let advisor = FinancialAdvisor::from_settings(&settings, Arc::new(client));

    match advisor.run().await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report::render(&report));
            }
            Ok(())
        }
        Err(err) => {
            let stage = err.stage();
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            let detail = format!("{err:#}");
            tracing::error!(%stage, error = %detail, "financial advisor run failed");
            Err(err)
        }
    }
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
