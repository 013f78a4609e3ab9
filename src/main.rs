use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use social_metrics::ai::{render_summary_table, GeminiClient, ReportGenerator, SentimentClassifier};
use social_metrics::config::AppConfig;
use social_metrics::db::Database;
use social_metrics::export;
use social_metrics::filter::FilterCriteria;
use social_metrics::logging::{init_logging, OperationTimer};
use social_metrics::metrics::MetricsCollector;
use social_metrics::models::{
    distinct_networks, distinct_reasons, DateRange, ExportFormat, NewTabulation, Reason, Sentiment,
    SocialNetwork, TabulationRecord,
};
use social_metrics::validation::InputValidator;
use social_metrics::{summarize, word_frequency_corpus, TabulationError};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by the read-side subcommands
#[derive(Args, Debug)]
struct FilterArgs {
    /// Restrict to these social networks (repeatable); all present when omitted
    #[arg(long = "network")]
    networks: Vec<SocialNetwork>,

    /// Restrict to these contact reasons (repeatable); all present when omitted
    #[arg(long = "reason")]
    reasons: Vec<Reason>,

    /// Start date (YYYY-MM-DD); applied only together with --to
    #[arg(long)]
    from: Option<String>,

    /// End date (YYYY-MM-DD); applied only together with --from
    #[arg(long)]
    to: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new customer-service contact
    Add {
        /// Customer name
        #[arg(short, long)]
        client: String,

        /// Social network the contact arrived through
        #[arg(short, long)]
        network: SocialNetwork,

        /// Main message text
        #[arg(short, long)]
        message: Option<String>,

        /// Video link (YouTube contacts)
        #[arg(long)]
        link: Option<String>,

        /// Star rating 1-5 (Play Store contacts)
        #[arg(long)]
        rating: Option<u8>,

        /// Reason for the contact
        #[arg(long, default_value = "Outro")]
        reason: Reason,

        /// Sentiment of the contact
        #[arg(long, default_value = "Neutro")]
        sentiment: Sentiment,

        /// Routing destination
        #[arg(short, long, default_value = "")]
        destination: String,

        /// Suggest sentiment and reason from the message via the AI classifier
        #[arg(long)]
        classify: bool,
    },
    /// List recorded contacts, most recent first
    Feed {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the dashboard summary for the filtered records
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// How many corpus words to show
        #[arg(long, default_value = "10")]
        words: usize,
    },
    /// Generate the narrative executive CX report
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        /// Also save the report as a Markdown file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the filtered records to a file
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format (csv or json); config default when omitted
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file; defaults to the configured output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Insert sample records for demos and manual testing
    Seed {
        /// How many records to insert
        #[arg(long, default_value = "20")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let _guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
    )?;

    info!("Starting social-metrics");

    let cli = Cli::parse();
    let db = Database::new(&config.get_database_path())?;

    match cli.command {
        Commands::Add {
            client,
            network,
            message,
            link,
            rating,
            reason,
            sentiment,
            destination,
            classify,
        } => {
            let new = NewTabulation {
                client_name: InputValidator::sanitize_text(&client),
                social_network: network,
                message_text: message.map(|m| InputValidator::sanitize_text(&m)),
                link,
                rating,
                reason,
                sentiment,
                destination_center: InputValidator::sanitize_text(&destination),
            };
            add_tabulation(&config, &db, new, classify).await?;
        }
        Commands::Feed { filters } => show_feed(&db, &filters)?,
        Commands::Summary { filters, words } => show_summary(&db, &filters, words)?,
        Commands::Report { filters, output } => {
            generate_report(&config, &db, &filters, output.as_deref()).await?;
        }
        Commands::Export {
            filters,
            format,
            output,
        } => export_records(&config, &db, &filters, format, output)?,
        Commands::Seed { count } => seed_records(&db, count)?,
    }

    Ok(())
}

/// Record one contact, optionally running the AI classifier over its message.
///
/// A classifier fallback keeps the manually supplied sentiment and reason; a
/// model suggestion replaces them.
async fn add_tabulation(
    config: &AppConfig,
    db: &Database,
    mut new: NewTabulation,
    classify: bool,
) -> Result<()> {
    if classify {
        apply_classification(config, &mut new).await;
    }

    let record = db.insert(new)?;
    println!(
        "Saved tabulation #{} ({} | {} | {})",
        record.id, record.social_network, record.reason, record.sentiment
    );

    Ok(())
}

/// Run the express analysis and fold the suggestion into the input
async fn apply_classification(config: &AppConfig, new: &mut NewTabulation) {
    let Some(api_key) = config.api_key() else {
        warn!("No Gemini API key configured; skipping express analysis");
        return;
    };

    let text = new.message_text.clone().unwrap_or_default();
    if text.trim().is_empty() {
        warn!("No message text to classify; keeping manual values");
        return;
    }

    let client = match GeminiClient::new(&config.ai, api_key) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Classifier unavailable; keeping manual values");
            return;
        }
    };

    let classifier = SentimentClassifier::new(Box::new(client));
    let collector = MetricsCollector::default();

    let started = Instant::now();
    let suggestion = classifier.classify(&text).await;
    collector.record_classification(suggestion.is_fallback(), started.elapsed());

    if suggestion.is_fallback() {
        info!("Classifier fell back; keeping manual values");
    } else {
        let classification = suggestion.classification();
        info!(
            sentiment = %classification.sentiment,
            reason = %classification.reason,
            "Applying classifier suggestion"
        );
        new.sentiment = classification.sentiment;
        new.reason = classification.reason;
    }
}

/// Print the filtered records, most recent first
fn show_feed(db: &Database, filters: &FilterArgs) -> Result<()> {
    let filtered = load_filtered(db, filters)?;

    if filtered.is_empty() {
        println!("O feed está vazio.");
        return Ok(());
    }

    for record in &filtered {
        println!(
            "#{} [{}] {} | {} | {} | {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.social_network,
            record.client_name,
            record.sentiment,
            record.reason,
        );

        if let Some(message) = &record.message_text {
            println!("    \"{message}\"");
        }
        if let Some(link) = &record.link {
            println!("    link: {link}");
        }
        if let Some(rating) = record.rating {
            println!("    rating: {rating}/5");
        }
        if !record.destination_center.is_empty() {
            println!("    destino: {}", record.destination_center);
        }
    }

    Ok(())
}

/// Print the dashboard summary and the top corpus words
fn show_summary(db: &Database, filters: &FilterArgs, words: usize) -> Result<()> {
    let filtered = load_filtered(db, filters)?;

    if filtered.is_empty() {
        println!("Nenhum dado encontrado para os filtros selecionados.");
        return Ok(());
    }

    let summary = summarize(&filtered);

    println!("Total de contatos: {}", summary.total_count);
    println!("% Sentimento positivo: {:.1}%", summary.positive_percentage);
    if let Some(network) = summary.most_active_network {
        println!("Rede mais ativa: {network}");
    }

    println!("\nVolume por rede social:");
    for (network, count) in &summary.network_counts {
        println!("  {network}: {count}");
    }

    println!("\nMotivos frequentes:");
    for (reason, count) in &summary.reason_counts {
        println!("  {reason}: {count}");
    }

    let corpus = word_frequency_corpus(&filtered);
    if !corpus.is_empty() {
        let analyzer = social_metrics::text::CorpusAnalyzer::new()?;
        let ranked = analyzer.word_frequencies(&corpus, words);

        if !ranked.is_empty() {
            println!("\nPalavras mais frequentes:");
            for (word, count) in ranked {
                println!("  {word}: {count}");
            }
        }
    }

    Ok(())
}

/// Generate the narrative report over the filtered records
async fn generate_report(
    config: &AppConfig,
    db: &Database,
    filters: &FilterArgs,
    output: Option<&Path>,
) -> Result<()> {
    let filtered = load_filtered(db, filters)?;

    if filtered.is_empty() {
        println!("Não há dados para analisar.");
        return Ok(());
    }

    let Some(api_key) = config.api_key() else {
        println!("Relatório indisponível: configure a Gemini API Key (GEMINI_API_KEY).");
        return Ok(());
    };

    let client = GeminiClient::new(&config.ai, api_key)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini client: {e}"))?;
    let generator = ReportGenerator::new(Box::new(client));
    let collector = MetricsCollector::default();

    let table = render_summary_table(&filtered);

    let timer = OperationTimer::new("generate_report");
    let started = Instant::now();
    let report = generator.generate(&table).await;
    collector.record_report(started.elapsed());
    timer.finish();

    println!("{report}");

    if let Some(path) = output {
        export::save_report(&report, path)?;
        println!("\nRelatório salvo em {}", path.display());
    }

    Ok(())
}

/// Export the filtered records to a CSV or JSON file
fn export_records(
    config: &AppConfig,
    db: &Database,
    filters: &FilterArgs,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let filtered = load_filtered(db, filters)?;

    let format = match format {
        Some(format) => format,
        None => config.export.default_format.parse::<ExportFormat>()?,
    };

    let path = output.unwrap_or_else(|| {
        PathBuf::from(&config.export.output_directory)
            .join(format!("tabulations.{}", format.extension()))
    });

    export::write_records(&filtered, format, &path)?;
    println!("Exported {} records to {}", filtered.len(), path.display());

    Ok(())
}

/// Insert sample records spread over the last 48 hours
fn seed_records(db: &Database, count: usize) -> Result<()> {
    const CLIENTS: [&str; 6] = [
        "João Silva",
        "Maria Oliveira",
        "Carlos Souza",
        "Ana Costa",
        "Pedro Santos",
        "Julia Lima",
    ];
    const MESSAGES: [&str; 10] = [
        "Adorei o novo produto, parabéns!",
        "Não consigo acessar minha conta, podem ajudar?",
        "O app está fechando sozinho no Android.",
        "Qual o valor do frete para São Paulo?",
        "Excelente atendimento, muito rápido.",
        "O vídeo de vocês é muito explicativo, obrigado!",
        "Tive um problema com meu pedido #123.",
        "Sugestão: adicionem modo escuro no app.",
        "O suporte demorou muito para responder.",
        "Melhor marca do mercado!",
    ];
    // The classifier's output subset; seeds mimic records it has labeled.
    const SEED_REASONS: [Reason; 4] = [Reason::Comercial, Reason::Suporte, Reason::Bug, Reason::Elogio];

    let mut rng = rand::thread_rng();
    let now = Local::now().naive_local();

    for _ in 0..count {
        let network = *SocialNetwork::ALL.choose(&mut rng).unwrap_or(&SocialNetwork::Instagram);
        let created_at = now - Duration::hours(rng.gen_range(1..=48));

        let new = NewTabulation {
            client_name: (*CLIENTS.choose(&mut rng).unwrap_or(&"João Silva")).to_string(),
            social_network: network,
            message_text: MESSAGES.choose(&mut rng).map(|m| (*m).to_string()),
            link: None,
            rating: (network == SocialNetwork::PlayStore).then(|| rng.gen_range(4..=5)),
            reason: *SEED_REASONS.choose(&mut rng).unwrap_or(&Reason::Outro),
            sentiment: *Sentiment::ALL.choose(&mut rng).unwrap_or(&Sentiment::Neutro),
            destination_center: "Central SP".to_string(),
        };

        db.insert_at(new, created_at)?;
    }

    println!("Dados de exemplo inseridos com sucesso! ({count} registros)");
    Ok(())
}

/// Read everything committed and apply the user-chosen filters
fn load_filtered(db: &Database, filters: &FilterArgs) -> Result<Vec<TabulationRecord>> {
    let records = db.list_all()?;
    let criteria = build_criteria(&records, filters)?;
    Ok(criteria.apply(&records))
}

/// Build filter criteria from the CLI flags.
///
/// Omitted network/reason flags select every value present in the records,
/// mirroring a dashboard whose multiselects default to everything observed.
fn build_criteria(records: &[TabulationRecord], filters: &FilterArgs) -> Result<FilterCriteria> {
    let networks = if filters.networks.is_empty() {
        distinct_networks(records)
    } else {
        filters.networks.iter().copied().collect()
    };

    let reasons = if filters.reasons.is_empty() {
        distinct_reasons(records)
    } else {
        filters.reasons.iter().copied().collect()
    };

    let date_range = DateRange {
        start: filters.from.as_deref().map(parse_date).transpose()?,
        end: filters.to.as_deref().map(parse_date).transpose()?,
    };
    InputValidator::validate_date_range(&date_range)?;

    Ok(FilterCriteria {
        networks,
        reasons,
        date_range,
    })
}

/// Parse a `YYYY-MM-DD` CLI date
fn parse_date(raw: &str) -> Result<NaiveDate, TabulationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TabulationError::InvalidDate(format!("{raw} (use YYYY-MM-DD)")))
}
