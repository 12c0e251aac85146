use std::fmt;

use quiz_core::model::{OptionLetter, SubjectFilter};
use quiz_core::{PerformanceSummary, QuizPhase, format_elapsed};
use services::{
    Clock, ExtractionProgress, ExtractionSettings, QuestionOrder, SimulatedPdfExtractor,
    SourceDocument, StudyService, StudyStep,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Seconds of study time credited per answered question in the demo run.
const SECONDS_PER_QUESTION: u64 = 45;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidSubject(quiz_core::Error),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidSubject(err) => write!(f, "invalid --subject value: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--subject <name|all>] [--shuffle] [--seed <n>]");
    eprintln!();
    eprintln!("Runs a simulated PDF extraction, answers every question with option A,");
    eprintln!("and prints the resulting performance analytics.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CFA_QUIZ_SUBJECT, CFA_QUIZ_SHUFFLE, CFA_QUIZ_SEED");
    eprintln!("  CFA_QUIZ_EXTRACT_TICKS, CFA_QUIZ_EXTRACT_TICK_MS");
    eprintln!("  RUST_LOG (default: info)");
}

struct Args {
    filter: SubjectFilter,
    order: QuestionOrder,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut filter = match std::env::var("CFA_QUIZ_SUBJECT") {
            Ok(raw) => parse_filter(&raw)?,
            Err(_) => SubjectFilter::All,
        };
        let mut order = std::env::var("CFA_QUIZ_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(QuestionOrder::AsExtracted, QuestionOrder::Seeded);
        if order == QuestionOrder::AsExtracted
            && std::env::var("CFA_QUIZ_SHUFFLE").is_ok_and(|v| v == "1" || v == "true")
        {
            order = QuestionOrder::Shuffled;
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--subject" => {
                    let value = require_value(args, "--subject")?;
                    filter = parse_filter(&value)?;
                }
                "--shuffle" => order = QuestionOrder::Shuffled,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let seed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    order = QuestionOrder::Seeded(seed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { filter, order })
    }
}

fn parse_filter(raw: &str) -> Result<SubjectFilter, ArgsError> {
    SubjectFilter::parse(raw).map_err(|err| ArgsError::InvalidSubject(err.into()))
}

fn report_progress(progress: ExtractionProgress) {
    if progress.percent % 10 == 0 {
        info!(
            percent = progress.percent,
            extracted = progress.extracted,
            "extracting"
        );
    }
}

fn print_summary(summary: &PerformanceSummary, studied_seconds: u64) {
    println!();
    println!(
        "Overall score: {}% ({} of {} correct)",
        summary.overall_score, summary.correct_answers, summary.total_questions
    );
    println!("Study time: {}", format_elapsed(studied_seconds));

    println!();
    println!("Subject performance:");
    for stat in &summary.subject_performance {
        println!(
            "  {:<24} {:>3}% ({}/{})",
            stat.label, stat.score, stat.correct, stat.total
        );
    }

    println!();
    println!("Strengths:");
    if summary.strengths.is_empty() {
        println!("  Complete more questions to identify strengths");
    }
    for stat in &summary.strengths {
        println!("  {} {}%", stat.subject, stat.score);
    }

    println!("Areas for improvement:");
    if summary.weaknesses.is_empty() {
        println!("  No weak areas identified yet.");
    }
    for stat in &summary.weaknesses {
        println!("  {} {}%", stat.subject, stat.score);
    }

    let trend: String = summary
        .recent_performance
        .iter()
        .map(|r| if r.correct { '+' } else { '-' })
        .collect();
    println!();
    println!("Recent trend: {trend}");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mut study = StudyService::new(Clock::default()).with_order(args.order);
    let extractor = SimulatedPdfExtractor::new(ExtractionSettings::from_env());
    let document = SourceDocument::pdf("cfa-level-1-question-bank.pdf", Vec::new());
    study
        .import(
            &extractor,
            &document,
            &report_progress,
            &CancellationToken::new(),
        )
        .await?;

    if study.set_subject_filter(args.filter)? == QuizPhase::NoQuestions {
        warn!("no questions available for the selected subject");
        return Ok(());
    }

    study.toggle_timer();
    let letter = OptionLetter::parse("A").ok_or("option letter A should parse")?;
    let score = loop {
        for _ in 0..SECONDS_PER_QUESTION {
            study.tick_timer();
        }
        study.select_answer(letter)?;
        study.submit_answer()?;
        if let StudyStep::Completed(score) = study.advance()? {
            break score;
        }
    };

    println!(
        "Quiz complete: {} correct, {} incorrect, {}%",
        score.correct, score.incorrect, score.percent
    );
    print_summary(&study.analytics(), study.timer().elapsed_seconds());
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
