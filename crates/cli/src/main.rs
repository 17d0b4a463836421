use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triage_core::{
    AgeGroup, AnswerValue, DurationBucket, ForWhom, Lexicon, MedicalContext, NarrativeInput,
    SeverityLevel, SeverityScore, StructuredInput, SymptomInput, TriageEngine, TriageError,
    TriageResult,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom-urgency triage engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a free-text symptom narrative
    Assess {
        /// Symptom description in the patient's own words
        symptoms: String,
        /// Onset bucket (just_started, today, several_days, about_a_week, week_or_more)
        #[arg(long)]
        duration: Option<String>,
        /// Severity level (mild, moderate, severe)
        #[arg(long)]
        severity: Option<String>,
        /// Follow-up answer as key=yes|no, repeatable (e.g. chest_pain=yes)
        #[arg(long = "answer")]
        answers: Vec<String>,
        /// Relevant medical history (passed through, never parsed)
        #[arg(long)]
        history: Option<String>,
        /// Current medications (passed through, never parsed)
        #[arg(long)]
        medications: Option<String>,
        /// Path to a replacement lexicon YAML document
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Classify a red-flag checklist selection
    Checklist {
        /// Severity score, 1-10
        #[arg(long)]
        severity_score: u8,
        /// Selected red-flag ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        red_flags: Vec<String>,
        /// Selected symptom tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Onset bucket (just_started, today, several_days, about_a_week, week_or_more)
        #[arg(long)]
        duration: Option<String>,
        /// Age group (child, adult, senior)
        #[arg(long)]
        age_group: Option<String>,
        /// Who the checklist is for (self, other)
        #[arg(long)]
        for_whom: Option<String>,
        /// Path to a replacement lexicon YAML document
        #[arg(long)]
        lexicon: Option<PathBuf>,
    },
    /// Inspect or validate lexicon documents
    Lexicon {
        #[command(subcommand)]
        command: LexiconCommands,
    },
}

#[derive(Subcommand)]
enum LexiconCommands {
    /// Validate a lexicon YAML document
    Validate {
        /// Path to the document
        path: PathBuf,
    },
    /// Print the built-in lexicon as YAML (a starting point for replacements)
    Show,
}

fn load_engine(lexicon_path: Option<PathBuf>) -> TriageResult<TriageEngine> {
    match lexicon_path {
        Some(path) => TriageEngine::new(Lexicon::from_yaml_file(path)?),
        None => Ok(TriageEngine::default()),
    }
}

fn parse_duration(raw: Option<String>) -> TriageResult<Option<DurationBucket>> {
    raw.map(|s| {
        DurationBucket::from_wire(&s)
            .ok_or_else(|| TriageError::InvalidInput(format!("unknown duration bucket '{s}'")))
    })
    .transpose()
}

fn parse_answer(raw: &str) -> TriageResult<(String, AnswerValue)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        TriageError::InvalidInput(format!("answer '{raw}' must be key=yes|no"))
    })?;
    if key.trim().is_empty() {
        return Err(TriageError::InvalidInput(format!(
            "answer '{raw}' has an empty key"
        )));
    }
    Ok((
        key.trim().to_string(),
        AnswerValue::Choice(value.trim().to_string()),
    ))
}

fn print_assessment(engine: &TriageEngine, input: &SymptomInput, context: Option<MedicalContext>) {
    let assessment = engine.classify(input, context);
    match serde_json::to_string_pretty(&assessment) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error rendering assessment: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            symptoms,
            duration,
            severity,
            answers,
            history,
            medications,
            lexicon,
        }) => {
            let result = (|| -> TriageResult<(TriageEngine, SymptomInput)> {
                let engine = load_engine(lexicon)?;
                let mut input = NarrativeInput::new(&symptoms)?;
                input.duration = parse_duration(duration)?;
                input.severity = severity
                    .map(|s| {
                        SeverityLevel::from_wire(&s).ok_or_else(|| {
                            TriageError::InvalidInput(format!("unknown severity level '{s}'"))
                        })
                    })
                    .transpose()?;
                for raw in &answers {
                    let (key, value) = parse_answer(raw)?;
                    input.answers.insert(key, value);
                }
                Ok((engine, SymptomInput::Narrative(input)))
            })();

            match result {
                Ok((engine, input)) => {
                    let context = (history.is_some() || medications.is_some()).then(|| {
                        MedicalContext {
                            history,
                            medications,
                        }
                    });
                    print_assessment(&engine, &input, context);
                }
                Err(e) => {
                    eprintln!("Error assessing narrative: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Checklist {
            severity_score,
            red_flags,
            tags,
            duration,
            age_group,
            for_whom,
            lexicon,
        }) => {
            let result = (|| -> TriageResult<(TriageEngine, SymptomInput)> {
                let engine = load_engine(lexicon)?;
                let mut input = StructuredInput::new(SeverityScore::new(severity_score)?);
                input.selected_red_flags = red_flags;
                input.selected_symptom_tags = tags;
                input.duration = parse_duration(duration)?;
                input.age_group = age_group
                    .map(|s| {
                        AgeGroup::from_wire(&s).ok_or_else(|| {
                            TriageError::InvalidInput(format!("unknown age group '{s}'"))
                        })
                    })
                    .transpose()?;
                input.for_whom = for_whom
                    .map(|s| {
                        ForWhom::from_wire(&s).ok_or_else(|| {
                            TriageError::InvalidInput(format!("unknown for_whom value '{s}'"))
                        })
                    })
                    .transpose()?;
                Ok((engine, SymptomInput::Structured(input)))
            })();

            match result {
                Ok((engine, input)) => print_assessment(&engine, &input, None),
                Err(e) => {
                    eprintln!("Error assessing checklist: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Lexicon { command }) => match command {
            LexiconCommands::Validate { path } => match Lexicon::from_yaml_file(&path) {
                Ok(lexicon) => {
                    println!(
                        "Valid lexicon: version {}, {} emergency phrases, {} urgent phrases, {} condition rules, {} red flags",
                        lexicon.version,
                        lexicon.emergency_phrases.len(),
                        lexicon.urgent_phrases.len(),
                        lexicon.condition_map.len(),
                        lexicon.red_flags.len()
                    );
                }
                Err(e) => {
                    eprintln!("Error validating lexicon: {e}");
                    std::process::exit(1);
                }
            },
            LexiconCommands::Show => match Lexicon::builtin().to_yaml_string() {
                Ok(yaml) => println!("{yaml}"),
                Err(e) => {
                    eprintln!("Error rendering lexicon: {e}");
                    std::process::exit(1);
                }
            },
        },
        None => {
            println!("Use 'triage --help' for commands");
        }
    }
}
