use crate::infra::{parse_date, parse_format, parse_selections, read_rubric};
use chrono::NaiveDate;
use clap::Args;
use rubric_engine::error::AppError;
use rubric_engine::rubrics::{
    export, generate_colors, ActivityId, AssessmentSubmission, EngineConfig, ImportError,
    RubricId, RubricService, ShortRowPolicy, StudentId, TableFormat, WeightImbalancePolicy,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Path to the table; stdin is read when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Table format (markdown or csv); inferred from the file extension by default
    #[arg(long, value_parser = parse_format)]
    format: Option<TableFormat>,
    /// Identifier of the assembled rubric
    #[arg(long, default_value = "rubric")]
    id: String,
    /// Display name of the assembled rubric
    #[arg(long, default_value = "Imported rubric")]
    name: String,
    /// Score scale of the rubric (defaults to APP_DEFAULT_MAX_SCORE)
    #[arg(long)]
    max_score: Option<f64>,
    /// Fail on rows with fewer than two cells instead of skipping them
    #[arg(long)]
    strict_rows: bool,
    /// Fail when criterion weights do not sum to 1 instead of normalizing them
    #[arg(long)]
    reject_imbalance: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ColorsArgs {
    /// Number of performance levels
    count: usize,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Rubric JSON document produced by `rubric import`
    #[arg(long)]
    rubric: PathBuf,
    /// CSV with `criterion,level[,feedback]` columns
    #[arg(long)]
    selections: PathBuf,
    #[arg(long, default_value = "student")]
    student: String,
    #[arg(long, default_value = "activity")]
    activity: String,
    /// Assessment date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Overall feedback attached to the assessment
    #[arg(long)]
    feedback: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Rubric JSON document produced by `rubric import`
    #[arg(long)]
    rubric: PathBuf,
    #[arg(long, value_parser = parse_format, default_value = "markdown")]
    format: TableFormat,
}

pub(crate) fn run_import(args: ImportArgs, mut config: EngineConfig) -> Result<(), AppError> {
    if args.strict_rows {
        config.on_short_row = ShortRowPolicy::Reject;
    }
    if args.reject_imbalance {
        config.on_weight_imbalance = WeightImbalancePolicy::Reject;
    }
    let service = RubricService::new(config);

    let table = match args.input {
        Some(path) => service.importer().from_path(&path, args.format)?,
        None => {
            let format = args.format.ok_or_else(|| ImportError::FormatRequired {
                input: "stdin".to_string(),
            })?;
            service.importer().from_reader(std::io::stdin().lock(), format)?
        }
    };

    let mut draft = table.into_draft(args.name);
    draft.max_score = args.max_score;
    let rubric = service.create(RubricId::new(args.id), draft)?;

    info!(
        rubric = %rubric.id,
        criteria = rubric.criteria_count,
        levels = rubric.levels_count,
        "rubric imported"
    );
    println!("{}", serde_json::to_string_pretty(&rubric)?);
    Ok(())
}

pub(crate) fn run_colors(args: ColorsArgs) -> Result<(), AppError> {
    for color in generate_colors(args.count)? {
        println!("{color}");
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs, config: EngineConfig) -> Result<(), AppError> {
    let rubric = read_rubric(&args.rubric)?;
    let file = std::fs::File::open(&args.selections)?;
    let selections = parse_selections(file, &rubric)?;

    let submission = AssessmentSubmission {
        student_id: StudentId::new(args.student),
        activity_id: ActivityId::new(args.activity),
        selections,
        assessed_on: args.date,
        feedback: args.feedback,
    };
    let outcome = RubricService::new(config).assess(&rubric, submission)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let rubric = read_rubric(&args.rubric)?;
    match args.format {
        TableFormat::Markdown => print!("{}", export::render_markdown(&rubric)?),
        TableFormat::Csv => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export::write_csv(&rubric, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}
