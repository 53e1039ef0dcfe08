mod analysis;
mod input;
mod logging;
mod model;
mod plot;
mod report;
mod ruggedness;
mod stats;

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

use std::error::Error as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::analysis::auc::{DEFAULT_AUC_ROUND, auc};
use crate::analysis::counts::{CountColumn, barplot_counts};
use crate::analysis::cummax::cummax_round;
use crate::analysis::model_fit::{eval_model, model_performance, model_performance_curve};
use crate::analysis::overall::overall;
use crate::analysis::score_round::{DEFAULT_MAX_ROUND, score_round};
use crate::analysis::success::{SuccessLevel, success_ratio, success_ratio_plot};
use crate::analysis::violin_round::violin_and_cummax_round;
use crate::analysis::AnalysisError;
use crate::input::experiments::parse_run_arg;
use crate::input::{EVAL_PREFIX, Experiments, Landscape, RUN_PREFIX, read_data, read_landscape};
use crate::model::{Aggregate, CorrelationMethod, LineStyle, Orientation, ScoreColumn};
use crate::plot::style::parse_hex_color;
use crate::plot::{Figure, save_figure};
use crate::report::json::{RsRow, render_auc_json, render_rs_json, render_success_json};
use crate::report::text::{render_auc_table, render_rs_table, render_success_table};
use crate::ruggedness::{AMINO_ACIDS, DEFAULT_SUBGRAPH_SIZE, RoughnessToSlope, RsParams, rs};

#[derive(Debug, Parser)]
#[command(name = "landscape-plots", version)]
#[command(about = "Summarize and chart rounds of landscape optimization experiments")]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RunsArgs {
    /// Experiment run directory, as NAME=DIR. Repeatable.
    #[arg(long = "run", value_name = "NAME=DIR", value_parser = parse_run_arg)]
    runs: Vec<(String, PathBuf)>,
    /// JSON file with `runs` and optional `colors`/`linestyles`.
    #[arg(long, value_name = "FILE")]
    experiments: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct StyleArgs {
    /// Series color as #rrggbb. Repeatable; cycles when shorter than the series.
    #[arg(long = "color", value_name = "HEX", value_parser = parse_hex_color)]
    colors: Vec<RGBColor>,
    /// Series line style. Repeatable.
    #[arg(long = "linestyle", value_enum)]
    linestyles: Vec<LineStyle>,
}

#[derive(Debug, Args)]
struct FigureArgs {
    /// Output chart; `.svg` is written as SVG, anything else as PNG.
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,
    #[arg(long, default_value_t = 1024)]
    width: u32,
    #[arg(long, default_value_t = 768)]
    height: u32,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Debug, Args)]
struct LevelArgs {
    /// Target level in percent of the [global-min, global-max] range.
    #[arg(long, default_value_t = 100.0)]
    level: f64,
    #[arg(long = "global-max", default_value_t = 1.0)]
    global_max: f64,
    #[arg(long = "global-min", default_value_t = 0.0)]
    global_min: f64,
}

impl From<&LevelArgs> for SuccessLevel {
    fn from(args: &LevelArgs) -> Self {
        SuccessLevel {
            level: args.level,
            global_max: args.global_max,
            global_min: args.global_min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum XAxis {
    #[default]
    Round,
    Cost,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Violin per experiment of the per-rep aggregated score.
    Overall {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, value_enum, default_value_t = ScoreColumn::TrueScore)]
        score: ScoreColumn,
        #[arg(long, value_enum, default_value_t = Aggregate::Max)]
        method: Aggregate,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Mean running best per round (or measurement cost) with a confidence band.
    Cummax {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, value_enum, default_value_t = ScoreColumn::TrueScore)]
        score: ScoreColumn,
        #[arg(long, value_enum, default_value_t = Aggregate::Max)]
        method: Aggregate,
        #[arg(long, value_enum, default_value_t = XAxis::Round)]
        xaxis: XAxis,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Median over reps of the score reached by each round.
    ScoreRound {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, value_enum, default_value_t = ScoreColumn::TrueScore)]
        score: ScoreColumn,
        #[arg(long, value_enum, default_value_t = Aggregate::Max)]
        method: Aggregate,
        #[arg(long = "max-round", default_value_t = DEFAULT_MAX_ROUND)]
        max_round: u32,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Per-round violins of one run directory with the running best on top.
    ViolinRound {
        #[arg(long = "run-dir")]
        run_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = ScoreColumn::TrueScore)]
        score: ScoreColumn,
        /// Print the cumulative-max table to stdout.
        #[arg(long = "print-value")]
        print_value: bool,
        #[arg(long)]
        rep: Option<usize>,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Per-round violins of the model fit of one run directory.
    ModelPerformance {
        #[arg(long = "run-dir")]
        run_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = CorrelationMethod::Spearman)]
        method: CorrelationMethod,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Median model fit by round, one line per experiment.
    ModelCurve {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, value_enum, default_value_t = CorrelationMethod::Spearman)]
        method: CorrelationMethod,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Median model fit on held-out evaluation files by round.
    EvalModel {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, value_enum, default_value_t = CorrelationMethod::Spearman)]
        method: CorrelationMethod,
        #[arg(long, default_value = EVAL_PREFIX)]
        prefix: String,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Success ratio by round, one line per experiment.
    SuccessPlot {
        #[command(flatten)]
        runs: RunsArgs,
        #[command(flatten)]
        level: LevelArgs,
        /// Round whose ratio is printed. Repeatable; defaults to the last round.
        #[arg(long = "print-round")]
        print_rounds: Vec<u32>,
        #[command(flatten)]
        style: StyleArgs,
        #[command(flatten)]
        figure: FigureArgs,
    },
    /// Success ratio of each experiment at the given rounds.
    SuccessRatio {
        #[command(flatten)]
        runs: RunsArgs,
        #[command(flatten)]
        level: LevelArgs,
        /// Round to report. Repeatable; defaults to the last round.
        #[arg(long = "round")]
        rounds: Vec<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Area under the normalized running-best curve.
    Auc {
        #[command(flatten)]
        runs: RunsArgs,
        #[arg(long, default_value_t = DEFAULT_AUC_ROUND)]
        round: u32,
        #[arg(long, value_enum, default_value_t = ScoreColumn::TrueScore)]
        score: ScoreColumn,
        #[arg(long, value_enum, default_value_t = Aggregate::Max)]
        method: Aggregate,
        #[arg(long)]
        json: bool,
    },
    /// Mean roughness-to-slope ruggedness of each landscape.
    Ruggedness {
        /// Landscape CSV with a `seq` column. Repeatable.
        #[arg(long = "landscape", required_unless_present = "run_dirs")]
        landscapes: Vec<PathBuf>,
        /// Run directory whose measured `seq` rows form a landscape. Repeatable.
        #[arg(long = "run-dir")]
        run_dirs: Vec<PathBuf>,
        #[arg(long = "score-column", default_value = "score")]
        score_column: String,
        /// Cache file per landscape: `--landscape` files first, then `--run-dir`s.
        #[arg(long = "cache")]
        cache: Vec<PathBuf>,
        #[arg(long = "subgraph-size", default_value_t = DEFAULT_SUBGRAPH_SIZE)]
        subgraph_size: usize,
        #[arg(long = "amino-acids", default_value = AMINO_ACIDS)]
        amino_acids: String,
        #[arg(long)]
        json: bool,
    },
    /// Bar chart of row counts per round or rep.
    Count {
        #[arg(long = "run-dir")]
        run_dir: PathBuf,
        #[arg(long, default_value = RUN_PREFIX)]
        prefix: String,
        #[arg(long, value_enum, default_value_t = CountColumn::Round)]
        column: CountColumn,
        #[arg(long, value_enum, default_value_t = Orientation::Vertical)]
        orientation: Orientation,
        #[command(flatten)]
        figure: FigureArgs,
    },
}

impl RunsArgs {
    fn load(&self, style: &StyleArgs) -> Result<Experiments, AnalysisError> {
        let mut experiments = match &self.experiments {
            Some(path) => Experiments::from_json_file(path)?,
            None => Experiments::default(),
        };
        let mut cli = Experiments::from_runs(self.runs.iter().cloned());
        if !style.colors.is_empty() {
            cli.colors = Some(style.colors.clone());
        }
        if !style.linestyles.is_empty() {
            cli.linestyles = Some(style.linestyles.clone());
        }
        experiments.merge(cli);
        Ok(experiments)
    }
}

/// One chart command, ready to draw onto any backend.
#[derive(Debug)]
enum PlotJob {
    Overall {
        experiments: Experiments,
        score: ScoreColumn,
        method: Aggregate,
    },
    Cummax {
        experiments: Experiments,
        score: ScoreColumn,
        method: Aggregate,
        xaxis_is_round: bool,
    },
    ScoreRound {
        experiments: Experiments,
        score: ScoreColumn,
        method: Aggregate,
        max_round: u32,
    },
    ViolinRound {
        run_dir: PathBuf,
        score: ScoreColumn,
        print_value: bool,
        rep: Option<usize>,
    },
    ModelPerformance {
        run_dir: PathBuf,
        method: CorrelationMethod,
        face_colors: Option<Vec<RGBColor>>,
    },
    ModelCurve {
        experiments: Experiments,
        method: CorrelationMethod,
    },
    EvalModel {
        experiments: Experiments,
        method: CorrelationMethod,
        prefix: String,
    },
    SuccessPlot {
        experiments: Experiments,
        level: SuccessLevel,
        print_rounds: Option<Vec<u32>>,
    },
    Count {
        run_dir: PathBuf,
        prefix: String,
        column: CountColumn,
        orientation: Orientation,
    },
}

impl Figure for PlotJob {
    type Error = AnalysisError;

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), AnalysisError> {
        match self {
            PlotJob::Overall {
                experiments,
                score,
                method,
            } => overall(area, experiments, *score, *method, experiments.colors.as_deref()),
            PlotJob::Cummax {
                experiments,
                score,
                method,
                xaxis_is_round,
            } => cummax_round(
                area,
                experiments,
                *score,
                *method,
                *xaxis_is_round,
                experiments.linestyles.as_deref(),
                experiments.colors.as_deref(),
            ),
            PlotJob::ScoreRound {
                experiments,
                score,
                method,
                max_round,
            } => score_round(
                area,
                experiments,
                *score,
                *method,
                *max_round,
                experiments.linestyles.as_deref(),
                experiments.colors.as_deref(),
            ),
            PlotJob::ViolinRound {
                run_dir,
                score,
                print_value,
                rep,
            } => violin_and_cummax_round(area, run_dir, *score, *print_value, *rep).map(|_| ()),
            PlotJob::ModelPerformance {
                run_dir,
                method,
                face_colors,
            } => model_performance(area, run_dir, *method, face_colors.as_deref()),
            PlotJob::ModelCurve {
                experiments,
                method,
            } => model_performance_curve(
                area,
                experiments,
                *method,
                experiments.linestyles.as_deref(),
                experiments.colors.as_deref(),
            ),
            PlotJob::EvalModel {
                experiments,
                method,
                prefix,
            } => eval_model(
                area,
                experiments,
                prefix,
                *method,
                experiments.linestyles.as_deref(),
                experiments.colors.as_deref(),
            ),
            PlotJob::SuccessPlot {
                experiments,
                level,
                print_rounds,
            } => success_ratio_plot(
                area,
                experiments,
                *level,
                experiments.linestyles.as_deref(),
                experiments.colors.as_deref(),
                print_rounds.as_deref(),
            ),
            PlotJob::Count {
                run_dir,
                prefix,
                column,
                orientation,
            } => barplot_counts(area, run_dir, prefix, *column, *orientation),
        }
    }
}

fn non_empty<T>(values: &[T]) -> Option<&[T]> {
    if values.is_empty() { None } else { Some(values) }
}

fn run_dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

fn save(job: PlotJob, figure: &FigureArgs) -> Result<(), AnalysisError> {
    save_figure(
        &job,
        &figure.out,
        (figure.width, figure.height),
        figure.title.as_deref(),
    )
}

fn run(cli: Cli) -> Result<(), AnalysisError> {
    match cli.command {
        Command::Overall {
            runs,
            score,
            method,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(
                PlotJob::Overall {
                    experiments,
                    score,
                    method,
                },
                &figure,
            )
        }
        Command::Cummax {
            runs,
            score,
            method,
            xaxis,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(
                PlotJob::Cummax {
                    experiments,
                    score,
                    method,
                    xaxis_is_round: xaxis == XAxis::Round,
                },
                &figure,
            )
        }
        Command::ScoreRound {
            runs,
            score,
            method,
            max_round,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(
                PlotJob::ScoreRound {
                    experiments,
                    score,
                    method,
                    max_round,
                },
                &figure,
            )
        }
        Command::ViolinRound {
            run_dir,
            score,
            print_value,
            rep,
            figure,
        } => save(
            PlotJob::ViolinRound {
                run_dir,
                score,
                print_value,
                rep,
            },
            &figure,
        ),
        Command::ModelPerformance {
            run_dir,
            method,
            style,
            figure,
        } => save(
            PlotJob::ModelPerformance {
                run_dir,
                method,
                face_colors: non_empty(&style.colors).map(<[RGBColor]>::to_vec),
            },
            &figure,
        ),
        Command::ModelCurve {
            runs,
            method,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(PlotJob::ModelCurve { experiments, method }, &figure)
        }
        Command::EvalModel {
            runs,
            method,
            prefix,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(
                PlotJob::EvalModel {
                    experiments,
                    method,
                    prefix,
                },
                &figure,
            )
        }
        Command::SuccessPlot {
            runs,
            level,
            print_rounds,
            style,
            figure,
        } => {
            let experiments = runs.load(&style)?;
            save(
                PlotJob::SuccessPlot {
                    experiments,
                    level: SuccessLevel::from(&level),
                    print_rounds: non_empty(&print_rounds).map(<[u32]>::to_vec),
                },
                &figure,
            )
        }
        Command::SuccessRatio {
            runs,
            level,
            rounds,
            json,
        } => {
            let experiments = runs.load(&StyleArgs::empty())?;
            let rows = success_ratio(&experiments, SuccessLevel::from(&level), non_empty(&rounds))?;
            if json {
                println!("{}", render_success_json(&rows)?);
            } else {
                println!("{}", render_success_table(&rows));
            }
            Ok(())
        }
        Command::Auc {
            runs,
            round,
            score,
            method,
            json,
        } => {
            let experiments = runs.load(&StyleArgs::empty())?;
            let rows = auc(&experiments, round, score, method)?;
            if json {
                println!("{}", render_auc_json(&rows)?);
            } else {
                println!("{}", render_auc_table(&rows));
            }
            Ok(())
        }
        Command::Ruggedness {
            landscapes,
            run_dirs,
            score_column,
            cache,
            subgraph_size,
            amino_acids,
            json,
        } => {
            let mut loaded = landscapes
                .iter()
                .map(|path| read_landscape(path, &score_column))
                .collect::<Result<Vec<_>, _>>()?;
            for dir in &run_dirs {
                let table = read_data(dir, RUN_PREFIX)?;
                loaded.push(Landscape::from_run_table(&run_dir_name(dir), &table)?);
            }
            let params = RsParams {
                subgraph_size,
                amino_acids: &amino_acids,
            };
            let values = rs(
                &loaded,
                non_empty(&cache),
                params,
                &RoughnessToSlope::default(),
            )?;
            info!("computed ruggedness of {} landscapes", loaded.len());
            if json {
                let rows: Vec<RsRow> = loaded
                    .iter()
                    .zip(&values)
                    .map(|(l, v)| RsRow::new(&l.name, *v))
                    .collect();
                println!("{}", render_rs_json(&rows)?);
            } else {
                let rows: Vec<(String, f64)> = loaded
                    .iter()
                    .zip(&values)
                    .map(|(l, v)| (l.name.clone(), *v))
                    .collect();
                println!("{}", render_rs_table(&rows));
            }
            Ok(())
        }
        Command::Count {
            run_dir,
            prefix,
            column,
            orientation,
            figure,
        } => save(
            PlotJob::Count {
                run_dir,
                prefix,
                column,
                orientation,
            },
            &figure,
        ),
    }
}

impl StyleArgs {
    fn empty() -> Self {
        Self {
            colors: Vec::new(),
            linestyles: Vec::new(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
