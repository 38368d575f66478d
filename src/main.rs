use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use log::{error, info};
use std::path::PathBuf;

use grb_tools::attr::{ConstrAttr, VarAttr};
use grb_tools::config::{Delimiters, EntityKind};
use grb_tools::select::{FilterSpec, SetMatch};
use grb_tools::{aggregate::SumMatrix, constraints, model, report, variables};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Model file to inspect (.lp, .mps, ...)
    model: PathBuf,
    /// Json file with the brackets of variable and constraint names
    #[arg(short, long)]
    delimiters: Option<PathBuf>,
    /// Optimize the model before querying it
    #[arg(short, long)]
    optimize: bool,
    #[command(flatten)]
    verbosity: Verbosity,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List variable and constraint sets with their sizes
    Sets,
    /// Print an attribute of the selected variables or constraints
    Attr {
        /// Attribute name, case-insensitive
        attr: String,
        #[command(flatten)]
        selection: Selection,
        /// Query constraints instead of variables
        #[arg(short, long)]
        constraints: bool,
        /// Also write the values to this csv file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Sum a variable attribute by one or two index positions
    Sum {
        /// Index positions, negative positions count from the end
        #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
        positions: Vec<isize>,
        #[command(flatten)]
        selection: Selection,
        #[arg(short, long, default_value = "X")]
        attr: String,
        /// Write the sums to this csv file (one position only)
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the sums to this json file (one position only)
        #[arg(long)]
        json: Option<PathBuf>,
        /// Name of the index in the json output
        #[arg(long, default_value = "index")]
        alias: String,
    },
}

#[derive(clap::Args)]
struct Selection {
    /// Set name, every set if omitted
    #[arg(short, long, default_value = "")]
    name: String,
    /// Select sets whose name contains `name`
    #[arg(long)]
    approx: bool,
    /// Index filter `position=value`, may be repeated
    #[arg(short, long = "filter", value_parser = parse_filter, allow_hyphen_values = true)]
    filters: Vec<(isize, String)>,
    /// Select the entities that do not match the filters
    #[arg(long)]
    exclude: bool,
}

impl Selection {
    fn set(&self) -> SetMatch<'_> {
        SetMatch::by_name(&self.name, self.approx)
    }

    fn filter(&self) -> FilterSpec {
        let filter = self
            .filters
            .iter()
            .fold(FilterSpec::new(), |filter, (position, value)| {
                filter.with(*position, value.clone())
            });
        if self.exclude {
            filter.excluding()
        } else {
            filter
        }
    }
}

fn parse_filter(s: &str) -> Result<(isize, String), String> {
    let (position, value) = s
        .split_once('=')
        .ok_or_else(|| format!("`{s}` is not of the form position=value"))?;
    let position = position
        .trim()
        .parse()
        .map_err(|e| format!("invalid position `{position}`: {e}"))?;
    Ok((position, value.to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();
    let delimiters = match &args.delimiters {
        Some(path) => {
            let Ok(delimiters) = Delimiters::from_json_file(path) else {
                error!("Could not read delimiters from {}", path.display());
                std::process::exit(exitcode::CONFIG);
            };
            delimiters
        }
        None => Delimiters::default(),
    };
    let mut model = model::read_model(&args.model)?;
    if args.optimize {
        model::reoptimize(&mut model)?;
    }

    match &args.command {
        Command::Sets => {
            println!("{}", variables::list_variables(&model, &delimiters)?);
            println!("{}", constraints::list_constraints(&model, &delimiters)?);
        }
        Command::Attr {
            attr,
            selection,
            constraints: true,
            csv,
        } => {
            let attr: ConstrAttr = attr.parse()?;
            let selected =
                constraints::get_constraints(&model, &delimiters, selection.set(), &selection.filter())?;
            let values = constraints::constraints_attr(&model, &selected, attr)?;
            print!("{values}");
            if let Some(path) = csv {
                report::write_values_csv(path, EntityKind::Constraint, &values)?;
                info!("Wrote {} values to {}", values.0.len(), path.display());
            }
        }
        Command::Attr {
            attr,
            selection,
            constraints: false,
            csv,
        } => {
            let attr: VarAttr = attr.parse()?;
            let selected =
                variables::get_variables(&model, &delimiters, selection.set(), &selection.filter())?;
            let values = variables::variables_attr(&model, &selected, attr)?;
            print!("{values}");
            if let Some(path) = csv {
                report::write_values_csv(path, EntityKind::Variable, &values)?;
                info!("Wrote {} values to {}", values.0.len(), path.display());
            }
        }
        Command::Sum {
            positions,
            selection,
            attr,
            csv,
            json,
            alias,
        } => {
            let attr: VarAttr = attr.parse()?;
            let selected =
                variables::get_variables(&model, &delimiters, selection.set(), &selection.filter())?;
            match positions.as_slice() {
                &[position] => {
                    let sums = variables::sum_variables_by_index(&model, &selected, position, attr)?;
                    print!("{}", report::Sums(&sums));
                    if let Some(path) = csv {
                        report::write_sums_csv(path, &sums)?;
                    }
                    if let Some(path) = json {
                        report::write_sums_json(path, &sums, alias)?;
                    }
                }
                &[first, second] => {
                    if csv.is_some() || json.is_some() {
                        bail!("csv and json export take a single index position");
                    }
                    let sums = variables::sum_variables_by_two_indices(
                        &model, &selected, first, second, attr,
                    )?;
                    print!("{}", report::NestedSums(&sums));
                    let matrix = SumMatrix::from(&sums);
                    info!(
                        "{} x {} sum matrix, column totals {:?}",
                        matrix.rows.len(),
                        matrix.columns.len(),
                        matrix.column_totals()
                    );
                }
                _ => bail!("expected one or two index positions"),
            }
        }
    }
    Ok(())
}
