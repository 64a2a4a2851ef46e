// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests;

use std::{borrow::Cow, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::Parser;
use itertools::Itertools;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, Warn, ARG_FILE_HELP};
use crate::{
    constants::{
        DEFAULT_COLUMNS, DEFAULT_RENAMED_COLUMNS, EXOPLANET_ARCHIVE_URL, MISSION_OUTPUT_GLOB,
    },
    partition::{fetch_and_partition, Mission, PartitionParams},
    services::NasaExoplanetArchive,
    ExotessError,
};

lazy_static::lazy_static! {
    static ref COLUMNS_HELP: String =
        format!("The NASA Exoplanet Archive (Planetary Systems table) columns to fetch. Default: {}", DEFAULT_COLUMNS.join(" "));

    static ref RENAMED_COLUMNS_HELP: String =
        format!("What each of the fetched columns is called in the output tables. There must be one per fetched column. Default: {}", DEFAULT_RENAMED_COLUMNS.join(" "));

    static ref KEEP_EXISTING_HELP: String =
        format!("Don't delete existing {MISSION_OUTPUT_GLOB} files in the output directory before querying");

    static ref ARCHIVE_URL_HELP: String =
        format!("The base URL of the NASA Exoplanet Archive. Default: {EXOPLANET_ARCHIVE_URL}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ExoplanetsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(short, long, multiple_values(true), help = COLUMNS_HELP.as_str(), help_heading = "COLUMNS")]
    pub(super) columns: Option<Vec<String>>,

    #[clap(short, long, multiple_values(true), help = RENAMED_COLUMNS_HELP.as_str(), help_heading = "COLUMNS")]
    pub(super) renamed_columns: Option<Vec<String>>,

    #[clap(long, help = KEEP_EXISTING_HELP.as_str(), help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) keep_existing: bool,

    /// Write each mission's exoplanets to a file named
    /// <Mission>_exoplanets_<YYYYMMDD>.dat. Without this, only a summary is
    /// printed.
    #[clap(short, long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) save: bool,

    /// The directory to write files into (and to delete old files from).
    /// Default: the current directory.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// The date used in output filenames, formatted as YYYYMMDD. Default:
    /// today.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) date: Option<String>,

    #[clap(long, help = ARCHIVE_URL_HELP.as_str(), help_heading = "SERVICES")]
    pub(super) archive_url: Option<String>,
}

/// Everything needed to partition the exoplanets.
pub(super) struct ExoplanetsParams {
    pub(super) partition: PartitionParams,
    pub(super) archive_url: String,
}

impl ExoplanetsArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<ExoplanetsArgs, ExotessError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let ExoplanetsArgs {
                args_file: _,
                columns,
                renamed_columns,
                keep_existing,
                save,
                output_dir,
                date,
                archive_url,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(ExoplanetsArgs {
                args_file: None,
                columns: cli_args.columns.or(columns),
                renamed_columns: cli_args.renamed_columns.or(renamed_columns),
                keep_existing: cli_args.keep_existing || keep_existing,
                save: cli_args.save || save,
                output_dir: cli_args.output_dir.or(output_dir),
                date: cli_args.date.or(date),
                archive_url: cli_args.archive_url.or(archive_url),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<ExoplanetsParams, ExotessError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            columns,
            renamed_columns,
            keep_existing,
            save,
            output_dir,
            date,
            archive_url,
        } = self;

        let default = |c: &[&str]| c.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let (columns, renamed_columns) = match (columns, renamed_columns) {
            (None, None) => (default(&DEFAULT_COLUMNS), default(&DEFAULT_RENAMED_COLUMNS)),
            // Renaming a column to itself is harmless.
            (Some(c), None) => {
                "No renamed columns were given; the fetched column names are kept".warn();
                (c.clone(), c)
            }
            (None, Some(_)) => return Err(ExoplanetsArgsError::RenamedWithoutColumns.into()),
            (Some(c), Some(r)) => (c, r),
        };
        let trim = |v: Vec<String>| v.into_iter().map(|s| s.trim().to_string()).collect_vec();
        let (columns, renamed_columns) = (trim(columns), trim(renamed_columns));
        if let Some(c) = columns.iter().find(|c| c.is_empty() || c.contains(',')) {
            return Err(ExoplanetsArgsError::BadColumn(c.clone()).into());
        }

        let query_date = match date {
            Some(d) => parse_date(&d)?,
            None => Local::now().date_naive(),
        };

        let mut partition = PartitionParams::new(columns, renamed_columns, query_date)?;
        partition.delete_existing = !keep_existing;
        partition.persist = save;
        if let Some(dir) = output_dir {
            if !dir.is_dir() {
                return Err(ExoplanetsArgsError::OutputDirDoesntExist(dir).into());
            }
            partition.output_dir = dir;
        }

        let params = ExoplanetsParams {
            partition,
            archive_url: archive_url.unwrap_or_else(|| EXOPLANET_ARCHIVE_URL.to_string()),
        };
        params.display();
        display_warnings();

        Ok(params)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ExotessError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let archive = NasaExoplanetArchive::new(params.archive_url)?;
        fetch_and_partition(&archive, &params.partition)?;
        Ok(())
    }
}

impl ExoplanetsParams {
    fn display(&self) {
        let p = &self.partition;
        let mut printer = InfoPrinter::new("Exoplanet query".into());
        printer.push_line(format!("Archive: {}", self.archive_url).into());
        printer.push_block(
            p.columns
                .iter()
                .zip(p.renamed_columns.iter())
                .map(|(c, r)| {
                    if c == r {
                        c.clone().into()
                    } else {
                        format!("{c} -> {r}").into()
                    }
                })
                .collect(),
        );

        let mut block: Vec<Cow<'static, str>> = vec![];
        if p.delete_existing {
            block.push(
                format!(
                    "Deleting {MISSION_OUTPUT_GLOB} from {}",
                    p.output_dir.display()
                )
                .into(),
            );
        }
        if p.persist {
            block.push("Writing:".into());
            for mission in [Mission::K2, Mission::Kepler, Mission::Tess] {
                block.push(format!("  {}", p.output_path(mission).display()).into());
            }
        } else {
            block.push("Not writing any files".into());
        }
        printer.push_block(block);
        printer.display();
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ExoplanetsArgsError> {
    NaiveDate::parse_from_str(s.trim(), "%Y%m%d")
        .map_err(|_| ExoplanetsArgsError::BadDate(s.to_string()))
}

#[derive(thiserror::Error, Debug)]
pub(super) enum ExoplanetsArgsError {
    #[error("Renamed columns were given without the columns to fetch")]
    RenamedWithoutColumns,

    #[error("'{0}' isn't a valid column name")]
    BadColumn(String),

    #[error("Couldn't parse '{0}' as a date; expected YYYYMMDD (e.g. 20241117)")]
    BadDate(String),

    #[error("The output directory '{}' doesn't exist", .0.display())]
    OutputDirDoesntExist(PathBuf),
}
