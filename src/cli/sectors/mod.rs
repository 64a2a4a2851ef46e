// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, star_progress_bar, InfoPrinter, ARG_FILE_HELP};
use crate::{
    constants::{
        DEFAULT_SEARCH_RADIUS_DEG, DEFAULT_TIC_COLUMN, LIGHT_CURVE_SECTORS_COLUMN, MAST_URL,
        SECTORS_COLUMN, TESS_ARCHIVE_URL,
    },
    io::table::Table,
    sectors::{resolve_sectors, SectorServices, SectorSettings},
    services::{MastCatalogs, TessArchive, Tesscut},
    ExotessError,
};

lazy_static::lazy_static! {
    static ref TIC_COLUMN_HELP: String =
        format!("The column of the input table holding TIC numbers. Default: {DEFAULT_TIC_COLUMN}");

    static ref SEARCH_RADIUS_HELP: String =
        format!("The radius of the TIC search around each star [degrees]. The nearest match is used. Default: {DEFAULT_SEARCH_RADIUS_DEG}");

    static ref LIGHT_CURVES_HELP: String =
        format!("Also look for SPOC light curves of each sector in the TESS archive, and list the sectors that have one in the '{LIGHT_CURVE_SECTORS_COLUMN}' column. This makes a request per sector per star");

    static ref MAST_URL_HELP: String =
        format!("The base URL of MAST (used for TIC searches and TESScut). Default: {MAST_URL}");

    static ref TESS_ARCHIVE_URL_HELP: String =
        format!("The base URL of the TESS archive's per-star directories. Default: {TESS_ARCHIVE_URL}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SectorsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The table of stars, as a whitespace-delimited ASCII table with a header
    /// line.
    #[clap(short, long, parse(from_os_str), help_heading = "INPUT FILES")]
    pub(super) table: Option<PathBuf>,

    #[clap(long, help = TIC_COLUMN_HELP.as_str(), help_heading = "INPUT FILES")]
    pub(super) tic_column: Option<String>,

    /// Where to write the table with the sector columns added. Default: the
    /// input table's name with "_sectors" appended, in the same directory.
    #[clap(short, long, parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    #[clap(short, long, help = LIGHT_CURVES_HELP.as_str())]
    #[serde(default)]
    pub(super) light_curves: bool,

    #[clap(long, help = SEARCH_RADIUS_HELP.as_str())]
    pub(super) search_radius: Option<f64>,

    #[clap(long, help = MAST_URL_HELP.as_str(), help_heading = "SERVICES")]
    pub(super) mast_url: Option<String>,

    #[clap(long, help = TESS_ARCHIVE_URL_HELP.as_str(), help_heading = "SERVICES")]
    pub(super) tess_archive_url: Option<String>,
}

/// Everything needed to resolve the sectors of a table of stars.
pub(super) struct SectorsParams {
    pub(super) table: Table,
    pub(super) input: PathBuf,
    pub(super) output: PathBuf,
    pub(super) tic_column: String,
    pub(super) settings: SectorSettings,
    pub(super) mast_url: String,
}

impl SectorsArgs {
    /// Consolidate the CLI arguments with those of an arguments file,
    /// preferring the CLI arguments.
    pub(super) fn merge(self) -> Result<SectorsArgs, ExotessError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let SectorsArgs {
                args_file: _,
                table,
                tic_column,
                output,
                light_curves,
                search_radius,
                mast_url,
                tess_archive_url,
            } = unpack_arg_file!(arg_file);

            Ok(SectorsArgs {
                args_file: None,
                table: cli_args.table.or(table),
                tic_column: cli_args.tic_column.or(tic_column),
                output: cli_args.output.or(output),
                light_curves: cli_args.light_curves || light_curves,
                search_radius: cli_args.search_radius.or(search_radius),
                mast_url: cli_args.mast_url.or(mast_url),
                tess_archive_url: cli_args.tess_archive_url.or(tess_archive_url),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<SectorsParams, ExotessError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            table,
            tic_column,
            output,
            light_curves,
            search_radius,
            mast_url,
            tess_archive_url,
        } = self;

        let input = table.ok_or(SectorsArgsError::NoTable)?;
        let table = Table::read_file(&input)?;
        let tic_column = tic_column.unwrap_or_else(|| DEFAULT_TIC_COLUMN.to_string());
        // Fail early rather than after talking to any services.
        table.column_index(&tic_column)?;

        let search_radius_deg = search_radius.unwrap_or(DEFAULT_SEARCH_RADIUS_DEG);
        if !(search_radius_deg.is_finite() && search_radius_deg > 0.0) {
            return Err(SectorsArgsError::BadRadius(search_radius_deg).into());
        }

        let output = output.unwrap_or_else(|| default_output(&input));
        if output == input {
            return Err(SectorsArgsError::OutputIsInput(output).into());
        }

        let params = SectorsParams {
            table,
            input,
            output,
            tic_column,
            settings: SectorSettings {
                resolve_light_curves: light_curves,
                search_radius_deg,
                archive_url: tess_archive_url.unwrap_or_else(|| TESS_ARCHIVE_URL.to_string()),
            },
            mast_url: mast_url.unwrap_or_else(|| MAST_URL.to_string()),
        };
        params.display();
        display_warnings();

        Ok(params)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ExotessError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let mut params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let catalog = MastCatalogs::new(params.mast_url.as_str())?;
        let coverage = Tesscut::new(params.mast_url.as_str())?;
        let probe = TessArchive::new()?;
        let services = SectorServices {
            catalog: &catalog,
            coverage: &coverage,
            probe: &probe,
        };

        let progress = star_progress_bar(params.table.num_rows());
        resolve_sectors(
            &mut params.table,
            &params.tic_column,
            services,
            &params.settings,
            &progress,
        )?;
        display_warnings();

        params.table.write_file(&params.output)?;
        info!("Wrote {}", params.output.display());
        Ok(())
    }
}

impl SectorsParams {
    fn display(&self) {
        let mut printer = InfoPrinter::new("Resolving TESS sectors".into());
        printer.push_block(vec![
            format!("Input:  {}", self.input.display()).into(),
            format!(
                "{} star(s), TIC numbers in column '{}'",
                self.table.num_rows(),
                self.tic_column
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("MAST: {}", self.mast_url).into(),
            format!("Search radius: {}°", self.settings.search_radius_deg).into(),
        ]);
        if self.settings.resolve_light_curves {
            printer.push_line(
                format!("Probing for light curves at {}", self.settings.archive_url).into(),
            );
        }
        printer.push_line(
            format!(
                "Output: {} (adds '{SECTORS_COLUMN}' and '{LIGHT_CURVE_SECTORS_COLUMN}')",
                self.output.display()
            )
            .into(),
        );
        printer.display();
    }
}

/// e.g. "dir/stars.dat" -> "dir/stars_sectors.dat"
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_sectors.dat"))
}

#[derive(thiserror::Error, Debug)]
pub(super) enum SectorsArgsError {
    #[error("No table of stars was given")]
    NoTable,

    #[error("The search radius must be positive; got {0}")]
    BadRadius(f64),

    #[error("The output table '{}' would overwrite the input table", .0.display())]
    OutputIsInput(PathBuf),
}
