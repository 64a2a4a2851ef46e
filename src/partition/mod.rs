// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fetch the exoplanets discovered by Kepler, K2 and TESS from the NASA
//! Exoplanet Archive, one table per mission.
//!
//! Only the "default parameter set" of each planet is used (`default_flag=1`),
//! so each planet appears once even when the archive holds several solutions
//! for it.

mod error;

pub use error::PartitionError;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, info};
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::{
    cli::InfoPrinter,
    constants::{MISSION_OUTPUT_GLOB, PLANETARY_SYSTEMS_TABLE},
    io::{delete_all_matches_from_glob, table::Table},
    services::ExoplanetArchive,
};

/// A discovery mission (the archive's "discovery facility").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Mission {
    #[strum(serialize = "Kepler")]
    Kepler,

    #[strum(serialize = "K2")]
    K2,

    #[strum(serialize = "TESS")]
    Tess,
}

/// The missions in the order they are queried and written.
const QUERY_ORDER: [Mission; 3] = [Mission::K2, Mission::Kepler, Mission::Tess];

impl Mission {
    /// The filter selecting this mission's default-parameter-set planets.
    /// Facilities are matched by substring.
    pub fn filter(self) -> String {
        format!("disc_facility like '%{self}%' and default_flag=1")
    }

    /// e.g. "TESS_exoplanets_20241117.dat"
    pub fn output_filename(self, date: NaiveDate) -> String {
        format!("{self}_exoplanets_{}.dat", date.format("%Y%m%d"))
    }
}

/// Parameters for [fetch_and_partition].
#[derive(Debug, Clone)]
pub struct PartitionParams {
    /// The archive columns to select.
    pub columns: Vec1<String>,

    /// What each of `columns` is renamed to.
    pub renamed_columns: Vec1<String>,

    /// Delete any `*_exoplanets_*.dat` files in `output_dir` first.
    pub delete_existing: bool,

    /// Write each mission's table into `output_dir`.
    pub persist: bool,

    pub output_dir: PathBuf,

    /// The date embedded in output filenames.
    pub query_date: NaiveDate,
}

impl PartitionParams {
    /// Check the column lists and set the defaults: delete old files, don't
    /// write new ones, use the current directory.
    pub fn new(
        columns: Vec<String>,
        renamed_columns: Vec<String>,
        query_date: NaiveDate,
    ) -> Result<PartitionParams, PartitionError> {
        if columns.len() != renamed_columns.len() {
            return Err(PartitionError::ColumnMismatch {
                columns: columns.len(),
                renamed: renamed_columns.len(),
            });
        }
        if let Some(dup) = columns.iter().duplicates().next() {
            return Err(PartitionError::DuplicateColumn(dup.clone()));
        }
        if let Some(dup) = renamed_columns.iter().duplicates().next() {
            return Err(PartitionError::DuplicateRename(dup.clone()));
        }
        let columns = Vec1::try_from_vec(columns).map_err(|_| PartitionError::NoColumns)?;
        let renamed_columns =
            Vec1::try_from_vec(renamed_columns).map_err(|_| PartitionError::NoColumns)?;

        Ok(PartitionParams {
            columns,
            renamed_columns,
            delete_existing: true,
            persist: false,
            output_dir: PathBuf::from("."),
            query_date,
        })
    }

    /// The comma-separated column selection sent to the archive.
    pub fn selection(&self) -> String {
        self.columns.iter().join(",")
    }

    pub fn output_path(&self, mission: Mission) -> PathBuf {
        self.output_dir.join(mission.output_filename(self.query_date))
    }
}

/// The exoplanets of each mission, with renamed columns.
#[derive(Debug, Clone)]
pub struct MissionTables {
    pub kepler: Table,
    pub k2: Table,
    pub tess: Table,

    /// Files written, if any.
    pub written: Vec<PathBuf>,

    /// Old files removed before querying, if any.
    pub deleted: Vec<PathBuf>,
}

impl MissionTables {
    pub fn get(&self, mission: Mission) -> &Table {
        match mission {
            Mission::Kepler => &self.kepler,
            Mission::K2 => &self.k2,
            Mission::Tess => &self.tess,
        }
    }

    pub fn total(&self) -> usize {
        self.kepler.num_rows() + self.k2.num_rows() + self.tess.num_rows()
    }

    /// Log the number of planets per mission and the total.
    pub fn display_summary(&self) {
        let mut printer = InfoPrinter::new("Exoplanets per discovery mission".into());
        printer.push_line("(NASA Exoplanet Archive)".into());
        printer.push_block(
            [Mission::Kepler, Mission::K2, Mission::Tess]
                .into_iter()
                .map(|m| {
                    let label = format!("{m}:");
                    format!("{label:<7} {} planets", self.get(m).num_rows()).into()
                })
                .collect(),
        );
        printer.push_line(format!("{:<7} {} planets", "Total:", self.total()).into());
        printer.display();
    }
}

/// Query the archive once per mission, rename the selected columns and
/// optionally write each mission's table to a file. Any failure (query, rename,
/// file removal or writing) stops everything.
pub fn fetch_and_partition<A>(
    archive: &A,
    params: &PartitionParams,
) -> Result<MissionTables, PartitionError>
where
    A: ExoplanetArchive + ?Sized,
{
    let deleted = if params.delete_existing {
        let deleted = delete_all_matches_from_glob(&params.output_dir, MISSION_OUTPUT_GLOB)?;
        if !deleted.is_empty() {
            info!(
                "Removed {} old exoplanet file(s) from {}",
                deleted.len(),
                params.output_dir.display()
            );
        }
        deleted
    } else {
        vec![]
    };

    let select = params.selection();
    let renames = params
        .columns
        .iter()
        .map(String::as_str)
        .zip(params.renamed_columns.iter().map(String::as_str))
        .collect::<Vec<_>>();

    let mut tables = Vec::with_capacity(QUERY_ORDER.len());
    for mission in QUERY_ORDER {
        debug!("Querying {mission} exoplanets");
        let mut table = archive
            .query_criteria(PLANETARY_SYSTEMS_TABLE, &select, &mission.filter())
            .map_err(|err| PartitionError::Query { mission, err })?;
        table
            .rename_columns(renames.iter().copied())
            .map_err(|err| PartitionError::Rename { mission, err })?;
        tables.push((mission, table));
    }

    let mut written = vec![];
    if params.persist {
        for (mission, table) in &tables {
            let path = params.output_path(*mission);
            write_mission(*mission, table, &path)?;
            written.push(path);
        }
    }

    let mut out = MissionTables {
        kepler: Table::default(),
        k2: Table::default(),
        tess: Table::default(),
        written,
        deleted,
    };
    for (mission, table) in tables {
        match mission {
            Mission::Kepler => out.kepler = table,
            Mission::K2 => out.k2 = table,
            Mission::Tess => out.tess = table,
        }
    }
    out.display_summary();
    Ok(out)
}

fn write_mission(mission: Mission, table: &Table, path: &Path) -> Result<(), PartitionError> {
    table
        .write_file(path)
        .map_err(|err| PartitionError::Write { mission, err })?;
    info!("{mission} exoplanets were saved to: {}", path.display());
    Ok(())
}
