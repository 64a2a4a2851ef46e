// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the TESS sectors that observed each star of a table, and optionally
//! which of those sectors have a light curve.
//!
//! Each star is resolved independently by [resolve_star]; [resolve_sectors]
//! does this for every row of a table and stores the results in two string
//! columns (see [join_sectors]).

mod error;
mod light_curves;

pub use error::SectorsError;
pub use light_curves::{
    extract_light_curve_filename, probe_url, sector_token, tid_directory, LightCurveSectors,
    ProbeOutcome,
};

use std::{borrow::Cow, num::ParseIntError};

use indicatif::ProgressBar;
use itertools::Itertools;
use log::{debug, info};

use crate::{
    cli::Warn,
    constants::{
        DEFAULT_SEARCH_RADIUS_DEG, LIGHT_CURVE_SECTORS_COLUMN, SECTORS_COLUMN, TESS_ARCHIVE_URL,
        TIC_CATALOG,
    },
    io::table::{Cell, Table},
    services::{ArchiveProbe, CatalogCandidate, SectorCoverage, StarCatalog},
};

/// The services used to resolve stars.
#[derive(Clone, Copy)]
pub struct SectorServices<'a> {
    pub catalog: &'a dyn StarCatalog,
    pub coverage: &'a dyn SectorCoverage,
    pub probe: &'a dyn ArchiveProbe,
}

#[derive(Debug, Clone)]
pub struct SectorSettings {
    /// Probe the archive for light curves?
    pub resolve_light_curves: bool,

    /// The radius of catalog searches around each star \[degrees\].
    pub search_radius_deg: f64,

    /// The base URL of the TESS archive's per-star directories.
    pub archive_url: String,
}

impl Default for SectorSettings {
    fn default() -> Self {
        Self {
            resolve_light_curves: false,
            search_radius_deg: DEFAULT_SEARCH_RADIUS_DEG,
            archive_url: TESS_ARCHIVE_URL.to_string(),
        }
    }
}

/// Everything found for one star.
#[derive(Debug, Clone, PartialEq)]
pub struct StarSectors {
    /// The catalog identifier of the nearest catalog record.
    pub id: String,
    /// \[degrees\]
    pub ra: f64,
    /// \[degrees\]
    pub dec: f64,
    /// All sectors that observed the star, in the order given by the service.
    pub sectors: Vec<u32>,
    /// Only populated when light curves were asked for.
    pub light_curves: Option<LightCurveSectors>,
}

impl StarSectors {
    pub fn sectors_string(&self) -> String {
        join_sectors(&self.sectors)
    }

    /// Empty if light curves weren't asked for.
    pub fn light_curve_string(&self) -> String {
        self.light_curves
            .as_ref()
            .map(|lc| join_sectors(&lc.found_sectors()))
            .unwrap_or_default()
    }
}

/// e.g. [1, 2, 14] -> "1, 2, 14". No sectors gives an empty string.
pub fn join_sectors(sectors: &[u32]) -> String {
    sectors.iter().join(", ")
}

/// The inverse of [join_sectors].
pub fn split_sectors(s: &str) -> Result<Vec<u32>, ParseIntError> {
    if s.trim().is_empty() {
        return Ok(vec![]);
    }
    s.split(',').map(|t| t.trim().parse()).collect()
}

/// The candidate closest to the searched position. Ties go to the first.
fn nearest(candidates: &[CatalogCandidate]) -> Option<&CatalogCandidate> {
    candidates
        .iter()
        .min_by(|a, b| a.dst_arcsec.total_cmp(&b.dst_arcsec))
}

/// Find the nearest catalog record of a star, the sectors that observed it
/// and, if asked, which of those sectors have a light curve. Catalog and
/// sector-service failures are errors; light curve probe failures are not.
pub fn resolve_star(
    tic: &str,
    services: SectorServices,
    settings: &SectorSettings,
) -> Result<StarSectors, SectorsError> {
    let object = format!("TIC {tic}");
    let candidates = services
        .catalog
        .query_object(&object, settings.search_radius_deg, TIC_CATALOG)
        .map_err(|err| SectorsError::Catalog {
            tic: tic.to_string(),
            err,
        })?;
    let star = nearest(&candidates).ok_or_else(|| SectorsError::NoCatalogMatch {
        tic: tic.to_string(),
    })?;
    debug!(
        "TIC {tic}: nearest of {} record(s) is {} ({} arcsec away)",
        candidates.len(),
        star.id,
        star.dst_arcsec
    );

    let sectors = services
        .coverage
        .get_sectors(star.ra, star.dec)
        .map_err(|err| SectorsError::Coverage {
            tic: tic.to_string(),
            err,
        })?;

    let light_curves = if settings.resolve_light_curves {
        let outcomes = sectors
            .iter()
            .map(|&s| {
                let outcome =
                    light_curves::probe_sector(services.probe, &settings.archive_url, s, &star.id);
                (s, outcome)
            })
            .collect();
        Some(LightCurveSectors { outcomes })
    } else {
        None
    };

    Ok(StarSectors {
        id: star.id.clone(),
        ra: star.ra,
        dec: star.dec,
        sectors,
        light_curves,
    })
}

/// Get a TIC number out of a table cell.
fn tic_from_cell(cell: &Cell, row: usize) -> Result<String, SectorsError> {
    match cell {
        Cell::Int(i) => Ok(i.to_string()),
        Cell::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(format!("{f:.0}")),
        Cell::Str(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(SectorsError::MissingTic { row }),
    }
}

/// Resolve every star of `table`, in row order, and store the results in the
/// `tess_sectors` and `tess_sectors_lc` columns (added if necessary, and
/// cleared first). The light curve column stays empty unless light curves were
/// asked for.
///
/// The first catalog or sector-service failure stops everything; the table is
/// then left partially populated. Light curve probes that failed are reported
/// as warnings.
pub fn resolve_sectors(
    table: &mut Table,
    tic_column: &str,
    services: SectorServices,
    settings: &SectorSettings,
    progress: &ProgressBar,
) -> Result<Vec<StarSectors>, SectorsError> {
    if !(settings.search_radius_deg.is_finite() && settings.search_radius_deg > 0.0) {
        return Err(SectorsError::BadRadius(settings.search_radius_deg));
    }
    let tics = table
        .column(tic_column)?
        .enumerate()
        .map(|(row, cell)| tic_from_cell(cell, row))
        .collect::<Result<Vec<_>, _>>()?;

    table.set_column(SECTORS_COLUMN, Cell::Str(String::new()));
    table.set_column(LIGHT_CURVE_SECTORS_COLUMN, Cell::Str(String::new()));

    progress.set_length(tics.len() as u64);
    let mut results = Vec::with_capacity(tics.len());
    let mut failed_probes = vec![];
    for (row, tic) in tics.iter().enumerate() {
        progress.set_message(format!("TIC {tic}"));
        let star = resolve_star(tic, services, settings)?;
        table.set(row, SECTORS_COLUMN, star.sectors_string().into())?;
        table.set(row, LIGHT_CURVE_SECTORS_COLUMN, star.light_curve_string().into())?;

        if let Some(lc) = star.light_curves.as_ref() {
            let num_failed = lc.num_failed();
            if num_failed > 0 {
                failed_probes.push(format!(
                    "TIC {tic}: {num_failed} of {} light curve probes failed",
                    lc.outcomes.len()
                ));
            }
        }
        results.push(star);
        progress.inc(1);
    }
    progress.finish_with_message("Done");

    if !failed_probes.is_empty() {
        let mut block: Vec<Cow<'static, str>> =
            vec!["Some light curve probes failed; those sectors may still have light curves".into()];
        block.extend(failed_probes.into_iter().map(Cow::from));
        block.warn();
    }
    info!("Resolved the TESS sectors of {} star(s)", results.len());
    Ok(results)
}
