// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Finding SPOC light curves in the STScI TESS archive.
//!
//! The archive keeps each star's products for a sector in a directory like
//! `<base>/s0014/0000/0001/2345/6789/`, where the last four segments are the
//! TIC number zero-padded to 16 digits. There is no API for this; the
//! directory listing is an HTML page and the light curve's filename is scraped
//! out of it. If the page layout changes, light curves will stop being found.

use itertools::Itertools;
use log::trace;
use regex::Regex;

use crate::services::ArchiveProbe;

lazy_static::lazy_static! {
    static ref LIGHT_CURVE_LINK: Regex = Regex::new(r#"href="(tess[^"]*lc\.fits)""#).unwrap();
}

/// What probing one sector's archive directory found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A light curve exists.
    Found {
        filename: String,
        /// The full URL of the light curve.
        url: String,
    },

    /// The directory doesn't exist, or it has no light curve.
    NotFound,

    /// The archive couldn't be reached or gave an unexpected response. This
    /// says nothing about whether a light curve exists.
    ProbeFailed(String),
}

/// The probe outcome of every sector of a star, in sector order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightCurveSectors {
    pub outcomes: Vec<(u32, ProbeOutcome)>,
}

impl LightCurveSectors {
    /// The sectors with a light curve.
    pub fn found_sectors(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ProbeOutcome::Found { .. }))
            .map(|(s, _)| *s)
            .collect()
    }

    pub fn num_failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ProbeOutcome::ProbeFailed(_)))
            .count()
    }
}

/// e.g. 14 -> "s0014"
pub fn sector_token(sector: u32) -> String {
    format!("s{sector:04}")
}

/// e.g. "123456789" -> "/0000/0001/2345/6789/"
pub fn tid_directory(id: &str) -> String {
    let padded = format!("{id:0>16}");
    let groups = padded
        .chars()
        .chunks(4)
        .into_iter()
        .map(|c| c.collect::<String>())
        .join("/");
    format!("/{groups}/")
}

/// The archive directory of star `id` for `sector`.
pub fn probe_url(base: &str, sector: u32, id: &str) -> String {
    format!(
        "{}/{}{}",
        base.trim_end_matches('/'),
        sector_token(sector),
        tid_directory(id)
    )
}

/// Get the first light curve filename linked to in an archive directory
/// listing, if there is one.
pub fn extract_light_curve_filename(body: &str) -> Option<&str> {
    LIGHT_CURVE_LINK
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Look for the light curve of star `id` in `sector`. Errors are not
/// propagated; they become [`ProbeOutcome::ProbeFailed`].
pub(super) fn probe_sector<P>(probe: &P, base: &str, sector: u32, id: &str) -> ProbeOutcome
where
    P: ArchiveProbe + ?Sized,
{
    let url = probe_url(base, sector, id);
    let outcome = match probe.fetch(&url) {
        Ok(Some(body)) => match extract_light_curve_filename(&body) {
            Some(filename) => ProbeOutcome::Found {
                url: format!("{url}{filename}"),
                filename: filename.to_string(),
            },
            None => ProbeOutcome::NotFound,
        },
        Ok(None) => ProbeOutcome::NotFound,
        Err(e) => ProbeOutcome::ProbeFailed(e.to_string()),
    };
    trace!("{url}: {outcome:?}");
    outcome
}
