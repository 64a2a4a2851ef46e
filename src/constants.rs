// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Useful constants.

/// The NASA Exoplanet Archive columns fetched when none are specified.
pub const DEFAULT_COLUMNS: [&str; 8] = [
    "pl_name",
    "hostname",
    "disc_pubdate",
    "disc_year",
    "disc_facility",
    "disc_refname",
    "ra",
    "dec",
];

/// What [`DEFAULT_COLUMNS`] are renamed to.
pub const DEFAULT_RENAMED_COLUMNS: [&str; 8] = [
    "planet_name",
    "star_name",
    "publication_date",
    "discovery_year",
    "mission",
    "reference",
    "ra",
    "dec",
];

/// The NASA Exoplanet Archive's "Planetary Systems" table.
pub const PLANETARY_SYSTEMS_TABLE: &str = "ps";

/// Glob (relative to the output directory) of files written by the catalog
/// partitioner.
pub const MISSION_OUTPUT_GLOB: &str = "*_exoplanets_*.dat";

/// The default radius of TIC searches around a star \[degrees\].
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.02;

/// The star catalog queried for each star.
pub const TIC_CATALOG: &str = "tic";

/// The name of the column in input star tables that holds TIC numbers.
pub const DEFAULT_TIC_COLUMN: &str = "TIC";

/// Column holding all TESS sectors that observed a star.
pub const SECTORS_COLUMN: &str = "tess_sectors";

/// Column holding the TESS sectors that have a SPOC light curve for a star.
pub const LIGHT_CURVE_SECTORS_COLUMN: &str = "tess_sectors_lc";

pub const EXOPLANET_ARCHIVE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu";
pub const MAST_URL: &str = "https://mast.stsci.edu";
pub const TESS_ARCHIVE_URL: &str = "https://archive.stsci.edu/missions/tess/tid";
