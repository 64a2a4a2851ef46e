// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Retrieval of exoplanet tables from the NASA Exoplanet Archive (split by
//! discovery mission), and of the TESS sectors (and sectors with SPOC light
//! curves) that observed a list of stars.

mod cli;
pub mod constants;
pub mod io;
pub mod partition;
pub mod sectors;
pub mod services;

// Re-exports.
pub use cli::{Exotess, ExotessError};
pub use io::table::{Cell, Table, TableError};
pub use partition::{fetch_and_partition, Mission, MissionTables, PartitionError, PartitionParams};
pub use sectors::{
    join_sectors, resolve_sectors, resolve_star, split_sectors, LightCurveSectors, ProbeOutcome,
    SectorServices, SectorSettings, SectorsError, StarSectors,
};
pub use services::{
    ArchiveProbe, CatalogCandidate, ExoplanetArchive, SectorCoverage, ServiceError, StarCatalog,
};

use crossbeam_utils::atomic::AtomicCell;

/// Should progress bars be drawn? Set by the binary; library users get hidden
/// progress bars unless they opt in.
pub static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
