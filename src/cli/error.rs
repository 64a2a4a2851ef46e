// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all exotess-related errors. This should be the *only* error
//! enum that is publicly visible from the binary's point of view.

use thiserror::Error;

use super::{exoplanets::ExoplanetsArgsError, sectors::SectorsArgsError};
use crate::{
    io::table::TableError,
    partition::PartitionError,
    sectors::SectorsError,
    services::ServiceError,
};

const ARCHIVE_DOCS: &str = "https://exoplanetarchive.ipac.caltech.edu/docs/API_PS_columns.html";
const MAST_DOCS: &str = "https://mast.stsci.edu/api/v0/";

/// The *only* publicly visible error from exotess. Errors that a user could
/// fix by reading some documentation point to it.
#[derive(Error, Debug)]
pub enum ExotessError {
    /// An error related to `exoplanets`.
    #[error("{0}\n\nThe available columns are described at: {}", ARCHIVE_DOCS)]
    Exoplanets(String),

    /// An error related to `sectors`.
    #[error("{0}")]
    Sectors(String),

    /// An error from MAST (the star catalog or TESScut).
    #[error("{0}\n\nSee for more info: {}", MAST_DOCS)]
    Mast(String),

    /// A network error. These are often transient.
    #[error("{0}\n\nThis may be a temporary problem; try again later, or increase verbosity (-v or -vv) for more detail.")]
    Network(String),

    /// An error related to reading or writing table files.
    #[error("{0}")]
    Table(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<ExoplanetsArgsError> for ExotessError {
    fn from(e: ExoplanetsArgsError) -> Self {
        Self::Exoplanets(e.to_string())
    }
}

impl From<SectorsArgsError> for ExotessError {
    fn from(e: SectorsArgsError) -> Self {
        Self::Sectors(e.to_string())
    }
}

impl From<PartitionError> for ExotessError {
    fn from(e: PartitionError) -> Self {
        let s = e.to_string();
        match e {
            PartitionError::NoColumns
            | PartitionError::ColumnMismatch { .. }
            | PartitionError::DuplicateColumn(_)
            | PartitionError::DuplicateRename(_)
            | PartitionError::Rename { .. } => Self::Exoplanets(s),
            PartitionError::Query { err, .. } => Self::from_service(err, s),
            PartitionError::Write { .. } => Self::Table(s),
            PartitionError::Cleanup(_) => Self::Generic(s),
        }
    }
}

impl From<SectorsError> for ExotessError {
    fn from(e: SectorsError) -> Self {
        let s = e.to_string();
        match e {
            SectorsError::NoCatalogMatch { .. } | SectorsError::BadRadius(_) => Self::Sectors(s),
            SectorsError::Catalog { err, .. } | SectorsError::Coverage { err, .. } => {
                Self::from_service(err, s)
            }
            SectorsError::MissingTic { .. } | SectorsError::Table(_) => Self::Table(s),
        }
    }
}

impl From<ServiceError> for ExotessError {
    fn from(e: ServiceError) -> Self {
        let s = e.to_string();
        Self::from_service(e, s)
    }
}

impl From<TableError> for ExotessError {
    fn from(e: TableError) -> Self {
        Self::Table(e.to_string())
    }
}

impl From<std::io::Error> for ExotessError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl ExotessError {
    /// Classify a service error; `s` is the message to show.
    fn from_service(e: ServiceError, s: String) -> Self {
        match e {
            ServiceError::Client(_) | ServiceError::Request { .. } => Self::Network(s),
            ServiceError::Mast { .. }
            | ServiceError::Unresolved(_)
            | ServiceError::UnsupportedCatalog(..)
            | ServiceError::InvalidSector(_) => Self::Mast(s),
            ServiceError::MissingColumn { .. } => Self::Exoplanets(s),
            ServiceError::Decode { .. } | ServiceError::Table(_) => Self::Generic(s),
        }
    }
}
