// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::Mission;
use crate::{
    io::{table::TableError, GlobError},
    services::ServiceError,
};

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("No columns were specified")]
    NoColumns,

    #[error("{columns} columns were specified, but {renamed} renamed columns; these must be the same")]
    ColumnMismatch { columns: usize, renamed: usize },

    #[error("The column '{0}' was specified more than once")]
    DuplicateColumn(String),

    #[error("The renamed column '{0}' was specified more than once")]
    DuplicateRename(String),

    #[error("Couldn't query the {mission} exoplanets: {err}")]
    Query { mission: Mission, err: ServiceError },

    #[error("Couldn't rename the {mission} columns: {err}")]
    Rename { mission: Mission, err: TableError },

    #[error("Couldn't write the {mission} exoplanets: {err}")]
    Write { mission: Mission, err: TableError },

    #[error("Couldn't remove old exoplanet files: {0}")]
    Cleanup(#[from] GlobError),
}
