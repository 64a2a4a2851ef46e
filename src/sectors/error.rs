// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{io::table::TableError, services::ServiceError};

#[derive(Error, Debug)]
pub enum SectorsError {
    #[error("The star catalog returned no records for TIC {tic}")]
    NoCatalogMatch { tic: String },

    #[error("Couldn't search the star catalog for TIC {tic}: {err}")]
    Catalog { tic: String, err: ServiceError },

    #[error("Couldn't get the TESS sectors of TIC {tic}: {err}")]
    Coverage { tic: String, err: ServiceError },

    #[error("Row {row} has no TIC number")]
    MissingTic { row: usize },

    #[error("The search radius must be positive and finite; got {0}")]
    BadRadius(f64),

    #[error(transparent)]
    Table(#[from] TableError),
}
