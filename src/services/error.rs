// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::io::table::TableError;

/// Errors from talking to remote services.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Couldn't set up an HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Request to {url} failed: {err}")]
    Request { url: String, err: reqwest::Error },

    #[error("Couldn't decode the response from {url}: {err}")]
    Decode {
        url: String,
        err: serde_json::Error,
    },

    #[error("Record {row} from {url} doesn't have the requested column '{column}'")]
    MissingColumn {
        row: usize,
        column: String,
        url: String,
    },

    #[error("MAST service {service} finished with status '{status}': {msg}")]
    Mast {
        service: &'static str,
        status: String,
        msg: String,
    },

    #[error("MAST couldn't resolve '{0}' to a sky position")]
    Unresolved(String),

    #[error("Catalog '{0}' isn't supported; supported catalogs: {1}")]
    UnsupportedCatalog(String, &'static str),

    #[error("TESScut returned an invalid sector number '{0}'")]
    InvalidSector(String),

    #[error(transparent)]
    Table(#[from] TableError),
}
