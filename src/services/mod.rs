// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remote astronomy services.
//!
//! Each service is a trait, so the code that uses it can be exercised without a
//! network. The HTTP implementations talk to the NASA Exoplanet Archive, MAST
//! (catalogs and TESScut) and the STScI TESS archive. Requests are blocking and
//! are never retried.

mod archive;
mod error;
mod exoplanet_archive;
mod mast;
mod tesscut;

pub use archive::TessArchive;
pub use error::ServiceError;
pub use exoplanet_archive::NasaExoplanetArchive;
pub use mast::MastCatalogs;
pub use tesscut::Tesscut;

use log::trace;
use reqwest::blocking::{Client, RequestBuilder};

use crate::io::table::Table;

/// A catalog of exoplanets that can be filtered with ADQL-like expressions.
pub trait ExoplanetArchive {
    /// Select the comma-separated columns `select` from `table` for the rows
    /// matching `filter`. The returned table has exactly the selected columns,
    /// in the selected order.
    fn query_criteria(&self, table: &str, select: &str, filter: &str)
        -> Result<Table, ServiceError>;
}

/// A record returned by a star catalog search.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCandidate {
    /// The catalog identifier (e.g. a TIC number).
    pub id: String,
    /// \[degrees\]
    pub ra: f64,
    /// \[degrees\]
    pub dec: f64,
    /// Angular distance from the searched position \[arcseconds\]
    pub dst_arcsec: f64,
}

/// A star catalog that can be searched by object name.
pub trait StarCatalog {
    /// Find all records of `catalog` within `radius_deg` of `object`.
    fn query_object(
        &self,
        object: &str,
        radius_deg: f64,
        catalog: &str,
    ) -> Result<Vec<CatalogCandidate>, ServiceError>;
}

/// Which TESS sectors observed a sky position?
pub trait SectorCoverage {
    /// The sectors are returned in the service's order.
    fn get_sectors(&self, ra_deg: f64, dec_deg: f64) -> Result<Vec<u32>, ServiceError>;
}

/// Fetch web pages from a data archive.
pub trait ArchiveProbe {
    /// Get the body of the page at `url`. `Ok(None)` means the page doesn't
    /// exist.
    fn fetch(&self, url: &str) -> Result<Option<String>, ServiceError>;
}

/// The HTTP client shared by all services. No timeout is set beyond the
/// transport's default.
pub(crate) fn http_client() -> Result<Client, ServiceError> {
    Client::builder()
        .user_agent(concat!("exotess/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ServiceError::Client)
}

/// Send a request and get the body of a successful response.
fn send_for_text(request: RequestBuilder, url: &str) -> Result<String, ServiceError> {
    trace!("Requesting {url}");
    request
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(|err| ServiceError::Request {
            url: url.to_string(),
            err,
        })
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
