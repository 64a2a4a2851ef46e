// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain GETs against the STScI TESS archive.

use log::trace;
use reqwest::{blocking::Client, StatusCode};

use super::{http_client, ArchiveProbe, ServiceError};

pub struct TessArchive {
    client: Client,
}

impl TessArchive {
    pub fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

impl ArchiveProbe for TessArchive {
    fn fetch(&self, url: &str) -> Result<Option<String>, ServiceError> {
        let err = |err| ServiceError::Request {
            url: url.to_string(),
            err,
        };

        let response = self.client.get(url).send().map_err(err)?;
        trace!("{url}: {}", response.status());
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response
            .error_for_status()
            .and_then(|r| r.text())
            .map_err(err)?;
        Ok(Some(body))
    }
}
