// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! TESScut's sector lookup.

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{http_client, join_url, send_for_text, SectorCoverage, ServiceError};

pub struct Tesscut {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SectorResponse {
    #[serde(default)]
    results: Vec<SectorRecord>,
}

#[derive(Deserialize)]
struct SectorRecord {
    /// Zero padded, e.g. "0014".
    sector: String,
}

impl Tesscut {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into(),
        })
    }
}

impl SectorCoverage for Tesscut {
    fn get_sectors(&self, ra_deg: f64, dec_deg: f64) -> Result<Vec<u32>, ServiceError> {
        let url = join_url(&self.base_url, "tesscut/api/v0.1/sector");
        let body = send_for_text(
            self.client.get(&url).query(&[
                ("ra", ra_deg.to_string()),
                ("dec", dec_deg.to_string()),
                ("radius", "0d".to_string()),
            ]),
            &url,
        )?;
        let response: SectorResponse =
            serde_json::from_str(&body).map_err(|err| ServiceError::Decode { url, err })?;

        let sectors = response
            .results
            .into_iter()
            .map(|r| {
                r.sector
                    .trim()
                    .parse()
                    .map_err(|_| ServiceError::InvalidSector(r.sector))
            })
            .collect::<Result<Vec<u32>, _>>()?;
        debug!("RA {ra_deg}°, Dec {dec_deg}° is in sectors {sectors:?}");
        Ok(sectors)
    }
}
