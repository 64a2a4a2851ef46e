// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! MAST catalog searches through the MAST "invoke" API.
//!
//! Searching by object name is two requests: the name is resolved to a sky
//! position, then the catalog is cone-searched around that position.

use log::debug;
use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    http_client, join_url, send_for_text, CatalogCandidate, ServiceError, StarCatalog,
};

const NAME_LOOKUP_SERVICE: &str = "Mast.Name.Lookup";
const SUPPORTED_CATALOGS: &str = "tic, ctl";
const PAGE_SIZE: usize = 50000;

pub struct MastCatalogs {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct MastRequest<'a> {
    service: &'a str,
    params: Value,
    format: &'static str,
    pagesize: usize,
    page: usize,
}

#[derive(Deserialize)]
struct NameLookupResponse {
    #[serde(rename = "resolvedCoordinate", default)]
    resolved: Vec<ResolvedCoordinate>,
}

#[derive(Deserialize)]
struct ResolvedCoordinate {
    ra: f64,
    decl: f64,
}

#[derive(Deserialize)]
struct ConeResponse {
    status: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Vec<ConeRecord>,
}

#[derive(Deserialize)]
struct ConeRecord {
    #[serde(rename = "ID")]
    id: Value,
    ra: f64,
    dec: f64,
    #[serde(rename = "dstArcSec")]
    dst_arcsec: f64,
}

impl MastCatalogs {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into(),
        })
    }

    fn invoke<T: DeserializeOwned>(
        &self,
        service: &str,
        params: Value,
    ) -> Result<T, ServiceError> {
        let url = join_url(&self.base_url, "api/v0/invoke");
        let request = MastRequest {
            service,
            params,
            format: "json",
            pagesize: PAGE_SIZE,
            page: 1,
        };
        let request = serde_json::to_string(&request).map_err(|err| ServiceError::Decode {
            url: url.clone(),
            err,
        })?;
        debug!("MAST request: {request}");
        let body = send_for_text(
            self.client.post(&url).form(&[("request", request)]),
            &url,
        )?;
        serde_json::from_str(&body).map_err(|err| ServiceError::Decode { url, err })
    }

    /// Resolve an object name to (RA, Dec) \[degrees\].
    fn resolve(&self, object: &str) -> Result<(f64, f64), ServiceError> {
        let response: NameLookupResponse = self.invoke(
            NAME_LOOKUP_SERVICE,
            json!({ "input": object, "format": "json" }),
        )?;
        response
            .resolved
            .first()
            .map(|c| (c.ra, c.decl))
            .ok_or_else(|| ServiceError::Unresolved(object.to_string()))
    }
}

fn cone_service(catalog: &str) -> Result<&'static str, ServiceError> {
    match catalog.to_lowercase().as_str() {
        "tic" => Ok("Mast.Catalogs.Tic.Cone"),
        "ctl" => Ok("Mast.Catalogs.Ctl.Cone"),
        _ => Err(ServiceError::UnsupportedCatalog(
            catalog.to_string(),
            SUPPORTED_CATALOGS,
        )),
    }
}

impl StarCatalog for MastCatalogs {
    fn query_object(
        &self,
        object: &str,
        radius_deg: f64,
        catalog: &str,
    ) -> Result<Vec<CatalogCandidate>, ServiceError> {
        let service = cone_service(catalog)?;
        let (ra, dec) = self.resolve(object)?;
        debug!("'{object}' resolved to RA {ra}°, Dec {dec}°");

        let response: ConeResponse = self.invoke(
            service,
            json!({ "ra": ra, "dec": dec, "radius": radius_deg }),
        )?;
        if response.status != "COMPLETE" {
            return Err(ServiceError::Mast {
                service,
                status: response.status,
                msg: response.msg.unwrap_or_default(),
            });
        }

        Ok(response
            .data
            .into_iter()
            .map(|r| CatalogCandidate {
                id: match r.id {
                    Value::String(s) => s,
                    v => v.to_string(),
                },
                ra: r.ra,
                dec: r.dec,
                dst_arcsec: r.dst_arcsec,
            })
            .collect())
    }
}
