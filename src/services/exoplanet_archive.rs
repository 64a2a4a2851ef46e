// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The NASA Exoplanet Archive's synchronous TAP service.

use indexmap::IndexMap;
use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

use super::{http_client, join_url, send_for_text, ExoplanetArchive, ServiceError};
use crate::io::table::{Cell, Table};

pub struct NasaExoplanetArchive {
    client: Client,
    base_url: String,
}

impl NasaExoplanetArchive {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, ServiceError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into(),
        })
    }
}

impl ExoplanetArchive for NasaExoplanetArchive {
    fn query_criteria(
        &self,
        table: &str,
        select: &str,
        filter: &str,
    ) -> Result<Table, ServiceError> {
        let url = join_url(&self.base_url, "TAP/sync");
        let query = format!("select {select} from {table} where {filter}");
        debug!("Querying the exoplanet archive: {query}");

        let body = send_for_text(
            self.client
                .get(&url)
                .query(&[("query", query.as_str()), ("format", "json")]),
            &url,
        )?;
        let records: Vec<IndexMap<String, Value>> =
            serde_json::from_str(&body).map_err(|err| ServiceError::Decode {
                url: url.clone(),
                err,
            })?;
        debug!("Got {} records", records.len());

        let columns: Vec<&str> = select.split(',').map(str::trim).collect();
        let mut out = Table::new(columns.iter().copied())?;
        for (i_row, mut record) in records.into_iter().enumerate() {
            let row = columns
                .iter()
                .map(|&c| {
                    record
                        .swap_remove(c)
                        .map(value_to_cell)
                        .ok_or_else(|| ServiceError::MissingColumn {
                            row: i_row,
                            column: c.to_string(),
                            url: url.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            out.push_row(row)?;
        }

        Ok(out)
    }
}

fn value_to_cell(v: Value) -> Cell {
    match v {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
        },
        Value::String(s) => Cell::Str(s),
        v => Cell::Str(v.to_string()),
    }
}
