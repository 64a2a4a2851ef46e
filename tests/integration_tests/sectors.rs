// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use indoc::indoc;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

use exotess::{split_sectors, Cell, Table};

use crate::{exotess, get_cmd_output};

fn write_stars(dir: &Path) -> PathBuf {
    let file = dir.join("stars.dat");
    std::fs::write(
        &file,
        indoc! {r#"
            # Stars of interest
            name TIC
            "WASP-18 b" 100100827
        "#},
    )
    .unwrap();
    file
}

/// Mock MAST for TIC 100100827, observed in sectors 2, 3 and 29.
fn mock_mast(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        server
            .mock("POST", "/api/v0/invoke")
            .match_body(Matcher::Regex("Mast.Name.Lookup".into()))
            .with_body(
                json!({ "resolvedCoordinate": [{ "ra": 24.354, "decl": -45.678 }] }).to_string(),
            )
            .expect(1)
            .create(),
        server
            .mock("POST", "/api/v0/invoke")
            .match_body(Matcher::Regex("Mast.Catalogs.Tic.Cone".into()))
            .with_body(
                json!({
                    "status": "COMPLETE",
                    "data": [
                        { "ID": "100100828", "ra": 24.36, "dec": -45.68, "dstArcSec": 12.5 },
                        { "ID": "100100827", "ra": 24.354, "dec": -45.678, "dstArcSec": 0.0 },
                    ],
                })
                .to_string(),
            )
            .expect(1)
            .create(),
        server
            .mock("GET", "/tesscut/api/v0.1/sector")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ra".into(), "24.354".into()),
                Matcher::UrlEncoded("dec".into(), "-45.678".into()),
            ]))
            .with_body(
                json!({ "results": [
                    { "sectorName": "tess-s0002-2-1", "sector": "0002" },
                    { "sectorName": "tess-s0003-2-2", "sector": "0003" },
                    { "sectorName": "tess-s0029-2-1", "sector": "0029" },
                ]})
                .to_string(),
            )
            .expect(1)
            .create(),
    ]
}

#[test]
fn test_sectors_added_to_table() {
    let mut server = mockito::Server::new();
    let mocks = mock_mast(&mut server);

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let stars = write_stars(tmp_dir.path());
    let stars_str = stars.display().to_string();
    let url = server.url();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "sectors",
            "--table", &stars_str,
            "--mast-url", &url,
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "sectors failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    for mock in &mocks {
        mock.assert();
    }

    let table = Table::read_file(tmp_dir.path().join("stars_sectors.dat")).unwrap();
    assert_eq!(table.columns(), &["name", "TIC", "tess_sectors", "tess_sectors_lc"]);
    assert_eq!(table.get(0, "tess_sectors").unwrap(), &Cell::from("2, 3, 29"));
    assert_eq!(table.get(0, "tess_sectors_lc").unwrap(), &Cell::from(""));
    // The input is untouched.
    assert_eq!(Table::read_file(&stars).unwrap().columns(), &["name", "TIC"]);
}

#[test]
fn test_sectors_with_light_curves() {
    let mut server = mockito::Server::new();
    let _mocks = mock_mast(&mut server);
    let _s2 = server
        .mock("GET", "/tid/s0002/0000/0001/0010/0827/")
        .with_body(r#"<a href="tess2018234235059-s0002-0000000100100827-0121-s_lc.fits">"#)
        .create();
    let _s3 = server
        .mock("GET", "/tid/s0003/0000/0001/0010/0827/")
        .with_status(404)
        .create();
    let _s29 = server
        .mock("GET", "/tid/s0029/0000/0001/0010/0827/")
        .with_body(r#"<a href="tess2020238165205-s0029-0000000100100827-0193-s_lc.fits">"#)
        .create();

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let stars = write_stars(tmp_dir.path());
    let stars_str = stars.display().to_string();
    let output = tmp_dir.path().join("out.dat");
    let output_str = output.display().to_string();
    let url = server.url();
    let archive_url = format!("{url}/tid");

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "sectors",
            "--table", &stars_str,
            "--output", &output_str,
            "--light-curves",
            "--mast-url", &url,
            "--tess-archive-url", &archive_url,
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "sectors failed: {}", cmd.err().unwrap());

    let table = Table::read_file(&output).unwrap();
    let all = split_sectors(&table.get(0, "tess_sectors").unwrap().to_string()).unwrap();
    let lc = split_sectors(&table.get(0, "tess_sectors_lc").unwrap().to_string()).unwrap();
    assert_eq!(all, vec![2, 3, 29]);
    assert_eq!(lc, vec![2, 29]);
}

#[test]
fn test_sectors_catalog_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api/v0/invoke")
        .with_status(503)
        .create();

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let stars = write_stars(tmp_dir.path());
    let stars_str = stars.display().to_string();
    let url = server.url();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "sectors",
            "--table", &stars_str,
            "--mast-url", &url,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("TIC 100100827"), "{stderr}");
    assert!(!tmp_dir.path().join("stars_sectors.dat").exists());
}
