// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

use exotess::{Cell, Table};

use crate::{exotess, get_cmd_output};

fn mock_mission(server: &mut ServerGuard, facility: &str, body: serde_json::Value) -> Mock {
    server
        .mock("GET", "/TAP/sync")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "query".into(),
                format!(
                    "select pl_name,disc_year,disc_facility from ps where disc_facility like '%{facility}%' and default_flag=1"
                ),
            ),
            Matcher::UrlEncoded("format".into(), "json".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

#[test]
fn test_exoplanets_saved_per_mission() {
    let mut server = mockito::Server::new();
    let k2 = mock_mission(
        &mut server,
        "K2",
        json!([
            { "pl_name": "K2-18 b", "disc_year": 2015, "disc_facility": "K2" },
            { "pl_name": "K2-3 b", "disc_year": 2015, "disc_facility": "K2" },
        ]),
    );
    let kepler = mock_mission(
        &mut server,
        "Kepler",
        json!([{ "pl_name": "Kepler-22 b", "disc_year": 2011, "disc_facility": "Kepler" }]),
    );
    let tess = mock_mission(&mut server, "TESS", json!([]));

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let old = tmp_dir.path().join("Kepler_exoplanets_20200101.dat");
    File::create(&old).unwrap();
    let dir = tmp_dir.path().display().to_string();
    let url = server.url();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "exoplanets",
            "--columns", "pl_name", "disc_year", "disc_facility",
            "--renamed-columns", "planet_name", "discovery_year", "mission",
            "--save",
            "--output-dir", &dir,
            "--date", "20241117",
            "--archive-url", &url,
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "exoplanets failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Total:  3 planets"), "{stdout}");
    k2.assert();
    kepler.assert();
    tess.assert();

    assert!(!old.exists());
    let k2_file = tmp_dir.path().join("K2_exoplanets_20241117.dat");
    let table = Table::read_file(&k2_file).unwrap();
    assert_eq!(table.columns(), &["planet_name", "discovery_year", "mission"]);
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.get(1, "planet_name").unwrap(), &Cell::from("K2-3 b"));
    assert_eq!(table.get(0, "discovery_year").unwrap(), &Cell::Int(2015));

    let tess_file = tmp_dir.path().join("TESS_exoplanets_20241117.dat");
    assert!(Table::read_file(tess_file).unwrap().is_empty());
    assert!(tmp_dir
        .path()
        .join("Kepler_exoplanets_20241117.dat")
        .exists());
}

#[test]
fn test_exoplanets_dry_run() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let old = tmp_dir.path().join("TESS_exoplanets_20200101.dat");
    File::create(&old).unwrap();
    let dir = tmp_dir.path().display().to_string();
    let url = server.url();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "--dry-run",
            "exoplanets",
            "--save",
            "--output-dir", &dir,
            "--archive-url", &url,
        ])
        .ok();
    assert!(cmd.is_ok(), "exoplanets failed: {}", cmd.err().unwrap());
    mock.assert();
    assert!(old.exists());
}

#[test]
fn test_exoplanets_server_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/TAP/sync")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let dir = tmp_dir.path().display().to_string();
    let url = server.url();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "exoplanets",
            "--save",
            "--output-dir", &dir,
            "--archive-url", &url,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("K2"), "{stderr}");
    // Nothing was written.
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_exoplanets_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let toml = tmp_dir.path().join("args.toml");
    let toml_str = toml.display().to_string();

    #[rustfmt::skip]
    let cmd = exotess()
        .args([
            "--dry-run",
            "--save-toml", &toml_str,
            "exoplanets",
            "--columns", "pl_name", "ra",
            "--date", "20241117",
        ])
        .ok();
    assert!(cmd.is_ok(), "exoplanets failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&toml).unwrap();
    assert!(contents.contains("date = \"20241117\""), "{contents}");

    // The saved arguments can be used for another run.
    let cmd = exotess()
        .args(["--dry-run", "exoplanets", &toml_str])
        .ok();
    assert!(cmd.is_ok(), "exoplanets failed: {}", cmd.err().unwrap());
}
