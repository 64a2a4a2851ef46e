// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use indoc::indoc;
use tempfile::TempDir;

use super::*;

#[test]
fn test_defaults() {
    let args = ExoplanetsArgs::parse_from(["exoplanets"]);
    let params = args.parse().unwrap();
    let p = &params.partition;
    assert_eq!(p.columns.as_slice(), &DEFAULT_COLUMNS);
    assert_eq!(p.renamed_columns.as_slice(), &DEFAULT_RENAMED_COLUMNS);
    assert!(p.delete_existing);
    assert!(!p.persist);
    assert_eq!(p.output_dir, PathBuf::from("."));
    assert_eq!(params.archive_url, EXOPLANET_ARCHIVE_URL);
}

#[test]
fn test_cli_arguments() {
    let tmp_dir = TempDir::new().unwrap();
    let dir = tmp_dir.path().display().to_string();
    #[rustfmt::skip]
    let args = ExoplanetsArgs::parse_from([
        "exoplanets",
        "--columns", "pl_name", "disc_year",
        "--renamed-columns", "planet", "year",
        "--keep-existing",
        "--save",
        "--output-dir", &dir,
        "--date", "20241117",
        "--archive-url", "http://localhost:1234",
    ]);
    let params = args.parse().unwrap();
    let p = &params.partition;
    assert_eq!(p.columns.as_slice(), &["pl_name", "disc_year"]);
    assert_eq!(p.renamed_columns.as_slice(), &["planet", "year"]);
    assert!(!p.delete_existing);
    assert!(p.persist);
    assert_eq!(
        p.output_path(Mission::Tess),
        tmp_dir.path().join("TESS_exoplanets_20241117.dat")
    );
    assert_eq!(params.archive_url, "http://localhost:1234");
}

#[test]
fn test_columns_without_renames_keep_their_names() {
    let args = ExoplanetsArgs::parse_from(["exoplanets", "-c", "pl_name", "ra"]);
    let params = args.parse().unwrap();
    assert_eq!(
        params.partition.renamed_columns.as_slice(),
        &["pl_name", "ra"]
    );
}

#[test]
fn test_bad_arguments() {
    let result = ExoplanetsArgs::parse_from(["exoplanets", "-r", "planet"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(_))));

    let result = ExoplanetsArgs::parse_from(["exoplanets", "-c", "a", "b", "-r", "x"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(_))));

    let result = ExoplanetsArgs::parse_from(["exoplanets", "-c", "a,b", "-r", "x"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(s)) if s.contains("a,b")));

    // Caught before any request is made.
    let result =
        ExoplanetsArgs::parse_from(["exoplanets", "-c", "ra", "ra", "-r", "x", "y"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(s)) if s.contains("'ra'")));

    let result = ExoplanetsArgs::parse_from(["exoplanets", "--date", "2024-11-17"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(s)) if s.contains("YYYYMMDD")));

    let result =
        ExoplanetsArgs::parse_from(["exoplanets", "--output-dir", "/does/not/exist"]).parse();
    assert!(matches!(result, Err(ExotessError::Exoplanets(_))));
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("20241117").unwrap(),
        NaiveDate::from_ymd_opt(2024, 11, 17).unwrap()
    );
    assert!(parse_date("20241317").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn test_arg_file_merge() {
    let tmp_dir = TempDir::new().unwrap();
    let arg_file = tmp_dir.path().join("exoplanets.toml");
    std::fs::write(
        &arg_file,
        indoc! {r#"
            columns = ["pl_name", "ra"]
            renamed_columns = ["planet", "ra"]
            save = true
            date = "20200101"
        "#},
    )
    .unwrap();

    let arg_file_str = arg_file.display().to_string();
    let args = ExoplanetsArgs::parse_from(["exoplanets", &arg_file_str, "--date", "20241117"])
        .merge()
        .unwrap();
    assert_eq!(args.columns.as_deref(), Some(&["pl_name".to_string(), "ra".to_string()][..]));
    assert!(args.save);
    assert!(!args.keep_existing);
    // CLI arguments win.
    assert_eq!(args.date.as_deref(), Some("20241117"));
    assert!(args.args_file.is_none());
}

#[test]
fn test_json_arg_file() {
    let tmp_dir = TempDir::new().unwrap();
    let arg_file = tmp_dir.path().join("exoplanets.json");
    std::fs::write(&arg_file, r#"{ "keep_existing": true, "archive_url": "http://x" }"#).unwrap();

    let arg_file_str = arg_file.display().to_string();
    let args = ExoplanetsArgs::parse_from(["exoplanets", &arg_file_str])
        .merge()
        .unwrap();
    assert!(args.keep_existing);
    assert_eq!(args.archive_url.as_deref(), Some("http://x"));
}

#[test]
fn test_bad_arg_files() {
    let tmp_dir = TempDir::new().unwrap();
    let yaml = tmp_dir.path().join("exoplanets.yaml");
    std::fs::write(&yaml, "save: true").unwrap();
    let yaml_str = yaml.display().to_string();
    let result = ExoplanetsArgs::parse_from(["exoplanets", &yaml_str]).merge();
    assert!(matches!(result, Err(ExotessError::ArgFile(_))));

    let toml = tmp_dir.path().join("exoplanets.toml");
    std::fs::write(&toml, "save = \"yes please\"").unwrap();
    let toml_str = toml.display().to_string();
    let result = ExoplanetsArgs::parse_from(["exoplanets", &toml_str]).merge();
    assert!(matches!(result, Err(ExotessError::ArgFile(_))));
}
