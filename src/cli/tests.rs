// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

#[test]
fn test_build_info_is_generated() {
    // The git constants only exist when the build script finds the manifest.
    let _: Option<bool> = GIT_DIRTY;
    let _: Option<&str> = GIT_COMMIT_HASH_SHORT;
    let _: Option<&str> = GIT_HEAD_REF;
    assert!(!RUSTC_VERSION.is_empty());
    assert!(!BUILT_TIME_UTC.is_empty());
    display_build_info();
}

#[test]
fn test_subcommand_aliases() {
    let cli = Exotess::parse_from(["exotess", "partition", "--dry-run"]);
    assert!(matches!(cli.command, Command::Exoplanets(_)));
    assert!(cli.global_opts.dry_run);

    let cli = Exotess::parse_from(["exotess", "-vv", "tess-sectors", "-t", "stars.dat"]);
    assert!(matches!(cli.command, Command::Sectors(_)));
    assert_eq!(cli.global_opts.verbosity, 2);
}
