// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff (tables, reading/writing, globs).

mod glob;
pub mod table;

pub use self::glob::GlobError;
pub(crate) use self::glob::delete_all_matches_from_glob;
