//! `taskly where` resolves the database location without touching disk.
//!
//! Kept in its own test binary because it sets process environment.

use taskly_cli::task::print_storage_path;
use taskly_local_db::{DB_FILE_NAME, HOME_ENV};
use tempfile::TempDir;

#[test]
fn where_prints_path_under_taskly_home_without_creating_it() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("nested").join("taskly");
    std::env::set_var(HOME_ENV, &home);

    let mut out = Vec::new();
    print_storage_path(&mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed, format!("{}\n", home.join(DB_FILE_NAME).display()));
    assert!(!home.exists());
}
