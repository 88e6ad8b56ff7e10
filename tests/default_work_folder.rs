use batch_mover::{BatchMover, Config};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::tempdir;

/// Restores the process working directory when dropped.
struct CwdGuard(std::path::PathBuf);

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn no_work_folder_means_current_directory() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), "a").unwrap();
    let _restore = CwdGuard(env::current_dir().unwrap());
    env::set_current_dir(td.path()).unwrap();

    let mover = BatchMover::new(&Config::default()).unwrap();
    assert_eq!(mover.work_folder(), dunce::canonicalize(td.path()).unwrap());
    assert_eq!(mover.info().file_count, 1);
}

#[test]
#[serial]
fn moving_does_not_change_current_directory() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.txt"), "a").unwrap();
    let before = env::current_dir().unwrap();

    let mut mover = BatchMover::new(&Config::new(td.path(), 1)).unwrap();
    mover.move_files().unwrap();

    assert_eq!(env::current_dir().unwrap(), before);
    assert!(td.path().join("folder-1/a.txt").exists());
}
