// sdpatch-core/tests/discovery_tests.rs

use sdpatch_core::discovery::find_video_files;
use sdpatch_core::error::CoreError;
use std::fs::{self, File};
use tempfile::tempdir;

#[test]
fn test_find_video_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("clip_b.mp4"))?;
    File::create(input_dir.join("clip_a.MOV"))?; // Case insensitivity
    File::create(input_dir.join("clip_c.avi"))?;
    File::create(input_dir.join("document.txt"))?;
    File::create(input_dir.join("image.png"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.mp4"))?; // Not found (top level only)

    let files = find_video_files(input_dir)?;

    // Sorted by filename, original case preserved
    assert_eq!(files.len(), 3);
    assert_eq!(files[0].file_name().unwrap(), "clip_a.MOV");
    assert_eq!(files[1].file_name().unwrap(), "clip_b.mp4");
    assert_eq!(files[2].file_name().unwrap(), "clip_c.avi");

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_video_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("document.txt"))?;
    fs::create_dir(input_dir.join("subdir"))?;

    let result = find_video_files(input_dir);
    assert!(result.is_err());
    match result.err().unwrap() {
        CoreError::NoFilesFound => {}
        e => panic!("Unexpected error type: {:?}", e),
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_video_files_nonexistent_dir() {
    let result = find_video_files(std::path::Path::new("surely_this_does_not_exist_42"));
    assert!(matches!(result, Err(CoreError::Io(_))));
}
