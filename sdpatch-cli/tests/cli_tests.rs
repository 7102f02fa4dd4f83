// sdpatch-cli/tests/cli_tests.rs

use clap::Parser;
use sdpatch_cli::cli::{Cli, Commands};
use sdpatch_core::region::WatermarkRegion;
use std::path::PathBuf;

#[test]
fn test_patch_args_parse() {
    let cli = Cli::try_parse_from([
        "sdpatch", "patch", "--hd-dir", "hd", "--sd-dir", "sd", "--region", "1520,40,320,90",
    ])
    .unwrap();

    let Commands::Patch(args) = cli.command;
    assert_eq!(args.hd_dir, PathBuf::from("hd"));
    assert_eq!(args.sd_dir, PathBuf::from("sd"));
    assert_eq!(args.output_dir, PathBuf::from("output"));
    assert_eq!(args.log_dir, None);
    assert_eq!(args.region, Some(WatermarkRegion::new(1520, 40, 320, 90)));
    assert_eq!(args.fps_fallback, None);
}

#[test]
fn test_patch_args_require_directories() {
    assert!(Cli::try_parse_from(["sdpatch", "patch", "--hd-dir", "hd"]).is_err());
    assert!(Cli::try_parse_from(["sdpatch", "patch"]).is_err());
}

#[test]
fn test_patch_args_reject_malformed_region() {
    assert!(Cli::try_parse_from([
        "sdpatch", "patch", "--hd-dir", "hd", "--sd-dir", "sd", "--region", "1,2,3",
    ])
    .is_err());
    assert!(Cli::try_parse_from([
        "sdpatch", "patch", "--hd-dir", "hd", "--sd-dir", "sd", "--region", "a,b,c,d",
    ])
    .is_err());
}

#[test]
fn test_patch_args_optional_overrides() {
    let cli = Cli::try_parse_from([
        "sdpatch",
        "patch",
        "--hd-dir",
        "hd",
        "--sd-dir",
        "sd",
        "-o",
        "patched",
        "--log-dir",
        "logs",
        "--fps-fallback",
        "30",
    ])
    .unwrap();

    let Commands::Patch(args) = cli.command;
    assert_eq!(args.output_dir, PathBuf::from("patched"));
    assert_eq!(args.log_dir, Some(PathBuf::from("logs")));
    assert_eq!(args.fps_fallback, Some(30.0));
}
