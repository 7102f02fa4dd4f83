// sdpatch-core/tests/pipeline_tests.rs
//
// Exercises process_videos end to end with fake executors injected through
// the FfmpegExecutor / FfprobeExecutor / RegionProvider trait seams. No
// ffmpeg installation is required.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use sdpatch_core::error::{CoreError, CoreResult};
use sdpatch_core::external::{FfmpegExecutor, FfprobeExecutor};
use sdpatch_core::region::{FixedRegionProvider, WatermarkRegion};
use sdpatch_core::{process_videos, CoreConfig};
use tempfile::tempdir;

fn key(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Per-video shape of the simulated footage.
#[derive(Clone, Copy)]
struct FakeVideo {
    frame_count: usize,
    dims: (u32, u32),
}

#[derive(Default)]
struct FakeFfmpeg {
    videos: HashMap<String, FakeVideo>,
    fail_audio: bool,
    /// (output path, audio present) per assemble call
    assembled: RefCell<Vec<(PathBuf, bool)>>,
}

impl FakeFfmpeg {
    fn with_video(mut self, name: &str, frame_count: usize, dims: (u32, u32)) -> Self {
        self.videos
            .insert(name.to_string(), FakeVideo { frame_count, dims });
        self
    }

    fn video(&self, path: &Path) -> CoreResult<FakeVideo> {
        self.videos
            .get(&key(path))
            .copied()
            .ok_or_else(|| CoreError::PathError(format!("unknown fake video {}", path.display())))
    }
}

impl FfmpegExecutor for FakeFfmpeg {
    fn extract_frames(&self, video: &Path, frames_dir: &Path) -> CoreResult<()> {
        let fake = self.video(video)?;
        let (w, h) = fake.dims;
        for i in 1..=fake.frame_count {
            RgbImage::from_pixel(w, h, Rgb([60, 60, 60]))
                .save(frames_dir.join(format!("frame_{i:05}.png")))?;
        }
        Ok(())
    }

    fn extract_reference_frame(&self, video: &Path, image_path: &Path) -> CoreResult<()> {
        let fake = self.video(video)?;
        let (w, h) = fake.dims;
        RgbImage::from_pixel(w, h, Rgb([60, 60, 60])).save(image_path)?;
        Ok(())
    }

    fn extract_audio(&self, _video: &Path, audio_path: &Path) -> CoreResult<()> {
        if self.fail_audio {
            return Err(CoreError::CommandStart(
                "ffmpeg (audio extraction)".to_string(),
                "simulated failure".to_string(),
            ));
        }
        std::fs::write(audio_path, b"fake aac")?;
        Ok(())
    }

    fn assemble_video(
        &self,
        frames_dir: &Path,
        audio: Option<&Path>,
        output: &Path,
        _fps: f64,
    ) -> CoreResult<()> {
        // The real assembler encodes whatever frames exist; an empty
        // directory would be a pipeline bug.
        assert!(
            std::fs::read_dir(frames_dir)?.next().is_some(),
            "assemble_video called with no frames"
        );
        File::create(output)?;
        self.assembled
            .borrow_mut()
            .push((output.to_path_buf(), audio.is_some()));
        Ok(())
    }
}

struct FakeProbe {
    durations: HashMap<String, f64>,
    fps: f64,
}

impl FakeProbe {
    fn new(fps: f64) -> Self {
        Self {
            durations: HashMap::new(),
            fps,
        }
    }

    fn with_duration(mut self, name: &str, secs: f64) -> Self {
        self.durations.insert(name.to_string(), secs);
        self
    }
}

impl FfprobeExecutor for FakeProbe {
    fn duration_secs(&self, input: &Path) -> CoreResult<f64> {
        self.durations.get(&key(input)).copied().ok_or_else(|| {
            CoreError::FfprobeParse(format!("no fake duration for {}", input.display()))
        })
    }

    fn frame_rate(&self, _input: &Path) -> CoreResult<f64> {
        Ok(self.fps)
    }
}

/// Creates hd/sd/output dirs with the given (empty placeholder) video files.
fn setup_dirs(
    root: &Path,
    hd_names: &[&str],
    sd_names: &[&str],
) -> (PathBuf, PathBuf, PathBuf, CoreConfig) {
    let hd_dir = root.join("hd");
    let sd_dir = root.join("sd");
    let output_dir = root.join("output");
    std::fs::create_dir_all(&hd_dir).unwrap();
    std::fs::create_dir_all(&sd_dir).unwrap();
    for name in hd_names {
        File::create(hd_dir.join(name)).unwrap();
    }
    for name in sd_names {
        File::create(sd_dir.join(name)).unwrap();
    }
    let mut config = CoreConfig::new(hd_dir.clone(), sd_dir.clone(), output_dir.clone());
    config.temp_dir = Some(root.join("work"));
    (hd_dir, sd_dir, output_dir, config)
}

const HD_NAME: &str = "ABCDEFGH12345678_take1.mp4";
const SD_NAME: &str = "ABCDEFGH12345678_proxy.mp4";

#[test]
fn test_end_to_end_matched_pair() {
    let root = tempdir().unwrap();
    let (_, _, output_dir, config) = setup_dirs(root.path(), &[HD_NAME], &[SD_NAME]);

    let ffmpeg = FakeFfmpeg::default()
        .with_video(HD_NAME, 12, (16, 16))
        .with_video(SD_NAME, 10, (8, 8));
    // 4 fps, SD runs 2.0s -> duration bound of 8 frames beats both counts
    let probe = FakeProbe::new(4.0).with_duration(SD_NAME, 2.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let summaries = process_videos(&ffmpeg, &probe, &region, &config).unwrap();

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.filename, HD_NAME);
    assert_eq!(summary.frame_limit, 8);
    assert_eq!(summary.frames_patched, 8);
    assert_eq!(summary.frames_skipped, 0);

    let expected_output = output_dir.join("ABCDEFGH12345678_take1_no_watermark.mp4");
    assert_eq!(summary.output_path, expected_output);
    assert!(expected_output.exists());

    let assembled = ffmpeg.assembled.borrow();
    assert_eq!(assembled.len(), 1);
    assert!(assembled[0].1, "audio should be muxed in");
}

#[test]
fn test_unmatched_hd_file_is_skipped() {
    let root = tempdir().unwrap();
    // Second HD file has no 16-character code at all
    let (_, _, output_dir, config) =
        setup_dirs(root.path(), &[HD_NAME, "extra_clip.mp4"], &[SD_NAME]);

    let ffmpeg = FakeFfmpeg::default()
        .with_video(HD_NAME, 4, (16, 16))
        .with_video("extra_clip.mp4", 4, (16, 16))
        .with_video(SD_NAME, 4, (8, 8));
    let probe = FakeProbe::new(25.0).with_duration(SD_NAME, 60.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let summaries = process_videos(&ffmpeg, &probe, &region, &config).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].filename, HD_NAME);
    // Exactly one output file, for the matched pair only
    let outputs: Vec<_> = std::fs::read_dir(&output_dir).unwrap().collect();
    assert_eq!(outputs.len(), 1);
}

#[test]
fn test_missing_calibration_match_aborts_run() {
    let root = tempdir().unwrap();
    let (_, _, output_dir, config) = setup_dirs(
        root.path(),
        &[HD_NAME],
        &["ZZZZYYYYXXXX0000_other.mp4"],
    );

    let ffmpeg = FakeFfmpeg::default().with_video(HD_NAME, 4, (16, 16));
    let probe = FakeProbe::new(25.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let result = process_videos(&ffmpeg, &probe, &region, &config);
    assert!(matches!(result, Err(CoreError::NoCalibrationMatch(_))));
    assert!(!output_dir.exists());
}

#[test]
fn test_working_directory_isolation_between_pairs() {
    let root = tempdir().unwrap();
    let hd2 = "QRSTUVWX87654321_take2.mp4";
    let sd2 = "QRSTUVWX87654321_proxy.mp4";
    let (_, _, _, config) = setup_dirs(root.path(), &[HD_NAME, hd2], &[SD_NAME, sd2]);

    // Deliberately different frame counts per pair; any leakage of frames
    // from the first pair's working directory would change the second
    // pair's counts
    let ffmpeg = FakeFfmpeg::default()
        .with_video(HD_NAME, 5, (16, 16))
        .with_video(SD_NAME, 5, (8, 8))
        .with_video(hd2, 3, (16, 16))
        .with_video(sd2, 3, (8, 8));
    let probe = FakeProbe::new(25.0)
        .with_duration(SD_NAME, 60.0)
        .with_duration(sd2, 60.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let summaries = process_videos(&ffmpeg, &probe, &region, &config).unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].frame_limit, 5);
    assert_eq!(summaries[0].frames_patched, 5);
    assert_eq!(summaries[1].frame_limit, 3);
    assert_eq!(summaries[1].frames_patched, 3);
}

#[test]
fn test_audio_failure_is_recoverable() {
    let root = tempdir().unwrap();
    let (_, _, _, config) = setup_dirs(root.path(), &[HD_NAME], &[SD_NAME]);

    let mut ffmpeg = FakeFfmpeg::default()
        .with_video(HD_NAME, 4, (16, 16))
        .with_video(SD_NAME, 4, (8, 8));
    ffmpeg.fail_audio = true;
    let probe = FakeProbe::new(25.0).with_duration(SD_NAME, 60.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let summaries = process_videos(&ffmpeg, &probe, &region, &config).unwrap();

    assert_eq!(summaries.len(), 1);
    let assembled = ffmpeg.assembled.borrow();
    assert_eq!(assembled.len(), 1);
    assert!(!assembled[0].1, "assembly should proceed without audio");
}

#[test]
fn test_duration_probe_failure_falls_back_to_frame_counts() {
    let root = tempdir().unwrap();
    let (_, _, _, config) = setup_dirs(root.path(), &[HD_NAME], &[SD_NAME]);

    let ffmpeg = FakeFfmpeg::default()
        .with_video(HD_NAME, 6, (16, 16))
        .with_video(SD_NAME, 4, (8, 8));
    // No duration registered for the SD file: probe errors, orchestrator
    // treats all available frames as within range
    let probe = FakeProbe::new(25.0);
    let region = FixedRegionProvider(WatermarkRegion::new(0, 0, 4, 4));

    let summaries = process_videos(&ffmpeg, &probe, &region, &config).unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].frame_limit, 4);
    assert_eq!(summaries[0].frames_patched, 4);
}
