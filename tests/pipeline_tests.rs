//! End-to-end pipeline tests driven through the decoder seam.
//!
//! Platform icon extraction is unavailable in CI, so these tests use a
//! fixture decoder that parses every candidate as an `.ico` container. The
//! rest of the pipeline (walker, sizing, hashing, dedup, output) is the real
//! thing.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;
use tempfile::TempDir;

use icosweep::decoder::{decode_ico_file, DecodeError, IconDecoder};
use icosweep::pipeline::{Pipeline, PipelineConfig};
use icosweep::scanner::{pixel_digest, CandidateKind};

/// Decoder that treats every candidate as an ICO container, regardless of
/// extension. Lets tests exercise the executable path portably.
struct IcoAnywhereDecoder;

impl IconDecoder for IcoAnywhereDecoder {
    fn decode(
        &self,
        path: &Path,
        _kind: CandidateKind,
    ) -> Result<Option<RgbaImage>, DecodeError> {
        decode_ico_file(path)
    }
}

/// Encode a solid-color square icon as a single-frame ICO file.
fn write_ico(path: &Path, size: u32, pixel: [u8; 4]) {
    let rgba: Vec<u8> = pixel
        .iter()
        .copied()
        .cycle()
        .take((size * size * 4) as usize)
        .collect();
    let image = ico::IconImage::from_rgba_data(size, size, rgba);
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    dir.add_entry(ico::IconDirEntry::encode(&image).unwrap());
    dir.write(File::create(path).unwrap()).unwrap();
}

fn run_pipeline(source: &Path, dest: &Path) -> icosweep::pipeline::ScanSummary {
    run_pipeline_with(source, PipelineConfig::new(dest.to_path_buf()))
}

fn run_pipeline_with(source: &Path, config: PipelineConfig) -> icosweep::pipeline::ScanSummary {
    let pipeline = Pipeline::new(config, Arc::new(IcoAnywhereDecoder));
    pipeline.run(source).unwrap()
}

#[test]
fn test_scenario_identical_icons_across_formats_saved_once() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    // One .ico and one .exe carrying byte-identical 64x64 icon content.
    write_ico(&source.path().join("app.ico"), 64, [200, 40, 10, 255]);
    write_ico(&source.path().join("app.exe"), 64, [200, 40, 10, 255]);

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.files_with_icons, 2);
    assert_eq!(summary.icons_saved, 1);

    let bucket: Vec<_> = fs::read_dir(dest.path().join("64x64"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(bucket.len(), 1);
}

#[test]
fn test_scenario_corrupt_container_is_silent() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    fs::write(source.path().join("broken.dll"), b"not a pe file at all").unwrap();

    let summary = run_pipeline(source.path(), dest.path());

    // Readable-but-corrupt decodes to "no icon": scanned only.
    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.files_with_icons, 0);
    assert_eq!(summary.icons_saved, 0);
}

#[test]
#[cfg(unix)]
fn test_scenario_unreadable_file_degrades_to_skip() {
    use std::os::unix::fs::PermissionsExt;

    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let locked = source.path().join("locked.dll");
    write_ico(&locked, 32, [1, 2, 3, 255]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if File::open(&locked).is_ok() {
        // Permission bits are not enforced for this user (e.g. root).
        return;
    }

    let summary = run_pipeline(source.path(), dest.path());

    // The read failure is a per-file error: counted as scanned, nothing
    // saved, and the run still completes.
    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.files_with_icons, 0);
    assert_eq!(summary.icons_saved, 0);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_scenario_empty_source() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.files_scanned, 0);
    assert_eq!(summary.files_with_icons, 0);
    assert_eq!(summary.icons_saved, 0);
}

#[test]
fn test_distinct_icons_with_same_base_name_get_suffixes() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let sub1 = source.path().join("sub1");
    let sub2 = source.path().join("sub2");
    fs::create_dir(&sub1).unwrap();
    fs::create_dir(&sub2).unwrap();

    // Same file name, different pixel content: both must survive on disk.
    write_ico(&sub1.join("app.ico"), 32, [255, 0, 0, 255]);
    write_ico(&sub2.join("app.ico"), 32, [0, 0, 255, 255]);

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.icons_saved, 2);

    let mut names: Vec<String> = fs::read_dir(dest.path().join("32x32"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["app_32x32.png", "app_32x32_1.png"]);
}

#[test]
fn test_off_ladder_icon_is_downscaled_to_tier() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    // 200px fits no tier exactly; the largest tier below it is 128.
    write_ico(&source.path().join("odd.ico"), 200, [7, 7, 7, 255]);

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.icons_saved, 1);
    let bucket = dest.path().join("128x128");
    assert!(bucket.is_dir());

    let saved = fs::read_dir(&bucket).unwrap().next().unwrap().unwrap();
    let reloaded = image::open(saved.path()).unwrap().to_rgba8();
    assert_eq!((reloaded.width(), reloaded.height()), (128, 128));
}

#[test]
fn test_below_ladder_icon_keeps_native_size() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    write_ico(&source.path().join("tiny.ico"), 12, [5, 5, 5, 255]);

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.icons_saved, 1);
    assert!(dest.path().join("12x12").join("tiny_12x12.png").is_file());
}

#[test]
fn test_saved_png_round_trips_to_same_digest() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    write_ico(&source.path().join("rt.ico"), 48, [90, 60, 30, 200]);
    run_pipeline(source.path(), dest.path());

    let saved = dest.path().join("48x48").join("rt_48x48.png");
    let reloaded = image::open(&saved).unwrap().to_rgba8();

    let original = decode_ico_file(&source.path().join("rt.ico"))
        .unwrap()
        .unwrap();
    assert_eq!(pixel_digest(&reloaded), pixel_digest(&original));
}

#[test]
fn test_custom_extension_allow_set() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    write_ico(&source.path().join("saver.scr"), 16, [3, 3, 3, 255]);

    // Default allow-set ignores .scr entirely.
    let summary = run_pipeline(source.path(), dest.path());
    assert_eq!(summary.files_scanned, 0);

    // An explicit allow-set picks it up.
    let config = PipelineConfig::new(dest.path().to_path_buf())
        .with_extensions(vec!["scr".to_string()]);
    let summary = run_pipeline_with(source.path(), config);
    assert_eq!(summary.files_scanned, 1);
    assert_eq!(summary.icons_saved, 1);
}

#[test]
fn test_nested_directories_are_traversed() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let deep = source.path().join("a").join("b").join("c");
    fs::create_dir_all(&deep).unwrap();
    write_ico(&deep.join("deep.ico"), 16, [8, 8, 8, 255]);
    write_ico(&source.path().join("top.ico"), 16, [9, 9, 9, 255]);

    let summary = run_pipeline(source.path(), dest.path());

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(summary.icons_saved, 2);
}
