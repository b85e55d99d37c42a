use ctg_scan::extraction::CalibrationConfig;
use ctg_scan::features::{FeatureName, FEATURE_COUNT};
use ctg_scan::source::{ImageSource, MemorySource};
use ctg_scan::{compute_features, extract, ErrorKind};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use ndarray::Array2;
use std::io::Cursor;

/// 100 x 50 strip, one ink line on row 10 of the FHR band, nothing in the UC band
fn single_line_strip() -> Array2<u8> {
    let mut grid = Array2::zeros((50, 100));
    grid.row_mut(10).fill(255);
    grid
}

#[test]
fn test_single_line_strip_has_flat_fhr() {
    let signals = extract(single_line_strip().view(), &CalibrationConfig::default()).unwrap();

    assert_eq!(signals.fhr.len(), 100);
    assert_eq!(signals.time.len(), 100);
    let first = signals.fhr[0];
    assert!(signals.fhr.iter().all(|&v| v == first));
    assert!(signals.uc.iter().all(|&v| v == signals.uc[0]));

    let features = compute_features(&signals.fhr, &signals.uc, &signals.time).unwrap();
    assert_eq!(features.get(FeatureName::LongTermVariability).as_f64(), 0.0);
    assert_eq!(features.get(FeatureName::ShortTermVariability).as_f64(), 0.0);
    assert_eq!(features.len(), FEATURE_COUNT);
}

#[test]
fn test_doubling_bpm_per_cm_doubles_deviation() {
    let mut grid = Array2::zeros((80, 40));
    for x in 0..40 {
        grid[[5 + x % 30, x]] = 255;
    }

    let base = CalibrationConfig::default();
    let doubled = CalibrationConfig {
        bpm_per_cm: base.bpm_per_cm * 2.0,
        ..base.clone()
    };

    let a = extract(grid.view(), &base).unwrap();
    let b = extract(grid.view(), &doubled).unwrap();

    for (x, y) in a.fhr.iter().zip(&b.fhr) {
        let da = x - base.fhr_baseline_floor;
        let db = y - base.fhr_baseline_floor;
        assert!((db - 2.0 * da).abs() < 1e-9, "{} vs {}", db, da);
    }
    assert_eq!(a.uc, b.uc);
    assert_eq!(a.time, b.time);
}

#[test]
fn test_decoded_png_round_trip_through_pipeline() {
    let grid = single_line_strip();
    let img = GrayImage::from_fn(100, 50, |x, y| Luma([255 - grid[[y as usize, x as usize]]]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let image: DynamicImage = MemorySource::new(bytes, "strip.png").load().unwrap();

    let pipeline = ctg_scan::CtgPipeline::new(CalibrationConfig::default()).unwrap();
    let analysis = pipeline.analyze(&image).unwrap();

    // light paper with dark ink is normalized to the same traces
    let direct = extract(grid.view(), &CalibrationConfig::default()).unwrap();
    assert_eq!(analysis.signals, direct);

    let json = serde_json::to_value(analysis.to_record("strip.png")).unwrap();
    let features = json["features"].as_object().unwrap();
    assert_eq!(features.len(), FEATURE_COUNT);
}

#[test]
fn test_one_sample_signal_is_rejected() {
    let err = compute_features(&[150.0], &[0.0], &[0.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
