use atomlab_core::{
    radius_for, CloudRadiusError, ElectronCloudRadius, EMPTY_CLOUD_RADIUS,
    MAX_SUPPORTED_ELECTRONS,
};

const TOLERANCE: f64 = 1e-9;

// Table min is 32 pm and max is 100.5 pm, compressed into [40, 55].
fn compressed(raw_pm: f64) -> f64 {
    40.0 + (raw_pm - 32.0) / 68.5 * 15.0
}

fn assert_close(actual: f64, expected: f64, electrons: u32) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "electrons={electrons}: expected {expected}, got {actual}"
    );
}

#[test]
fn empty_cloud_has_tiny_positive_radius() {
    let radius = radius_for(0).expect("zero electrons supported");
    assert_eq!(radius, EMPTY_CLOUD_RADIUS);
    assert!(radius > 0.0);
}

#[test]
fn supported_counts_match_compressed_table() {
    let expected = [
        (1, 41.313_868_613_138_69),
        (2, 40.0),
        (3, 55.0),
        (4, 52.109_489_051_094_89),
        (5, 50.948_905_109_489_05),
        (6, 49.854_014_598_540_15),
        (7, 49.416_058_394_160_58),
        (8, 48.978_102_189_781_02),
        (9, 48.540_145_985_401_46),
        (10, 48.102_189_781_021_9),
    ];

    for (electrons, radius) in expected {
        let actual = radius_for(electrons).expect("supported count");
        assert_close(actual, radius, electrons);
    }
}

#[test]
fn supported_counts_follow_compression_formula() {
    let table = [38.0, 32.0, 100.5, 87.3, 82.0, 77.0, 75.0, 73.0, 71.0, 69.0];
    for (index, raw_pm) in table.into_iter().enumerate() {
        let electrons = index as u32 + 1;
        let actual = radius_for(electrons).expect("supported count");
        assert_close(actual, compressed(raw_pm), electrons);
    }
}

#[test]
fn output_stays_inside_band_and_is_not_monotonic() {
    let radii: Vec<f64> = (1..=MAX_SUPPORTED_ELECTRONS)
        .map(|electrons| radius_for(electrons).expect("supported count"))
        .collect();

    assert!(radii.iter().all(|radius| (40.0..=55.0).contains(radius)));
    let carbon = radii[5];
    assert!(carbon > 40.0 && carbon < 55.0);
    assert!(radii[0] > radii[1], "helium cloud is smaller than hydrogen");
    assert!(radii[2] > radii[9], "lithium cloud is larger than neon");
}

#[test]
fn counts_beyond_table_are_rejected() {
    let err = radius_for(11).expect_err("11 electrons unsupported");
    assert_eq!(
        err,
        CloudRadiusError::UnsupportedElectronCount { count: 11, max: 10 }
    );
    assert!(err.to_string().contains("at most 10"));
    assert!(radius_for(u32::MAX).is_err());
}

#[test]
fn custom_band_rescales_table() {
    let mapper = ElectronCloudRadius::new(10.0, 20.0).expect("valid band");
    assert_eq!(mapper.radius_for(2), Ok(10.0));
    assert_eq!(mapper.radius_for(3), Ok(20.0));
    assert_eq!(mapper.radius_for(0), Ok(EMPTY_CLOUD_RADIUS));

    let flat = ElectronCloudRadius::new(30.0, 30.0).expect("degenerate band");
    assert_eq!(flat.radius_for(7), Ok(30.0));
}

#[test]
fn invalid_band_is_rejected() {
    assert_eq!(
        ElectronCloudRadius::new(55.0, 40.0),
        Err(CloudRadiusError::InvalidRange { min: 55.0, max: 40.0 })
    );
    assert!(ElectronCloudRadius::new(f64::NAN, 40.0).is_err());
    assert!(ElectronCloudRadius::new(40.0, f64::INFINITY).is_err());
}

#[test]
fn default_band_is_forty_to_fifty_five() {
    let mapper = ElectronCloudRadius::default();
    assert_eq!(mapper.min_changed_radius(), 40.0);
    assert_eq!(mapper.max_changed_radius(), 55.0);
}
