use peacecam::hand::{
    self, HandObservation, Keypoint, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_TIP,
    RING_TIP, WRIST,
};
use peacecam::source::peace_hand_points;
use peacecam::{GestureClassifier, GestureConfig, KEYPOINT_COUNT};

fn classify(points: [Keypoint; KEYPOINT_COUNT]) -> bool {
    GestureClassifier::default().is_peace_sign(&HandObservation::from_array(points))
}

#[test]
fn canonical_peace_sign_classifies_true() {
    assert!(classify(peace_hand_points()));
}

#[test]
fn each_finger_condition_is_required() {
    // Index curled: tip below its PIP joint.
    let mut points = peace_hand_points();
    points[INDEX_TIP] = Keypoint::new(0.44, 0.70);
    assert!(!classify(points));

    // Middle curled.
    let mut points = peace_hand_points();
    points[MIDDLE_TIP] = Keypoint::new(0.54, 0.70);
    assert!(!classify(points));

    // Ring extended.
    let mut points = peace_hand_points();
    points[RING_TIP] = Keypoint::new(0.60, 0.35);
    assert!(!classify(points));

    // Pinky extended.
    let mut points = peace_hand_points();
    points[PINKY_TIP] = Keypoint::new(0.68, 0.38);
    assert!(!classify(points));
}

#[test]
fn fingers_held_together_classify_false() {
    // Hand scale is |0.30 - 0.50| + epsilon, so the separation threshold is
    // ~0.036. A 0.02 tip gap is a "V" collapsed into parallel fingers.
    let mut points = peace_hand_points();
    points[MIDDLE_TIP] = Keypoint::new(0.46, 0.35);
    assert!(!classify(points));
}

#[test]
fn separation_threshold_sits_at_the_configured_fraction() {
    // Just above threshold: 0.037 > 0.18 * 0.2.
    let mut points = peace_hand_points();
    points[MIDDLE_TIP] = Keypoint::new(0.477, 0.35);
    assert!(classify(points));

    // Just below: 0.035 < 0.036.
    let mut points = peace_hand_points();
    points[MIDDLE_TIP] = Keypoint::new(0.475, 0.35);
    assert!(!classify(points));
}

#[test]
fn separation_is_scale_invariant() {
    // Shrink the whole hand around the wrist: a distant hand keeps the
    // same separation-to-scale ratio and must classify the same.
    let wrist = peace_hand_points()[WRIST];
    let mut points = peace_hand_points();
    for point in points.iter_mut() {
        point.x = wrist.x + (point.x - wrist.x) * 0.25;
        point.y = wrist.y + (point.y - wrist.y) * 0.25;
    }
    assert!(classify(points));
}

#[test]
fn mirrored_hand_classifies_true() {
    // A left hand (or a mirrored camera) flips x; the classifier only uses
    // absolute horizontal distances.
    let mut points = peace_hand_points();
    for point in points.iter_mut() {
        point.x = 1.0 - point.x;
    }
    assert!(classify(points));
}

#[test]
fn custom_separation_ratio_is_honored() {
    let strict = GestureClassifier::new(GestureConfig {
        separation_ratio: 0.55,
        ..GestureConfig::default()
    });
    // Canonical separation is 0.10 against a 0.2 scale: fine at 0.18,
    // rejected at 0.55.
    assert!(!strict.is_peace_sign(&HandObservation::from_array(peace_hand_points())));

    let lax = GestureClassifier::new(GestureConfig {
        separation_ratio: 0.01,
        ..GestureConfig::default()
    });
    let mut points = peace_hand_points();
    points[MIDDLE_TIP] = Keypoint::new(0.447, 0.35);
    assert!(lax.is_peace_sign(&HandObservation::from_array(points)));
}

#[test]
fn incomplete_observations_cannot_be_constructed() {
    let short = vec![Keypoint::new(0.5, 0.5); hand::KEYPOINT_COUNT - 1];
    assert!(HandObservation::from_keypoints(short).is_err());
}

#[test]
fn degenerate_hand_scale_still_classifies_totally() {
    // Wrist directly below the middle MCP: scale collapses to epsilon and
    // any spread clears the threshold. Must not divide by zero or panic.
    let mut points = peace_hand_points();
    points[WRIST] = Keypoint::new(points[MIDDLE_MCP].x, 0.90);
    assert!(classify(points));

    // Same degenerate scale with collapsed fingers: verdict hinges on the
    // separation test alone.
    points[INDEX_TIP] = Keypoint::new(0.54, 0.35);
    points[MIDDLE_TIP] = Keypoint::new(0.54, 0.35);
    assert!(!classify(points));
}

#[test]
fn index_tip_equal_to_pip_is_not_up() {
    // "Up" is strict: tip level with the joint does not count.
    let mut points = peace_hand_points();
    points[INDEX_TIP] = Keypoint::new(0.44, points[INDEX_PIP].y);
    assert!(!classify(points));
}
