use energy_path::path_planning::plan_energy_path;
use energy_path::{CancelToken, EnergyPathPlanner, PlanError, PlanOutcome, Point2D};

fn room(objects: &str) -> String {
    format!(
        r#"{{"room_metadata": {{"room_type": "bedroom"}},
            "room_dimensions": {{"length_m": 6.0, "width_m": 5.0, "height_m": 2.5}},
            "objects": [{}]}}"#,
        objects
    )
}

fn door(id: &str, x: f64, y: f64, rotation_deg: f64) -> String {
    format!(
        r#"{{"id": "{}", "type": "door", "position": {{"x": {}, "y": {}}}, "rotation_deg": {},
            "dimensions": {{"length_m": 0.1, "width_m": 0.9, "height_m": 2.0}}}}"#,
        id, x, y, rotation_deg
    )
}

fn furniture(kind: &str, x: f64, y: f64, width: f64, length: f64) -> String {
    format!(
        r#"{{"type": "{}", "position": {{"x": {}, "y": {}}}, "rotation_deg": 0,
            "dimensions": {{"length_m": {}, "width_m": {}, "height_m": 1.0}}}}"#,
        kind, x, y, length, width
    )
}

#[test]
fn test_furthest_door_is_the_exit() {
    let json = room(&[door("near", 0.0, 2.0, 0.0), door("far", 0.0, -5.0, 0.0)].join(","));
    let outcome = plan_energy_path(&json);
    assert!(outcome.is_found());

    let path = outcome.path().unwrap();
    let n = path.len();
    assert_eq!(path.points[n - 2], Point2D::new(0.0, -5.0));
    assert!((path.points[n - 3].y - -4.2).abs() < 1e-9);
    assert!((path.points[n - 1].y - -5.8).abs() < 1e-9);
}

#[test]
fn test_path_runs_origin_to_exit() {
    let json = room(&[
        door("d", 2.8, 0.0, 90.0),
        furniture("bed", -1.5, 1.5, 1.6, 2.0),
        r#"{"type": "window", "position": {"x": 1.0, "y": 0.0}, "rotation_deg": 0,
            "dimensions": {"length_m": 0.1, "width_m": 3.0, "height_m": 1.0}}"#.to_string(),
    ]
    .join(","));

    let points = plan_energy_path(&json).into_points().unwrap();
    assert_eq!(points.first(), Some(&Point2D::origin()));
    let exit = points.last().unwrap();
    assert!((exit.x - 3.6).abs() < 1e-9);
    assert!(exit.y.abs() < 1e-9);
    // window lies across the straight corridor but never blocks
    assert!(points.iter().all(|p| p.y.abs() <= 0.15));
}

#[test]
fn test_no_door_room() {
    let json = room(&[
        furniture("desk", 1.0, 1.0, 1.2, 0.6),
        r#"{"type": "window", "position": {"x": 2.0, "y": 0.0}, "rotation_deg": 0,
            "dimensions": {"length_m": 0.1, "width_m": 1.0, "height_m": 1.0}}"#.to_string(),
    ]
    .join(","));

    let outcome = plan_energy_path(&json);
    assert!(matches!(outcome, PlanOutcome::NoPath(PlanError::NoDoor)));
}

#[test]
fn test_malformed_descriptions() {
    assert!(matches!(
        plan_energy_path("not json"),
        PlanOutcome::NoPath(PlanError::MalformedInput(_))
    ));
    assert!(matches!(
        plan_energy_path(r#"{"room_metadata": {}}"#),
        PlanOutcome::NoPath(PlanError::MissingObjects)
    ));
    assert!(matches!(
        plan_energy_path(r#"{"objects": 3}"#),
        PlanOutcome::NoPath(PlanError::MalformedInput(_))
    ));
}

#[test]
fn test_malformed_door_is_skipped() {
    let broken_door = r#"{"type": "door", "position": {"x": 9.0}, "rotation_deg": 0,
        "dimensions": {"length_m": 0.1, "width_m": 0.9}}"#;
    let json = room(&[broken_door.to_string(), door("ok", 2.8, 0.0, 90.0)].join(","));

    let path = plan_energy_path(&json).into_points().unwrap();
    let n = path.len();
    assert_eq!(path[n - 2], Point2D::new(2.8, 0.0));
}

#[test]
fn test_walled_in_origin_falls_back() {
    let json = room(&[door("d", 3.0, 0.0, 90.0), furniture("rug_table", 0.0, 0.0, 1.0, 1.0)].join(","));
    let outcome = plan_energy_path(&json);
    assert!(outcome.is_fallback());
    assert_eq!(outcome.path().unwrap().len(), 4);
}

#[test]
fn test_planning_is_deterministic() {
    let json = room(&[
        door("d", 3.5, 0.0, 90.0),
        furniture("sofa", 1.5, 0.0, 0.6, 1.6),
        furniture("plant", 2.5, 1.2, 0.4, 0.4),
    ]
    .join(","));

    let first = plan_energy_path(&json).into_points();
    let second = plan_energy_path(&json).into_points();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_calls_are_independent() {
    let json = room(&[door("d", 3.5, 0.0, 90.0), furniture("sofa", 1.5, 0.0, 0.6, 1.6)].join(","));
    let expected = plan_energy_path(&json).into_points();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let json = json.clone();
            std::thread::spawn(move || EnergyPathPlanner::default().plan_json(&json).into_points())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_cancel_token() {
    let json = room(&door("d", 2.8, 0.0, 90.0));
    let token = CancelToken::new();
    token.cancel();

    let outcome = EnergyPathPlanner::default().plan_json_with_cancel(&json, &token);
    assert!(matches!(outcome, PlanOutcome::NoPath(PlanError::Cancelled)));
}
