use phylodraw::config::RenderConfig;
use phylodraw::model::{BranchLength, Tree};
use phylodraw::plot::{HorizontalDirection, Orientation, VerticalDirection, draw};
use phylodraw::DrawError;
use serde_json::json;

#[test]
fn test_defaults() {
    let config = RenderConfig::from_json("{}").unwrap();
    assert_eq!(config, RenderConfig::default());

    let options = config.into_options().unwrap();
    assert_eq!(
        options.orientation,
        Orientation::Vertical(VerticalDirection::Right)
    );
    assert!(options.show_confidence);
    assert!(options.draw_labels);
    assert!(!options.align_labels);
    assert!(options.do_show);
    assert_eq!(options.line_width, 1.5);
    assert!(options.passthrough.is_empty());
}

#[test]
fn test_horizontal_default_direction() {
    let config = RenderConfig::from_json(r#"{"orient_tree": "horizontal"}"#).unwrap();
    assert_eq!(config.horizontal_direction, "down");
    assert_eq!(
        config.orientation().unwrap(),
        Orientation::Horizontal(HorizontalDirection::Down)
    );
}

#[test]
fn test_full_config() {
    let config = RenderConfig::from_json(
        r#"{
            "orient_tree": "horizontal",
            "horizontal_direction": "down",
            "show_confidence": false,
            "align_labels": true,
            "do_show": false,
            "column_width": 120,
            "line_width": 2.0,
            "options": {
                "axvline": {"x": 0},
                "axhspan": [[0.25, 7.75], {"facecolor": "0.5"}]
            }
        }"#,
    )
    .unwrap();
    assert_eq!(config.column_width, 120);

    let options = config.into_options().unwrap();
    assert_eq!(
        options.orientation,
        Orientation::Horizontal(HorizontalDirection::Down)
    );
    assert!(!options.show_confidence);
    assert!(options.align_labels);
    assert_eq!(options.line_width, 2.0);

    let names: Vec<&str> = options.passthrough.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["axvline", "axhspan"]);
    assert_eq!(options.passthrough[0].1, json!({"x": 0}));
}

#[test]
fn test_circular_config() {
    let options = RenderConfig::from_json(r#"{"orient_tree": "circular", "circular_span": 300}"#)
        .unwrap()
        .into_options()
        .unwrap();
    assert_eq!(options.orientation, Orientation::Circular { span: 300.0 });
}

#[test]
fn test_invalid_orientation() {
    let config = RenderConfig::from_json(r#"{"orient_tree": "diagonal"}"#).unwrap();
    assert!(matches!(
        config.into_options(),
        Err(DrawError::InvalidOrientation(o)) if o == "diagonal"
    ));
}

#[test]
fn test_invalid_direction() {
    let config = RenderConfig::from_json(r#"{"vertical_direction": "up"}"#).unwrap();
    assert!(matches!(
        config.into_options(),
        Err(DrawError::InvalidDirection { direction, .. }) if direction == "up"
    ));
}

#[test]
fn test_invalid_passthrough_value() {
    let config = RenderConfig::from_json(r#"{"options": {"axvline": 0}}"#).unwrap();
    assert!(matches!(
        config.into_options(),
        Err(DrawError::InvalidPassthrough { name, .. }) if name == "axvline"
    ));
}

#[test]
fn test_unknown_field_rejected() {
    assert!(matches!(
        RenderConfig::from_json(r#"{"orientation": "vertical"}"#),
        Err(DrawError::Config(_))
    ));
    assert!(matches!(
        RenderConfig::from_json("not json"),
        Err(DrawError::Config(_))
    ));
}

#[test]
fn test_from_file_and_draw() {
    let path =
        std::env::temp_dir().join(format!("phylodraw-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"orient_tree": "circular", "do_show": false}"#).unwrap();
    let options = RenderConfig::from_file(&path)
        .unwrap()
        .into_options()
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut tree = Tree::new();
    let a = tree.add_leaf("A", Some(BranchLength::new(1.0)));
    let b = tree.add_leaf("B", Some(BranchLength::new(1.0)));
    tree.add_root(&[a, b]);
    let canvas = draw(&mut tree, &options).unwrap();
    assert!(canvas.to_svg().contains("<circle"));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        RenderConfig::from_file("/nonexistent/phylodraw.json"),
        Err(DrawError::Io(_))
    ));
}
