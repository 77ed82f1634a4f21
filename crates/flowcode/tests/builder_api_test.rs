//! Integration tests for the FlowchartBuilder API
//!
//! These tests drive the public pipeline end to end: parse, layout, render.

use std::collections::HashMap;

use flowcode::{
    FlowcodeError, FlowchartBuilder,
    config::{AppConfig, LayoutConfig, ParserConfig, StyleConfig},
    flow::NodeKind,
    scene::{EdgeKind, Scene},
};

fn scene_for(source: &str) -> Scene {
    let builder = FlowchartBuilder::default();
    let program = builder.parse(source).expect("Failed to parse");
    builder.layout(&program).expect("Failed to lay out")
}

#[test]
fn test_builder_api_exists() {
    let _builder = FlowchartBuilder::default();
}

#[test]
fn test_if_else_scenario() {
    let source = r#"
        if (x > 0) {
            printf("pos");
        } else {
            printf("neg");
        }
    "#;
    let scene = scene_for(source);
    let boxes = scene.boxes();

    assert_eq!(boxes.len(), 4);
    assert_eq!(boxes[0].label(), "Start Program");
    assert_eq!(boxes[1].kind(), NodeKind::If);
    assert_eq!(boxes[1].label(), "x > 0");
    assert_eq!(boxes[2].label(), "pos");
    assert_eq!(boxes[3].label(), "neg");
    assert!(boxes[3].center_x() > boxes[2].center_x());
    assert_eq!(boxes[2].top_y(), boxes[3].top_y());

    let merges: Vec<_> = scene
        .edges()
        .iter()
        .filter(|edge| edge.kind() == EdgeKind::Merge)
        .collect();
    assert_eq!(merges.len(), 2);
    let lowest_branch = boxes[2].bounds().max_y().max(boxes[3].bounds().max_y());
    for merge in merges {
        assert!(merge.to().y() > lowest_branch);
    }
}

#[test]
fn test_while_scenario() {
    let source = r#"
        while (i < 3) {
            i++;
        }
    "#;
    let scene = scene_for(source);

    assert_eq!(scene.boxes().len(), 3);
    assert_eq!(scene.boxes()[1].kind(), NodeKind::Loop);
    assert_eq!(scene.boxes()[1].label(), "i < 3");
    assert_eq!(scene.boxes()[2].label(), "i++");

    let back_edges: Vec<_> = scene
        .edges()
        .iter()
        .filter(|edge| edge.kind() == EdgeKind::LoopBack)
        .collect();
    assert_eq!(back_edges.len(), 1);
    assert!(back_edges[0].is_dashed());

    let exit = scene
        .edges()
        .iter()
        .find(|edge| edge.kind() == EdgeKind::LoopExit)
        .expect("loop exit edge");
    assert!(exit.to().y() > scene.boxes()[2].bounds().max_y());
}

#[test]
fn test_standalone_scanf() {
    let scene = scene_for(r#"scanf("%d", &x);"#);

    assert_eq!(scene.boxes().len(), 2);
    assert_eq!(scene.boxes()[1].kind(), NodeKind::Io);
    assert_eq!(scene.boxes()[1].label(), "Input x");
}

#[test]
fn test_consecutive_outputs_collapse() {
    let scene = scene_for("printf(\"a\");\nprintf(\"b\");");

    assert_eq!(scene.boxes().len(), 2);
    assert_eq!(scene.boxes()[1].label(), "Display Output");
}

#[test]
fn test_empty_if_merges_below_diamond() {
    let scene = scene_for("if (c) {}");
    let diamond = &scene.boxes()[1];

    let merge = scene
        .edges()
        .iter()
        .find(|edge| edge.kind() == EdgeKind::Merge)
        .expect("merge edge");
    assert_eq!(merge.from().x(), diamond.center_x());
    assert!(merge.from().y() > diamond.occupied_bounds().max_y());
}

#[test]
fn test_column_tops_strictly_increase() {
    let source = r#"
        int main() {
            int n;
            scanf("%d", &n);
            for (int i = 0; i < n; i++) {
                if (i % 2 == 0) {
                    printf("even\n");
                } else {
                    printf("odd\n");
                }
            }
            return 0;
        }
    "#;
    let scene = scene_for(source);

    let mut last_top: HashMap<u32, f32> = HashMap::new();
    for layout_box in scene.boxes() {
        let column = layout_box.center_x().to_bits();
        if let Some(previous) = last_top.insert(column, layout_box.top_y()) {
            assert!(layout_box.top_y() > previous, "{layout_box:?}");
        }
    }
}

#[test]
fn test_render_simple_chart() {
    let builder = FlowchartBuilder::default();
    let result = builder.convert("x = 1;\nreturn 0;");

    match result {
        Ok(svg) => {
            assert!(svg.contains("<svg"), "Output should contain SVG tag");
            assert!(svg.contains("</svg>"), "Output should be complete SVG");
            assert!(svg.contains("End Program"));
        }
        Err(err) => panic!("Failed to render: {err:?}"),
    }
}

#[test]
fn test_write_svg_to_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("chart.svg");

    let builder = FlowchartBuilder::default();
    let program = builder.parse("x = 1;").expect("Failed to parse");
    let scene = builder.layout(&program).expect("Failed to lay out");
    builder.write_svg(&scene, &path).expect("Failed to write");

    let written = std::fs::read_to_string(&path).expect("Failed to read back");
    assert!(written.contains("<svg"));
}

#[test]
fn test_parse_too_deep_returns_error() {
    let source = "if (a) {\n".repeat(5) + &"}\n".repeat(5);
    let config = AppConfig::new(
        ParserConfig::new(3),
        LayoutConfig::default(),
        StyleConfig::default(),
    );
    let builder = FlowchartBuilder::new(config);

    match builder.parse(&source) {
        Err(FlowcodeError::Parse { err, src }) => {
            assert_eq!(src, source);
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_layout_too_deep_returns_error() {
    let source = "while (a) {\n".repeat(4) + &"}\n".repeat(4);
    let config = AppConfig::new(
        ParserConfig::default(),
        LayoutConfig::default().with_max_depth(2),
        StyleConfig::default(),
    );
    let builder = FlowchartBuilder::new(config);
    let program = builder.parse(&source).expect("Failed to parse");

    assert!(matches!(
        builder.layout(&program),
        Err(FlowcodeError::Layout(_))
    ));
}

#[test]
fn test_invalid_style_returns_export_error() {
    let config = AppConfig::new(
        ParserConfig::default(),
        LayoutConfig::default(),
        StyleConfig::default().with_stroke_color("not a color at all"),
    );
    let builder = FlowchartBuilder::new(config);

    assert!(matches!(
        builder.convert("x = 1;"),
        Err(FlowcodeError::Export(_))
    ));
}

#[test]
fn test_analyze_reports_fixes() {
    let builder = FlowchartBuilder::default();
    let analysis = builder.analyze("int x = 1\nif (x = 2) {\n");

    assert!(analysis.has_issues());
    assert_eq!(analysis.diagnostics().len(), 3);
    assert!(builder.parse(analysis.fixed()).is_ok());
}

#[test]
fn test_builder_reusability() {
    let builder = FlowchartBuilder::default();

    let svg1 = builder.convert("a = 1;").expect("Failed to render first chart");
    let svg2 = builder.convert("b = 2;").expect("Failed to render second chart");

    assert!(svg1.contains("a = 1"));
    assert!(svg2.contains("b = 2"));
    assert_ne!(svg1, svg2);
}
