use flowmap::{Error, LayoutKind, Settings, compute_layouts, read_layout, run};
use flowmap_layout::{Adjacency, Point};
use std::fs;
use std::path::Path;

const GRAPH: &str = r#"{
  "meta": { "generatedAt": "2024-01-01T00:00:00Z" },
  "nodes": [
    { "id": "treasury", "label": "Treasury", "degree": 4 },
    { "id": "vendor-a", "degree": 2 },
    { "id": "vendor-b", "degree": 2 },
    { "id": "shell-co", "degree": 2 },
    { "id": "offshore", "degree": 1 },
    { "id": "dormant", "degree": 0 }
  ],
  "edges": [
    { "source": "treasury", "target": "vendor-a", "totalAmount": 1250000 },
    { "source": "treasury", "target": "vendor-b", "totalAmount": 48000 },
    { "source": "vendor-a", "target": "vendor-b", "totalAmount": 700 },
    { "source": "treasury", "target": "shell-co", "totalAmount": 0 },
    { "source": "shell-co", "target": "offshore" },
    { "source": "offshore", "target": "unlisted", "totalAmount": 99 }
  ]
}"#;

fn write_graph(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write graph");
    path
}

fn settings(dir: &Path) -> Settings {
    let mut s = Settings {
        input: write_graph(dir, "graph.json", GRAPH),
        out_dir: dir.join("out").join("layouts"),
        ..Default::default()
    };
    s.forceatlas2.iterations = 150;
    s
}

#[test]
fn run_writes_one_artifact_per_strategy() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = settings(tmp.path());

    let summary = run(&s).expect("run");
    assert_eq!(summary.nodes, 6);
    assert_eq!(summary.edges, 5);
    assert_eq!(summary.skipped_edges, 1);
    assert_eq!(summary.malformed_edges, 0);

    let kinds: Vec<LayoutKind> = summary.layouts.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, LayoutKind::ALL);

    for kind in LayoutKind::ALL {
        let path = s.out_dir.join(format!("{kind}.json"));
        let layout = read_layout(&path).expect("artifact");
        let ids: Vec<&str> = layout.iter().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            ["treasury", "vendor-a", "vendor-b", "shell-co", "offshore", "dormant"],
            "{kind}"
        );
        assert!(layout.iter().all(|(_, p)| p.is_finite()), "{kind}");
        assert!(layout.get("unlisted").is_none());
    }
}

#[test]
fn only_selected_strategies_are_written() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = Settings {
        strategies: vec![LayoutKind::Radial],
        ..settings(tmp.path())
    };

    run(&s).expect("run");
    assert!(s.out_dir.join("radial.json").exists());
    assert!(!s.out_dir.join("circular.json").exists());
    assert!(!s.out_dir.join("forceatlas2.json").exists());

    let radial = read_layout(s.out_dir.join("radial.json")).expect("radial");
    assert_eq!(radial.get("treasury"), Some(&Point::ORIGIN));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = settings(tmp.path());
    let graph = flowmap::load_graph(&s.input).expect("graph").graph;
    let adjacency = Adjacency::build(&graph);

    let parallel = compute_layouts(&graph, &adjacency, &s).expect("parallel");
    let sequential = compute_layouts(
        &graph,
        &adjacency,
        &Settings {
            parallel: false,
            ..s.clone()
        },
    )
    .expect("sequential");

    assert_eq!(parallel.len(), sequential.len());
    for (p, q) in parallel.iter().zip(&sequential) {
        assert_eq!(p.kind, q.kind);
        assert_eq!(p.layout, q.layout, "{}", p.kind);
    }
}

#[test]
fn missing_collection_aborts_before_writing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = Settings {
        input: write_graph(tmp.path(), "no-edges.json", r#"{ "nodes": [{ "id": "a" }] }"#),
        ..settings(tmp.path())
    };

    let err = run(&s).expect_err("no edges");
    assert!(matches!(err, Error::MissingCollection { name: "edges", .. }));
    assert!(!s.out_dir.exists());
}

#[test]
fn malformed_edge_records_do_not_abort_the_run() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = Settings {
        input: write_graph(
            tmp.path(),
            "partial.json",
            r#"{
                "nodes": [{ "id": "a", "degree": 1 }, { "id": "b", "degree": 1 }],
                "edges": [
                    { "source": "a", "target": "b", "totalAmount": "2500" },
                    { "source": "a" },
                    { "source": "b", "target": null }
                ]
            }"#,
        ),
        ..settings(tmp.path())
    };

    let summary = run(&s).expect("run");
    assert_eq!(summary.edges, 1);
    assert_eq!(summary.malformed_edges, 2);
    for l in &summary.layouts {
        let layout = read_layout(&l.path).expect("artifact");
        assert_eq!(layout.len(), 2, "{}", l.kind);
    }
}

#[test]
fn unwritable_output_directory_is_an_io_error_naming_the_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "plain file").expect("write blocker");
    let s = Settings {
        out_dir: blocker.join("layouts"),
        ..settings(tmp.path())
    };

    let err = run(&s).expect_err("output under a regular file");
    assert!(matches!(err, Error::Io { .. }), "{err}");
    assert!(err.to_string().contains("not-a-dir"), "{err}");
}

#[test]
fn missing_input_file_is_an_io_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = Settings {
        input: tmp.path().join("absent.json"),
        out_dir: tmp.path().join("layouts"),
        ..Default::default()
    };

    let err = run(&s).expect_err("missing input");
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.json"), "{err}");
}

#[test]
fn invalid_options_are_reported_before_reading_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut s = Settings {
        input: tmp.path().join("never-read.json"),
        ..Default::default()
    };
    s.circular.radius_per_node = f64::NAN;

    let err = run(&s).expect_err("invalid option");
    assert!(matches!(err, Error::Layout(_)), "{err}");
}

#[test]
fn empty_collections_produce_empty_artifacts() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let s = Settings {
        input: write_graph(tmp.path(), "empty.json", r#"{ "nodes": [], "edges": [] }"#),
        ..settings(tmp.path())
    };

    let summary = run(&s).expect("run");
    assert_eq!(summary.layouts.len(), 3);
    for l in &summary.layouts {
        let text = fs::read_to_string(&l.path).expect("artifact");
        assert_eq!(text.trim(), "{}", "{}", l.kind);
    }
}

#[test]
fn settings_file_is_merged_over_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("flowmap.json");
    fs::write(
        &path,
        r#"{ "strategies": ["circular"], "parallel": false, "circular": { "radiusPerNode": 2 } }"#,
    )
    .expect("write settings");

    let s = Settings::from_file(&path).expect("settings");
    assert_eq!(s.selected(), vec![LayoutKind::Circular]);
    assert!(!s.parallel);
    assert_eq!(s.circular.radius_per_node, 2.0);
    assert_eq!(s.radial.ring_spacing, 120.0);

    fs::write(&path, "{ \"parallel\": \"yes\" }").expect("write settings");
    assert!(matches!(
        Settings::from_file(&path),
        Err(Error::Config { .. })
    ));
}
