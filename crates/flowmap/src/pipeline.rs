use std::path::PathBuf;
use std::time::{Duration, Instant};

use flowmap_layout::{Adjacency, Algorithm, Graph, LayoutKind, LayoutResult};

use crate::cache;
use crate::config::Settings;
use crate::document;
use crate::error::Result;

/// One computed strategy.
#[derive(Debug, Clone)]
pub struct ComputedLayout {
    pub kind: LayoutKind,
    pub layout: LayoutResult,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct StrategySummary {
    pub kind: LayoutKind,
    pub path: PathBuf,
    pub elapsed: Duration,
}

/// What a batch run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub nodes: usize,
    pub edges: usize,
    /// Edges whose endpoint is not in the node list.
    pub skipped_edges: usize,
    /// Edge records that could not be read at all.
    pub malformed_edges: usize,
    pub layouts: Vec<StrategySummary>,
    pub elapsed: Duration,
}

/// Loads the graph document, computes every selected strategy and writes one artifact per
/// strategy into `settings.out_dir`.
///
/// All options are validated before the input is read. Nothing is written unless every strategy
/// computed successfully.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    let started = Instant::now();
    settings.validate()?;

    let document::LoadedGraph {
        graph,
        malformed_edges,
    } = document::load_graph(&settings.input)?;
    let adjacency = Adjacency::build(&graph);
    if adjacency.skipped_edges() > 0 {
        tracing::info!(
            skipped = adjacency.skipped_edges(),
            "ignored edges with an endpoint missing from the node list"
        );
    }

    let computed = compute_layouts(&graph, &adjacency, settings)?;

    let mut layouts = Vec::with_capacity(computed.len());
    for c in computed {
        let path = cache::write_layout(&settings.out_dir, c.kind, &c.layout)?;
        layouts.push(StrategySummary {
            kind: c.kind,
            path,
            elapsed: c.elapsed,
        });
    }

    let summary = RunSummary {
        nodes: graph.node_count(),
        edges: adjacency.edges().len(),
        skipped_edges: adjacency.skipped_edges(),
        malformed_edges,
        layouts,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        nodes = summary.nodes,
        edges = summary.edges,
        layouts = summary.layouts.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "precomputed layouts"
    );
    Ok(summary)
}

/// Computes the selected strategies over a shared graph and adjacency.
///
/// Results come back in selection order whether or not `settings.parallel` is set; the
/// strategies share no mutable state, so both modes produce identical layouts.
pub fn compute_layouts(
    graph: &Graph,
    adjacency: &Adjacency,
    settings: &Settings,
) -> Result<Vec<ComputedLayout>> {
    let jobs: Vec<(LayoutKind, Algorithm)> = settings
        .selected()
        .into_iter()
        .map(|kind| (kind, settings.algorithm(kind)))
        .collect();

    let results = if settings.parallel {
        compute_parallel(&jobs, graph, adjacency)
    } else {
        jobs.iter()
            .map(|(kind, algorithm)| compute_one(*kind, algorithm, graph, adjacency))
            .collect()
    };
    results.into_iter().collect()
}

fn compute_parallel(
    jobs: &[(LayoutKind, Algorithm)],
    graph: &Graph,
    adjacency: &Adjacency,
) -> Vec<Result<ComputedLayout>> {
    match jobs {
        [] => Vec::new(),
        [(kind, algorithm)] => vec![compute_one(*kind, algorithm, graph, adjacency)],
        _ => {
            let (left, right) = jobs.split_at(jobs.len() / 2);
            let (mut out, rest) = rayon::join(
                || compute_parallel(left, graph, adjacency),
                || compute_parallel(right, graph, adjacency),
            );
            out.extend(rest);
            out
        }
    }
}

fn compute_one(
    kind: LayoutKind,
    algorithm: &Algorithm,
    graph: &Graph,
    adjacency: &Adjacency,
) -> Result<ComputedLayout> {
    let started = Instant::now();
    let layout = flowmap_layout::layout(graph, adjacency, algorithm)?;
    let elapsed = started.elapsed();
    tracing::info!(
        kind = %kind,
        nodes = layout.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "computed layout"
    );
    Ok(ComputedLayout {
        kind,
        layout,
        elapsed,
    })
}
