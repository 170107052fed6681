//! # Dot
//!
//! The Dot-Format is a very extensive format used by [GraphViz](https://graphviz.org/) to allow
//! for detailed visualizations. We only use basic functionality to dump the edges of a directed
//! graph, one line per edge in adjacency storage order:
//! ```text
//! digraph {
//!   a -> b;
//!   a -> c;
//! }
//! ```
//!
//! Every line, including the closing bracket, ends with a newline.
//!
//! Custom output can be assembled from the building blocks:
//! ```ignore
//! let dot_writer = DotWriter::new().indent("\t");
//! dot_writer.start_graph(&mut writer)?;
//! dot_writer.write_edges(&mut writer, [("a", "b"), ("b", "c")])?;
//! dot_writer.finish_graph(&mut writer)?;
//! ```
use std::{fmt::Display, io::Write};

use super::*;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Prefix of every edge line (default: two spaces)
    indent: String,
    /// Attach the payload of an edge as `[label="..."]`
    edge_labels: bool,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            edge_labels: false,
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prefix of every edge line (two spaces by default)
    pub fn indent<S>(mut self, indent: S) -> Self
    where
        S: Into<String>,
    {
        self.indent = indent.into();
        self
    }

    /// If *true*, edges are labelled with their payload; only applies to
    /// [`DotWriter::try_write_labelled_graph`]
    pub fn edge_labels(mut self, edge_labels: bool) -> Self {
        self.edge_labels = edge_labels;
        self
    }

    /// Writes the opening brackets of the graph
    pub fn start_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "digraph {{")
    }

    /// Writes an iterator of unlabelled edges `(source, target)` to `writer`
    pub fn write_edges<W, I, S, T>(&self, writer: &mut W, edges: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = (S, T)>,
        S: Display,
        T: Display,
    {
        for (u, v) in edges {
            writeln!(writer, "{}{u} -> {v};", self.indent)?;
        }
        Ok(())
    }

    /// Writes an iterator of edges `(source, target, label)` to `writer`.
    /// Labels are omitted unless enabled via [`DotWriter::edge_labels`].
    pub fn write_labelled_edges<W, I, S, T, L>(&self, writer: &mut W, edges: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = (S, T, L)>,
        S: Display,
        T: Display,
        L: Display,
    {
        for (u, v, label) in edges {
            if self.edge_labels {
                writeln!(writer, "{}{u} -> {v} [label=\"{label}\"];", self.indent)?;
            } else {
                writeln!(writer, "{}{u} -> {v};", self.indent)?;
            }
        }
        Ok(())
    }

    /// Closes the Dot-Graph, thus finishing the graph
    pub fn finish_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "}}")
    }

    /// Writes `graph` with edge payloads available as labels
    pub fn try_write_labelled_graph<G, W>(&self, graph: &G, mut writer: W) -> Result<()>
    where
        G: AdjacencyList,
        G::Node: Display,
        G::Edge: Display,
        W: Write,
    {
        let nodes = graph.nodes();
        self.start_graph(&mut writer)?;
        self.write_labelled_edges(
            &mut writer,
            graph
                .edges()
                .map(|(Endpoints(u, v), e)| (&nodes[u], &nodes[v], e)),
        )?;
        self.finish_graph(&mut writer)
    }
}

impl<G> GraphWriter<G> for DotWriter
where
    G: AdjacencyList,
    G::Node: Display,
{
    fn try_write_graph<W>(&self, graph: &G, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        let nodes = graph.nodes();
        self.start_graph(&mut writer)?;
        self.write_edges(
            &mut writer,
            graph
                .edges()
                .map(|(Endpoints(u, v), _)| (&nodes[u], &nodes[v])),
        )?;
        self.finish_graph(&mut writer)
    }
}

/// Trait for writing a graph to a writer in the Dot-Format.
/// Shorthand for default settings.
pub trait DotWrite {
    /// Tries to write the graph to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Tries to write the graph to a file
    fn try_write_dot_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_dot(writer)
    }

    /// Renders the graph into a string
    fn to_dot_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.try_write_dot(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl<G> DotWrite for G
where
    G: AdjacencyList,
    G::Node: Display,
{
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_graph(self, writer)
    }
}
