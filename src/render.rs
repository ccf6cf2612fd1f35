//! Rendering of emitted graph descriptions and SVG post-processing.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use crate::error::{HistoryGraphError, Result};

/// Converts a graph-description file into a displayable image.
///
/// Implementors must be `Send + Sync`: every dispatcher task renders
/// concurrently.
pub trait Renderer: Send + Sync {
    fn render(&self, gv_path: &Path, svg_path: &Path) -> Result<()>;
}

/// [Renderer] that invokes the `dot` binary and post-processes its SVG output
/// for embedding.
pub struct GraphvizRenderer {
    dot_binary: String,
}

impl GraphvizRenderer {
    pub fn new(dot_binary: impl Into<String>) -> Self {
        GraphvizRenderer {
            dot_binary: dot_binary.into(),
        }
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, gv_path: &Path, svg_path: &Path) -> Result<()> {
        let output = Command::new(&self.dot_binary)
            .arg("-Tsvg")
            .arg(gv_path)
            .arg("-o")
            .arg(svg_path)
            .output()
            .map_err(|e| {
                HistoryGraphError::render(format!(
                    "failed to execute {}: {}",
                    self.dot_binary, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HistoryGraphError::render(format!(
                "{} exited with {:?}: {}",
                self.dot_binary,
                output.status.code(),
                stderr.trim()
            )));
        }

        let svg = std::fs::read_to_string(svg_path)?;
        std::fs::write(svg_path, format_svg_for_embedding(&svg))?;
        Ok(())
    }
}

/// Patches rendered SVG for embedding.
///
/// Embedded links get a `target` so they open in a new viewing context, and
/// the renderer's first three header lines are stripped (they are not
/// rendered properly when the SVG is inlined).
pub fn format_svg_for_embedding(svg: &str) -> String {
    let patched = svg.replace("<a xlink", "<a target=\"_blank\" xlink");
    let mut lines = patched.lines().skip(3);
    let mut out = String::new();
    if let Some(first) = lines.next() {
        out.push_str(first);
        for line in lines {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// [Renderer] that records invocations instead of running `dot`.
///
/// Used by tests that exercise the per-package pipeline without Graphviz
/// installed.
#[derive(Default)]
pub struct RecordingRenderer {
    rendered: Mutex<Vec<PathBuf>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer::default()
    }

    /// Paths of every SVG this renderer was asked to produce
    pub fn rendered(&self) -> Vec<PathBuf> {
        self.rendered.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, _gv_path: &Path, svg_path: &Path) -> Result<()> {
        if let Ok(mut rendered) = self.rendered.lock() {
            rendered.push(svg_path.to_path_buf());
        }
        Ok(())
    }
}
