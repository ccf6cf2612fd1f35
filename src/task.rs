//! The per-package pipeline run by each dispatcher worker.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::graph::HistoryGraphBuilder;
use crate::log::HistoryLog;
use crate::range;
use crate::render::Renderer;
use crate::tags::{self, Tag};
use crate::ui;

/// Everything one worker needs to turn a package path into a rendered graph:
/// discover candidate tags, order them, resolve windows, emit the `.gv`
/// description, render and post-process the `.svg`.
pub struct PackageTask {
    log: Arc<dyn HistoryLog>,
    renderer: Arc<dyn Renderer>,
    config: Config,
    release_start: String,
    release_end: String,
    output_dir: PathBuf,
    verbose: bool,
}

impl PackageTask {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        log: Arc<dyn HistoryLog>,
        renderer: Arc<dyn Renderer>,
        config: Config,
        release_start: impl Into<String>,
        release_end: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        verbose: bool,
    ) -> Self {
        PackageTask {
            log,
            renderer,
            config,
            release_start: release_start.into(),
            release_end: release_end.into(),
            output_dir: output_dir.into(),
            verbose,
        }
    }

    /// Output-file base name: `releaseStart-releaseEnd-package` with the
    /// package path's slashes replaced by dashes.
    pub fn base_filename(&self, package: &str) -> String {
        format!(
            "{}-{}-{}",
            self.release_start,
            self.release_end,
            package.trim().replace('/', "-")
        )
    }

    /// Processes one package end to end.
    ///
    /// A package with no candidate tags in the range is skipped: no graph
    /// file, no render. Any collaborator failure propagates and fails only
    /// this package's task.
    pub fn run(&self, package: &str) -> Result<()> {
        let package = package.trim();
        if self.verbose {
            ui::display_status(&format!("Analysing package {}", package));
        }

        let candidates =
            self.log
                .discover_tags(&self.release_start, &self.release_end, package)?;
        let ordered = tags::normalize(&candidates);

        if ordered.is_empty() {
            if self.verbose {
                ui::display_status(&format!("Package {} untouched in range", package));
            }
            return Ok(());
        }

        if self.verbose {
            for tag in ordered.iter().filter(|t| !t.is_prerelease()) {
                ui::display_status(&format!("Correcting tag {}_stable0", tag));
            }
            ui::display_status(&format!(
                "Creating history for package {} ({} tags)",
                package,
                ordered.len()
            ));
        }

        let release_start = Tag::new(&self.release_start);
        let release_end = Tag::new(&self.release_end);
        let windows = range::resolve(&ordered, &release_end);

        let base = self.base_filename(package);
        let gv_path = self.output_dir.join(format!("{}.gv", base));
        let svg_path = self.output_dir.join(format!("{}.svg", base));

        let file = File::create(&gv_path)?;
        let mut out = BufWriter::new(file);
        let builder = HistoryGraphBuilder::new(self.log.as_ref(), &self.config.urls, self.verbose);
        builder.build(&mut out, package, &release_start, &release_end, &windows)?;
        out.flush()?;

        self.renderer.render(&gv_path, &svg_path)?;

        if self.verbose {
            ui::display_success(&format!("Rendered {}", svg_path.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MockLog;
    use crate::render::RecordingRenderer;

    fn task_with(log: MockLog, dir: &std::path::Path) -> (PackageTask, Arc<RecordingRenderer>) {
        let renderer = Arc::new(RecordingRenderer::new());
        let task = PackageTask::new(
            Arc::new(log),
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Config::default(),
            "CMSSW_1_1_0",
            "CMSSW_1_0_0",
            dir,
            false,
        );
        (task, renderer)
    }

    #[test]
    fn test_base_filename_replaces_slashes() {
        let dir = tempfile::tempdir().unwrap();
        let (task, _) = task_with(MockLog::new(), dir.path());
        assert_eq!(
            task.base_filename("DataFormats/Common"),
            "CMSSW_1_1_0-CMSSW_1_0_0-DataFormats-Common"
        );
    }

    #[test]
    fn test_untouched_package_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (task, renderer) = task_with(MockLog::new(), dir.path());

        task.run("DataFormats/Common").unwrap();

        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
        assert!(renderer.rendered().is_empty());
    }

    #[test]
    fn test_touched_package_writes_graph_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = MockLog::new();
        log.add_package_tags(
            "DataFormats/Common",
            vec!["CMSSW_1_0_0_pre1".to_string(), "CMSSW_1_0_0".to_string()],
        );
        let (task, renderer) = task_with(log, dir.path());

        task.run("DataFormats/Common").unwrap();

        let gv = dir
            .path()
            .join("CMSSW_1_1_0-CMSSW_1_0_0-DataFormats-Common.gv");
        let contents = std::fs::read_to_string(gv).unwrap();
        assert!(contents.starts_with("digraph git {"));
        assert_eq!(renderer.rendered().len(), 1);
    }

    #[test]
    fn test_log_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = MockLog::new();
        log.fail_package("bad/pkg");
        let (task, _) = task_with(log, dir.path());

        assert!(task.run("bad/pkg").is_err());
    }
}
