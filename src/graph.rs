//! DOT emission for one package's history graph.

use std::io::Write;

use crate::commit::{classify, CommitLine, MergeCommit};
use crate::config::UrlsConfig;
use crate::error::Result;
use crate::log::HistoryLog;
use crate::range::TagWindow;
use crate::tags::Tag;
use crate::ui;

const MERGE_COLOR: &str = "#73d216ff";
const TAG_COLOR: &str = "#fcaf3eff";

/// Walks the ordered tag windows for one package and emits the graph
/// description.
///
/// The output stream always begins with the opening `digraph` declaration and
/// ends with its matching close; callers must not emit content outside that
/// bracket. Failures from the log collaborator propagate and abort only the
/// current package's task.
pub struct HistoryGraphBuilder<'a> {
    log: &'a dyn HistoryLog,
    urls: &'a UrlsConfig,
    verbose: bool,
}

impl<'a> HistoryGraphBuilder<'a> {
    pub fn new(log: &'a dyn HistoryLog, urls: &'a UrlsConfig, verbose: bool) -> Self {
        HistoryGraphBuilder { log, urls, verbose }
    }

    /// Emits the full graph for `package` onto `out`.
    ///
    /// For each window in order: the window's log lines (merge commits as
    /// ghost/node/edge triples, anything else as a passthrough node), then the
    /// window's newer tag as a node. After all windows, a terminal node
    /// labeled with `release_start`.
    pub fn build<W: Write>(
        &self,
        out: &mut W,
        package: &str,
        release_start: &Tag,
        release_end: &Tag,
        windows: &[TagWindow],
    ) -> Result<()> {
        writeln!(out, "digraph git {{")?;
        write_preamble(out, package)?;
        write_tag(out, release_end, self.urls)?;

        for window in windows {
            ui::display_progress(&window.newer.name, &window.exclusion_ref());

            let lines = self.log.merge_commits(window, package)?;
            if self.verbose && !lines.is_empty() {
                ui::display_status(&format!(
                    "Adding {} commit(s) below {}",
                    lines.len(),
                    window.newer
                ));
            }
            for line in &lines {
                match classify(line) {
                    CommitLine::Merge(merge) => write_merge(out, &merge, self.urls)?,
                    CommitLine::Other(raw) => write_passthrough(out, &raw)?,
                }
            }

            write_tag(out, &window.newer, self.urls)?;
        }

        writeln!(out, "  end [label=\"{}\"]", release_start.name)?;
        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Graph-level layout directives plus the package title.
fn write_preamble<W: Write>(out: &mut W, label: &str) -> Result<()> {
    writeln!(
        out,
        r#"  label="{}"
  labelloc="t"
  fontname="Ubuntu"
  fontsize=16
  graph [rankdir="RL",
      overlap=true,
      splines=false,
      nodesep=0.3,
      ranksep=0.2,
      bgcolor="transparent",
  ];
  node [fixedsize=true,
      fontname="Ubuntu"
      fontsize=12,
      shape=box,
      style="filled,setlinewidth(2)",
      width=3.4,
      height=0.4,
  ];
  edge [arrowhead=none,
      arrowsize=0.5,
      style=invis,
      labelfontname="Ubuntu",
      weight=10,
      style="filled,setlinewidth(2)"
  ];"#,
        escape(label.trim())
    )?;
    Ok(())
}

/// One ghost anchor, one labeled pull-request node, one connecting edge.
fn write_merge<W: Write>(out: &mut W, merge: &MergeCommit, urls: &UrlsConfig) -> Result<()> {
    writeln!(
        out,
        "  ghost_{pr} [color=\"{c}\", shape=point, height=0.2];",
        pr = merge.pull_request,
        c = MERGE_COLOR,
    )?;
    writeln!(
        out,
        "  {pr} [color=\"{c}\", URL=\"{base}/{pr}\", label=\"#{pr} ({title})\\n{branch}\"];",
        pr = merge.pull_request,
        c = MERGE_COLOR,
        base = urls.pull_request,
        title = escape(&merge.title),
        branch = escape(&merge.branch),
    )?;
    writeln!(
        out,
        "  ghost_{pr} -> {pr} [color=\"{c}\"]",
        pr = merge.pull_request,
        c = MERGE_COLOR,
    )?;
    Ok(())
}

/// A line outside the merge-commit convention becomes a quoted node so the
/// output stays parseable and nothing is dropped.
fn write_passthrough<W: Write>(out: &mut W, raw: &str) -> Result<()> {
    writeln!(out, "  \"{}\";", escape(raw))?;
    Ok(())
}

/// The tag as a ghost/node/edge triple, with an external cross-reference link
/// only when the tag string ends in a digit. Development-branch-style tags
/// (e.g. `CMSSW_11_2_X`) get no link.
fn write_tag<W: Write>(out: &mut W, tag: &Tag, urls: &UrlsConfig) -> Result<()> {
    if tag.ends_in_digit() {
        writeln!(
            out,
            "  {tag}_ghost [color=\"{c}\", shape=point, height=0.2]; {tag} [color=\"{c}\", URL=\"{base}/{tag}\"]; {tag}_ghost -> {tag} [color=\"{c}\"];",
            tag = tag.name,
            c = TAG_COLOR,
            base = urls.release_tag,
        )?;
    } else {
        writeln!(
            out,
            "  {tag}_ghost [color=\"{c}\", shape=point, height=0.2]; {tag} [color=\"{c}\"]; {tag}_ghost -> {tag} [color=\"{c}\"];",
            tag = tag.name,
            c = TAG_COLOR,
        )?;
    }
    Ok(())
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
