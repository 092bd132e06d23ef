use std::fs;
use std::path::{Path, PathBuf};

use scan_core::errors::{ErrorInfo, ScanError};
use scan_core::Assignment;
use scan_sample::Sampler;
use tracing::debug;

use crate::deck;
use crate::layout::{rundir_hierarchy, AxisRegistry, CaseLayout};
use crate::manifest::{CampaignManifest, CaseRecord};
use crate::template::Template;

/// File name used for rendered decks unless overridden.
pub const DEFAULT_DECK_NAME: &str = "input.deck";

/// Campaign of cases built from one template under one root directory.
///
/// A campaign owns all of its mutable state (case counter and records), so
/// independent campaigns can coexist in one process. Nested paths depend
/// only on the assignment and the axes the campaign was built with, so a
/// fresh campaign over an existing root finds the same directories. Calls to
/// [`Campaign::setup_case`] take `&mut self` and are therefore serialized.
///
/// ```no_run
/// # use scan_campaign::{Campaign, Template};
/// # use scan_core::Assignment;
/// let template = Template::load("template.deck".as_ref())?;
/// let mut campaign = Campaign::new(template, "grid_root");
/// let path = campaign.setup_case(&Assignment::new().with("constant:lambda", 1.0e-6))?;
/// # Ok::<(), scan_core::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Campaign {
    template: Template,
    root: PathBuf,
    deck_name: String,
    layout: CaseLayout,
    axes: AxisRegistry,
    counter: usize,
    records: Vec<CaseRecord>,
}

impl Campaign {
    /// Nested-layout campaign without axes: every segment spells out its key
    /// and exact value, and dimensions nest in key order.
    pub fn new(template: Template, root: impl Into<PathBuf>) -> Self {
        Self {
            template,
            root: root.into(),
            deck_name: DEFAULT_DECK_NAME.to_string(),
            layout: CaseLayout::default(),
            axes: AxisRegistry::new(),
            counter: 0,
            records: Vec::new(),
        }
    }

    /// Nested-layout campaign whose segments also carry each value's position
    /// on the sampler's axes, nested in parameter-space order.
    pub fn for_sampler(
        template: Template,
        root: impl Into<PathBuf>,
        sampler: &dyn Sampler,
    ) -> Result<Self, ScanError> {
        let mut campaign = Self::new(template, root);
        campaign.axes = AxisRegistry::from_axes(&sampler.axes())?;
        Ok(campaign)
    }

    /// Overrides the deck file name written into each case.
    pub fn with_deck_name(mut self, deck_name: impl Into<String>) -> Self {
        self.deck_name = deck_name.into();
        self
    }

    /// Selects the directory layout.
    pub fn with_layout(mut self, layout: CaseLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Campaign root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Template merged into every case.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Deck file name used in each case.
    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    /// Directory layout in use.
    pub fn layout(&self) -> CaseLayout {
        self.layout
    }

    /// Number of successful `setup_case` calls so far.
    pub fn cases_written(&self) -> usize {
        self.counter
    }

    /// Materialises one case and returns its directory (`root` joined with
    /// the derived relative path).
    ///
    /// The assignment is merged before anything touches the disk, so a
    /// malformed key leaves no directory behind. Existing directories are
    /// reused and the deck is overwritten, which makes retries safe under
    /// the nested layout.
    pub fn setup_case(&mut self, assignment: &Assignment) -> Result<PathBuf, ScanError> {
        if assignment.is_empty() {
            return Err(ScanError::TemplateMerge(ErrorInfo::new(
                "merge-empty-assignment",
                "assignment carries no parameters",
            )));
        }
        let merged = self.template.merge(assignment)?;
        let path = match self.layout {
            CaseLayout::Nested => {
                let segments = self.axes.segments(assignment)?;
                segments
                    .iter()
                    .fold(self.root.clone(), |path, segment| path.join(segment))
            }
            CaseLayout::Hierarchy => rundir_hierarchy(&self.root, self.counter),
        };
        fs::create_dir_all(&path).map_err(|err| {
            ScanError::DirectoryCreation(
                ErrorInfo::new("case-mkdir", err.to_string())
                    .with_context("path", path.display().to_string())
                    .with_hint("check that the campaign root is writable"),
            )
        })?;
        deck::dump_file(&merged, &path.join(&self.deck_name))?;
        self.counter += 1;
        self.record(&path, assignment);
        debug!(
            case = self.counter - 1,
            path = %path.display(),
            "case written"
        );
        Ok(path)
    }

    fn record(&mut self, path: &Path, assignment: &Assignment) {
        let relative = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let record = CaseRecord {
            path: relative,
            params: assignment.clone(),
        };
        match self.records.iter_mut().find(|r| r.path == record.path) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Snapshot of the cases written so far. `space_hash` identifies the
    /// parameter space the cases were sampled from, when known.
    pub fn manifest(&self, space_hash: Option<String>) -> CampaignManifest {
        CampaignManifest {
            space_hash,
            deck_name: self.deck_name.clone(),
            layout: self.layout,
            cases: self.records.clone(),
        }
    }
}
