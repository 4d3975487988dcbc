use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::{ChartData, ChartId, ChartKind};
use crate::services::chart_service::{self, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Not yet initialised, or destroyed
    Detached,
    /// Initialised with nothing to show ("no data")
    Empty,
    /// Showing data
    Ready,
}

/// Owner of one chart: its data, its view kind and its lifecycle
#[derive(Debug)]
pub struct ChartPanel {
    id: ChartId,
    kind: ChartKind,
    state: PanelState,
    data: ChartData,
}

impl ChartPanel {
    pub fn new(id: ChartId) -> Self {
        Self {
            id,
            kind: ChartKind::default(),
            state: PanelState::Detached,
            data: ChartData::default(),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Attach the panel in its empty state
    pub fn init(&mut self, kind: ChartKind) {
        self.kind = kind;
        self.data = ChartData::default();
        self.state = PanelState::Empty;
        debug!("{} panel initialised ({})", self.id, kind);
    }

    /// Replace the data. An update with nothing plottable leaves the panel empty.
    pub fn update(&mut self, data: ChartData, kind: ChartKind) {
        if self.state == PanelState::Detached {
            warn!("{} panel updated before init; initialising", self.id);
        }
        self.kind = kind;
        self.state = if data.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Ready
        };
        self.data = data;
        debug!(
            "{} panel updated: {} label(s), {} dataset(s)",
            self.id,
            self.data.labels.len(),
            self.data.datasets.len()
        );
    }

    /// Back to the "no data" state
    pub fn reset(&mut self) {
        if self.state == PanelState::Detached {
            return;
        }
        self.data = ChartData::default();
        self.state = PanelState::Empty;
        debug!("{} panel reset", self.id);
    }

    pub fn destroy(&mut self) {
        self.data = ChartData::default();
        self.state = PanelState::Detached;
    }

    pub fn is_empty(&self) -> bool {
        self.state != PanelState::Ready
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.png", self.id.file_stem()))
    }

    /// Render to `<dir>/<chart>.png`. Returns `None` when there is no data.
    pub fn render(&self, dir: &Path, width: u32, height: u32) -> Result<Option<PathBuf>, String> {
        if self.is_empty() {
            info!("{}: no data to display", self.id);
            return Ok(None);
        }

        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create output directory {}: {}", dir.display(), e))?;

        let path = self.output_path(dir);
        let options = RenderOptions {
            title: self.id.title().to_string(),
            y_desc: self.id.y_axis_label().to_string(),
            kind: self.kind,
            width,
            height,
        };
        chart_service::render_chart(&self.data, &options, &path)?;
        info!("✓ {} chart written to {}", self.id, path.display());

        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chart::SUCCESS;
    use crate::models::Dataset;

    fn sample() -> ChartData {
        ChartData {
            labels: vec!["2024-01".into()],
            datasets: vec![Dataset::solid("x", vec![Some(1.0)], SUCCESS)],
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut panel = ChartPanel::new(ChartId::Roi);
        assert_eq!(panel.state(), PanelState::Detached);

        panel.init(ChartKind::Line);
        assert_eq!(panel.state(), PanelState::Empty);

        panel.update(sample(), ChartKind::Bar);
        assert_eq!(panel.state(), PanelState::Ready);
        assert_eq!(panel.kind(), ChartKind::Bar);
        assert!(!panel.is_empty());

        panel.reset();
        assert!(panel.is_empty());
        assert!(panel.data().labels.is_empty());

        panel.destroy();
        assert_eq!(panel.state(), PanelState::Detached);
        panel.reset();
        assert_eq!(panel.state(), PanelState::Detached);
    }

    #[test]
    fn test_update_with_all_gaps_stays_empty() {
        let mut panel = ChartPanel::new(ChartId::MarketPrice);
        panel.init(ChartKind::Line);
        panel.update(
            ChartData {
                labels: vec!["a".into()],
                datasets: vec![Dataset::solid("x", vec![None], SUCCESS)],
            },
            ChartKind::Line,
        );
        assert_eq!(panel.state(), PanelState::Empty);
    }

    #[test]
    fn test_empty_panel_renders_nothing() {
        let mut panel = ChartPanel::new(ChartId::RiskLevels);
        panel.init(ChartKind::Line);
        let dir = std::env::temp_dir().join("agri_analytics_panel_test");
        assert_eq!(panel.render(&dir, 100, 100).unwrap(), None);
        assert_eq!(panel.output_path(&dir), dir.join("risk_levels.png"));
    }
}
