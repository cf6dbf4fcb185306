// src/app/mod.rs: background catalog load + tabbed dashboard

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui as eg;
use tracing::{error, info};

pub mod cache;
pub mod data;
pub mod detail;
pub mod filters;
pub mod stats;
pub mod types;
pub mod ui;
pub mod utils;

pub use data::{Catalog, LoadError, Title, TitleKind};
pub use filters::FacetFilter;
pub use types::{BootPhase, Dashboard, KindChoice, LoadMsg, Tab};

use crate::config::AppConfig;
use stats::{genre_frequencies_between, FrequencyTable, PeriodError};

const SPLASH_REPAINT_MS: u64 = 100;

pub struct ExplorerApp {
    cfg: AppConfig,

    // load
    boot_phase: BootPhase,
    load_rx: Option<Receiver<LoadMsg>>,
    load_started: Option<Instant>,

    // data (immutable once loaded)
    catalog: Option<Arc<Catalog>>,
    dashboard: Option<Arc<Dashboard>>,

    current_tab: Tab,

    // search tab
    kind_pick: KindChoice,
    year_pick: Option<i32>,
    range_from: Option<i32>,
    range_to: Option<i32>,
    category_pick: Option<String>,
    search_query: String,
    search_dirty: bool,
    search_hits: Vec<usize>,
    selected_idx: Option<usize>,

    // timeline tab
    period_start: Option<i32>,
    period_end: Option<i32>,
    period_dirty: bool,
    period_genres: Option<Result<FrequencyTable, PeriodError>>,
}

impl ExplorerApp {
    pub fn new(cfg: AppConfig) -> Self {
        Self {
            cfg,
            boot_phase: BootPhase::Starting,
            load_rx: None,
            load_started: None,
            catalog: None,
            dashboard: None,
            current_tab: Tab::Overview,
            kind_pick: KindChoice::All,
            year_pick: None,
            range_from: None,
            range_to: None,
            category_pick: None,
            search_query: String::new(),
            search_dirty: true,
            search_hits: Vec::new(),
            selected_idx: None,
            period_start: None,
            period_end: None,
            period_dirty: true,
            period_genres: None,
        }
    }

    /// Skip the background load and start from an already loaded catalog.
    pub fn with_catalog(cfg: AppConfig, catalog: Arc<Catalog>) -> Self {
        let mut app = Self::new(cfg);
        app.install_catalog(catalog);
        app
    }

    pub fn boot_phase(&self) -> &BootPhase {
        &self.boot_phase
    }

    pub fn search_hits(&self) -> &[usize] {
        &self.search_hits
    }

    pub fn selected_idx(&self) -> Option<usize> {
        self.selected_idx
    }

    // ---- tiny flags ----
    pub(crate) fn mark_search_dirty(&mut self) {
        self.search_dirty = true;
    }

    pub(crate) fn mark_period_dirty(&mut self) {
        self.period_dirty = true;
    }

    // ---- load ----
    fn start_load(&mut self) {
        if self.load_rx.is_some() {
            return;
        }
        self.boot_phase = BootPhase::Loading;
        self.load_started = Some(Instant::now());

        let (tx, rx) = mpsc::channel::<LoadMsg>();
        self.load_rx = Some(rx);

        let path = self.cfg.data_path.clone();
        std::thread::spawn(move || {
            let msg = match cache::load_cached(&path) {
                Ok(catalog) => LoadMsg::Done(catalog),
                Err(e) => {
                    error!("loading {} failed: {e}", path.display());
                    LoadMsg::Error(e.to_string())
                }
            };
            let _ = tx.send(msg);
        });
    }

    fn poll_load(&mut self, ctx: &eg::Context) {
        let Some(rx) = self.load_rx.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(LoadMsg::Done(catalog)) => {
                if let Some(t0) = self.load_started {
                    info!("catalog ready in {:?}", t0.elapsed());
                }
                self.install_catalog(catalog);
                self.load_rx = None;
                ctx.request_repaint();
            }
            Ok(LoadMsg::Error(e)) => {
                self.boot_phase = BootPhase::Failed(e);
                self.load_rx = None;
                ctx.request_repaint();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.boot_phase = BootPhase::Failed("loader thread stopped unexpectedly".into());
                self.load_rx = None;
            }
        }
    }

    fn install_catalog(&mut self, catalog: Arc<Catalog>) {
        let dashboard = Dashboard::build(&catalog);
        self.period_start = dashboard.years.first().copied();
        self.period_end = dashboard.years.last().copied();
        self.dashboard = Some(Arc::new(dashboard));
        self.catalog = Some(catalog);
        self.boot_phase = BootPhase::Ready;
        self.search_dirty = true;
        self.period_dirty = true;
        self.refresh_views();
    }

    // ---- derived views ----
    pub fn current_filter(&self) -> FacetFilter {
        FacetFilter {
            kind: self.kind_pick.kind(),
            year: self.year_pick,
            year_range: match (self.range_from, self.range_to) {
                (None, None) => None,
                (lo, hi) => Some((lo.unwrap_or(i32::MIN), hi.unwrap_or(i32::MAX))),
            },
            category: self.category_pick.clone(),
            text: self.search_query.clone(),
        }
    }

    /// Recompute whatever a widget change invalidated.
    pub fn refresh_views(&mut self) {
        let Some(catalog) = self.catalog.clone() else {
            return;
        };

        if self.search_dirty {
            self.search_dirty = false;
            self.search_hits = self.current_filter().apply(catalog.titles());
            // Keep the selection while it is still in the results; otherwise show the first hit.
            let still_visible = self
                .selected_idx
                .is_some_and(|i| self.search_hits.contains(&i));
            if !still_visible {
                self.selected_idx = self.search_hits.first().copied();
            }
        }

        if self.period_dirty {
            self.period_dirty = false;
            self.period_genres = match (self.period_start, self.period_end) {
                (Some(start), Some(end)) => {
                    Some(genre_frequencies_between(catalog.titles(), start, end))
                }
                _ => None,
            };
        }
    }
}

// ========== App impl ==========
impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        if self.boot_phase == BootPhase::Starting {
            self.start_load();
        }
        self.poll_load(ctx);

        match &self.boot_phase {
            BootPhase::Starting | BootPhase::Loading => {
                eg::CentralPanel::default().show(ctx, |ui| self.ui_render_splash(ui));
                ctx.request_repaint_after(Duration::from_millis(SPLASH_REPAINT_MS));
                return;
            }
            BootPhase::Failed(msg) => {
                let msg = msg.clone();
                eg::CentralPanel::default().show(ctx, |ui| self.ui_render_load_error(ui, &msg));
                return;
            }
            BootPhase::Ready => {}
        }

        let (Some(catalog), Some(dashboard)) = (self.catalog.clone(), self.dashboard.clone())
        else {
            return;
        };

        self.refresh_views();

        eg::TopBottomPanel::top("header").show(ctx, |ui| self.ui_render_header(ui));
        eg::TopBottomPanel::bottom("footer").show(ctx, |ui| self.ui_render_footer(ui));

        if self.current_tab == Tab::Search {
            self.ui_render_detail_panel(ctx, &catalog);
        }

        eg::CentralPanel::default().show(ctx, |ui| {
            eg::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.current_tab {
                    Tab::Overview => self.ui_render_overview(ui, &catalog, &dashboard),
                    Tab::Visuals => self.ui_render_visuals(ui, &dashboard),
                    Tab::Search => self.ui_render_search(ui, &catalog, &dashboard),
                    Tab::Timeline => self.ui_render_timeline(ui, &dashboard),
                });
        });

        // Widget changes this frame: recompute before the next paint.
        if self.search_dirty || self.period_dirty {
            self.refresh_views();
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::tests::title;

    fn app() -> ExplorerApp {
        let mut a = title("s1", TitleKind::Movie, 2020);
        a.listed_in = Some("Dramas".into());
        let mut b = title("s2", TitleKind::TvShow, 2020);
        b.listed_in = Some("TV Dramas, Crime TV Shows".into());
        let mut c = title("s3", TitleKind::Movie, 2015);
        c.listed_in = Some("Comedies".into());
        c.description = Some("Two chefs open a food truck.".into());
        ExplorerApp::with_catalog(AppConfig::default(), Arc::new(Catalog::new(vec![a, b, c])))
    }

    #[test]
    fn ready_with_everything_selected() {
        let app = app();
        assert_eq!(app.boot_phase(), &BootPhase::Ready);
        assert_eq!(app.search_hits(), &[0, 1, 2]);
        assert_eq!(app.selected_idx(), Some(0));
        assert_eq!(app.period_start, Some(2015));
        assert_eq!(app.period_end, Some(2020));
        let genres = app.period_genres.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(genres.total(), 4);
    }

    #[test]
    fn facet_change_recomputes_hits_and_selection() {
        let mut app = app();
        app.selected_idx = Some(1);

        app.kind_pick = KindChoice::Only(TitleKind::Movie);
        app.mark_search_dirty();
        app.refresh_views();
        assert_eq!(app.search_hits(), &[0, 2]);
        assert_eq!(app.selected_idx(), Some(0));

        app.search_query = "FOOD TRUCK".into();
        app.mark_search_dirty();
        app.refresh_views();
        assert_eq!(app.search_hits(), &[2]);
        assert_eq!(app.selected_idx(), Some(2));

        app.year_pick = Some(1990);
        app.mark_search_dirty();
        app.refresh_views();
        assert!(app.search_hits().is_empty());
        assert_eq!(app.selected_idx(), None);
    }

    #[test]
    fn release_span_widgets_narrow_the_results() {
        let mut app = app();
        app.range_from = Some(2016);
        app.mark_search_dirty();
        app.refresh_views();
        assert_eq!(app.current_filter().year_range, Some((2016, i32::MAX)));
        assert_eq!(app.search_hits(), &[0, 1]);

        app.range_from = Some(2015);
        app.range_to = Some(2015);
        app.mark_search_dirty();
        app.refresh_views();
        assert_eq!(app.search_hits(), &[2]);
        assert_eq!(app.selected_idx(), Some(2));

        app.range_from = None;
        app.range_to = None;
        assert!(app.current_filter().is_empty());
    }

    #[test]
    fn inverted_period_is_reported() {
        let mut app = app();
        app.period_start = Some(2020);
        app.period_end = Some(2015);
        app.mark_period_dirty();
        app.refresh_views();
        assert!(matches!(
            app.period_genres,
            Some(Err(PeriodError::Inverted { start: 2020, end: 2015 }))
        ));
    }

    #[test]
    fn load_thread_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            data_path: dir.path().join("absent.csv"),
            ..AppConfig::default()
        };
        let mut app = ExplorerApp::new(cfg);
        app.start_load();
        assert_eq!(app.boot_phase(), &BootPhase::Loading);

        let ctx = eg::Context::default();
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.boot_phase() == &BootPhase::Loading && Instant::now() < deadline {
            app.poll_load(&ctx);
            std::thread::sleep(Duration::from_millis(5));
        }
        match app.boot_phase() {
            BootPhase::Failed(msg) => assert!(msg.contains("absent.csv")),
            other => panic!("unexpected phase {other:?}"),
        }
    }
}
