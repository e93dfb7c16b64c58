//! Application state: load lifecycle, selection controller and input state.

use crate::data::{self, CountryRecord, Dataset, LoadError, YearSnapshot};
use crate::format::{format_eur, Profile};
use crate::map::{MapRenderer, Viewport};
use crate::reference::{self, CountryRef};
use crate::scale::ColorScale;
use crate::search;
use std::path::Path;
use tracing::warn;

/// Years covered by the dataset, in display order.
pub const YEARS: [u16; 5] = [2020, 2021, 2022, 2023, 2024];
/// Year shown at startup.
pub const DEFAULT_YEAR: u16 = 2024;

/// Dataset resource, relative to the data directory.
pub const DATASET_FILE: &str = "creances.json";
/// Basemap geometry resource, relative to the data directory.
pub const BASEMAP_FILE: &str = "countries-110m.json";

/// Fetch-then-render lifecycle. Widgets only mount in `Ready`; `Failed` is
/// terminal and accepts nothing but quit.
pub enum Phase {
    Loading,
    Ready(Box<Dashboard>),
    Failed(LoadError),
}

pub struct App {
    pub phase: Phase,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            should_quit: false,
        }
    }

    /// One-shot startup load: dataset (load-bearing), then basemap
    /// (degrades to built-in outlines).
    pub fn load(&mut self, data_dir: &Path, map_width: usize, map_height: usize) {
        match data::load_dataset(&data_dir.join(DATASET_FILE)) {
            Ok(dataset) => {
                let mut map = MapRenderer::new();
                let basemap = data_dir.join(BASEMAP_FILE);
                if basemap.exists() {
                    if let Err(err) = data::load_basemap(&mut map, &basemap) {
                        warn!(error = %err, "basemap unavailable, using outlines");
                    }
                }
                if !map.has_shapes() {
                    data::fallback_outlines(&mut map);
                }
                self.phase = Phase::Ready(Box::new(Dashboard::new(
                    dataset, map, map_width, map_height,
                )));
            }
            Err(err) => self.phase = Phase::Failed(err),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match &mut self.phase {
            Phase::Ready(dash) => Some(dash),
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The UI selections, owned here and only here; widgets borrow per render.
#[derive(Debug, Default)]
pub struct Selection {
    pub year: u16,
    pub country: Option<String>,
    pub record: Option<CountryRecord>,
}

/// Private state of the search widget.
#[derive(Default)]
pub struct SearchBox {
    pub active: bool,
    pub query: String,
    pub open: bool,
    pub hits: Vec<&'static CountryRef>,
    pub cursor: usize,
}

/// Application controller: exclusive owner of the dataset and the selection
/// state, with the §-defined mutation entry points. Everything it exposes to
/// widgets is a read projection.
pub struct Dashboard {
    pub dataset: Dataset,
    pub selection: Selection,
    pub scale: ColorScale,
    pub viewport: Viewport,
    pub map: MapRenderer,
    pub search: SearchBox,
    /// Current mouse position (terminal cell) for the hover tooltip.
    pub mouse_cell: Option<(u16, u16)>,
    /// Drag tracking: last position, and whether the press turned into a pan.
    pub last_mouse: Option<(u16, u16)>,
    pub dragged: bool,
}

impl Dashboard {
    pub fn new(dataset: Dataset, map: MapRenderer, map_width: usize, map_height: usize) -> Self {
        let selection = Selection {
            year: DEFAULT_YEAR,
            country: None,
            record: None,
        };
        let scale = ColorScale::for_snapshot(dataset.get(&DEFAULT_YEAR.to_string()));
        Self {
            dataset,
            selection,
            scale,
            viewport: Viewport::world(map_width, map_height),
            map,
            search: SearchBox::default(),
            mouse_cell: None,
            last_mouse: None,
            dragged: false,
        }
    }

    /// Snapshot for the active year; `None` when the dataset lacks the key.
    pub fn snapshot(&self) -> Option<&YearSnapshot> {
        self.dataset.get(&self.selection.year.to_string())
    }

    /// Replace the active year.
    ///
    /// The selected country's record is re-resolved against the new
    /// snapshot. When the country has no data in that year the previously
    /// displayed record is deliberately retained (see DESIGN.md).
    pub fn set_year(&mut self, year: u16) {
        self.selection.year = year;
        if let Some(iso) = self.selection.country.clone() {
            if let Some(record) = self.snapshot().and_then(|s| s.countries.get(&iso)).cloned() {
                self.selection.record = Some(record);
            }
        }
        self.scale = ColorScale::for_snapshot(self.snapshot());
        if self.search.active {
            self.refresh_suggestions();
        }
    }

    pub fn year_prev(&mut self) {
        if let Some(pos) = YEARS.iter().position(|&y| y == self.selection.year) {
            if pos > 0 {
                self.set_year(YEARS[pos - 1]);
            }
        }
    }

    pub fn year_next(&mut self) {
        if let Some(pos) = YEARS.iter().position(|&y| y == self.selection.year) {
            if pos + 1 < YEARS.len() {
                self.set_year(YEARS[pos + 1]);
            }
        }
    }

    /// Set the selection to caller-supplied values. `(None, None)` clears.
    /// Cannot fail; a code that matches no map shape simply never
    /// highlights.
    pub fn select_country(&mut self, country: Option<String>, record: Option<CountryRecord>) {
        self.selection.country = country;
        self.selection.record = record;
    }

    pub fn clear_selection(&mut self) {
        self.select_country(None, None);
    }

    /// Resolve a map click at geographic coordinates: reconcile the shape's
    /// numeric identifier, look its record up in the active snapshot, and
    /// select with the canonical display name. A click on a shape without
    /// data clears the selection; a click on open water does nothing.
    pub fn click_map(&mut self, lon: f64, lat: f64) {
        let Some(code) = self.map.hit_test(lon, lat).map(|s| s.code.clone()) else {
            return;
        };
        let iso = reference::to_alpha3(&code).to_string();
        match self.snapshot().and_then(|s| s.countries.get(&iso)).cloned() {
            Some(mut record) => {
                if let Some(name) = reference::display_name(&iso) {
                    record.name = name.to_string();
                }
                self.select_country(Some(iso), Some(record));
            }
            None => self.clear_selection(),
        }
    }

    /// Hover tooltip for geographic coordinates: country name plus its total
    /// or "no data" wording.
    pub fn hover_info(&self, lon: f64, lat: f64) -> Option<String> {
        let shape = self.map.hit_test(lon, lat)?;
        let iso = reference::to_alpha3(&shape.code);
        let name = reference::display_name(iso).unwrap_or(&shape.name);
        let record = self.snapshot().and_then(|s| s.countries.get(iso));
        Some(match record {
            Some(r) if r.total > 0.0 => {
                format!("{name}: {}", format_eur(r.total, Profile::Panel))
            }
            _ => format!("{name}: Pas de données"),
        })
    }

    /// Numeric basemap identifier of the selected country, for the map
    /// highlight stroke.
    pub fn highlight_code(&self) -> Option<&str> {
        let iso = self.selection.country.as_deref()?;
        self.map
            .shapes()
            .iter()
            .find(|s| reference::to_alpha3(&s.code) == iso)
            .map(|s| s.code.as_str())
    }

    // --- search widget entry points ---

    pub fn search_open(&mut self) {
        self.search.active = true;
        self.refresh_suggestions();
    }

    pub fn search_cancel(&mut self) {
        self.search = SearchBox::default();
    }

    pub fn search_input(&mut self, c: char) {
        self.search.query.push(c);
        self.refresh_suggestions();
    }

    pub fn search_backspace(&mut self) {
        self.search.query.pop();
        self.refresh_suggestions();
    }

    pub fn search_up(&mut self) {
        self.search.cursor = self.search.cursor.saturating_sub(1);
    }

    pub fn search_down(&mut self) {
        if self.search.cursor + 1 < self.search.hits.len() {
            self.search.cursor += 1;
        }
    }

    /// Select the highlighted suggestion: the record for the active year,
    /// with the canonical reference name taking precedence over the
    /// dataset's embedded name.
    pub fn search_commit(&mut self) {
        let Some(hit) = self.search.hits.get(self.search.cursor).copied() else {
            return;
        };
        if let Some(mut record) = self.snapshot().and_then(|s| s.countries.get(hit.iso)).cloned() {
            record.name = hit.name.to_string();
            self.select_country(Some(hit.iso.to_string()), Some(record));
        }
        self.search_cancel();
    }

    fn refresh_suggestions(&mut self) {
        self.search.hits = match self.snapshot() {
            Some(snap) => search::suggestions(&self.search.query, snap).collect(),
            None => Vec::new(),
        };
        self.search.cursor = 0;
        self.search.open = !self.search.hits.is_empty();
    }

    // --- viewport plumbing ---

    /// Keep the viewport's pixel size in sync with the map widget area.
    pub fn set_map_size(&mut self, width_chars: u16, height_chars: u16) {
        self.viewport.width = width_chars as usize * 2;
        self.viewport.height = height_chars as usize * 4;
    }

    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Less sensitive when zoomed out.
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.viewport.pan(dx * scale, dy * scale);
            self.dragged = true;
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
        self.dragged = false;
    }
}
