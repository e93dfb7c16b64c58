//! Widget rendering. Every widget is a pure projection of
//! `(Dataset[year], Selection)`; nothing here mutates state.

use crate::app::{App, Dashboard, Phase, YEARS};
use crate::braille::BrailleCanvas;
use crate::format::{format_eur, share_percent, Profile};
use crate::reference;
use crate::scale::RAMP;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
    Frame,
};

/// Right-hand detail panel width, characters.
pub const PANEL_WIDTH: u16 = 34;

const ORANGE: Color = Color::Rgb(0xf9, 0x73, 0x16);
const BLUE: Color = Color::Rgb(0x3b, 0x82, 0xf6);
const GREEN: Color = Color::Rgb(0x10, 0xb9, 0x81);
const PURPLE: Color = Color::Rgb(0x8b, 0x5c, 0xf6);

/// Screen regions. Input handling resolves clicks against the same
/// function, so hit targets always agree with what was drawn.
pub struct Zones {
    pub kpi: Rect,
    pub year: Rect,
    pub search: Rect,
    pub map: Rect,
    pub panel: Rect,
    pub status: Rect,
}

pub fn zones(area: Rect) -> Zones {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // KPI bar
            Constraint::Length(3), // year selector + search
            Constraint::Min(8),    // map + panel
            Constraint::Length(1), // status bar
        ])
        .split(area);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(PANEL_WIDTH)])
        .split(rows[1]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
        .split(rows[2]);

    Zones {
        kpi: rows[0],
        year: controls[0],
        search: controls[1],
        map: main[0],
        panel: main[1],
        status: rows[3],
    }
}

/// Interior of a bordered block.
pub fn block_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Year marker under a terminal position, if the click lands on one.
/// Markers are fixed 6-character slots starting at the block interior.
pub fn year_at(year_zone: Rect, col: u16, row: u16) -> Option<u16> {
    let inner = block_inner(year_zone);
    if row != inner.y || col < inner.x {
        return None;
    }
    let idx = ((col - inner.x) / 6) as usize;
    if col >= inner.x + (YEARS.len() as u16) * 6 {
        return None;
    }
    YEARS.get(idx).copied()
}

/// Render the UI for the current phase.
pub fn render(frame: &mut Frame, app: &App) {
    match &app.phase {
        Phase::Loading => render_loading(frame),
        Phase::Failed(err) => render_failed(frame, &err.to_string()),
        Phase::Ready(dash) => render_dashboard(frame, dash),
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered(frame.area(), 40, 3);
    let text = Paragraph::new("Chargement des données…")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

fn render_failed(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 60, 7);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Erreur ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let lines = vec![
        Line::raw(""),
        Line::from(Span::raw(message.to_string())),
        Line::raw(""),
        Line::from(Span::styled(
            "Appuyez sur une touche pour quitter.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(text, area);
}

fn render_dashboard(frame: &mut Frame, dash: &Dashboard) {
    let zones = zones(frame.area());

    render_kpi_bar(frame, dash, zones.kpi);
    render_year_selector(frame, dash, zones.year);
    render_search_box(frame, dash, zones.search);
    render_map(frame, dash, zones.map);
    render_panel(frame, dash, zones.panel);
    render_status_bar(frame, dash, &zones, zones.status);

    // Overlay last so it sits above the map.
    render_suggestions(frame, dash, zones.search);
}

fn render_kpi_bar(frame: &mut Frame, dash: &Dashboard, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Carte des créances françaises ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match dash.snapshot() {
        Some(snapshot) => {
            let totals = &snapshot.totals;
            let tiles: [(&str, String, Color); 5] = [
                ("Créances APD", format_eur(totals.apd, Profile::Kpi), ORANGE),
                ("Non APD", format_eur(totals.napd, Profile::Kpi), BLUE),
                ("Total", format_eur(totals.total, Profile::Kpi), GREEN),
                ("Pays débiteurs", totals.country_count.to_string(), PURPLE),
                ("Année", dash.selection.year.to_string(), Color::Gray),
            ];
            let mut spans = Vec::with_capacity(tiles.len() * 4);
            for (i, (label, value, color)) in tiles.iter().enumerate() {
                if i != 0 {
                    spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
                }
                spans.push(Span::styled(
                    format!("{label} "),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::styled(
                    value.clone(),
                    Style::default().fg(*color).add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            format!("Aucune donnée pour {}", dash.selection.year),
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), inner);
}

fn render_year_selector(frame: &mut Frame, dash: &Dashboard, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Année ", Style::default().fg(Color::Gray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // 6-character slots, kept in lockstep with `year_at`.
    let spans: Vec<Span> = YEARS
        .iter()
        .map(|&year| {
            let style = if year == dash.selection.year {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {year} "), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_search_box(frame: &mut Frame, dash: &Dashboard, area: Rect) {
    let border = if dash.search.active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Recherche ", Style::default().fg(Color::Gray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if dash.search.active {
        Line::from(vec![
            Span::styled("▸ ", Style::default().fg(Color::Yellow)),
            Span::raw(dash.search.query.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(Span::styled(
            "Rechercher un pays… (/)",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_suggestions(frame: &mut Frame, dash: &Dashboard, search_zone: Rect) {
    if !dash.search.open || dash.search.hits.is_empty() {
        return;
    }

    let height = (dash.search.hits.len() as u16 + 2).min(8);
    let area = Rect {
        x: search_zone.x,
        y: search_zone.y + search_zone.height,
        width: search_zone.width,
        height,
    }
    .intersection(frame.area());

    let lines: Vec<Line> = dash
        .search
        .hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let style = if i == dash.search.cursor {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!(" {} ", hit.name), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_map(frame: &mut Frame, dash: &Dashboard, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Carte ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(
            " Source: Direction Générale du Trésor ",
            Style::default().fg(Color::DarkGray),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Braille gives 2x4 sub-cell resolution.
    let mut viewport = dash.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let snapshot = dash.snapshot();
    let scale = dash.scale;
    let mut canvas = BrailleCanvas::new(inner.width as usize, inner.height as usize);
    dash.map.render(
        &mut canvas,
        &viewport,
        |shape| {
            let iso = reference::to_alpha3(&shape.code);
            scale.fill(snapshot.and_then(|s| s.countries.get(iso)))
        },
        dash.highlight_code(),
    );

    frame.render_widget(MapWidget { canvas }, inner);

    // Legend over the bottom row of the map.
    if inner.height > 1 {
        let legend_area = Rect {
            x: inner.x,
            y: inner.y + inner.height - 1,
            width: inner.width,
            height: 1,
        };
        let mut spans = vec![Span::styled(
            "Total des créances 0 ",
            Style::default().fg(Color::Gray),
        )];
        for (r, g, b) in RAMP {
            spans.push(Span::styled("██", Style::default().fg(Color::Rgb(r, g, b))));
        }
        spans.push(Span::styled(
            format!(" {}", format_eur(scale.max_total(), Profile::Panel)),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), legend_area);
    }
}

/// Blits the braille canvas into the frame buffer, one colored glyph per
/// non-empty cell.
struct MapWidget {
    canvas: BrailleCanvas,
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.canvas.height().min(area.height as usize);
        let cols = self.canvas.width().min(area.width as usize);
        for cy in 0..rows {
            for cx in 0..cols {
                if let Some((ch, color)) = self.canvas.cell(cx, cy) {
                    buf[(area.x + cx as u16, area.y + cy as u16)]
                        .set_char(ch)
                        .set_fg(color);
                }
            }
        }
    }
}

fn render_panel(frame: &mut Frame, dash: &Dashboard, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Détail ", Style::default().fg(Color::Gray)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (Some(_), Some(record)) = (&dash.selection.country, &dash.selection.record) else {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "Sélectionnez un pays",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Cliquez sur un pays de la carte",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "ou utilisez la recherche.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let apd_pct = share_percent(record.apd, record.total);
    let napd_pct = share_percent(record.napd, record.total);

    let mut lines = vec![
        Line::from(Span::styled(
            record.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Encours des créances",
            Style::default().fg(Color::DarkGray),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Créances APD",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(
                format!("  {}", format_eur(record.apd, Profile::Panel)),
                Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {apd_pct}% du total"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            "Créances Non APD",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(
                format!("  {}", format_eur(record.napd, Profile::Panel)),
                Style::default().fg(BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {napd_pct}% du total"),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled("Total", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            format!("  {}", format_eur(record.total, Profile::Panel)),
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];

    // APD vs non-APD proportion bar.
    if record.total > 0.0 {
        let width = inner.width.saturating_sub(2) as usize;
        let apd_cells = ((record.apd / record.total) * width as f64).round() as usize;
        let apd_cells = apd_cells.min(width);
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled("█".repeat(apd_cells), Style::default().fg(ORANGE)),
            Span::styled("█".repeat(width - apd_cells), Style::default().fg(BLUE)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" ■ APD", Style::default().fg(ORANGE)),
            Span::styled("  ■ Non APD", Style::default().fg(BLUE)),
        ]));
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(Span::styled(
        format!("Données au 31 décembre {}", dash.selection.year),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, dash: &Dashboard, zones: &Zones, area: Rect) {
    let hover = hover_text(dash, zones);

    let mut spans = Vec::new();
    if let Some(hover) = hover {
        spans.push(Span::styled(
            format!(" {hover} "),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format!("{:.1}x", dash.viewport.zoom),
        Style::default().fg(Color::Yellow),
    ));
    let help = if dash.search.active {
        " | ↑/↓: choisir  Entrée: sélectionner  Échap: fermer"
    } else {
        " | ←/→: année  /: recherche  hjkl: pan  +/-: zoom  r: vue  Échap: fermer  q: quitter"
    };
    spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Tooltip for the hovered map cell, when the mouse is over the map.
fn hover_text(dash: &Dashboard, zones: &Zones) -> Option<String> {
    let (col, row) = dash.mouse_cell?;
    let inner = block_inner(zones.map);
    if !inner.contains(Position::new(col, row)) {
        return None;
    }
    let mut viewport = dash.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;
    let px = ((col - inner.x) as i32) * 2;
    let py = ((row - inner.y) as i32) * 4;
    let (lon, lat) = viewport.unproject(px, py);
    dash.hover_info(lon, lat)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
