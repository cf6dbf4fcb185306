// src/app/ui/charts.rs
//! Small painter-drawn charts: bars, lines and donuts.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self as eg, Align2, Color32, FontId, Rect, Sense, Shape, Stroke};

pub const SET3: [Color32; 12] = [
    Color32::from_rgb(141, 211, 199),
    Color32::from_rgb(255, 255, 179),
    Color32::from_rgb(190, 186, 218),
    Color32::from_rgb(251, 128, 114),
    Color32::from_rgb(128, 177, 211),
    Color32::from_rgb(253, 180, 98),
    Color32::from_rgb(179, 222, 105),
    Color32::from_rgb(252, 205, 229),
    Color32::from_rgb(217, 217, 217),
    Color32::from_rgb(188, 128, 189),
    Color32::from_rgb(204, 235, 197),
    Color32::from_rgb(255, 237, 111),
];

pub const PASTEL: [Color32; 11] = [
    Color32::from_rgb(102, 197, 204),
    Color32::from_rgb(246, 207, 113),
    Color32::from_rgb(248, 156, 116),
    Color32::from_rgb(220, 176, 242),
    Color32::from_rgb(135, 197, 95),
    Color32::from_rgb(158, 185, 243),
    Color32::from_rgb(254, 136, 177),
    Color32::from_rgb(201, 219, 116),
    Color32::from_rgb(139, 224, 164),
    Color32::from_rgb(180, 151, 231),
    Color32::from_rgb(179, 179, 179),
];

pub const SERIES: [Color32; 4] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
];

const VIRIDIS_STOPS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const AXIS_FONT: f32 = 11.0;
const LABEL_FONT: f32 = 12.0;

/// Viridis-like colour for `t` in 0..=1 (clamped).
pub fn viridis(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let span = (VIRIDIS_STOPS.len() - 1) as f32;
    let pos = t * span;
    let i = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    let f = pos - i as f32;
    let (a, b) = (VIRIDIS_STOPS[i], VIRIDIS_STOPS[i + 1]);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * f).round() as u8;
    Color32::from_rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Step of 1, 2 or 5 times a power of ten giving roughly `target` ticks over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Upper bound of a zero-based value axis, rounded up to a tick.
pub fn nice_axis_max(max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 1.0;
    }
    let step = nice_step(max, 5);
    (max / step).ceil() * step
}

fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut v = (lo / step).ceil() * step;
    while v <= hi + step * 1e-9 {
        out.push(v);
        v += step;
    }
    out
}

fn format_tick(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

/// Percent share of each value in the total (all zero when the total is zero).
pub fn shares(values: &[usize]) -> Vec<f32> {
    let total: usize = values.iter().sum();
    values
        .iter()
        .map(|&v| crate::app::utils::percent(v, total))
        .collect()
}

pub fn truncate_label(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

pub fn chart_title(ui: &mut eg::Ui, title: &str) {
    ui.label(eg::RichText::new(title).strong().size(14.0));
}

fn no_data(painter: &eg::Painter, rect: Rect, color: Color32) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "No data",
        FontId::proportional(LABEL_FONT),
        color,
    );
}

struct Palette {
    text: Color32,
    weak: Color32,
    grid: Color32,
}

fn palette(ui: &eg::Ui) -> Palette {
    let v = ui.visuals();
    Palette {
        text: v.text_color(),
        weak: v.weak_text_color(),
        grid: v.widgets.noninteractive.bg_stroke.color,
    }
}

/// Horizontal bars, first entry at the top. Bar colour follows the count.
pub fn hbar_chart(ui: &mut eg::Ui, entries: &[(String, usize)]) {
    const ROW_H: f32 = 24.0;
    const LABEL_W: f32 = 150.0;
    const AXIS_H: f32 = 18.0;

    let pal = palette(ui);
    let height = entries.len().max(3) as f32 * ROW_H + AXIS_H + 4.0;
    let (rect, resp) =
        ui.allocate_exact_size(eg::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    if entries.is_empty() {
        no_data(&painter, rect, pal.weak);
        return;
    }

    let max = entries.iter().map(|e| e.1).max().unwrap_or(1).max(1) as f64;
    let axis_max = nice_axis_max(max);
    let plot = Rect::from_min_max(
        eg::pos2(rect.left() + LABEL_W, rect.top() + 2.0),
        eg::pos2(rect.right() - 12.0, rect.top() + 2.0 + entries.len() as f32 * ROW_H),
    );
    let x_of = |v: f64| plot.left() + (v / axis_max) as f32 * plot.width();

    for t in ticks(0.0, axis_max, nice_step(axis_max, 5)) {
        let x = x_of(t);
        painter.line_segment(
            [eg::pos2(x, plot.top()), eg::pos2(x, plot.bottom())],
            Stroke::new(1.0, pal.grid),
        );
        painter.text(
            eg::pos2(x, plot.bottom() + 2.0),
            Align2::CENTER_TOP,
            format_tick(t),
            FontId::proportional(AXIS_FONT),
            pal.weak,
        );
    }

    let hover = resp.hover_pos();
    let mut hovered = None;
    for (i, (label, count)) in entries.iter().enumerate() {
        let y0 = plot.top() + i as f32 * ROW_H;
        let row = Rect::from_min_max(eg::pos2(rect.left(), y0), eg::pos2(plot.right(), y0 + ROW_H));
        let bar = Rect::from_min_max(
            eg::pos2(plot.left(), y0 + 3.0),
            eg::pos2(x_of(*count as f64), y0 + ROW_H - 3.0),
        );
        painter.rect_filled(bar, 2.0, viridis(*count as f32 / max as f32));
        painter.text(
            eg::pos2(plot.left() - 6.0, row.center().y),
            Align2::RIGHT_CENTER,
            truncate_label(label, 22),
            FontId::proportional(LABEL_FONT),
            pal.text,
        );
        if hover.is_some_and(|p| row.contains(p)) {
            hovered = Some(i);
            painter.rect_stroke(bar, 2.0, Stroke::new(1.0, pal.text));
        }
    }

    if let Some(i) = hovered {
        let (label, count) = &entries[i];
        resp.on_hover_text_at_pointer(format!("{label}: {count}"));
    }
}

/// Vertical bars in the given order, labels under each bar.
pub fn vbar_chart(ui: &mut eg::Ui, entries: &[(String, usize)], height: f32) {
    const AXIS_W: f32 = 40.0;
    const LABEL_H: f32 = 34.0;

    let pal = palette(ui);
    let (rect, resp) =
        ui.allocate_exact_size(eg::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    if entries.is_empty() {
        no_data(&painter, rect, pal.weak);
        return;
    }

    let max = entries.iter().map(|e| e.1).max().unwrap_or(1).max(1) as f64;
    let axis_max = nice_axis_max(max);
    let plot = Rect::from_min_max(
        eg::pos2(rect.left() + AXIS_W, rect.top() + 6.0),
        eg::pos2(rect.right() - 6.0, rect.bottom() - LABEL_H),
    );
    let y_of = |v: f64| plot.bottom() - (v / axis_max) as f32 * plot.height();

    for t in ticks(0.0, axis_max, nice_step(axis_max, 5)) {
        let y = y_of(t);
        painter.line_segment(
            [eg::pos2(plot.left(), y), eg::pos2(plot.right(), y)],
            Stroke::new(1.0, pal.grid),
        );
        painter.text(
            eg::pos2(plot.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            format_tick(t),
            FontId::proportional(AXIS_FONT),
            pal.weak,
        );
    }

    let slot = plot.width() / entries.len() as f32;
    let max_chars = ((slot / 6.5) as usize).max(3);
    let hover = resp.hover_pos();
    let mut hovered = None;
    for (i, (label, count)) in entries.iter().enumerate() {
        let x0 = plot.left() + i as f32 * slot;
        let column = Rect::from_min_max(eg::pos2(x0, plot.top()), eg::pos2(x0 + slot, rect.bottom()));
        let bar = Rect::from_min_max(
            eg::pos2(x0 + slot * 0.15, y_of(*count as f64)),
            eg::pos2(x0 + slot * 0.85, plot.bottom()),
        );
        painter.rect_filled(bar, 2.0, viridis(*count as f32 / max as f32));
        painter.text(
            eg::pos2(column.center().x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            truncate_label(label, max_chars),
            FontId::proportional(AXIS_FONT),
            pal.text,
        );
        if hover.is_some_and(|p| column.contains(p)) {
            hovered = Some(i);
            painter.rect_stroke(bar, 2.0, Stroke::new(1.0, pal.text));
        }
    }

    if let Some(i) = hovered {
        let (label, count) = &entries[i];
        resp.on_hover_text_at_pointer(format!("{label}: {count}"));
    }
}

pub struct LineSeries {
    pub name: String,
    pub color: Color32,
    /// (x, y), ascending by x.
    pub points: Vec<(f64, f64)>,
}

impl LineSeries {
    pub fn from_counts(name: impl Into<String>, color: Color32, pts: &[(i32, usize)]) -> Self {
        Self {
            name: name.into(),
            color,
            points: pts.iter().map(|&(x, y)| (x as f64, y as f64)).collect(),
        }
    }

    pub fn from_values(name: impl Into<String>, color: Color32, pts: &[(i32, f64)]) -> Self {
        Self {
            name: name.into(),
            color,
            points: pts.iter().map(|&(x, y)| (x as f64, y)).collect(),
        }
    }
}

/// Line chart with markers. The y axis starts at zero; x spans the data.
pub fn line_chart(ui: &mut eg::Ui, series: &[LineSeries], y_label: &str, height: f32) {
    const AXIS_W: f32 = 48.0;
    const AXIS_H: f32 = 20.0;

    let pal = palette(ui);
    let (rect, resp) =
        ui.allocate_exact_size(eg::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    let all = series.iter().flat_map(|s| s.points.iter());
    let (mut x_lo, mut x_hi, mut y_hi) = (f64::INFINITY, f64::NEG_INFINITY, 0.0f64);
    for &(x, y) in all {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_hi = y_hi.max(y);
    }
    if !x_lo.is_finite() {
        no_data(&painter, rect, pal.weak);
        return;
    }
    if x_hi <= x_lo {
        x_lo -= 1.0;
        x_hi += 1.0;
    }
    let y_max = nice_axis_max(y_hi);

    let plot = Rect::from_min_max(
        eg::pos2(rect.left() + AXIS_W, rect.top() + 22.0),
        eg::pos2(rect.right() - 12.0, rect.bottom() - AXIS_H),
    );
    let to_screen = |x: f64, y: f64| {
        eg::pos2(
            plot.left() + ((x - x_lo) / (x_hi - x_lo)) as f32 * plot.width(),
            plot.bottom() - (y / y_max) as f32 * plot.height(),
        )
    };

    for t in ticks(0.0, y_max, nice_step(y_max, 5)) {
        let p = to_screen(x_lo, t);
        painter.line_segment(
            [eg::pos2(plot.left(), p.y), eg::pos2(plot.right(), p.y)],
            Stroke::new(1.0, pal.grid),
        );
        painter.text(
            eg::pos2(plot.left() - 4.0, p.y),
            Align2::RIGHT_CENTER,
            format_tick(t),
            FontId::proportional(AXIS_FONT),
            pal.weak,
        );
    }
    let x_step = nice_step(x_hi - x_lo, 8).max(1.0);
    for t in ticks(x_lo, x_hi, x_step) {
        let p = to_screen(t, 0.0);
        painter.line_segment(
            [eg::pos2(p.x, plot.bottom()), eg::pos2(p.x, plot.bottom() + 3.0)],
            Stroke::new(1.0, pal.weak),
        );
        painter.text(
            eg::pos2(p.x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format_tick(t),
            FontId::proportional(AXIS_FONT),
            pal.weak,
        );
    }
    painter.text(
        eg::pos2(plot.left(), rect.top() + 2.0),
        Align2::LEFT_TOP,
        y_label,
        FontId::proportional(AXIS_FONT),
        pal.weak,
    );

    let hover = resp.hover_pos();
    let mut nearest: Option<(f32, &LineSeries, (f64, f64))> = None;
    for s in series {
        let pts: Vec<eg::Pos2> = s.points.iter().map(|&(x, y)| to_screen(x, y)).collect();
        if pts.len() > 1 {
            painter.add(Shape::line(pts.clone(), Stroke::new(2.0, s.color)));
        }
        for (p, &raw) in pts.iter().zip(&s.points) {
            painter.circle_filled(*p, 3.0, s.color);
            if let Some(h) = hover {
                let d = p.distance(h);
                if d < 10.0 && nearest.map_or(true, |(best, _, _)| d < best) {
                    nearest = Some((d, s, raw));
                }
            }
        }
    }

    // legend, top right
    if series.len() > 1 {
        let mut x = plot.right();
        for s in series.iter().rev() {
            let galley = painter.layout_no_wrap(
                s.name.clone(),
                FontId::proportional(LABEL_FONT),
                pal.text,
            );
            x -= galley.size().x;
            let y = rect.top() + 10.0;
            painter.galley(eg::pos2(x, y - galley.size().y * 0.5), galley, pal.text);
            x -= 10.0;
            painter.circle_filled(eg::pos2(x, y), 4.0, s.color);
            x -= 16.0;
        }
    }

    if let Some((_, s, (x, y))) = nearest {
        let value = if y.fract() == 0.0 { format!("{y:.0}") } else { format!("{y:.1}") };
        resp.on_hover_text_at_pointer(format!("{}\n{x:.0}: {value}", s.name));
    }
}

/// Donut chart with a legend on the right; slices start at 12 o'clock, clockwise.
pub fn donut_chart(ui: &mut eg::Ui, slices: &[(String, usize)], colors: &[Color32], height: f32) {
    let pal = palette(ui);
    let (rect, resp) =
        ui.allocate_exact_size(eg::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    let values: Vec<usize> = slices.iter().map(|s| s.1).collect();
    let total: usize = values.iter().sum();
    if total == 0 || colors.is_empty() {
        no_data(&painter, rect, pal.weak);
        return;
    }
    let pct = shares(&values);

    let outer = (height * 0.5 - 8.0).min(rect.width() * 0.25).max(20.0);
    let inner = outer * 0.4;
    let center = eg::pos2(rect.left() + outer + 8.0, rect.center().y);

    let hover_slice = resp.hover_pos().and_then(|p| {
        let d = p - center;
        let r = d.length();
        if r < inner || r > outer {
            return None;
        }
        let a = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU);
        let mut acc = 0.0;
        for (i, &v) in values.iter().enumerate() {
            acc += v as f32 / total as f32 * TAU;
            if a < acc {
                return Some(i);
            }
        }
        None
    });

    let at = |angle: f32, radius: f32| {
        let a = angle - FRAC_PI_2;
        center + eg::vec2(a.cos(), a.sin()) * radius
    };

    let mut start = 0.0f32;
    for (i, &v) in values.iter().enumerate() {
        let sweep = v as f32 / total as f32 * TAU;
        let end = start + sweep;
        let color = colors[i % colors.len()];
        let bump = if hover_slice == Some(i) { 4.0 } else { 0.0 };
        let steps = ((sweep / TAU * 180.0).ceil() as usize).max(1);
        for k in 0..steps {
            let a0 = start + sweep * k as f32 / steps as f32;
            let a1 = start + sweep * (k + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![at(a0, outer + bump), at(a1, outer + bump), at(a1, inner), at(a0, inner)],
                color,
                Stroke::NONE,
            ));
        }
        if pct[i] >= 4.0 {
            painter.text(
                at(start + sweep * 0.5, (outer + inner) * 0.5),
                Align2::CENTER_CENTER,
                format!("{:.1}%", pct[i]),
                FontId::proportional(AXIS_FONT),
                Color32::from_gray(30),
            );
        }
        start = end;
    }

    // legend
    let legend_x = center.x + outer + 24.0;
    let line_h = 18.0;
    let mut y = rect.center().y - slices.len() as f32 * line_h * 0.5;
    for (i, (label, _)) in slices.iter().enumerate() {
        painter.rect_filled(
            Rect::from_center_size(eg::pos2(legend_x + 6.0, y + line_h * 0.5), eg::vec2(10.0, 10.0)),
            2.0,
            colors[i % colors.len()],
        );
        painter.text(
            eg::pos2(legend_x + 18.0, y + line_h * 0.5),
            Align2::LEFT_CENTER,
            format!("{} ({:.1}%)", truncate_label(label, 28), pct[i]),
            FontId::proportional(LABEL_FONT),
            pal.text,
        );
        y += line_h;
    }

    if let Some(i) = hover_slice {
        let (label, count) = &slices[i];
        resp.on_hover_text_at_pointer(format!("{label}: {count} ({:.1}%)", pct[i]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_one_two_five() {
        assert_eq!(nice_step(100.0, 5), 20.0);
        assert_eq!(nice_step(7.0, 5), 2.0);
        assert_eq!(nice_step(60.0, 8), 10.0);
        assert_eq!(nice_step(0.0, 5), 1.0);
    }

    #[test]
    fn axis_max_rounds_up_to_a_tick() {
        assert_eq!(nice_axis_max(7.0), 8.0);
        assert_eq!(nice_axis_max(100.0), 100.0);
        assert_eq!(nice_axis_max(3207.0), 4000.0);
        assert_eq!(nice_axis_max(0.0), 1.0);
        assert_eq!(nice_axis_max(f64::NAN), 1.0);
    }

    #[test]
    fn tick_list_covers_range() {
        assert_eq!(ticks(0.0, 8.0, 2.0), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(ticks(1997.0, 2003.0, 2.0), vec![1998.0, 2000.0, 2002.0]);
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(2.5), "2.5");
    }

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(viridis(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(viridis(2.0), viridis(1.0));
        assert_eq!(viridis(-1.0), viridis(0.0));
        assert_eq!(viridis(0.5), Color32::from_rgb(33, 145, 140));
    }

    #[test]
    fn shares_sum_to_hundred() {
        let s = shares(&[1, 1, 2]);
        assert_eq!(s, vec![25.0, 25.0, 50.0]);
        assert_eq!(shares(&[0, 0]), vec![0.0, 0.0]);
    }

    #[test]
    fn labels_truncate_with_ellipsis() {
        assert_eq!(truncate_label("Dramas", 10), "Dramas");
        assert_eq!(truncate_label("International Movies", 8), "Interna…");
    }
}
