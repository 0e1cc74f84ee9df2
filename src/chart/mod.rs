//! Terminal projection of chart series. Both charts render through the
//! same scaled-bar routine; only their titles and data differ.

use once_cell::sync::OnceCell;

/// Glyphs and sizing used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub bar: char,
    pub axis: char,
    /// Width in cells of the longest bar.
    pub width: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar: '█',
            axis: '┤',
            width: 40,
        }
    }
}

static STYLE: OnceCell<ChartStyle> = OnceCell::new();

/// Register the process-wide chart style. The first registration wins;
/// calling again is a no-op and returns the already registered style.
pub fn register_style(style: ChartStyle) -> &'static ChartStyle {
    STYLE.get_or_init(|| style)
}

/// The registered style, falling back to the default when rendering
/// happens before any explicit registration.
pub fn style() -> &'static ChartStyle {
    STYLE.get_or_init(ChartStyle::default)
}

/// Render labeled values as horizontal bars scaled to the largest value.
pub fn bar_chart(title: &str, rows: &[(String, f64)]) -> String {
    let style = style();
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if rows.is_empty() {
        return out;
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = rows.iter().map(|&(_, value)| value).fold(0.0, f64::max);

    for (label, value) in rows {
        let bar = style.bar.to_string().repeat(scaled(*value, max, style.width));
        out.push_str(&format!(
            "{label:<label_width$} {}{bar} {value}\n",
            style.axis
        ));
    }

    out
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}
