//! SVG timeline rendering and terminal summary.
//!
//! The chart is a single horizontal lane: one steelblue bar per compute
//! interval and one firebrick bar per communication interval, on a shared
//! elapsed-time axis.

use super::builder::TimelineEntry;
use crate::aggregator::metrics::{format_optional, SimulationSummary};
use crate::utils::error::TimelineError;
use log::info;

const COMPUTE_COLOR: &str = "steelblue";
const COMM_COLOR: &str = "firebrick";
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 40.0;
const AXIS_TICKS: usize = 5;

/// Timeline chart configuration
#[derive(Debug, Clone)]
pub struct TimelineChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for TimelineChartConfig {
    fn default() -> Self {
        Self {
            title: "Execution timeline for a Node".to_string(),
            width: 1300,
            height: 350,
        }
    }
}

impl TimelineChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Render the timeline as an SVG document
///
/// # Errors
/// * `TimelineError::EmptyTimeline` - No iterations to draw
pub fn generate_timeline_svg(
    entries: &[TimelineEntry],
    config: Option<&TimelineChartConfig>,
) -> Result<String, TimelineError> {
    if entries.is_empty() {
        return Err(TimelineError::EmptyTimeline);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Rendering timeline with {} iterations", entries.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let lane_y = height * 0.35;
    let lane_height = height * 0.3;
    let axis_y = lane_y + lane_height + 10.0;

    let end = entries.last().map_or(0.0, TimelineEntry::end);
    // Degenerate all-zero timeline still gets a drawable axis
    let span = if end > 0.0 { end } else { 1.0 };
    let scale = plot_width / span;

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    svg.push_str(
        r#"<style>.bar:hover { stroke: black; stroke-width: 1; opacity: 0.9; } text { font-family: sans-serif; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="30" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&config.title)
    ));

    for entry in entries {
        push_bar(
            &mut svg,
            MARGIN_LEFT + entry.compute_start * scale,
            lane_y,
            entry.compute_duration * scale,
            lane_height,
            COMPUTE_COLOR,
            &format!(
                "iteration {} compute: {:.6} s",
                entry.iteration_index, entry.compute_duration
            ),
        );
        push_bar(
            &mut svg,
            MARGIN_LEFT + entry.comm_start * scale,
            lane_y,
            entry.comm_duration * scale,
            lane_height,
            COMM_COLOR,
            &format!(
                "iteration {} communication: {:.6} s",
                entry.iteration_index, entry.comm_duration
            ),
        );
    }

    render_axis(&mut svg, axis_y, plot_width, span, width);
    render_legend(&mut svg, width);

    svg.push_str("</svg>");

    info!("Timeline rendered ({} bytes)", svg.len());
    Ok(svg)
}

fn push_bar(out: &mut String, x: f64, y: f64, w: f64, h: f64, color: &str, tooltip: &str) {
    out.push_str(&format!(
        r#"<rect class="bar" x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}"><title>{}</title></rect>"#,
        x, y, w, h, color, tooltip
    ));
}

fn render_axis(out: &mut String, axis_y: f64, plot_width: f64, span: f64, width: f64) {
    out.push_str(&format!(
        r#"<line x1="{}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="black"/>"#,
        MARGIN_LEFT,
        axis_y,
        MARGIN_LEFT + plot_width,
        axis_y
    ));

    for tick in 0..=AXIS_TICKS {
        let fraction = tick as f64 / AXIS_TICKS as f64;
        let x = MARGIN_LEFT + plot_width * fraction;
        out.push_str(&format!(
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="black"/>"#,
            x,
            axis_y,
            x,
            axis_y + 5.0
        ));
        out.push_str(&format!(
            r#"<text x="{:.3}" y="{:.3}" font-size="11" text-anchor="middle">{}</text>"#,
            x,
            axis_y + 18.0,
            format_seconds(span * fraction)
        ));
    }

    out.push_str(&format!(
        r#"<text x="{}" y="{:.3}" font-size="13" text-anchor="middle">Elapsed time (s)</text>"#,
        width / 2.0,
        axis_y + 40.0
    ));
}

fn render_legend(out: &mut String, width: f64) {
    let items = [("compute", COMPUTE_COLOR), ("communication", COMM_COLOR)];

    for (i, (label, color)) in items.iter().enumerate() {
        let x = width - 260.0 + (i as f64 * 110.0);
        out.push_str(&format!(
            r#"<rect x="{}" y="48" width="15" height="15" fill="{}" rx="2"/>"#,
            x, color
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="60" font-size="12">{}</text>"#,
            x + 20.0,
            label
        ));
    }
}

fn format_seconds(value: f64) -> String {
    if value == 0.0 || value >= 1e-2 {
        format!("{:.2}", value)
    } else {
        format!("{:.2e}", value)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Create the global summary block printed after a simulation
pub fn generate_text_summary(summary: &SimulationSummary) -> String {
    let lines = [
        "===  GLOBAL SUMMARY  ===".to_string(),
        format!("ranks           : {}", summary.rank_count),
        format!("iterations      : {}", summary.iterations),
        format!("bandwidth       : {:.2} Gb/s", summary.bandwidth / 1e9),
        format!("ratio           : {}x", summary.ratio),
        format!("latency α       : {:.1} µs", summary.latency_us),
        format!("algorithm       : {}", summary.algorithm),
        format!("total compute   : {:.2} s", summary.total_compute),
        format!("total comm      : {:.2} s", summary.total_comm),
        format!(
            "comm/compute    : {}",
            format_optional(summary.comm_over_compute_pct, " %")
        ),
        format!("speedup         : {}", format_optional(summary.speedup, " ×")),
    ];

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cost::Algorithm;

    fn sample_entries() -> Vec<TimelineEntry> {
        vec![
            TimelineEntry {
                iteration_index: 0,
                compute_start: 0.0,
                compute_duration: 1.0,
                comm_start: 1.0,
                comm_duration: 0.25,
            },
            TimelineEntry {
                iteration_index: 1,
                compute_start: 1.25,
                compute_duration: 2.0,
                comm_start: 3.25,
                comm_duration: 0.75,
            },
        ]
    }

    #[test]
    fn test_empty_timeline_is_rejected() {
        assert!(matches!(
            generate_timeline_svg(&[], None),
            Err(TimelineError::EmptyTimeline)
        ));
    }

    #[test]
    fn test_svg_has_one_bar_per_interval() {
        let svg = generate_timeline_svg(&sample_entries(), None).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="bar""#).count(), 4);
        assert_eq!(svg.matches(r#"fill="steelblue"><title>"#).count(), 2);
        assert!(svg.contains("Execution timeline for a Node"));
        assert!(svg.contains("Elapsed time (s)"));
    }

    #[test]
    fn test_title_is_escaped() {
        let config = TimelineChartConfig::new().with_title("a < b & c");
        let svg = generate_timeline_svg(&sample_entries(), Some(&config)).unwrap();
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_text_summary_undefined_ratio() {
        let summary = SimulationSummary {
            rank_count: 2,
            iterations: 0,
            bandwidth: 10e9,
            ratio: 1.0,
            latency_us: 0.0,
            algorithm: Algorithm::Ring,
            total_compute: 0.0,
            total_comm: 0.0,
            total_comm_baseline: 0.0,
            comm_over_compute_pct: None,
            speedup: None,
        };

        let text = generate_text_summary(&summary);
        assert!(text.contains("bandwidth       : 10.00 Gb/s"));
        assert!(text.contains("algorithm       : ring"));
        assert!(text.contains("comm/compute    : n/a"));
        assert!(text.contains("speedup         : n/a"));
    }
}
