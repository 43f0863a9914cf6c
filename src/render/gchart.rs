//! Google image-chart URL adapter

use super::ChartRenderer;
use crate::types::ChartRequest;

const BASE_URL: &str = "https://chart.googleapis.com/chart";

/// Renders a line chart as a Google image-chart URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleChartRenderer;

impl GoogleChartRenderer {
    pub fn new() -> Self {
        GoogleChartRenderer
    }
}

impl ChartRenderer for GoogleChartRenderer {
    fn render(&self, chart: &ChartRequest) -> String {
        let data = chart
            .lines
            .iter()
            .map(|line| {
                line.values
                    .iter()
                    .map(|v| format!("{v:.2}"))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("|");

        let colors = chart
            .lines
            .iter()
            .map(|line| line.color.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let x_labels = chart.x_axis_labels.join("|");
        let y_labels = chart
            .y_axis_labels
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("|");

        let mut url = format!(
            "{BASE_URL}?cht=lc&chs={}x{}&chd=t:{}&chds=a&chco={}&chxt=x,y,x,y&chxl=0:|{}|1:|{}|2:|{}|3:|{}",
            chart.width,
            chart.height,
            data,
            colors,
            x_labels,
            y_labels,
            encode(&chart.x_axis_title),
            encode(&chart.y_axis_title),
        );

        let legend = chart
            .lines
            .iter()
            .map(|line| encode(&line.label))
            .collect::<Vec<_>>()
            .join("|");
        if chart.lines.iter().any(|line| !line.label.is_empty()) {
            url.push_str("&chdl=");
            url.push_str(&legend);
        }

        url.push_str("&chtt=");
        url.push_str(&encode(&chart.title));
        url
    }
}

/// Minimal query-component encoding for label and title text.
fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => out.push('+'),
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '+' => out.push_str("%2B"),
            '|' => out.push_str("%7C"),
            '#' => out.push_str("%23"),
            '=' => out.push_str("%3D"),
            _ => out.push(c),
        }
    }
    out
}
