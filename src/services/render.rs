// src/services/render.rs
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde_json::{json, Value};

use crate::models::style_for;
use crate::services::returns::{format_trace_name, RankedSeries};
use crate::services::table::SeriesTable;
use crate::BoxError;

/// Relative output path, overwritten on every run.
pub const OUTPUT_PATH: &str = "index.html";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

/// Build one Plotly trace per ranked instrument, best performer first.
/// Trace data depends only on the normalized table and ranking, so two runs
/// over the same input serialize identically.
pub fn build_traces(normalized: &SeriesTable, ranked: &[RankedSeries]) -> Vec<Value> {
    let dates: Vec<String> = normalized
        .dates()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let mut traces = Vec::with_capacity(ranked.len());
    for entry in ranked {
        let values = match normalized.column(&entry.label) {
            Some(values) => values,
            None => continue,
        };
        let style = style_for(&entry.label);

        traces.push(json!({
            "x": dates,
            "y": values,
            "name": format_trace_name(&entry.label, entry.total_return),
            "mode": "lines",
            "hovertemplate": format!(
                "{}<br>Value: %{{y:.1f}}<br>Return: %{{text:.1f}}%<extra></extra>",
                entry.label
            ),
            "text": entry.running_returns,
            "line": {
                "shape": "spline",
                "smoothing": 0.8,
                "width": style.width,
            },
        }));
    }
    traces
}

/// Chart layout mirroring the tracker's fixed presentation.
pub fn build_layout() -> Value {
    json!({
        "title": "Market Performance Tracker",
        "xaxis": {"title": "Date"},
        "yaxis": {"title": "Normalized Price"},
        "hovermode": "x unified",
        "margin": {"t": 50, "l": 50, "r": 50, "b": 50},
        "template": "plotly_white",
        "hoverlabel": {
            "font": {"size": 12, "family": "Arial"},
        },
    })
}

/// Assemble the full self-contained page: styling shell, refresh button,
/// last-updated stamp, and the embedded chart.
pub fn render_page(
    traces: &[Value],
    layout: &Value,
    generated_at: DateTime<Utc>,
) -> Result<String, BoxError> {
    let traces_json = serde_json::to_string(traces)?;
    let layout_json = serde_json::to_string(layout)?;
    let stamp = generated_at.format("%Y-%m-%d %H:%M:%S");

    Ok(format!(
        r#"<html>
<head>
    <title>Market Performance Tracker</title>
    <script src="{plotly}"></script>
    <style>
        body {{
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
        }}
        .button {{
            background-color: #4CAF50;
            border: none;
            color: white;
            padding: 15px 32px;
            text-align: center;
            text-decoration: none;
            display: inline-block;
            font-size: 16px;
            margin: 4px 2px;
            cursor: pointer;
            border-radius: 4px;
            transition: background-color 0.3s;
        }}
        .button:hover {{
            background-color: #45a049;
        }}
        .container {{
            text-align: center;
            padding: 20px;
            background-color: #f8f9fa;
        }}
        .last-updated {{
            color: #666;
            font-style: italic;
            margin-top: 10px;
        }}
        .js-plotly-plot .js-line[data-name*="Ethereum"] {{
            animation: pulse 2s infinite;
        }}
        @keyframes pulse {{
            0% {{ opacity: 0.6; }}
            50% {{ opacity: 1; }}
            100% {{ opacity: 0.6; }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <button class="button" onclick="window.location.reload();">Refresh Data</button>
        <div class="last-updated">Last updated: {stamp} UTC</div>
    </div>
    <div id="chart"></div>
    <script>
        Plotly.newPlot("chart", {traces}, {layout});
    </script>
</body>
</html>
"#,
        plotly = PLOTLY_CDN,
        stamp = stamp,
        traces = traces_json,
        layout = layout_json,
    ))
}

/// Write the document, replacing any previous report. Failures are fatal
/// and propagate to the caller.
pub fn write_report(path: &Path, html: &str) -> Result<(), BoxError> {
    fs::write(path, html)?;
    info!("Wrote report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalize::normalize;
    use crate::services::returns::rank_by_return;
    use crate::services::table::tests::series;
    use crate::services::table::SeriesTable;
    use chrono::TimeZone;

    fn sample_table() -> SeriesTable {
        SeriesTable::align(vec![
            ("S&P 500".to_string(), series(&[(1, 5000.0), (2, 5100.0), (3, 5050.0)])),
            ("Bitcoin".to_string(), series(&[(1, 60000.0), (2, 66000.0), (3, 72000.0)])),
            ("Ethereum".to_string(), series(&[(1, 3000.0), (2, 2900.0), (3, 3100.0)])),
        ])
        .unwrap()
    }

    fn sample_traces() -> Vec<Value> {
        let normalized = normalize(&sample_table()).unwrap();
        let ranked = rank_by_return(&normalized).unwrap();
        build_traces(&normalized, &ranked)
    }

    #[test]
    fn traces_come_out_in_ranked_order() {
        let traces = sample_traces();
        assert_eq!(traces.len(), 3);
        // Bitcoin +20%, Ethereum +3.33%, S&P 500 +1%
        assert!(traces[0]["name"].as_str().unwrap().starts_with("Bitcoin"));
        assert!(traces[1]["name"].as_str().unwrap().starts_with("Ethereum"));
        assert!(traces[2]["name"].as_str().unwrap().starts_with("S&P 500"));
    }

    #[test]
    fn trace_names_carry_formatted_returns() {
        let traces = sample_traces();
        assert_eq!(traces[0]["name"], "Bitcoin (20.0%)");
        assert_eq!(traces[2]["name"], "S&P 500 (1.0%)");
    }

    #[test]
    fn only_the_ethereum_trace_is_thicker() {
        for trace in sample_traces() {
            let width = trace["line"]["width"].as_f64().unwrap();
            if trace["name"].as_str().unwrap().starts_with("Ethereum") {
                assert_eq!(width, 3.0);
            } else {
                assert_eq!(width, 2.0);
            }
        }
    }

    #[test]
    fn traces_use_spline_smoothing_and_hover_text() {
        let trace = &sample_traces()[0];
        assert_eq!(trace["mode"], "lines");
        assert_eq!(trace["line"]["shape"], "spline");
        assert_eq!(trace["line"]["smoothing"], 0.8);
        assert_eq!(
            trace["hovertemplate"],
            "Bitcoin<br>Value: %{y:.1f}<br>Return: %{text:.1f}%<extra></extra>"
        );
        // Running return ends at the total return.
        let text = trace["text"].as_array().unwrap();
        assert_eq!(text[0].as_f64().unwrap(), 0.0);
        assert!((text[text.len() - 1].as_f64().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn trace_data_is_deterministic() {
        let first = serde_json::to_string(&sample_traces()).unwrap();
        let second = serde_json::to_string(&sample_traces()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn page_embeds_chart_shell_and_timestamp() {
        let traces = sample_traces();
        let layout = build_layout();
        let generated = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let html = render_page(&traces, &layout, generated).unwrap();

        assert!(html.contains("window.location.reload();"));
        assert!(html.contains("Refresh Data"));
        assert!(html.contains("Last updated: 2024-06-01 12:30:00 UTC"));
        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("Market Performance Tracker"));
        assert!(html.contains("Bitcoin (20.0%)"));
    }

    #[test]
    fn a_missing_instrument_still_renders_the_rest() {
        // Three of the four configured instruments fetched; the run must
        // still produce a complete document for what remains.
        let table = SeriesTable::align(vec![
            ("S&P 500".to_string(), series(&[(1, 5000.0), (2, 5100.0)])),
            ("WTI Crude".to_string(), series(&[(1, 80.0), (2, 76.0)])),
            ("Bitcoin".to_string(), series(&[(1, 60000.0), (2, 63000.0)])),
        ])
        .unwrap();
        let normalized = normalize(&table).unwrap();
        let ranked = rank_by_return(&normalized).unwrap();
        let traces = build_traces(&normalized, &ranked);
        assert_eq!(traces.len(), 3);

        let html = render_page(&traces, &build_layout(), Utc::now()).unwrap();
        assert!(html.contains("S&P 500"));
        assert!(html.contains("WTI Crude"));
        assert!(html.contains("Bitcoin"));
        assert!(!html.contains("Ethereum ("));
    }

    #[test]
    fn report_write_is_readable_back() {
        let dir = std::env::temp_dir().join("market_tracker_render_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(OUTPUT_PATH);

        let html = render_page(&sample_traces(), &build_layout(), Utc::now()).unwrap();
        write_report(&path, &html).unwrap();
        let read_back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(read_back, html);
    }
}
