use chrono::{TimeZone, Utc};
use std::fmt::Write;

use crate::models::stats::{KindStats, StatRow, StatsReport};
use crate::models::tracking_event::EventKind;

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn section_title(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Click => "Clicks",
        EventKind::Open => "Opens",
        EventKind::Conversion => "Conversions",
    }
}

fn render_table(out: &mut String, heading: &str, rows: &[StatRow]) {
    let _ = write!(
        out,
        "<table>\n<caption>{}</caption>\n<thead><tr><th>{}</th><th>Total</th><th>Unique leads</th></tr></thead>\n<tbody>\n",
        heading, heading
    );
    if rows.is_empty() {
        out.push_str("<tr class=\"empty\"><td colspan=\"3\">No events yet</td></tr>\n");
    }
    for row in rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.key),
            row.total,
            row.unique_leads
        );
    }
    out.push_str("</tbody>\n</table>\n");
}

fn render_kind(out: &mut String, stats: &KindStats) {
    let _ = writeln!(
        out,
        "<section id=\"{}\">\n<h2>{} <small>({} total)</small></h2>",
        stats.kind,
        section_title(stats.kind),
        stats.total
    );
    render_table(out, "Campaign", &stats.by_campaign);
    render_table(out, "Industry", &stats.by_industry);
    out.push_str("</section>\n");
}

pub fn render_stats_page(report: &StatsReport) -> String {
    let generated = Utc
        .timestamp_millis_opt(report.generated_at)
        .single()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();

    let mut out = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Campaign stats</title>\n<style>\n\
         body{font-family:sans-serif;margin:2em;}\n\
         table{border-collapse:collapse;margin:0 1em 1em 0;display:inline-table;}\n\
         th,td{border:1px solid #ccc;padding:4px 10px;text-align:left;}\n\
         caption{font-weight:bold;text-align:left;}\n\
         tr.empty td{color:#888;}\n\
         </style>\n</head>\n<body>\n<h1>Campaign stats</h1>\n",
    );
    let _ = writeln!(
        out,
        "<p>{} events recorded. Generated {}.</p>",
        report.total_events,
        escape_html(&generated)
    );
    for stats in &report.kinds {
        render_kind(&mut out, stats);
    }
    out.push_str("</body>\n</html>\n");
    out
}
