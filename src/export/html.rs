//! HTML report rendering.
//!
//! A single self-contained page: summary, score distribution with CSS bar
//! charts, per-country and per-sector tables, then one card per analysis.
//! Every piece of stored text is escaped.

use std::fmt::Write;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};

use crate::config::{GOOD_SCORE_THRESHOLD, PRIORITY_SCORE_THRESHOLD};
use super::types::ScoreDistribution;
use crate::storage::{GroupStats, Statistics, StoredAnalysis};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;margin-bottom:1.5em}\
th,td{border:1px solid #ccc;padding:4px 10px;text-align:left}\
.card{border:1px solid #ddd;border-radius:6px;padding:10px 14px;margin:10px 0}\
.good{color:#1a7f37}.average{color:#b58100}.poor{color:#c62828}\
.timestamp{color:#777;font-size:0.9em}\
.chart td{border:none;padding:2px 6px}.chart .track{width:320px}\
.bar{background:#5b9bd5;height:14px;min-width:1px}\
.bar.good{background:#1a7f37}.bar.average{background:#b58100}.bar.poor{background:#c62828}";

/// CSS class for a score: `good` ≥ 80, `average` ≥ 60, else `poor`.
pub fn score_band(score: f64) -> &'static str {
    if score >= f64::from(GOOD_SCORE_THRESHOLD) {
        "good"
    } else if score >= f64::from(PRIORITY_SCORE_THRESHOLD) {
        "average"
    } else {
        "poor"
    }
}

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn write_group_table(out: &mut String, heading: &str, groups: &[GroupStats]) -> std::fmt::Result {
    writeln!(out, "<h2>{}</h2>", escape_html(heading))?;
    if groups.is_empty() {
        return writeln!(out, "<p>No data.</p>");
    }
    writeln!(
        out,
        "<table><tr><th>{}</th><th>Analyses</th><th>Average score</th></tr>",
        escape_html(heading.trim_start_matches("By ")),
    )?;
    for group in groups {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{:.2}/100</td></tr>",
            escape_html(&group.label),
            group.count,
            score_band(group.average_score),
            group.average_score
        )?;
    }
    writeln!(out, "</table>")
}

/// Bar width as a percentage of the largest count.
fn bar_width(count: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        count * 100 / max
    }
}

fn write_bar_chart<'a>(
    out: &mut String,
    heading: &str,
    rows: impl Iterator<Item = (&'a str, usize, &'a str)> + Clone,
) -> std::fmt::Result {
    writeln!(out, "<h3>{}</h3>", escape_html(heading))?;
    let max = rows.clone().map(|(_, count, _)| count).max().unwrap_or(0);
    writeln!(out, "<table class=\"chart\">")?;
    for (label, count, class) in rows {
        writeln!(
            out,
            "<tr><td>{}</td><td class=\"track\"><div class=\"bar {class}\" style=\"width:{}%\"></div></td><td>{count}</td></tr>",
            escape_html(label),
            bar_width(count, max),
        )?;
    }
    writeln!(out, "</table>")
}

fn write_distribution(
    out: &mut String,
    distribution: &ScoreDistribution,
    by_country: &[GroupStats],
) -> std::fmt::Result {
    writeln!(out, "<h2>Score distribution</h2>")?;
    if distribution.total() == 0 {
        return writeln!(out, "<p>No data.</p>");
    }
    writeln!(out, "<ul class=\"bands\">")?;
    writeln!(out, "<li class=\"good\">Excellent (80-100): {}</li>", distribution.excellent)?;
    writeln!(out, "<li class=\"average\">Good (60-79): {}</li>", distribution.good)?;
    writeln!(out, "<li class=\"poor\">Poor (&lt;60): {}</li></ul>", distribution.poor)?;

    let buckets: Vec<(String, usize)> = distribution.labeled_buckets().collect();
    write_bar_chart(
        out,
        "Scores",
        buckets.iter().map(|(label, count)| (label.as_str(), *count, "")),
    )?;
    write_bar_chart(
        out,
        "Score bands",
        [
            ("Excellent", distribution.excellent, "good"),
            ("Good", distribution.good, "average"),
            ("Poor", distribution.poor, "poor"),
        ]
        .into_iter(),
    )?;
    if !by_country.is_empty() {
        let counts: Vec<(&str, usize)> = by_country
            .iter()
            .map(|g| (g.label.as_str(), usize::try_from(g.count).unwrap_or(0)))
            .collect();
        write_bar_chart(
            out,
            "Analyses per country",
            counts.iter().map(|&(label, count)| (label, count, "")),
        )?;
    }
    Ok(())
}

fn write_analysis_card(out: &mut String, analysis: &StoredAnalysis) -> std::fmt::Result {
    let result = &analysis.result;
    let url = escape_html(&result.url);
    writeln!(out, "<div class=\"card\">")?;
    writeln!(out, "<h3><a href=\"{url}\">{url}</a></h3>")?;
    writeln!(
        out,
        "<p><strong>Score:</strong> <span class=\"{}\">{}/100</span> &middot; {} &middot; {}</p>",
        score_band(f64::from(result.score)),
        result.score,
        escape_html(&result.country.to_string()),
        escape_html(&result.sector.to_string()),
    )?;
    if result.issues.is_empty() {
        writeln!(out, "<p>No issues found.</p>")?;
    } else {
        writeln!(out, "<ul>")?;
        for issue in &result.issues {
            writeln!(out, "<li>{}</li>", escape_html(issue))?;
        }
        writeln!(out, "</ul>")?;
    }
    writeln!(
        out,
        "<p class=\"timestamp\">Analyzed {}</p>",
        analysis.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out, "</div>")
}

fn write_page(
    out: &mut String,
    analyses: &[StoredAnalysis],
    statistics: &Statistics,
) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Web radar report</title><style>{STYLE}</style></head><body>")?;
    writeln!(out, "<h1>Web radar report</h1>")?;
    writeln!(
        out,
        "<p class=\"timestamp\">Generated {}</p>",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;

    writeln!(out, "<h2>Summary</h2><ul>")?;
    writeln!(out, "<li>Sites analyzed: {}</li>", statistics.total_count)?;
    writeln!(
        out,
        "<li>Average score: <span class=\"{}\">{:.2}/100</span></li>",
        score_band(statistics.average_score),
        statistics.average_score
    )?;
    writeln!(out, "<li>Analyses in this report: {}</li></ul>", analyses.len())?;

    write_distribution(
        out,
        &ScoreDistribution::from_analyses(analyses),
        &statistics.by_country,
    )?;

    write_group_table(out, "By country", &statistics.by_country)?;
    write_group_table(out, "By sector", &statistics.by_sector)?;

    writeln!(out, "<h2>Analyses</h2>")?;
    for analysis in analyses {
        write_analysis_card(out, analysis)?;
    }
    writeln!(out, "</body></html>")
}

pub fn render_html(analyses: &[StoredAnalysis], statistics: &Statistics) -> Result<Vec<u8>> {
    let mut page = String::new();
    write_page(&mut page, analyses, statistics)?;
    Ok(page.into_bytes())
}
