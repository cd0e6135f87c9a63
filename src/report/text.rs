use crate::report::{SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Photo Quality Triage Report\n");
    out.push_str("===========================\n\n");

    out.push_str("1. Configuration\n");
    out.push_str(&format!("Score table: {}\n", data.config.scores_path));
    out.push_str(&format!("Source images: {}\n", data.config.source_image_dir));
    out.push_str(&format!("Output root: {}\n", data.config.output_root));
    out.push_str(&format!("Transform: {}\n", data.config.transform));
    out.push_str("Label weights:\n");
    for (label, w) in data.config.labels.iter().zip(&data.config.label_weights) {
        out.push_str(&format!("  {label}: {w}\n"));
    }
    if data.config.filtered_filename_prefixes.is_empty() {
        out.push_str("Filtered prefixes: none\n\n");
    } else {
        out.push_str(&format!(
            "Filtered prefixes: {}\n\n",
            data.config.filtered_filename_prefixes.join(", ")
        ));
    }

    out.push_str("2. Scores\n");
    out.push_str(&format!(
        "Scored rows: {} of {}\n",
        data.scores.n_scored, data.totals.rows
    ));
    out.push_str(&format!(
        "Composite median: {}\nComposite p10: {}\nComposite p90: {}\n\n",
        format_f64_6(data.scores.median),
        format_f64_6(data.scores.p10),
        format_f64_6(data.scores.p90)
    ));

    out.push_str("3. Buckets\n");
    for (i, b) in data.buckets.iter().enumerate() {
        out.push_str(&format!(
            "{} {:>8}  copied={} filtered={} errors={}\n",
            "*".repeat(i + 1),
            b.label,
            b.copied,
            b.skipped_filtered,
            b.skipped_error
        ));
        if !b.examples.is_empty() {
            out.push_str(&format!("    e.g. {}\n", b.examples.join(", ")));
        }
    }
    out.push('\n');

    out.push_str("4. Outcome\n");
    out.push_str(&format!(
        "copied={} filtered={} no_bucket={} errors={}\n",
        data.totals.copied,
        data.totals.skipped_filtered,
        data.totals.skipped_no_bucket,
        data.totals.skipped_error
    ));
    out.push_str(&format!("Status: {}\n", status_label(data)));

    out
}

fn status_label(data: &SummaryData) -> &'static str {
    if data.totals.skipped_error == 0 {
        "OK"
    } else {
        "COMPLETED WITH ERRORS"
    }
}
