//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the parsing/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Axis, Block, DerivedMetric, UnitPrefix};
use crate::io::DataFile;
use crate::sweep::SweepResult;

/// Format the block listing of a parsed file.
pub fn format_file_summary(file: &DataFile) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", file.file_name));
    for (key, value) in &file.metadata {
        out.push_str(&format!("{key}: {value}\n"));
    }
    out.push_str(&format!("Blocks: {}\n", file.blocks.len()));

    for (idx, block) in file.blocks.iter().enumerate() {
        out.push_str(&format_block(idx + 1, block));
    }

    out
}

fn format_block(number: usize, block: &Block) -> String {
    let mut out = String::new();
    let title = if block.title.is_empty() { "(untitled)" } else { &block.title };
    out.push_str(&format!(
        "\n[{number}] {title}: rows={} cols={}\n",
        block.table.n_rows(),
        block.table.width()
    ));
    out.push_str(&format!("    columns: {}\n", block.table.columns().join(", ")));

    if !block.parameters.is_empty() {
        out.push_str("    parameters:\n");
        for (name, value) in &block.parameters {
            out.push_str(&format!("      {:<32} {value}\n", truncate(name, 32)));
        }
    }

    out
}

/// Format the fit summary of one sweep.
pub fn format_sweep_summary(source: &str, sweep: &SweepResult, voltage_column: &str, current_column: &str) -> String {
    let mut out = String::new();
    let fit = sweep.fit();

    let block = if sweep.title().is_empty() {
        String::new()
    } else {
        format!(" [{}]", sweep.title())
    };
    out.push_str(&format!("=== {}: {source}{block} ===\n", sweep.kind().display_name()));
    out.push_str(&format!(
        "Columns: {voltage_column} -> {current_column} | n={} (fitted {})\n",
        sweep.voltage().len(),
        fit.quality.n
    ));
    out.push_str(&format!(
        "Fit: degree {} | coefficients {}\n",
        fit.degree,
        fmt_vec(&fit.coefficients)
    ));
    out.push_str(&format!(
        "Quality: SSE={:.4e} RMSE={:.4e} R^2={:.6}\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.r_squared
    ));
    out.push_str(&format!(
        "{}: {}\n",
        sweep.metric().kind.display_name(),
        format_metric(sweep.metric())
    ));
    out.push_str(&format!(
        "Units: {} | {}\n",
        sweep.axis_label(Axis::Voltage),
        sweep.axis_label(Axis::Current)
    ));

    out
}

/// Metric with an engineering prefix, e.g. `4.7000 kOhm`.
pub fn format_metric(metric: DerivedMetric) -> String {
    if !metric.is_defined() {
        return "undefined (zero leading coefficient)".to_string();
    }
    format_si(metric.value, metric.kind.unit())
}

pub fn format_si(value: f64, unit: &str) -> String {
    let prefix = UnitPrefix::for_magnitude(value);
    format!("{:.4} {}{unit}", value / prefix.factor(), prefix.symbol())
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6e}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GridEndpoint, MeasurementTable, MetricKind, ParamValue, SweepKind};

    #[test]
    fn metric_uses_engineering_prefix() {
        let r = DerivedMetric {
            kind: MetricKind::Resistance,
            value: 4700.0,
        };
        assert_eq!(format_metric(r), "4.7000 kOhm");

        let undefined = DerivedMetric {
            kind: MetricKind::Resistance,
            value: f64::INFINITY,
        };
        assert!(format_metric(undefined).starts_with("undefined"));
    }

    #[test]
    fn sweep_summary_lists_fit_and_units() {
        let mut sweep = SweepResult::from_series(
            SweepKind::Iv,
            "Id-Vd",
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1e-3, 2e-3],
            GridEndpoint::Exclusive,
        )
        .unwrap();
        sweep.change_units(Axis::Current, UnitPrefix::Milli);

        let txt = format_sweep_summary("dev.csv", &sweep, "DrainV", "DrainI");
        assert!(txt.starts_with("=== IV sweep: dev.csv [Id-Vd] ===\n"));
        assert!(txt.contains("Resistance: 1.0000 kOhm"));
        assert!(txt.contains("Units: Volts (V) | Current (mA)"));
    }

    #[test]
    fn file_summary_lists_blocks_and_parameters() {
        let mut block = Block {
            title: String::new(),
            table: MeasurementTable::new(vec!["V".to_string()], vec![vec![1.0]]),
            ..Block::default()
        };
        block
            .parameters
            .insert("Hold".to_string(), ParamValue::Scalar("0.1".to_string()));
        let file = DataFile {
            path: "a.csv".into(),
            file_name: "a.csv".to_string(),
            metadata: Default::default(),
            blocks: vec![block],
        };

        let txt = format_file_summary(&file);
        assert!(txt.contains("Blocks: 1"));
        assert!(txt.contains("[1] (untitled): rows=1 cols=1"));
        assert!(txt.contains("Hold"));
    }
}
