use crate::assignment::Assignment;
use crate::instance::ScheduledTaskInstance;
use crate::progress::ProgressSummary;
use polars::prelude::*;

/// Tabular view of instances, one row per instance.
pub fn instances_frame(instances: &[ScheduledTaskInstance]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = instances.iter().map(|t| t.id.as_str()).collect();
    let dates: Vec<String> = instances
        .iter()
        .map(|t| t.date.format("%Y-%m-%d").to_string())
        .collect();
    let names: Vec<&str> = instances.iter().map(|t| t.name.as_str()).collect();
    let categories: Vec<&str> = instances.iter().map(|t| t.category.as_str()).collect();
    let kinds: Vec<&str> = instances.iter().map(|t| t.kind.as_str()).collect();
    let high_effort: Vec<bool> = instances.iter().map(|t| t.high_effort).collect();
    let done: Vec<bool> = instances.iter().map(|t| t.done).collect();

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("date"), dates).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("category"), categories).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("high_effort"), high_effort).into_column(),
        Series::new(PlSmallStr::from_static("done"), done).into_column(),
    ];
    DataFrame::new(columns)
}

pub fn assignments_frame(assignments: &[Assignment]) -> PolarsResult<DataFrame> {
    let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
    let names: Vec<&str> = assignments.iter().map(|a| a.name.as_str()).collect();
    let categories: Vec<&str> = assignments.iter().map(|a| a.category.as_str()).collect();
    let units: Vec<Option<u32>> = assignments
        .iter()
        .map(|a| (!a.recurring).then_some(a.total_units))
        .collect();
    let recurring: Vec<bool> = assignments.iter().map(|a| a.recurring).collect();
    let high_effort: Vec<bool> = assignments.iter().map(|a| a.high_effort).collect();

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("category"), categories).into_column(),
        Series::new(PlSmallStr::from_static("total_units"), units).into_column(),
        Series::new(PlSmallStr::from_static("recurring"), recurring).into_column(),
        Series::new(PlSmallStr::from_static("high_effort"), high_effort).into_column(),
    ];
    DataFrame::new(columns)
}

/// One row per subject in table order, followed by an overall row.
pub fn progress_frame(summary: &ProgressSummary) -> PolarsResult<DataFrame> {
    let mut subjects: Vec<&str> = Vec::new();
    let mut totals: Vec<u32> = Vec::new();
    let mut completed: Vec<u32> = Vec::new();
    let mut percents: Vec<u32> = Vec::new();

    for (subject, progress) in summary.by_subject() {
        subjects.push(subject);
        totals.push(progress.total as u32);
        completed.push(progress.completed as u32);
        percents.push(progress.percentage());
    }
    subjects.push("all");
    totals.push(summary.total_tasks as u32);
    completed.push(summary.completed_tasks as u32);
    percents.push(summary.percentage);

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("subject"), subjects).into_column(),
        Series::new(PlSmallStr::from_static("total"), totals).into_column(),
        Series::new(PlSmallStr::from_static("completed"), completed).into_column(),
        Series::new(PlSmallStr::from_static("percent"), percents).into_column(),
    ];
    DataFrame::new(columns)
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(v) => if *v { "x" } else { "" }.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Renders `df` as a boxed plain-text table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| cell_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| text_width(n)).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(text_width(cell));
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(text_width(value))));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
