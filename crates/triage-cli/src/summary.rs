use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use triage_model::RiskLevel;
use triage_query::format_numeric;
use triage_report::{HistogramBin, Share, Tally};

use crate::types::{CustomerRun, HealthRun, RegistryRun, StageCounts};

pub fn print_customer_summary(run: &CustomerRun) {
    let insights = &run.insights;
    println!("Customers: {}", run.source.display());
    println!("Records: {}  Youth (<25): {}", insights.total, insights.youth_count);

    print_shares("Age groups", &insights.age_groups);
    print_tallies("Sign-ups per year", "Year", &insights.yearly_signups);
    print_tallies("City hotspots", "City", &insights.city_counts);
    print_tallies("Seasonal pulse", "Month", &insights.monthly_signups);
    print_tallies("Quarterly sign-ups", "Quarter", &insights.quarterly_signups);
    print_tallies("Country audit", "Country", &insights.country_counts);

    if !insights.mean_age_by_city.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("City"),
            header_cell("Mean age"),
            header_cell("Customers"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for row in &insights.mean_age_by_city {
            table.add_row(vec![
                Cell::new(&row.city),
                Cell::new(format!("{:.1}", row.mean_age)),
                Cell::new(row.customers),
            ]);
        }
        print_section("Mean age by city", &table);
    }

    if let Some(last) = insights.cumulative_growth.last() {
        println!();
        println!("Cumulative growth: {} customers by {}", last.total, last.date);
    }
    match &insights.tenure {
        Some(tenure) => println!(
            "Tenure as of {}: min {} days, mean {:.1} days, max {} days",
            tenure.as_of, tenure.min_days, tenure.mean_days, tenure.max_days
        ),
        None => println!("Tenure: no dated sign-ups"),
    }
    println!(
        "Sign-ups on weekdays: {}  weekends: {}",
        insights.week_split.weekday, insights.week_split.weekend
    );
}

pub fn print_health_summary(run: &HealthRun) {
    let insights = &run.insights;
    println!("Patients: {}", run.source.display());
    print_stage_counts(&run.stages);

    if !insights.preview.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Patient"),
            header_cell("Blood pressure"),
            header_cell("Cleaned"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for row in &insights.preview {
            table.add_row(vec![
                Cell::new(&row.patient_id),
                optional_cell(row.blood_pressure.as_deref()),
                optional_cell(row.blood_pressure_clean.map(format_numeric).as_deref()),
            ]);
        }
        print_section("Cleaning preview", &table);
    }

    print_tallies("Risk levels", "Risk", &insights.risk_counts);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Risk"),
        header_cell("Patients"),
        header_cell("Min"),
        header_cell("Q1"),
        header_cell("Median"),
        header_cell("Q3"),
        header_cell("Max"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 1..7 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in &insights.bmi_by_risk {
        let mut cells = vec![risk_cell(Some(row.risk_level))];
        match &row.summary {
            Some(summary) => {
                cells.push(Cell::new(summary.count));
                for value in [
                    summary.min,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.max,
                ] {
                    cells.push(Cell::new(format!("{value:.2}")));
                }
            }
            None => {
                cells.push(dim_cell(0));
                cells.extend((0..5).map(|_| dim_cell("-")));
            }
        }
        table.add_row(cells);
    }
    print_section("BMI by risk level", &table);

    print_histogram(&insights.age_histogram);
}

pub fn print_registry_summary(run: &RegistryRun) {
    println!("Patients: {}", run.source.display());
    println!("Pipeline stage: {}", run.stage);
    print_stage_counts(&run.stages);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sex"),
        header_cell("Risk"),
        header_cell("Patients"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &run.demographics {
        table.add_row(vec![
            optional_cell(row.sex.as_deref()),
            risk_cell(row.risk_level),
            Cell::new(row.count),
        ]);
    }
    print_section("Demographics", &table);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("Age"),
        header_cell("BMI"),
        header_cell("Blood pressure"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 1..4 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in &run.critical {
        table.add_row(vec![
            Cell::new(&row.patient_id),
            optional_cell(row.age.map(|age| age.to_string()).as_deref()),
            optional_cell(row.bmi.map(format_numeric).as_deref()),
            optional_cell(row.blood_pressure_clean.map(format_numeric).as_deref()),
            Cell::new(row.status)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    if run.critical.is_empty() {
        println!();
        println!("Critical patients: none");
    } else {
        print_section("Critical patients", &table);
    }

    match &run.export {
        Some(path) => println!("Export: {}", path.display()),
        None => println!("Export: skipped (dry run)"),
    }
}

fn print_stage_counts(stages: &StageCounts) {
    println!(
        "Records: {}  blood pressure cleaned: {} (coerced {}), missing: {}",
        stages.records, stages.bp_cleaned, stages.bp_coerced, stages.bp_missing
    );
    if stages.unassessed > 0 {
        println!("Unassessed (missing BMI or disease score): {}", stages.unassessed);
    }
}

fn print_tallies(title: &str, label: &str, tallies: &[Tally]) {
    if tallies.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell(label), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for tally in tallies {
        table.add_row(vec![Cell::new(&tally.label), count_cell(tally.count)]);
    }
    print_section(title, &table);
}

fn print_shares(title: &str, shares: &[Share]) {
    if shares.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Count"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.label),
            count_cell(share.count),
            Cell::new(format!("{:.1}%", share.percent)),
        ]);
    }
    print_section(title, &table);
}

fn print_histogram(bins: &[HistogramBin]) {
    if bins.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Patients"),
    ]);
    apply_table_style(&mut table);
    for idx in 0..3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for bin in bins {
        table.add_row(vec![
            Cell::new(format!("{:.1}", bin.lower)),
            Cell::new(format!("{:.1}", bin.upper)),
            count_cell(bin.count),
        ]);
    }
    print_section("Age distribution", &table);
}

fn print_section(title: &str, table: &Table) {
    println!();
    println!("{title}:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn risk_cell(level: Option<RiskLevel>) -> Cell {
    match level {
        Some(RiskLevel::High) => Cell::new("High")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(RiskLevel::Medium) => Cell::new("Medium").fg(Color::Yellow),
        Some(RiskLevel::Low) => Cell::new("Low").fg(Color::Green),
        None => dim_cell(RiskLevel::UNASSESSED_LABEL),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
