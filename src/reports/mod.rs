use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pathflow::error::PfResult;
use pathflow::plan::{Plan, PlanSource};
use std::io::Write;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Writes the plan to stdout in the requested format.
pub fn print_plan(plan: &Plan, format: OutputFormat) -> PfResult<()> {
    match format {
        OutputFormat::Table => {
            print_table(plan);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
            Ok(())
        }
        OutputFormat::Csv => write_csv(plan, std::io::stdout().lock()),
    }
}

pub fn write_csv<W: Write>(plan: &Plan, out: W) -> PfResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    for path in &plan.paths {
        writer.serialize(path)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn print_table(plan: &Plan) {
    println!(
        "\nN: {}, K: {}, Ps: {:.2}",
        plan.path_count, plan.budget, plan.success_probability
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Path").add_attribute(Attribute::Bold),
        Cell::new("Alloc").fg(Color::Cyan),
        Cell::new("Packets"),
        Cell::new("Overhead"),
        Cell::new("Throughput"),
        Cell::new("Latency"),
        Cell::new("Loss %"),
        Cell::new("Time").fg(Color::Green),
    ]);

    for p in &plan.paths {
        let right = |s: String| Cell::new(s).set_alignment(CellAlignment::Right);
        table.add_row(vec![
            Cell::new(format!("m[{}]", p.index)).add_attribute(Attribute::Bold),
            right(p.allocation.to_string()).fg(Color::Cyan),
            right(p.packets.to_string()),
            right(p.overhead.to_string()),
            right(format!("{:.2}", p.throughput)),
            right(format!("{:.3}", p.latency)),
            right(format!("{:.2}", p.loss * 100.0)),
            right(format!("{:.4}", p.time)).fg(Color::Green),
        ]);
    }

    println!("{}", table);
    println!(
        "Total: {} packets + {} overhead = {} sent",
        plan.total_allocation, plan.total_overhead, plan.total_packets
    );

    match &plan.source {
        PlanSource::Search(s) => println!(
            "Search: {} engine, {} evaluations, fitness {:.6}{}",
            s.engine,
            s.iterations,
            s.fitness,
            if s.plateaued { " (plateau)" } else { "" }
        ),
        PlanSource::Linear { makespan } => {
            println!("Linear bound (no redundancy): {:.4}", makespan)
        }
        PlanSource::Fixed => {}
        PlanSource::Empty => println!("No paths to plan."),
    }

    println!("Estimated transfer time: {:.4}", plan.makespan);
}
