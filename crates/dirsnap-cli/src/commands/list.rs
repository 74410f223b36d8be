//! Implementation of the `dirsnap list` command.
//!
//! Two views:
//! - no `--name`: a fixed-width table of every stored template
//! - `--name N`: one template's metadata plus its archive contents

use dirsnap_core::domain::TemplateRecord;

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    commands::{build_service, parse_name},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, format_timestamp},
};

pub fn execute(
    args: ListArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = build_service(&config)?;

    // Detail view for a single template.
    if let Some(raw) = &args.name {
        let name = parse_name(raw)?;
        let (record, entries) = service.list_files(&name)?;
        return print_detail(&record, &entries, &output);
    }

    let records = service.list_all()?;

    match args.format {
        ListFormat::Table => {
            output.print(&format!(
                "{:<20}  {:<20}  {}",
                "NAME", "TIMESTAMP", "SRC PATH"
            ))?;
            for record in &records {
                output.print(&format!(
                    "{:<20}  {:<20}  {}",
                    record.name,
                    format_timestamp(record.created),
                    record.src_path.display()
                ))?;
            }
        }

        ListFormat::List => {
            for record in &records {
                println!("{}", record.name);
            }
        }

        ListFormat::Json => {
            // Serialise to stdout directly (bypasses OutputManager because
            // JSON output must be parseable even in non-TTY pipes).
            let json =
                serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".into());
            println!("{json}");
        }

        ListFormat::Csv => {
            println!("name,timestamp,src_path");
            for record in &records {
                println!(
                    "{},{},{}",
                    record.name,
                    format_timestamp(record.created),
                    record.src_path.display()
                );
            }
        }
    }

    Ok(())
}

/// Labeled metadata lines followed by the indented archive contents.
fn print_detail(
    record: &TemplateRecord,
    entries: &[String],
    output: &OutputManager,
) -> CliResult<()> {
    output.print(&format!("TEMPLATE: {}", record.name))?;
    output.print(&format!("CREATED: {}", format_timestamp(record.created)))?;
    output.print(&format!("SRC DIR: {}", record.src_path.display()))?;
    output.print(&format!("PATH: {}", record.template_path.display()))?;
    output.print("CONTENTS:")?;
    for entry in entries {
        output.print(&format!("\t{entry}"))?;
    }
    Ok(())
}
