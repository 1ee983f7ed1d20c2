use clap::Parser;
use field_tiling_cli::{init_tracing, run, Cli, MAIN_FIELDS_FILE, SUB_FIELDS_FILE};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let result = run(&cli)?;

    let summary = result.summary();
    println!(
        "{} care areas -> {} main fields ({}), {} subfields ({})",
        summary.care_areas,
        summary.main_fields,
        cli.out_dir.join(MAIN_FIELDS_FILE).display(),
        summary.sub_fields,
        cli.out_dir.join(SUB_FIELDS_FILE).display(),
    );
    for diagnostic in &result.diagnostics {
        println!("unassigned: {diagnostic}");
    }
    Ok(())
}
