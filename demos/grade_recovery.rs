use grade_recovery::{Grouping, PlotConfig};
use tracing_subscriber::EnvFilter;

fn main() -> grade_recovery::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PlotConfig::from_json(r#"{ "panel_height": 500 }"#)?;
    let mut grouping = Grouping::with_config("Bench 1420", config);

    // size classes, coarse to fine
    grouping.add_resource(
        "Cu",
        &[120.0, 80.0, 45.0, 30.0, 15.0, 10.0],
        &[0.21, 0.45, 0.92, 1.64, 3.1, 6.4],
    )?;
    grouping.add_resource(
        "Au",
        &[120.0, 80.0, 45.0, 30.0, 15.0, 10.0],
        &[0.8, 0.7, 1.1, 0.9, 1.4, 1.2],
    )?;

    for resource in grouping.resources() {
        println!(
            "{}: heterogeneity {:.5}, overall grade {:.3}",
            resource.id(),
            resource.heterogeneity(),
            resource.overall_grade()
        );
    }
    println!("{}", grouping.summaries_json()?);

    grouping.render_all_curves()?.save_svg("grade_recovery.svg")?;
    Ok(())
}
