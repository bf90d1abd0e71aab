use backsub_core::calibrate::config::{CalibrationConfig, Statistic};
use backsub_core::calibrate::CalibrationSummary;
use console::Style;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_calibration_summary(config: &CalibrationConfig) {
    let s = Styles::new();
    let seq = &config.sequence;

    println!();
    println!("  {}", s.title.apply_to("Background Calibration"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(22)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Statistic"),
        s.method.apply_to(config.statistic)
    );
    if config.statistic != Statistic::Mean {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Variance"),
            s.method.apply_to(config.variance_policy)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Directory"),
        s.path.apply_to(seq.directory.display())
    );
    let last = seq.last_index().unwrap_or(seq.start_index);
    println!(
        "  {:<14}{} .. {}",
        s.label.apply_to("Frames"),
        s.value.apply_to(seq.file_name(seq.start_index)),
        s.value.apply_to(seq.file_name(last))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Count"),
        s.value.apply_to(seq.frame_count)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", config.width, config.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_path().display())
    );
    if config.statistic == Statistic::Distortion {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Chroma output"),
            s.path.apply_to(config.chroma_output_path().display())
        );
    }
    println!();
}

pub fn print_outputs(summary: &CalibrationSummary) {
    let s = Styles::new();
    println!();
    for path in &summary.outputs {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Saved"),
            s.path.apply_to(path.display())
        );
    }
}
