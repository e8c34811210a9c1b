use std::fs;
use std::path::Path;

use dataset_distribution::dataset::parse_manifest;
use dataset_distribution::report::bar_length;
use dataset_distribution::{
    analyze_split, run_analysis, AnalysisConfig, ChartCapability, ChartConfig, ChartFormat,
    ClassDistribution, DistributionReporter, ReportOptions, SplitSpec, SplitStatus,
};
use tempfile::TempDir;

fn distribution_of(text: &str) -> ClassDistribution {
    let manifest = parse_manifest(text.as_bytes()).expect("parse");
    ClassDistribution::from_records(&manifest.records)
}

fn svg_reporter(output_dir: &Path) -> DistributionReporter {
    let chart = ChartConfig {
        format: ChartFormat::Svg,
        ..ChartConfig::default()
    };
    DistributionReporter::new(
        ReportOptions {
            output_dir: output_dir.to_path_buf(),
            ..ReportOptions::default()
        },
        ChartCapability::detect(&chart),
    )
}

/// Write `content` as the manifest of a single split and analyze it
fn analyze_one(
    dir: &Path,
    content: &str,
    reporter: &DistributionReporter,
) -> (dataset_distribution::SplitSummary, String) {
    fs::write(dir.join("list.txt"), content).expect("write manifest");
    let split = SplitSpec::new("Sample", "list.txt");
    let mut out = Vec::new();
    let summary = analyze_split(&split, dir, reporter, &mut out).expect("analyze");
    (summary, String::from_utf8(out).expect("utf8"))
}

#[test]
fn scenario_a_counts_and_bars() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = DistributionReporter::text_only(ReportOptions::default());
    let (summary, text) = analyze_one(
        temp_dir.path(),
        "a.jpg,cat\nb.jpg,dog\nc.jpg,cat\n",
        &reporter,
    );

    assert_eq!(summary.classes.count("cat"), 2);
    assert_eq!(summary.classes.count("dog"), 1);
    assert_eq!(summary.total_samples, 3);

    let expected = format!(
        "--- [Sample] Class Distribution ---\n  cat            :    2 | {}\n  dog            :    1 | {}\n\n",
        "#".repeat(30),
        "#".repeat(15)
    );
    assert_eq!(text, expected);
}

#[test]
fn scenario_b_header_only_reports_no_data() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let reporter = svg_reporter(out_dir.path());
    let (summary, text) = analyze_one(temp_dir.path(), "file_path,class_name\n", &reporter);

    assert_eq!(summary.status, SplitStatus::Empty);
    assert!(text.contains("No data found."));
    assert!(summary.chart_path.is_none());
    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn scenario_c_missing_manifest_is_skipped() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("trainval_data_list.txt"), "x.jpg,bird\n").unwrap();

    let config = AnalysisConfig {
        data_path: data_dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let reporter = svg_reporter(out_dir.path());
    let mut out = Vec::new();
    let summary = run_analysis(&config, &reporter, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let test = summary.split("Test").unwrap();
    assert_eq!(test.status, SplitStatus::FileMissing);
    assert!(test.chart_path.is_none());

    let missing = data_dir.path().join("test_data_list.txt");
    assert!(text.contains(&format!(
        "--> Warning: Data list file not found at '{}'. Skipping 'Test' set.",
        missing.display()
    )));

    // The other split is still reported and charted.
    assert_eq!(summary.split("TrainVal").unwrap().status, SplitStatus::ReportedChart);
    assert!(out_dir.path().join("trainval_distribution.svg").exists());
    assert!(!out_dir.path().join("test_distribution.svg").exists());
}

#[test]
fn scenario_d_extra_fields_ignored() {
    let dist = distribution_of("a.jpg,cat,extra_field\n");
    assert_eq!(dist.class_names(), vec!["cat"]);
    assert_eq!(dist.total(), 1);
}

#[test]
fn scenario_e_single_field_line_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = DistributionReporter::text_only(ReportOptions::default());
    let (summary, text) = analyze_one(temp_dir.path(), "a.jpg\n", &reporter);

    assert_eq!(summary.status, SplitStatus::Empty);
    assert_eq!(summary.skipped_lines, 1);
    assert!(text.contains("No data found."));
}

#[test]
fn header_does_not_change_distribution() {
    let body = "a.jpg,cat\nb.jpg,dog\nc.jpg,cat\nd.jpg,bird\n";
    let with_path_header = distribution_of(&format!("file_path,class_name\n{}", body));
    let with_name_header = distribution_of(&format!("file_name,label\n{}", body));
    let without_header = distribution_of(body);

    assert_eq!(with_path_header, without_header);
    assert_eq!(with_name_header, without_header);
}

#[test]
fn counts_sum_to_valid_lines() {
    let text = "file_path,class_name\na,x\nb\nc,y,z\n\n  \nd,x\ne,\n";
    let manifest = parse_manifest(text.as_bytes()).unwrap();
    let dist = ClassDistribution::from_records(&manifest.records);

    // a,x  c,y,z  d,x  e,  -> four lines with at least two fields
    assert_eq!(dist.total(), 4);
    assert_eq!(dist.total(), manifest.len());
    assert_eq!(dist.count(""), 1);
}

#[test]
fn ordering_independent_of_input_order() {
    let lines = ["1,pear", "2,apple", "3,fig", "4,apple", "5,banana", "6,fig"];
    let reporter = DistributionReporter::text_only(ReportOptions::default());

    let mut reports = Vec::new();
    for rotation in 0..lines.len() {
        let mut rotated = lines.to_vec();
        rotated.rotate_left(rotation);
        if rotation % 2 == 1 {
            rotated.reverse();
        }
        let manifest = parse_manifest(rotated.join("\n").as_bytes()).unwrap();
        let mut out = Vec::new();
        reporter.report(&manifest.records, "Shuffled", &mut out).unwrap();
        reports.push(String::from_utf8(out).unwrap());
    }

    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
    let order: Vec<&str> = reports[0]
        .lines()
        .skip(1)
        .filter_map(|line| line.split(':').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    assert_eq!(order, vec!["apple", "banana", "fig", "pear"]);
}

#[test]
fn largest_class_bar_is_full_width() {
    let dist = distribution_of("a,x\nb,x\nc,x\nd,y\ne,z\nf,z\ng,x\n");
    let max = dist.max_count();
    for (class_name, count) in dist.iter() {
        let expected = count * 30 / max;
        assert_eq!(bar_length(count, max, 30), expected, "class {}", class_name);
    }
    assert_eq!(bar_length(dist.count("x"), max, 30), 30);
    assert_eq!(bar_length(dist.count("y"), max, 30), 7);
}

#[test]
fn repeated_runs_are_identical() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    fs::write(
        data_dir.path().join("trainval_data_list.txt"),
        "file_name,label\nq.jpg,owl\nr.jpg,hawk\ns.jpg,owl\n",
    )
    .unwrap();
    fs::write(data_dir.path().join("test_data_list.txt"), "t.jpg,hawk\n").unwrap();

    let config = AnalysisConfig {
        data_path: data_dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let reporter = svg_reporter(out_dir.path());
    let chart = out_dir.path().join("trainval_distribution.svg");

    let mut first = Vec::new();
    run_analysis(&config, &reporter, &mut first).unwrap();
    let first_chart = fs::read(&chart).unwrap();

    let mut second = Vec::new();
    run_analysis(&config, &reporter, &mut second).unwrap();
    let second_chart = fs::read(&chart).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_chart, second_chart);
}

#[test]
fn unavailable_charting_warns_once_and_reports_text() {
    let charts = ChartCapability::Unavailable(ChartFormat::Png);
    let warning = charts.warning().expect("unavailable capability must warn");
    assert!(warning.contains("PNG chart support is not compiled into this build"));
    assert!(warning.contains("cargo install dataset_distribution --features charts"));
    assert!(!charts.is_available());
    assert!(charts.renderer().is_none());

    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("trainval_data_list.txt"), "a,cat\nb,dog\n").unwrap();
    fs::write(data_dir.path().join("test_data_list.txt"), "c,cat\n").unwrap();

    let config = AnalysisConfig {
        data_path: data_dir.path().to_path_buf(),
        output_dir: out_dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let reporter = DistributionReporter::new(config.report_options(), charts);
    let mut out = Vec::new();
    let summary = run_analysis(&config, &reporter, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // The warning is a start-up concern; the per-split report never repeats it.
    assert!(!text.contains("not compiled into this build"));
    assert!(summary
        .splits
        .iter()
        .all(|s| s.status == SplitStatus::ReportedText && s.chart_path.is_none()));
    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[cfg(feature = "charts")]
#[test]
fn png_chart_written_per_split() {
    let data_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    fs::write(data_dir.path().join("trainval_data_list.txt"), "a,cat\nb,dog\n").unwrap();
    fs::write(data_dir.path().join("test_data_list.txt"), "c,cat\n").unwrap();

    let config = AnalysisConfig {
        data_path: data_dir.path().to_path_buf(),
        output_dir: out_dir.path().to_path_buf(),
        ..AnalysisConfig::default()
    };
    let reporter = DistributionReporter::new(
        config.report_options(),
        ChartCapability::detect(&config.chart),
    );

    let mut out = Vec::new();
    let summary = run_analysis(&config, &reporter, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    for (split, file) in [("TrainVal", "trainval_distribution.png"), ("Test", "test_distribution.png")] {
        let path = out_dir.path().join(file);
        assert_eq!(summary.split(split).unwrap().chart_path.as_deref(), Some(path.as_path()));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert!(text.contains(&format!("--> Saved bar chart to '{}'", path.display())));
    }
}
