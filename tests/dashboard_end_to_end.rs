use std::io::Write;
use std::path::{Path, PathBuf};

use launch_dash::chart::Figure;
use launch_dash::dashboard::{PIE_CHART, SCATTER_CHART};
use launch_dash::data::filter::BoundaryPolicy;
use launch_dash::{build_dashboard, DashConfig, DashError, Dashboard, RawViewState};

const HEADER: &str = "Launch Site,class,Payload Mass (kg),Booster Version Category\n";

fn csv_fixture(rows: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    file.write_all(rows.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn dashboard_for(path: &Path, boundary: BoundaryPolicy) -> Dashboard {
    let config = DashConfig {
        data_path: path.to_path_buf(),
        boundary,
        ..DashConfig::default()
    };
    build_dashboard(&config).unwrap()
}

fn raw(site: &str, low: f64, high: f64) -> RawViewState {
    RawViewState {
        site: site.to_string(),
        payload: [low, high],
    }
}

fn pie_slices(fig: Figure) -> Vec<(String, usize)> {
    match fig {
        Figure::Pie(p) => p.slices.into_iter().map(|s| (s.label, s.value)).collect(),
        other => panic!("expected pie, got {other:?}"),
    }
}

fn scatter_payloads(fig: Figure) -> Vec<f64> {
    match fig {
        Figure::Scatter(s) => s
            .series
            .into_iter()
            .flat_map(|series| series.points)
            .map(|p| p.payload_mass_kg)
            .collect(),
        other => panic!("expected scatter, got {other:?}"),
    }
}

#[test]
fn two_site_example_proportions() {
    // A: 3 successes / 1 failure; B: 0 successes / 2 failures.
    let file = csv_fixture(
        "A,1,100,FT\nA,1,200,FT\nA,0,300,v1.1\nB,0,400,v1.1\nA,1,500,B5\nB,0,600,B5\n",
    );
    let dash = dashboard_for(file.path(), BoundaryPolicy::Exclusive);

    let all = pie_slices(dash.invoke_raw(PIE_CHART, &raw("ALL", 0.0, 1.0)).unwrap());
    assert_eq!(all, [("A".to_string(), 3)]);

    let b = pie_slices(dash.invoke_raw(PIE_CHART, &raw("B", 0.0, 1.0)).unwrap());
    assert_eq!(b, [("Failure".to_string(), 2)]);

    let a = pie_slices(dash.invoke_raw(PIE_CHART, &raw("A", 0.0, 1.0)).unwrap());
    assert_eq!(a.iter().map(|(_, n)| n).sum::<usize>(), 4);
}

#[test]
fn payload_bound_is_excluded_but_just_inside_is_kept() {
    let file = csv_fixture("A,1,10000,FT\nA,0,9999.9,FT\n");
    let dash = dashboard_for(file.path(), BoundaryPolicy::Exclusive);

    let payloads =
        scatter_payloads(dash.invoke_raw(SCATTER_CHART, &raw("ALL", 0.0, 10000.0)).unwrap());
    assert_eq!(payloads, [9999.9]);
}

#[test]
fn inclusive_policy_keeps_bound() {
    let file = csv_fixture("A,1,10000,FT\nA,0,9999.9,FT\n");
    let dash = dashboard_for(file.path(), BoundaryPolicy::Inclusive);

    let payloads =
        scatter_payloads(dash.invoke_raw(SCATTER_CHART, &raw("ALL", 0.0, 10000.0)).unwrap());
    assert_eq!(payloads, [10000.0, 9999.9]);
}

#[test]
fn inverted_interval_renders_empty_chart() {
    let file = csv_fixture("A,1,100,FT\nA,0,200,FT\n");
    let dash = dashboard_for(file.path(), BoundaryPolicy::Exclusive);

    let fig = dash.invoke_raw(SCATTER_CHART, &raw("A", 500.0, 50.0)).unwrap();
    assert!(fig.is_empty());
    assert!(scatter_payloads(fig).is_empty());
}

#[test]
fn repeated_invocation_is_identical() {
    let file = csv_fixture("A,1,100,FT\nB,0,200,v1.1\nA,0,300,B5\n");
    let dash = dashboard_for(file.path(), BoundaryPolicy::Exclusive);
    let view = raw("A", 0.0, 1000.0);

    for output in [PIE_CHART, SCATTER_CHART] {
        let first = dash.invoke_raw(output, &view).unwrap();
        let second = dash.invoke_raw(output, &view).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_plotly(), second.to_plotly());
    }
}

#[test]
fn unknown_site_is_reported_not_panicked() {
    let file = csv_fixture("A,1,100,FT\n");
    let dash = dashboard_for(file.path(), BoundaryPolicy::Exclusive);

    let err = dash.invoke_raw(SCATTER_CHART, &raw("Z", 0.0, 1.0)).unwrap_err();
    assert_eq!(err, DashError::UnknownSite { site: "Z".into() });
}

#[test]
fn missing_file_fails_startup() {
    let config = DashConfig {
        data_path: PathBuf::from("does/not/exist.csv"),
        ..DashConfig::default()
    };
    assert!(build_dashboard(&config).is_err());
}

#[test]
fn bundled_sample_dataset_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_launches.csv");
    let dash = dashboard_for(&path, BoundaryPolicy::Exclusive);
    let dataset = dash.context().dataset();

    assert_eq!(dataset.len(), 42);
    assert_eq!(
        dataset.sites(),
        ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
    );

    let successes = dataset
        .records()
        .iter()
        .filter(|r| r.outcome.is_success())
        .count();
    let all = pie_slices(dash.invoke(PIE_CHART, &dash.initial_view()).unwrap());
    assert_eq!(all.iter().map(|(_, n)| n).sum::<usize>(), successes);
}
