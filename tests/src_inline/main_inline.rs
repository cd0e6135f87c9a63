use super::*;
use std::path::Path;

use crate::error::ConfigError;

fn parse(args: &[&str]) -> RunArgs {
    let cli = Cli::try_parse_from(std::iter::once("kira-photoqc").chain(args.iter().copied()))
        .unwrap();
    match cli.command {
        Command::Run(args) => args,
    }
}

#[test]
fn test_parse_run_args() {
    let args = parse(&[
        "run",
        "--scores",
        "inference.csv",
        "--images",
        "photos",
        "--out",
        "buckets",
        "--weights",
        "2,1,1,3,3",
        "--buckets",
        "4",
        "--gain-k",
        "3",
        "--filter-prefix",
        "foo",
        "--filter-prefix",
        "tmp_",
    ]);
    let layer = args.to_layer();
    assert_eq!(layer.scores_path.as_deref(), Some(Path::new("inference.csv")));
    assert_eq!(layer.label_weights, Some(vec![2.0, 1.0, 1.0, 3.0, 3.0]));
    assert_eq!(layer.num_buckets, Some(4));
    assert_eq!(layer.gain_k, Some(3.0));
    assert_eq!(
        layer.filtered_filename_prefix,
        Some(PrefixList::Many(vec!["foo".to_string(), "tmp_".to_string()]))
    );
    assert_eq!(args.log_level, "info");
}

#[test]
fn test_no_gain_conflicts_with_gain_k() {
    let res = Cli::try_parse_from([
        "kira-photoqc",
        "run",
        "--gain-k",
        "3",
        "--no-gain",
    ]);
    assert!(res.is_err());
}

#[test]
fn test_unset_flags_leave_layer_empty() {
    let args = parse(&["run"]);
    assert_eq!(args.to_layer(), ConfigLayer::default());
}

#[test]
fn test_run_with_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let photos = tmp.path().join("photos");
    std::fs::create_dir_all(&photos).unwrap();
    std::fs::write(photos.join("a.jpg"), b"img").unwrap();
    std::fs::write(tmp.path().join("scores.csv"), "filename,a,b\na.jpg,0.9,0.7\n").unwrap();
    let config_path = tmp.path().join("quality.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{"scores_path": {:?}, "source_image_dir": {:?}, "output_root": {:?}, "label_weights": [1.0, 1.0], "num_buckets": 5}}"#,
            tmp.path().join("scores.csv").display().to_string(),
            photos.display().to_string(),
            tmp.path().join("out").display().to_string(),
        ),
    )
    .unwrap();

    let config_arg = config_path.display().to_string();
    let args = parse(&["run", "--config", &config_arg, "--buckets", "2"]);
    let summary = run(&args).unwrap();
    assert_eq!(summary.buckets.len(), 2);
    assert!(tmp.path().join("out/50-100/a.jpg").is_file());
}

#[test]
fn test_failure_exits_nonzero() {
    let err = RunError::Config(ConfigError::Missing("output_root"));
    assert_eq!(report_failure(&err), ExitCode::FAILURE);
}

#[test]
fn test_failure_reported_with_logging_off() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("off"))
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        assert!(!tracing::enabled!(tracing::Level::ERROR));
        let err = RunError::Config(ConfigError::Missing("scores_path"));
        assert_eq!(report_failure(&err), ExitCode::FAILURE);
    });
}
