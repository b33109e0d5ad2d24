use super::*;

#[test]
fn test_parse_args_defaults() {
    let parsed = parse_args(["kira-scorebands", "run", "--input", "data/students.csv"]).unwrap();
    assert_eq!(parsed.input, PathBuf::from("data/students.csv"));
    assert_eq!(parsed.out_dir, None);
    assert_eq!(parsed.bands_path, None);
    assert_eq!(parsed.policy, InvalidRecordPolicy::FailFast);
    assert_eq!(parsed.top_n, 3);
    assert!(!parsed.verbose);
}

#[test]
fn test_parse_args_all_options() {
    let parsed = parse_args([
        "kira-scorebands",
        "run",
        "--input",
        "in.csv.gz",
        "--out",
        "out",
        "--bands",
        "bands.json",
        "--skip-invalid",
        "--top",
        "5",
        "-v",
    ])
    .unwrap();
    assert_eq!(parsed.out_dir, Some(PathBuf::from("out")));
    assert_eq!(parsed.bands_path, Some(PathBuf::from("bands.json")));
    assert_eq!(parsed.policy, InvalidRecordPolicy::Skip);
    assert_eq!(parsed.top_n, 5);
    assert!(parsed.verbose);
}

#[test]
fn test_parse_args_requires_input() {
    assert!(parse_args(["kira-scorebands", "run"]).is_err());
    assert!(parse_args(["kira-scorebands"]).is_err());
    assert!(parse_args(["kira-scorebands", "import", "--input", "x.csv"]).is_err());
}

#[test]
fn test_run_end_to_end() {
    let dir = std::env::temp_dir().join(format!("kira_scorebands_main_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("students.csv");
    std::fs::write(
        &input,
        "id_no,name,cgpa\nA,Avery,3.9\nB,Blake,3.5\nC,Casey,3.5\nD,Devon,2.0\n",
    )
    .unwrap();
    let out_dir = dir.join("out");
    let config = RunConfig {
        input,
        out_dir: Some(out_dir.clone()),
        bands_path: None,
        policy: InvalidRecordPolicy::FailFast,
        top_n: 3,
        verbose: false,
    };
    run(&config).unwrap();
    assert!(out_dir.join("report.txt").exists());
    assert!(out_dir.join("summary.json").exists());
    assert!(out_dir.join("ranking.tsv").exists());
}

#[test]
fn test_run_rejects_non_finite_by_default() {
    let dir = std::env::temp_dir().join(format!("kira_scorebands_nan_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("students.csv");
    std::fs::write(&input, "id,name,score\nA,Avery,3.9\nB,Blake,NaN\n").unwrap();
    let mut config = RunConfig {
        input,
        out_dir: None,
        bands_path: None,
        policy: InvalidRecordPolicy::FailFast,
        top_n: 3,
        verbose: false,
    };
    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("'B'"));

    config.policy = InvalidRecordPolicy::Skip;
    run(&config).unwrap();
}

struct MemorySource {
    records: Vec<crate::model::record::Record>,
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn load(
        &self,
    ) -> Result<(Vec<crate::model::record::Record>, crate::input::ImportReport), crate::input::InputError>
    {
        let report = crate::input::ImportReport {
            imported: self.records.len(),
            skipped_rows: 0,
        };
        Ok((self.records.clone(), report))
    }
}

fn memory_config(out_dir: Option<PathBuf>) -> RunConfig {
    RunConfig {
        input: PathBuf::from("unused.csv"),
        out_dir,
        bands_path: None,
        policy: InvalidRecordPolicy::FailFast,
        top_n: 2,
        verbose: false,
    }
}

#[test]
fn test_run_with_custom_record_source() {
    use crate::model::record::Record;

    let dir = std::env::temp_dir().join(format!("kira_scorebands_memory_{}", std::process::id()));
    let source = MemorySource {
        records: vec![
            Record::new("A", "Avery", 3.9),
            Record::new("B", "Blake", 3.5),
            Record::new("C", "Casey", 3.5),
            Record::new("D", "Devon", 2.0),
        ],
    };
    run_with_source(&memory_config(Some(dir.clone())), &source).unwrap();
    let report = std::fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(report.contains("Input: memory"));
    assert!(report.contains("The largest score gap (1.50) is between:"));
    assert_eq!(source.fetch_all().unwrap().len(), 4);
}

#[test]
fn test_run_with_source_fails_fast_on_non_finite() {
    use crate::model::record::Record;

    let source = MemorySource {
        records: vec![
            Record::new("A", "Avery", 3.9),
            Record::new("X", "Xan", f64::INFINITY),
        ],
    };
    let err = run_with_source(&memory_config(None), &source).unwrap_err();
    assert!(matches!(
        err,
        AppError::Analysis(crate::error::AnalysisError::InvalidRecord { ref id, .. }) if id == "X"
    ));
}

#[test]
fn test_run_with_bundled_band_config() {
    let dir = std::env::temp_dir().join(format!("kira_scorebands_bands_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("students.csv");
    std::fs::write(&input, "id,name,score\nA,Avery,3.9\nD,Devon,2.0\n").unwrap();
    let out_dir = dir.join("out");
    let config = RunConfig {
        input,
        out_dir: Some(out_dir.clone()),
        bands_path: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/bands.json")),
        policy: InvalidRecordPolicy::FailFast,
        top_n: 3,
        verbose: false,
    };
    run(&config).unwrap();
    let tsv = std::fs::read_to_string(out_dir.join("ranking.tsv")).unwrap();
    let last = tsv.lines().last().unwrap();
    assert!(last.contains("\tNeeds Improvement\t"));
    assert!(!tsv.contains("Unranked"));
}
