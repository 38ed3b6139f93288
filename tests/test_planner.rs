use std::fs;
use std::path::PathBuf;

use lib::planner::catalog_getter::CatalogGetter;
use lib::planner::error::{AddError, LoadError};
use lib::planner::helpers::{find_course, get_commands, get_config, load_catalog, write_reports};
use lib::planner::models::{Args, Config, Report};
use lib::planner::run_tool::run;

pub struct TestGetter {
    pub catalog_path: String,
}

impl CatalogGetter for TestGetter {
    async fn get_catalog(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.catalog_path).map_err(|source| LoadError::Io {
            path: self.catalog_path.clone(),
            source,
        })
    }
}

fn test_args() -> Args {
    Args {
        config_json_path: PathBuf::from("example.config.json"),
        commands_json_path: PathBuf::from("tests/test.commands.json"),
        catalog_source: None,
    }
}

fn test_config(args: &Args) -> Config {
    get_config(args).unwrap()
}

fn codes(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn test_main() {
    let args = test_args();
    let config = test_config(&args);
    let commands = get_commands(&args).unwrap();

    // conflicting course as the catalog binds it, to compare the whole rejection
    let catalog =
        load_catalog(&fs::read_to_string("tests/test.catalog.json").unwrap(), &config.slots)
            .unwrap();
    let writing_seminar = find_course(&catalog, "7").unwrap().clone();

    let test_getter = TestGetter {
        catalog_path: "tests/test.catalog.json".to_string(),
    };
    let reports = run(test_getter, &config, commands).await.unwrap();

    let expected = vec![
        Report::Departments {
            departments: codes(&["CSCI", "ENGL", "ISTE", "MATH", "PHYS", "PSYC", "SWEN"]),
        },
        Report::Listing {
            department: Some("CSCI".to_string()),
            courses: codes(&["CSCI-141", "CSCI-142", "CSCI-243"]),
        },
        Report::Rejected {
            id: "2".to_string(),
            message: "Missing prerequisites: CSCI-141".to_string(),
            error: AddError::PrerequisitesNotMet {
                missing: codes(&["CSCI-141"]),
            },
        },
        Report::Added {
            code: "CSCI-141".to_string(),
            total_credits: 4,
        },
        Report::Rejected {
            id: "1".to_string(),
            message: "Course 1 is already in the schedule".to_string(),
            error: AddError::AlreadyScheduled {
                id: "1".to_string(),
            },
        },
        Report::Added {
            code: "CSCI-142".to_string(),
            total_credits: 8,
        },
        Report::Added {
            code: "ENGL-150".to_string(),
            total_credits: 11,
        },
        Report::Rejected {
            id: "8".to_string(),
            message: "Time conflict with ENGL-150 (MWF 10:00-10:50)".to_string(),
            error: AddError::TimeConflict {
                with: Box::new(writing_seminar),
            },
        },
        Report::Removed {
            id: "7".to_string(),
            was_scheduled: true,
            total_credits: 8,
        },
        Report::Added {
            code: "ISTE-120".to_string(),
            total_credits: 11,
        },
        Report::Added {
            code: "SWEN-250".to_string(),
            total_credits: 14,
        },
        Report::UnknownCourse {
            id: "42".to_string(),
        },
        Report::Removed {
            id: "7".to_string(),
            was_scheduled: false,
            total_credits: 14,
        },
        Report::Listing {
            department: None,
            courses: codes(&[
                "CSCI-141", "CSCI-142", "CSCI-243", "MATH-181", "MATH-182", "PHYS-211",
                "ENGL-150", "ISTE-120", "PSYC-101", "SWEN-250",
            ]),
        },
        Report::Schedule {
            courses: codes(&["CSCI-141", "CSCI-142", "ISTE-120", "SWEN-250"]),
            total_credits: 14,
        },
    ];

    // stdout of the tool must stay parseable
    let mut out = Vec::new();
    write_reports(&mut out, &reports).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed.len(), expected.len());
    assert_eq!(parsed[7]["error"]["with"]["courseCode"], "ENGL-150");

    assert_eq!(reports.len(), expected.len());
    for (i, (report, expected)) in reports.iter().zip(expected.iter()).enumerate() {
        assert_eq!(report, expected, "report #{}", i);
    }
}

#[tokio::test]
async fn test_missing_catalog_applies_nothing() {
    let args = test_args();
    let config = test_config(&args);
    let commands = get_commands(&args).unwrap();

    let test_getter = TestGetter {
        catalog_path: "tests/non_existent.catalog.json".to_string(),
    };
    let err = run(test_getter, &config, commands).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[tokio::test]
async fn test_malformed_catalog_applies_nothing() {
    let args = test_args();
    let config = test_config(&args);

    let test_getter = TestGetter {
        catalog_path: "tests/test.malformed_catalog.json".to_string(),
    };
    let err = run(test_getter, &config, get_commands(&args).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Malformed(_)));
}
