use call_analyzer::domain::JobStatus;

#[test]
fn given_provider_status_strings_when_parsing_then_maps_to_status() {
    assert_eq!("queued".parse::<JobStatus>(), Ok(JobStatus::Queued));
    assert_eq!("processing".parse::<JobStatus>(), Ok(JobStatus::Processing));
    assert_eq!("completed".parse::<JobStatus>(), Ok(JobStatus::Completed));
    assert_eq!("error".parse::<JobStatus>(), Ok(JobStatus::Failed));
    assert!("done".parse::<JobStatus>().is_err());
}

#[test]
fn given_error_status_in_json_when_deserializing_then_is_failed() {
    let status: JobStatus = serde_json::from_str("\"error\"").unwrap();
    assert_eq!(status, JobStatus::Failed);
}

#[test]
fn given_statuses_when_checking_terminal_then_only_completed_and_failed_are() {
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
}
