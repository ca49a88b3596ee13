use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn schedsim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schedsim"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to launch schedsim")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prints_all_six_results() {
    let output = schedsim(&["tests/data/s1.txt"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "FCFS average wait time is: 5.750000\n\n\
         NonPreemtive priority average wait time is: 5.250000\n\n\
         NonPreemtive SJF average wait time is: 5.250000\n\n\
         Preemtive priority average wait time is: 5.000000\n\n\
         Preemtive SJF average wait time is: 5.000000\n\n\
         RoundRobin average wait time is: 9.250000\n\n\
         Program terminated correctly\n"
    );
}

#[test]
fn idle_start_waits_nothing() {
    let output = schedsim(&["tests/data/idle_start.txt"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert_eq!(text.matches("average wait time is: 0.000000\n\n").count(), 6);
    assert!(text.ends_with("Program terminated correctly\n"));
}

#[test]
fn partial_group_is_dropped_and_logging_stays_off_stdout() {
    let output = schedsim(&["-vvv", "tests/data/preemption.txt"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "FCFS average wait time is: 4.000000\n\n\
         NonPreemtive priority average wait time is: 4.000000\n\n\
         NonPreemtive SJF average wait time is: 3.000000\n\n\
         Preemtive priority average wait time is: 2.333333\n\n\
         Preemtive SJF average wait time is: 2.000000\n\n\
         RoundRobin average wait time is: 4.000000\n\n\
         Program terminated correctly\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[WARN] Discarding 2 trailing value(s)"));
    assert!(stderr.contains("[TRACE] srtf t=0"));
}

#[test]
fn missing_argument() {
    let output = schedsim(&[]);
    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "Need a file with the process information\nAbnormal termination\n"
    );
}

#[test]
fn unreadable_file() {
    let output = schedsim(&["tests/data/no-such-file.txt"]);
    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "\nError in function main\n\t filename does not exist or is corrupted\nThe program will terminate.\n\n"
    );
}

#[test]
fn missing_quantum() {
    let output = schedsim(&["tests/data/no_quantum.txt"]);
    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "\nError in function main\n\t Quantum not found\nThe program will terminate.\n\n"
    );
}

#[test]
fn dangling_sign_produces_no_results() {
    let output = schedsim(&["tests/data/dangling_sign.txt"]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Line 2: '-' must be followed by a digit"));
    assert!(!text.contains("average wait time"));
}

#[test]
fn oversized_workload_is_rejected_before_running() {
    let output = schedsim(&["tests/data/huge_burst.txt"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "\nError in function main\n\t Arrivals and bursts run past the simulated time limit of 4294967296 ticks\nThe program will terminate.\n\n"
    );
}
