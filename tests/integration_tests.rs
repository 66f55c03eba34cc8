//! Tests de integración para el simulador de planificación

use std::io::Write;

use cpu_scheduling_simulator::{
    config, input, InputError, LoadError, Pid, Process, ProcessSet, SchedulerError,
    SchedulingAlgorithm, Simulation, SimulationMetrics,
};

fn batch(processes: &[(&str, u64, u64)]) -> ProcessSet {
    ProcessSet::new(
        processes
            .iter()
            .map(|&(pid, arrival, burst)| Process::new(pid, arrival, burst))
            .collect(),
    )
    .unwrap()
}

fn waiting_by_pid(metrics: &SimulationMetrics, pids: &[&str]) -> Vec<u64> {
    pids.iter()
        .map(|pid| metrics.process(&Pid::from(*pid)).unwrap().waiting_time)
        .collect()
}

fn turnaround_by_pid(metrics: &SimulationMetrics, pids: &[&str]) -> Vec<u64> {
    pids.iter()
        .map(|pid| metrics.process(&Pid::from(*pid)).unwrap().turnaround_time)
        .collect()
}

#[test]
fn test_fcfs_scenario() {
    let processes = batch(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 8)]);
    let metrics = SchedulingAlgorithm::fcfs().run(&processes).unwrap();

    assert_eq!(waiting_by_pid(&metrics, &["P1", "P2", "P3"]), vec![0, 4, 6]);
    assert_eq!(turnaround_by_pid(&metrics, &["P1", "P2", "P3"]), vec![5, 7, 14]);
    assert!((metrics.average_waiting_time - 10.0 / 3.0).abs() < 1e-9);
    assert!((metrics.average_turnaround_time - 26.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_sjf_non_preemptive_scenario() {
    let processes = batch(&[("P1", 0, 5), ("P2", 1, 3), ("P3", 2, 8)]);
    let metrics = SchedulingAlgorithm::SjfNonPreemptive.run(&processes).unwrap();

    let runs: Vec<(&str, u64, u64)> = metrics
        .slices
        .iter()
        .map(|s| (s.pid.as_str(), s.start_time, s.current_time))
        .collect();
    assert_eq!(runs, vec![("P1", 0, 5), ("P2", 5, 8), ("P3", 8, 16)]);
    assert_eq!(waiting_by_pid(&metrics, &["P1", "P2", "P3"]), vec![0, 4, 6]);
}

#[test]
fn test_sjf_non_preemptive_tie_prefers_earlier_arrival() {
    let processes = batch(&[("P1", 0, 2), ("P3", 2, 4), ("P2", 1, 4)]);
    let metrics = SchedulingAlgorithm::SjfNonPreemptive.run(&processes).unwrap();

    let order: Vec<&str> = metrics.completion_order.iter().map(Pid::as_str).collect();
    assert_eq!(order, vec!["P1", "P2", "P3"]);
}

#[test]
fn test_sjf_non_preemptive_tie_uses_input_position_not_pid() {
    let processes = batch(&[("P10", 0, 3), ("P2", 0, 3)]);
    let metrics = SchedulingAlgorithm::SjfNonPreemptive.run(&processes).unwrap();
    assert_eq!(metrics.completion_order[0].as_str(), "P10");
}

#[test]
fn test_sjf_preemptive_scenario() {
    let processes = batch(&[("P1", 0, 7), ("P2", 2, 4)]);
    let metrics = SchedulingAlgorithm::SjfPreemptive.run(&processes).unwrap();

    assert_eq!(turnaround_by_pid(&metrics, &["P1", "P2"]), vec![11, 4]);
    assert_eq!(waiting_by_pid(&metrics, &["P1", "P2"]), vec![4, 0]);
    assert_eq!(metrics.slices.len(), 11);
}

#[test]
fn test_ljf_preemptive_picks_longest_remaining() {
    let processes = batch(&[("short", 0, 2), ("long", 0, 6)]);
    let metrics = SchedulingAlgorithm::LjfPreemptive.run(&processes).unwrap();

    // long corre solo hasta que a ambos les quedan 2 unidades; luego alternan
    let order: Vec<&str> = metrics.slices.iter().map(|s| s.pid.as_str()).collect();
    assert_eq!(
        order,
        vec!["long", "long", "long", "long", "short", "long", "short", "long"]
    );
    assert_eq!(waiting_by_pid(&metrics, &["short", "long"]), vec![5, 2]);
}

#[test]
fn test_round_robin_scenario() {
    let processes = batch(&[("P1", 0, 4), ("P2", 0, 3)]);
    let metrics = SchedulingAlgorithm::round_robin(2).unwrap().run(&processes).unwrap();

    let p1 = metrics.process(&Pid::from("P1")).unwrap();
    let p2 = metrics.process(&Pid::from("P2")).unwrap();
    assert_eq!((p1.completion_time, p1.turnaround_time, p1.waiting_time), (6, 6, 2));
    assert_eq!((p2.completion_time, p2.turnaround_time, p2.waiting_time), (7, 7, 4));
}

#[test]
fn test_round_robin_legacy_average_turnaround_matches() {
    let processes = ProcessSet::new(config::default_processes()).unwrap();
    let metrics = SchedulingAlgorithm::default().run(&processes).unwrap();

    let average_burst = processes.total_burst_time() as f64 / processes.len() as f64;
    let legacy = metrics.average_waiting_time + average_burst;
    assert!((metrics.average_turnaround_time - legacy).abs() < 1e-9);
}

#[test]
fn test_all_algorithms_leave_input_untouched() {
    let processes = ProcessSet::new(config::default_processes()).unwrap();
    let before: Vec<Process> = processes.iter().cloned().collect();

    let runs = Simulation::run_all(&processes, config::DEFAULT_QUANTUM).unwrap();
    assert_eq!(runs.len(), 5);

    let after: Vec<Process> = processes.iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_all_algorithms_handle_late_first_arrival() {
    let processes = batch(&[("P1", 6, 3), ("P2", 8, 2)]);

    for metrics in Simulation::run_all(&processes, 2).unwrap() {
        let p1 = metrics.process(&Pid::from("P1")).unwrap();
        assert_eq!(p1.start_time, 6, "{}", metrics.algorithm);
        assert_eq!(metrics.makespan(), 11, "{}", metrics.algorithm);
    }
}

#[test]
fn test_validation_happens_before_simulating() {
    let err = ProcessSet::new(vec![Process::new("P1", 0, 3), Process::new("P2", 1, 0)])
        .unwrap_err();
    assert_eq!(
        err,
        SchedulerError::InvalidInput(InputError::ZeroBurst(Pid::from("P2")))
    );

    let err = SchedulingAlgorithm::round_robin(0).unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn test_report_generation() {
    let processes = ProcessSet::new(config::default_processes()).unwrap();
    let simulation = Simulation::new(processes, SchedulingAlgorithm::SjfPreemptive);
    let metrics = simulation.run().unwrap();

    let text_report = simulation.generate_report(&metrics);
    assert!(text_report.contains("Shortest Job First (preemptivo)"));
    assert!(text_report.contains("ESTADÍSTICAS RESUMIDAS"));

    let csv_report = simulation.generate_csv_report(&metrics);
    assert!(csv_report.starts_with("PID,Arrival Time,Burst Time"));
    assert_eq!(csv_report.lines().count(), 6); // 1 header + 5 processes

    let trace_csv = simulation.generate_trace_csv(&metrics);
    let total_burst = simulation.processes().total_burst_time() as usize;
    assert_eq!(trace_csv.lines().count(), total_burst + 1);
}

#[test]
fn test_metrics_serialize_to_json() {
    let processes = batch(&[("P1", 0, 4), ("P2", 0, 3)]);
    let metrics = SchedulingAlgorithm::round_robin(2).unwrap().run(&processes).unwrap();

    let json: serde_json::Value = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["algorithm"]["kind"], "round_robin");
    assert_eq!(json["algorithm"]["quantum"], 2);
    assert_eq!(json["processes"][0]["pid"], "P1");
    assert_eq!(json["slices"].as_array().unwrap().len(), 4);
}

#[test]
fn test_load_processes_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("processes.csv");
    let mut csv = std::fs::File::create(&csv_path).unwrap();
    writeln!(csv, "PID,Arrival Time,Burst Time").unwrap();
    writeln!(csv, "1,0,5").unwrap();
    writeln!(csv, "2,1,3").unwrap();
    drop(csv);

    let json_path = dir.path().join("processes.json");
    std::fs::write(
        &json_path,
        r#"[{"PID": 1, "Arrival Time": 0, "Burst Time": 5},
            {"PID": 2, "Arrival Time": 1, "Burst Time": 3}]"#,
    )
    .unwrap();

    let from_csv = input::load_processes(&csv_path).unwrap();
    let from_json = input::load_processes(&json_path).unwrap();
    assert_eq!(from_csv.as_slice(), from_json.as_slice());
    assert_eq!(from_csv[0], Process::new("1", 0, 5));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = input::load_processes(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
