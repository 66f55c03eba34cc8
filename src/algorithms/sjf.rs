//! Shortest Job First no preemptivo.

use crate::error::SchedulerError;
use crate::metrics::SimulationMetrics;
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;
use crate::timeline::Timeline;

/// Elige entre los procesos listos el de ráfaga más corta y lo ejecuta
/// completo. Sin procesos listos, el reloj avanza un tick.
///
/// Empates: llegada más temprana, después posición en la entrada.
pub fn schedule(processes: &ProcessSet) -> Result<SimulationMetrics, SchedulerError> {
    let algorithm = SchedulingAlgorithm::SjfNonPreemptive;
    let mut timeline = Timeline::new(processes);

    while !timeline.is_finished() {
        match timeline.pick_ready_by(|index| processes[index].burst_time) {
            Some(index) => {
                let slice = algorithm.calculate_quantum(timeline.remaining(index));
                timeline.grant(index, slice);
            }
            None => timeline.idle_tick()?,
        }
    }

    timeline.finish(algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Pid, Process};

    fn pids(metrics: &SimulationMetrics) -> Vec<&str> {
        metrics.completion_order.iter().map(Pid::as_str).collect()
    }

    #[test]
    fn test_shorter_job_waiting_runs_first() {
        let processes = ProcessSet::new(vec![
            Process::new("P1", 0, 6),
            Process::new("P2", 1, 8),
            Process::new("P3", 2, 2),
        ])
        .unwrap();

        let metrics = schedule(&processes).unwrap();
        assert_eq!(pids(&metrics), vec!["P1", "P3", "P2"]);
        assert_eq!(metrics.process(&Pid::from("P3")).unwrap().waiting_time, 4);
        assert_eq!(metrics.process(&Pid::from("P2")).unwrap().waiting_time, 7);
    }

    #[test]
    fn test_running_job_is_not_interrupted() {
        let processes =
            ProcessSet::new(vec![Process::new("long", 0, 10), Process::new("short", 1, 1)])
                .unwrap();

        let metrics = schedule(&processes).unwrap();
        assert_eq!(metrics.slices.len(), 2);
        assert_eq!(pids(&metrics), vec!["long", "short"]);
    }

    #[test]
    fn test_idle_ticks_until_first_arrival() {
        let processes = ProcessSet::new(vec![Process::new("P1", 3, 2)]).unwrap();
        let metrics = schedule(&processes).unwrap();
        let p1 = &metrics.processes[0];
        assert_eq!((p1.start_time, p1.completion_time, p1.waiting_time), (3, 5, 0));
    }
}
