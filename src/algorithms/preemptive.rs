//! Planificación preemptiva por tiempo restante: SJF preemptivo (SRTF) y
//! LJF preemptivo.
//!
//! Ambos avanzan de unidad en unidad. En cada unidad se vuelve a elegir entre
//! los procesos listos según su tiempo restante; solo cambia si se busca el
//! menor o el mayor.

use std::cmp::Reverse;

use crate::error::SchedulerError;
use crate::metrics::SimulationMetrics;
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;
use crate::timeline::Timeline;

/// Shortest Remaining Time First.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::{Process, ProcessSet};
/// use cpu_scheduling_simulator::algorithms::preemptive;
///
/// let set = ProcessSet::new(vec![Process::new("P1", 0, 7), Process::new("P2", 2, 4)]).unwrap();
/// let metrics = preemptive::shortest_remaining_first(&set).unwrap();
/// assert_eq!(metrics.completion_order[0].as_str(), "P2");
/// ```
pub fn shortest_remaining_first(
    processes: &ProcessSet,
) -> Result<SimulationMetrics, SchedulerError> {
    let algorithm = SchedulingAlgorithm::SjfPreemptive;
    let mut timeline = Timeline::new(processes);

    while !timeline.is_finished() {
        let next = timeline.pick_ready_by(|index| timeline.remaining(index));
        step(&mut timeline, algorithm, next)?;
    }

    timeline.finish(algorithm)
}

/// Longest Remaining Time First.
pub fn longest_remaining_first(
    processes: &ProcessSet,
) -> Result<SimulationMetrics, SchedulerError> {
    let algorithm = SchedulingAlgorithm::LjfPreemptive;
    let mut timeline = Timeline::new(processes);

    while !timeline.is_finished() {
        let next = timeline.pick_ready_by(|index| Reverse(timeline.remaining(index)));
        step(&mut timeline, algorithm, next)?;
    }

    timeline.finish(algorithm)
}

/// Ejecuta una unidad del proceso elegido, o un tick ocioso si no hay ninguno.
fn step(
    timeline: &mut Timeline<'_>,
    algorithm: SchedulingAlgorithm,
    next: Option<usize>,
) -> Result<(), SchedulerError> {
    match next {
        Some(index) => {
            let slice = algorithm.calculate_quantum(timeline.remaining(index));
            timeline.grant(index, slice);
            Ok(())
        }
        None => timeline.idle_tick(),
    }
}
