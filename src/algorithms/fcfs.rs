//! First-Come First-Served.

use crate::error::SchedulerError;
use crate::metrics::SimulationMetrics;
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;
use crate::timeline::Timeline;

/// Ejecuta los procesos en orden de llegada, cada uno hasta terminar.
///
/// Si la CPU queda libre antes de la siguiente llegada, el reloj salta
/// directamente a esa llegada.
pub fn schedule(processes: &ProcessSet) -> Result<SimulationMetrics, SchedulerError> {
    let algorithm = SchedulingAlgorithm::Fcfs;
    let mut timeline = Timeline::new(processes);

    for index in processes.arrival_order() {
        let process = &processes[index];
        timeline.advance_to(process.arrival_time);
        let slice = algorithm.calculate_quantum(timeline.remaining(index));
        timeline.grant(index, slice);
    }

    timeline.finish(algorithm)
}
