//! Round Robin con quantum fijo.

use crate::error::SchedulerError;
use crate::metrics::SimulationMetrics;
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;
use crate::timeline::Timeline;

/// Recorre los procesos en orden de llegada de forma cíclica y concede a cada
/// uno listo `min(quantum, restante)` unidades.
///
/// Un proceso que llega durante una vuelta se atiende en cuanto el recorrido
/// alcanza su posición. Si una vuelta completa no concede nada, el reloj avanza
/// un tick ocioso.
///
/// # Arguments
///
/// * `processes` - Lote validado
/// * `quantum` - Tiempo máximo por turno, mayor que 0
pub fn schedule(processes: &ProcessSet, quantum: u64) -> Result<SimulationMetrics, SchedulerError> {
    let algorithm = SchedulingAlgorithm::round_robin(quantum)?;
    let order = processes.arrival_order();
    let mut timeline = Timeline::new(processes);

    while !timeline.is_finished() {
        let mut granted = false;

        for &index in &order {
            if timeline.is_ready(index) {
                let slice = algorithm.calculate_quantum(timeline.remaining(index));
                timeline.grant(index, slice);
                granted = true;
            }
        }

        if !granted {
            timeline.idle_tick()?;
        }
    }

    timeline.finish(algorithm)
}
