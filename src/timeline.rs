//! # Módulo de Línea de Tiempo
//!
//! Estado compartido de una ejecución: el reloj simulado y los contadores de
//! cada proceso, guardados en vectores indexados por la posición del proceso
//! en el lote. Cada ejecución crea su propia `Timeline` y la consume al final.

use crate::error::SchedulerError;
use crate::metrics::{ExecutionSlice, MetricsCalculator, ProcessMetrics, SimulationMetrics};
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;

/// Reloj y estado por proceso de una simulación en curso.
pub struct Timeline<'a> {
    processes: &'a ProcessSet,
    current_time: u64,
    remaining: Vec<u64>,
    waiting: Vec<u64>,
    last_execution: Vec<u64>,
    first_start: Vec<Option<u64>>,
    completion: Vec<Option<u64>>,
    completed: usize,
    idle_streak: u64,
    idle_limit: u64,
    slices: Vec<ExecutionSlice>,
}

impl<'a> Timeline<'a> {
    /// Crea el estado inicial: reloj en 0 y todas las ráfagas pendientes.
    pub fn new(processes: &'a ProcessSet) -> Self {
        let n = processes.len();
        Self {
            processes,
            current_time: 0,
            remaining: processes.iter().map(|p| p.burst_time).collect(),
            waiting: vec![0; n],
            last_execution: processes.iter().map(|p| p.arrival_time).collect(),
            first_start: vec![None; n],
            completion: vec![None; n],
            completed: 0,
            idle_streak: 0,
            idle_limit: processes.max_arrival_time(),
            slices: Vec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.current_time
    }

    pub fn remaining(&self, index: usize) -> u64 {
        self.remaining[index]
    }

    /// Un proceso está listo si ya llegó y le queda ráfaga.
    pub fn is_ready(&self, index: usize) -> bool {
        self.remaining[index] > 0 && self.processes[index].arrival_time <= self.current_time
    }

    /// Índices de los procesos listos, en orden de entrada.
    pub fn ready(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.remaining.len()).filter(move |&index| self.is_ready(index))
    }

    /// Elige entre los listos el de menor clave.
    ///
    /// Empates: primero la llegada más temprana, después la posición en la
    /// entrada.
    pub fn pick_ready_by<K, F>(&self, key: F) -> Option<usize>
    where
        K: Ord,
        F: Fn(usize) -> K,
    {
        self.ready()
            .min_by_key(|&index| (key(index), self.processes[index].arrival_time, index))
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.remaining.len()
    }

    /// Adelanta el reloj hasta `time` si está por detrás; nunca retrocede.
    pub fn advance_to(&mut self, time: u64) {
        if time > self.current_time {
            log::debug!("t={}: CPU ociosa hasta t={}", self.current_time, time);
            self.current_time = time;
        }
    }

    /// Avanza una unidad de tiempo sin ejecutar nada.
    ///
    /// Más ticks ociosos consecutivos que la mayor llegada del lote solo
    /// pueden deberse a un error interno, y se reportan como `Stalled`.
    pub fn idle_tick(&mut self) -> Result<(), SchedulerError> {
        self.current_time += 1;
        self.idle_streak += 1;
        if self.idle_streak > self.idle_limit {
            log::warn!(
                "t={}: {} ticks ociosos consecutivos, se aborta la simulación",
                self.current_time,
                self.idle_streak
            );
            return Err(SchedulerError::Stalled {
                time: self.current_time,
                idle_ticks: self.idle_streak,
            });
        }
        log::debug!("t={}: tick ocioso", self.current_time);
        Ok(())
    }

    /// Concede `slice` unidades de CPU al proceso `index`.
    ///
    /// La espera acumulada crece con el tiempo transcurrido desde la última
    /// vez que el proceso dejó la CPU (o desde su llegada).
    pub fn grant(&mut self, index: usize, slice: u64) -> &ExecutionSlice {
        let processes = self.processes;
        let process = &processes[index];
        debug_assert!(self.is_ready(index));
        debug_assert!(slice > 0 && slice <= self.remaining[index]);

        let start = self.current_time;
        self.waiting[index] += start - self.last_execution[index];
        self.first_start[index].get_or_insert(start);

        self.current_time += slice;
        self.remaining[index] -= slice;
        self.last_execution[index] = self.current_time;
        self.idle_streak = 0;

        let turnaround_time = if self.remaining[index] == 0 {
            self.completion[index] = Some(self.current_time);
            self.completed += 1;
            let turnaround = self.current_time - process.arrival_time;
            debug_assert_eq!(turnaround, self.waiting[index] + process.burst_time);
            log::debug!(
                "t={}: {} termina (turnaround {}, espera {})",
                self.current_time,
                process.pid,
                turnaround,
                self.waiting[index]
            );
            Some(turnaround)
        } else {
            None
        };

        log::debug!(
            "t={}..{}: ejecuta {} (restante {})",
            start,
            self.current_time,
            process.pid,
            self.remaining[index]
        );

        self.slices.push(ExecutionSlice {
            pid: process.pid.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time: start,
            current_time: self.current_time,
            remaining_time: self.remaining[index],
            waiting_time: self.waiting[index],
            turnaround_time,
        });
        &self.slices[self.slices.len() - 1]
    }

    /// Cierra la simulación y calcula las métricas finales.
    ///
    /// Los resultados por proceso salen en orden de finalización. Espera y
    /// turnaround se derivan de los totales: `turnaround = fin - llegada` y
    /// `espera = turnaround - ráfaga`.
    pub fn finish(self, algorithm: SchedulingAlgorithm) -> Result<SimulationMetrics, SchedulerError> {
        let mut records = Vec::with_capacity(self.processes.len());
        for (index, process) in self.processes.iter().enumerate() {
            let (Some(completion_time), Some(start_time)) =
                (self.completion[index], self.first_start[index])
            else {
                return Err(SchedulerError::Unfinished {
                    pid: process.pid.clone(),
                });
            };

            let turnaround_time = completion_time - process.arrival_time;
            let waiting_time = turnaround_time - process.burst_time;
            debug_assert_eq!(waiting_time, self.waiting[index]);

            records.push(ProcessMetrics {
                pid: process.pid.clone(),
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                start_time,
                completion_time,
                waiting_time,
                turnaround_time,
                response_time: start_time - process.arrival_time,
            });
        }
        records.sort_by_key(|record| record.completion_time);

        Ok(MetricsCalculator::new().calculate_simulation_metrics(
            algorithm,
            records,
            self.slices,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn set(processes: Vec<Process>) -> ProcessSet {
        ProcessSet::new(processes).unwrap()
    }

    #[test]
    fn test_grant_accrues_waiting_since_last_execution() {
        let processes = set(vec![Process::new("P1", 0, 4), Process::new("P2", 0, 3)]);
        let mut timeline = Timeline::new(&processes);

        assert_eq!(timeline.grant(0, 2).waiting_time, 0);
        assert_eq!(timeline.grant(1, 2).waiting_time, 2);
        let slice = timeline.grant(0, 2);
        assert_eq!(slice.waiting_time, 2);
        assert_eq!(slice.turnaround_time, Some(6));
        assert_eq!(timeline.grant(1, 1).turnaround_time, Some(7));
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_advance_to_never_goes_back() {
        let processes = set(vec![Process::new("P1", 3, 1)]);
        let mut timeline = Timeline::new(&processes);
        timeline.advance_to(3);
        timeline.advance_to(1);
        assert_eq!(timeline.now(), 3);
    }

    #[test]
    fn test_pick_ready_breaks_ties_by_arrival_then_position() {
        let processes = set(vec![
            Process::new("A", 1, 5),
            Process::new("B", 0, 5),
            Process::new("C", 0, 5),
        ]);
        let mut timeline = Timeline::new(&processes);
        timeline.advance_to(1);
        assert_eq!(timeline.pick_ready_by(|i| timeline.remaining(i)), Some(1));
    }

    #[test]
    fn test_nothing_ready_before_first_arrival() {
        let processes = set(vec![Process::new("P1", 2, 1)]);
        let mut timeline = Timeline::new(&processes);
        assert_eq!(timeline.ready().count(), 0);
        timeline.idle_tick().unwrap();
        timeline.idle_tick().unwrap();
        assert!(timeline.is_ready(0));
    }

    #[test]
    fn test_idle_guard_trips_past_max_arrival() {
        let processes = set(vec![Process::new("P1", 1, 1)]);
        let mut timeline = Timeline::new(&processes);
        timeline.idle_tick().unwrap();
        let err = timeline.idle_tick().unwrap_err();
        assert_eq!(err, SchedulerError::Stalled { time: 2, idle_ticks: 2 });
    }

    #[test]
    fn test_finish_reports_unfinished_process() {
        let processes = set(vec![Process::new("P1", 0, 2)]);
        let mut timeline = Timeline::new(&processes);
        timeline.grant(0, 1);
        let err = timeline.finish(SchedulingAlgorithm::Fcfs).unwrap_err();
        assert!(matches!(err, SchedulerError::Unfinished { .. }));
    }
}
