//! # Módulo de Simulación Principal
//!
//! Este módulo coordina la ejecución de los algoritmos sobre un lote de
//! procesos y expone los reportes de los resultados.

use std::sync::mpsc;
use std::thread;

use crate::error::SchedulerError;
use crate::metrics::{MetricsCalculator, SimulationMetrics};
use crate::process::ProcessSet;
use crate::scheduler::SchedulingAlgorithm;

/// Orquestador de una simulación.
///
/// La `Simulation` conserva el lote de procesos y el algoritmo elegido, y
/// delega los reportes en la calculadora de métricas.
pub struct Simulation {
    /// Lote de procesos, compartido en modo lectura por cada ejecución
    processes: ProcessSet,
    /// Algoritmo de scheduling a utilizar
    algorithm: SchedulingAlgorithm,
    /// Calculadora de métricas para generar reportes
    metrics_calculator: MetricsCalculator,
}

impl Simulation {
    /// Crea una nueva simulación.
    ///
    /// # Arguments
    ///
    /// * `processes` - Lote validado de procesos
    /// * `algorithm` - Algoritmo de scheduling a utilizar
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{config, ProcessSet, SchedulingAlgorithm, Simulation};
    ///
    /// let processes = ProcessSet::new(config::default_processes()).unwrap();
    /// let simulation = Simulation::new(processes, SchedulingAlgorithm::fcfs());
    /// assert_eq!(simulation.processes().len(), 5);
    /// ```
    pub fn new(processes: ProcessSet, algorithm: SchedulingAlgorithm) -> Self {
        Self {
            processes,
            algorithm,
            metrics_calculator: MetricsCalculator::new(),
        }
    }

    pub fn processes(&self) -> &ProcessSet {
        &self.processes
    }

    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    /// Ejecuta la simulación completa y retorna las métricas resultantes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{config, ProcessSet, SchedulingAlgorithm, Simulation};
    ///
    /// let processes = ProcessSet::new(config::default_processes()).unwrap();
    /// let simulation = Simulation::new(processes, SchedulingAlgorithm::fcfs());
    /// let metrics = simulation.run().unwrap();
    /// println!("Tiempo promedio de espera: {:.2}", metrics.average_waiting_time);
    /// ```
    pub fn run(&self) -> Result<SimulationMetrics, SchedulerError> {
        self.algorithm.run(&self.processes)
    }

    /// Ejecuta los cinco algoritmos sobre el mismo lote, cada uno en su hilo.
    ///
    /// Las ejecuciones son independientes; los resultados se devuelven en el
    /// orden de `SchedulingAlgorithm::all`.
    ///
    /// # Arguments
    ///
    /// * `processes` - Lote validado de procesos
    /// * `quantum` - Quantum para Round Robin
    ///
    /// # Returns
    ///
    /// Las métricas de cada algoritmo, o el primer error encontrado
    pub fn run_all(
        processes: &ProcessSet,
        quantum: u64,
    ) -> Result<Vec<SimulationMetrics>, SchedulerError> {
        let algorithms = SchedulingAlgorithm::all(quantum)?;
        let (collector_tx, collector_rx) = mpsc::channel();

        thread::scope(|scope| {
            for (position, algorithm) in algorithms.iter().copied().enumerate() {
                let collector_tx = collector_tx.clone();
                scope.spawn(move || {
                    let result = algorithm.run(processes);
                    collector_tx.send((position, result)).ok();
                });
            }
        });
        drop(collector_tx);

        let mut results: Vec<(usize, Result<SimulationMetrics, SchedulerError>)> =
            collector_rx.iter().collect();
        results.sort_by_key(|(position, _)| *position);
        results.into_iter().map(|(_, result)| result).collect()
    }

    /// Genera un reporte detallado de los resultados.
    pub fn generate_report(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_report(metrics)
    }

    /// Genera la tabla de la traza de ejecución.
    pub fn generate_trace_report(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_trace_report(metrics)
    }

    /// Genera un reporte en formato CSV.
    pub fn generate_csv_report(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_csv_report(metrics)
    }

    /// Genera la traza de ejecución en formato CSV.
    pub fn generate_trace_csv(&self, metrics: &SimulationMetrics) -> String {
        self.metrics_calculator.generate_trace_csv(metrics)
    }
}
