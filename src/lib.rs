//! # Simulador de Planificación de CPU
//!
//! Esta biblioteca implementa un simulador determinista de eventos discretos
//! que calcula los tiempos de espera, turnaround y finalización de un lote
//! fijo de procesos bajo cinco algoritmos clásicos de planificación.
//!
//! ## Características principales
//!
//! - **Algoritmos**: FCFS, SJF no preemptivo, SJF preemptivo (SRTF),
//!   LJF preemptivo y Round Robin con quantum configurable.
//! - **Trazas**: cada concesión de CPU queda registrada, una fila por unidad
//!   en los algoritmos preemptivos y una por turno en Round Robin.
//! - **Métricas**: resultados por proceso y promedios sobre el total del lote.
//! - **Entrada validada**: los lotes vacíos, con PIDs repetidos, tiempos
//!   negativos o ráfagas nulas se rechazan antes de simular.
//!
//! ## Estructura del proyecto
//!
//! - `process`: Procesos de entrada y lote validado
//! - `scheduler`: Selector de algoritmos
//! - `algorithms`: Implementación de cada algoritmo
//! - `timeline`: Reloj y estado por proceso de una ejecución
//! - `metrics`: Cálculo de métricas y reportes
//! - `simulation`: Orquestación de ejecuciones
//! - `input`: Lectura de lotes desde JSON o CSV
//!
//! ## Ejemplo
//!
//! ```rust
//! use cpu_scheduling_simulator::{Process, ProcessSet, SchedulingAlgorithm};
//!
//! let processes = ProcessSet::new(vec![
//!     Process::new("P1", 0, 5),
//!     Process::new("P2", 1, 3),
//!     Process::new("P3", 2, 8),
//! ])
//! .unwrap();
//!
//! let metrics = SchedulingAlgorithm::fcfs().run(&processes).unwrap();
//! assert_eq!(metrics.total_waiting_time, 10);
//! assert_eq!(metrics.total_turnaround_time, 26);
//! ```

pub mod algorithms;
pub mod error;
pub mod input;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod timeline;

// Re-exportar las estructuras principales para facilitar su uso
pub use error::{InputError, SchedulerError};
pub use input::LoadError;
pub use metrics::{ExecutionSlice, MetricsCalculator, ProcessMetrics, SimulationMetrics};
pub use process::{Pid, Process, ProcessSet};
pub use scheduler::SchedulingAlgorithm;
pub use simulation::Simulation;

/// Configuración por defecto del simulador
pub mod config {
    use super::Process;

    /// Quantum por defecto para Round Robin
    pub const DEFAULT_QUANTUM: u64 = 12;

    /// Carpeta donde se exportan los resultados
    pub const DEFAULT_OUTPUT_DIR: &str = "output";

    /// Lote de demostración usado cuando no se indica archivo de entrada
    pub fn default_processes() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 24),
            Process::new("P2", 3, 17),
            Process::new("P3", 8, 9),
            Process::new("P4", 10, 30),
            Process::new("P5", 15, 12),
        ]
    }
}
