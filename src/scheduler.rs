//! # Módulo de Algoritmos de Planificación
//!
//! Este módulo define el selector de algoritmos de scheduling y la regla
//! de cuánto tiempo de CPU concede cada uno en una decisión.

use std::fmt;

use serde::Serialize;

use crate::algorithms;
use crate::config;
use crate::error::SchedulerError;
use crate::metrics::SimulationMetrics;
use crate::process::ProcessSet;

/// Algoritmos de planificación disponibles.
///
/// Cada algoritmo define una estrategia diferente para repartir la CPU:
/// - FCFS y SJF no preemptivo ejecutan cada proceso hasta terminar
/// - SJF y LJF preemptivos deciden de nuevo en cada unidad de tiempo
/// - Round Robin reparte la CPU en turnos de un quantum fijo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulingAlgorithm {
    /// First-Come First-Served: orden de llegada, sin preempción.
    Fcfs,

    /// Shortest Job First no preemptivo.
    ///
    /// Entre los procesos listos elige la ráfaga más corta y la ejecuta
    /// completa.
    SjfNonPreemptive,

    /// Shortest Remaining Time First.
    ///
    /// En cada unidad de tiempo elige el proceso listo con menor tiempo
    /// restante.
    SjfPreemptive,

    /// Longest Remaining Time First.
    ///
    /// En cada unidad de tiempo elige el proceso listo con mayor tiempo
    /// restante.
    LjfPreemptive,

    /// Round Robin: procesamiento preemptivo con quantum fijo.
    RoundRobin {
        /// Tiempo máximo de CPU continuo por turno
        quantum: u64,
    },
}

impl SchedulingAlgorithm {
    /// Crea un nuevo algoritmo FCFS.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let algorithm = SchedulingAlgorithm::fcfs();
    /// assert!(!algorithm.is_preemptive());
    /// ```
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    /// Crea un nuevo algoritmo Round Robin con el quantum especificado.
    ///
    /// # Arguments
    ///
    /// * `quantum` - Tiempo máximo de CPU por turno, debe ser mayor que 0
    ///
    /// # Returns
    ///
    /// El algoritmo, o `SchedulerError::InvalidConfiguration` si el quantum es 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let algorithm = SchedulingAlgorithm::round_robin(4).unwrap();
    /// assert_eq!(algorithm.get_quantum(), Some(4));
    /// assert!(SchedulingAlgorithm::round_robin(0).is_err());
    /// ```
    pub fn round_robin(quantum: u64) -> Result<Self, SchedulerError> {
        let algorithm = Self::RoundRobin { quantum };
        algorithm.validate()?;
        Ok(algorithm)
    }

    /// Los cinco algoritmos, en el orden del menú.
    pub fn all(quantum: u64) -> Result<Vec<Self>, SchedulerError> {
        Ok(vec![
            Self::Fcfs,
            Self::SjfNonPreemptive,
            Self::SjfPreemptive,
            Self::LjfPreemptive,
            Self::round_robin(quantum)?,
        ])
    }

    /// Comprueba los parámetros del algoritmo.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        match self {
            Self::RoundRobin { quantum: 0 } => Err(SchedulerError::InvalidConfiguration(
                "el quantum de Round Robin debe ser un entero positivo".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Determina si el algoritmo es preemptivo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert!(!SchedulingAlgorithm::SjfNonPreemptive.is_preemptive());
    /// assert!(SchedulingAlgorithm::LjfPreemptive.is_preemptive());
    /// ```
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs | Self::SjfNonPreemptive => false,
            Self::SjfPreemptive | Self::LjfPreemptive | Self::RoundRobin { .. } => true,
        }
    }

    /// Calcula cuánto tiempo de CPU se concede a un proceso en una decisión.
    ///
    /// # Arguments
    ///
    /// * `remaining_time` - Tiempo de ráfaga que le queda al proceso
    ///
    /// # Returns
    ///
    /// El tiempo a ejecutar antes de la siguiente decisión
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert_eq!(SchedulingAlgorithm::fcfs().calculate_quantum(8), 8);
    /// assert_eq!(SchedulingAlgorithm::SjfPreemptive.calculate_quantum(8), 1);
    ///
    /// let rr = SchedulingAlgorithm::round_robin(3).unwrap();
    /// assert_eq!(rr.calculate_quantum(8), 3);
    /// assert_eq!(rr.calculate_quantum(2), 2);
    /// ```
    pub fn calculate_quantum(&self, remaining_time: u64) -> u64 {
        match self {
            Self::Fcfs | Self::SjfNonPreemptive => remaining_time,
            Self::SjfPreemptive | Self::LjfPreemptive => remaining_time.min(1),
            Self::RoundRobin { quantum } => remaining_time.min(*quantum),
        }
    }

    /// Obtiene el quantum configurado para Round Robin.
    ///
    /// # Returns
    ///
    /// `Some(quantum)` si es Round Robin, `None` en otro caso
    pub fn get_quantum(&self) -> Option<u64> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Obtiene una descripción textual del algoritmo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let fcfs = SchedulingAlgorithm::fcfs();
    /// assert_eq!(fcfs.description(), "First-Come First-Served (no preemptivo)");
    ///
    /// let rr = SchedulingAlgorithm::round_robin(12).unwrap();
    /// assert!(rr.description().contains("Round Robin"));
    /// ```
    pub fn description(&self) -> String {
        match self {
            Self::Fcfs => "First-Come First-Served (no preemptivo)".to_string(),
            Self::SjfNonPreemptive => "Shortest Job First (no preemptivo)".to_string(),
            Self::SjfPreemptive => "Shortest Job First (preemptivo)".to_string(),
            Self::LjfPreemptive => "Longest Job First (preemptivo)".to_string(),
            Self::RoundRobin { quantum } => {
                format!("Round Robin preemptivo (quantum: {})", quantum)
            }
        }
    }

    /// Prefijo de los archivos exportados para este algoritmo.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::SjfNonPreemptive => "SJF_Non_Preemptive",
            Self::SjfPreemptive => "SJF_Preemptive",
            Self::LjfPreemptive => "LJF_Preemptive",
            Self::RoundRobin { .. } => "Round_Robin",
        }
    }

    /// Ejecuta la simulación completa del algoritmo sobre el lote.
    ///
    /// # Arguments
    ///
    /// * `processes` - Lote validado; no se modifica
    ///
    /// # Returns
    ///
    /// Las métricas de la ejecución, o un error si la configuración es inválida
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Process, ProcessSet, SchedulingAlgorithm};
    ///
    /// let set = ProcessSet::new(vec![Process::new("P1", 0, 4), Process::new("P2", 0, 3)]).unwrap();
    /// let metrics = SchedulingAlgorithm::round_robin(2).unwrap().run(&set).unwrap();
    /// assert_eq!(metrics.total_waiting_time, 6);
    /// ```
    pub fn run(&self, processes: &ProcessSet) -> Result<SimulationMetrics, SchedulerError> {
        self.validate()?;
        log::info!("Iniciando {} con {} procesos", self, processes.len());

        let metrics = match *self {
            Self::Fcfs => algorithms::fcfs::schedule(processes),
            Self::SjfNonPreemptive => algorithms::sjf::schedule(processes),
            Self::SjfPreemptive => algorithms::preemptive::shortest_remaining_first(processes),
            Self::LjfPreemptive => algorithms::preemptive::longest_remaining_first(processes),
            Self::RoundRobin { quantum } => algorithms::round_robin::schedule(processes, quantum),
        }?;

        log::info!(
            "{} completado: espera promedio {:.2}, turnaround promedio {:.2}",
            self,
            metrics.average_waiting_time,
            metrics.average_turnaround_time
        );
        Ok(metrics)
    }
}

impl Default for SchedulingAlgorithm {
    fn default() -> Self {
        Self::RoundRobin {
            quantum: config::DEFAULT_QUANTUM,
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::SjfNonPreemptive => write!(f, "SJF (no preemptivo)"),
            Self::SjfPreemptive => write!(f, "SJF (preemptivo)"),
            Self::LjfPreemptive => write!(f, "LJF (preemptivo)"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
        }
    }
}
