//! # Módulo de Errores
//!
//! Errores tipados que produce el motor de simulación. La validación ocurre
//! una única vez antes de simular; si falla, no se generan resultados parciales.

use thiserror::Error;

use crate::process::Pid;

/// Error de validación del lote de procesos de entrada.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// El lote no contiene ningún proceso
    #[error("la lista de procesos está vacía")]
    EmptyProcessList,

    /// Dos procesos comparten el mismo identificador
    #[error("PID duplicado: {0}")]
    DuplicatePid(Pid),

    /// Un tiempo de llegada o de ráfaga es negativo
    #[error("el proceso {pid} tiene {field} negativo ({value})")]
    NegativeTime {
        pid: Pid,
        field: &'static str,
        value: i64,
    },

    /// Ráfaga de CPU igual a cero
    #[error("el proceso {0} tiene burst time igual a 0")]
    ZeroBurst(Pid),

    /// Los tiempos del lote no caben en el reloj de la simulación
    #[error("los tiempos del lote superan el rango representable del reloj")]
    TimeOverflow,
}

/// Errores del simulador.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// El lote de procesos no superó la validación
    #[error("entrada inválida: {0}")]
    InvalidInput(#[from] InputError),

    /// Parámetro de algoritmo fuera de rango (por ejemplo, quantum 0)
    #[error("configuración inválida: {0}")]
    InvalidConfiguration(String),

    /// El reloj avanzó más ticks ociosos seguidos de los posibles
    #[error("la simulación no progresa: {idle_ticks} ticks ociosos consecutivos en t={time}")]
    Stalled { time: u64, idle_ticks: u64 },

    /// La simulación terminó con un proceso sin completar
    #[error("el proceso {pid} no terminó su ejecución")]
    Unfinished { pid: Pid },
}

impl SchedulerError {
    /// Indica si el error proviene de la validación de entrada o configuración.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::InvalidConfiguration(_)
        )
    }
}
