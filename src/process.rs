//! # Módulo de Procesos
//!
//! Define los procesos que recibe el simulador y el lote validado e inmutable
//! que comparten todas las ejecuciones de los algoritmos.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{InputError, SchedulerError};

/// Identificador opaco de un proceso.
///
/// Solo se compara por igualdad; el orden de desempate de los algoritmos
/// usa la posición del proceso en el lote, no el valor del PID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "PidRecord")]
pub struct Pid(String);

impl Pid {
    /// Crea un PID a partir de cualquier texto.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Devuelve el PID como texto.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Pid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for Pid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// PID tal como aparece en un archivo: las hojas de cálculo suelen guardarlo
/// como número.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PidRecord {
    Number(i64),
    Text(String),
}

impl From<PidRecord> for Pid {
    fn from(record: PidRecord) -> Self {
        match record {
            PidRecord::Number(n) => Self(n.to_string()),
            PidRecord::Text(s) => Self(s),
        }
    }
}

/// Proceso de entrada: una única ráfaga de CPU que llega en un instante dado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProcessRecord")]
pub struct Process {
    /// Identificador único dentro del lote
    pub pid: Pid,
    /// Instante en que el proceso pasa a estar listo
    pub arrival_time: u64,
    /// Tiempo total de CPU que necesita
    pub burst_time: u64,
}

impl Process {
    /// Crea un nuevo proceso.
    ///
    /// # Arguments
    ///
    /// * `pid` - Identificador del proceso
    /// * `arrival_time` - Instante de llegada
    /// * `burst_time` - Ráfaga de CPU requerida
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// let process = Process::new("P1", 0, 5);
    /// assert_eq!(process.pid.as_str(), "P1");
    /// assert_eq!(process.burst_time, 5);
    /// ```
    pub fn new(pid: impl Into<Pid>, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
        }
    }

    /// Crea un proceso a partir de tiempos con signo, rechazando los negativos.
    ///
    /// # Returns
    ///
    /// El proceso, o `InputError::NegativeTime` si algún tiempo es negativo
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// assert!(Process::try_new("P1", 0, 4).is_ok());
    /// assert!(Process::try_new("P1", -1, 4).is_err());
    /// ```
    pub fn try_new(
        pid: impl Into<Pid>,
        arrival_time: i64,
        burst_time: i64,
    ) -> Result<Self, InputError> {
        let pid = pid.into();
        let arrival_time = non_negative(&pid, "arrival time", arrival_time)?;
        let burst_time = non_negative(&pid, "burst time", burst_time)?;
        Ok(Self {
            pid,
            arrival_time,
            burst_time,
        })
    }
}

fn non_negative(pid: &Pid, field: &'static str, value: i64) -> Result<u64, InputError> {
    u64::try_from(value).map_err(|_| InputError::NegativeTime {
        pid: pid.clone(),
        field,
        value,
    })
}

/// Registro crudo de un proceso tal como llega de JSON.
///
/// Los tiempos llevan signo para poder rechazar valores negativos con un
/// error descriptivo en vez de un fallo genérico de deserialización.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRecord {
    #[serde(alias = "PID", alias = "id")]
    pub pid: PidRecord,
    #[serde(alias = "arrival", alias = "Arrival Time")]
    pub arrival_time: i64,
    #[serde(alias = "burst", alias = "Burst Time")]
    pub burst_time: i64,
}

impl TryFrom<ProcessRecord> for Process {
    type Error = InputError;

    fn try_from(record: ProcessRecord) -> Result<Self, Self::Error> {
        Process::try_new(Pid::from(record.pid), record.arrival_time, record.burst_time)
    }
}

/// Lote de procesos validado e inmutable.
///
/// Cada proceso conserva la posición que tenía en la entrada; los algoritmos
/// indexan su estado por esa posición.
#[derive(Debug, Clone)]
pub struct ProcessSet {
    processes: Vec<Process>,
    by_pid: HashMap<Pid, usize>,
}

impl ProcessSet {
    /// Valida y construye un lote de procesos.
    ///
    /// # Arguments
    ///
    /// * `processes` - Procesos en el orden de entrada
    ///
    /// # Returns
    ///
    /// El lote validado, o `SchedulerError::InvalidInput` si está vacío,
    /// tiene PIDs duplicados, alguna ráfaga es 0 o sus tiempos desbordan el reloj
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Process, ProcessSet};
    ///
    /// let set = ProcessSet::new(vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(ProcessSet::new(vec![]).is_err());
    /// ```
    pub fn new(processes: Vec<Process>) -> Result<Self, SchedulerError> {
        if processes.is_empty() {
            return Err(InputError::EmptyProcessList.into());
        }

        let mut by_pid = HashMap::with_capacity(processes.len());
        for (index, process) in processes.iter().enumerate() {
            if process.burst_time == 0 {
                return Err(InputError::ZeroBurst(process.pid.clone()).into());
            }
            if by_pid.insert(process.pid.clone(), index).is_some() {
                return Err(InputError::DuplicatePid(process.pid.clone()).into());
            }
        }
        clock_horizon(&processes).ok_or(InputError::TimeOverflow)?;

        Ok(Self { processes, by_pid })
    }

    /// Número de procesos del lote (siempre al menos 1).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Un lote validado nunca está vacío.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Posición de un proceso en el lote a partir de su PID.
    pub fn index_of(&self, pid: &Pid) -> Option<usize> {
        self.by_pid.get(pid).copied()
    }

    /// Busca un proceso por PID.
    pub fn get(&self, pid: &Pid) -> Option<&Process> {
        self.index_of(pid).map(|index| &self.processes[index])
    }

    /// Índices ordenados por llegada; los empates conservan el orden de entrada.
    pub fn arrival_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&index| self.processes[index].arrival_time);
        order
    }

    /// Menor instante de llegada del lote.
    pub fn first_arrival_time(&self) -> u64 {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .min()
            .unwrap_or_default()
    }

    /// Mayor instante de llegada del lote.
    pub fn max_arrival_time(&self) -> u64 {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .max()
            .unwrap_or_default()
    }

    /// Suma de todas las ráfagas.
    pub fn total_burst_time(&self) -> u64 {
        self.processes
            .iter()
            .fold(0u64, |total, p| total.saturating_add(p.burst_time))
    }
}

/// Último instante que puede alcanzar el reloj: llegada máxima más todas las
/// ráfagas. Retorna `None` si ese instante, o la suma de las métricas de los
/// `n` procesos acotadas por él, no cabe en `u64`.
fn clock_horizon(processes: &[Process]) -> Option<u64> {
    let max_arrival = processes.iter().map(|p| p.arrival_time).max()?;
    let total_burst = processes
        .iter()
        .try_fold(0u64, |total, p| total.checked_add(p.burst_time))?;
    let horizon = max_arrival.checked_add(total_burst)?;
    horizon.checked_mul(processes.len() as u64)?;
    Some(horizon)
}

impl Index<usize> for ProcessSet {
    type Output = Process;

    fn index(&self, index: usize) -> &Self::Output {
        &self.processes[index]
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

impl TryFrom<Vec<Process>> for ProcessSet {
    type Error = SchedulerError;

    fn try_from(processes: Vec<Process>) -> Result<Self, Self::Error> {
        Self::new(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_list() {
        let err = ProcessSet::new(Vec::new()).unwrap_err();
        assert_eq!(err, SchedulerError::InvalidInput(InputError::EmptyProcessList));
    }

    #[test]
    fn test_rejects_duplicate_pid() {
        let err = ProcessSet::new(vec![Process::new("P1", 0, 2), Process::new("P1", 3, 4)])
            .unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InvalidInput(InputError::DuplicatePid(Pid::from("P1")))
        );
    }

    #[test]
    fn test_rejects_zero_burst() {
        let err = ProcessSet::new(vec![Process::new("P1", 0, 0)]).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InvalidInput(InputError::ZeroBurst(Pid::from("P1")))
        );
    }

    #[test]
    fn test_rejects_times_beyond_clock_range() {
        let big = i64::MAX as u64;
        let err = ProcessSet::new(vec![Process::new("P1", big, big), Process::new("P2", big, 2)])
            .unwrap_err();
        assert_eq!(err, SchedulerError::InvalidInput(InputError::TimeOverflow));

        // Los totales por proceso tampoco pueden desbordar
        let err = ProcessSet::new(vec![
            Process::new("P1", 0, u64::MAX / 2),
            Process::new("P2", 0, 1),
            Process::new("P3", 0, 1),
        ])
        .unwrap_err();
        assert_eq!(err, SchedulerError::InvalidInput(InputError::TimeOverflow));
    }

    #[test]
    fn test_accepts_large_times_within_range() {
        let set = ProcessSet::new(vec![Process::new("P1", 1 << 40, 1 << 20)]).unwrap();
        assert_eq!(set.total_burst_time(), 1 << 20);
    }

    #[test]
    fn test_try_new_rejects_negative_times() {
        let err = Process::try_new("P7", 2, -3).unwrap_err();
        assert_eq!(
            err,
            InputError::NegativeTime {
                pid: Pid::from("P7"),
                field: "burst time",
                value: -3,
            }
        );
    }

    #[test]
    fn test_arrival_order_is_stable() {
        let set = ProcessSet::new(vec![
            Process::new("A", 4, 1),
            Process::new("B", 0, 1),
            Process::new("C", 4, 1),
            Process::new("D", 0, 1),
        ])
        .unwrap();
        assert_eq!(set.arrival_order(), vec![1, 3, 0, 2]);
        assert_eq!(set.first_arrival_time(), 0);
        assert_eq!(set.max_arrival_time(), 4);
        assert_eq!(set.total_burst_time(), 4);
    }

    #[test]
    fn test_lookup_by_pid() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)])
            .unwrap();
        assert_eq!(set.index_of(&Pid::from("P2")), Some(1));
        assert_eq!(set.get(&Pid::from("P1")).map(|p| p.burst_time), Some(5));
        assert!(set.get(&Pid::from("P9")).is_none());
    }

    #[test]
    fn test_deserialize_numeric_pid_and_aliases() {
        let process: Process =
            serde_json::from_str(r#"{"PID": 3, "Arrival Time": 2, "Burst Time": 6}"#).unwrap();
        assert_eq!(process, Process::new("3", 2, 6));
    }

    #[test]
    fn test_deserialize_rejects_negative_arrival() {
        let result: Result<Process, _> =
            serde_json::from_str(r#"{"pid": "P1", "arrival_time": -1, "burst_time": 6}"#);
        assert!(result.is_err());
    }
}
