//! # Módulo de Métricas y Reportes
//!
//! Este módulo se encarga de calcular y agregar las métricas de cada
//! ejecución, y de generar los reportes en texto y CSV que consumen la
//! consola y los archivos exportados.

use serde::Serialize;

use crate::process::Pid;
use crate::scheduler::SchedulingAlgorithm;

/// Métricas finales de un proceso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    /// PID del proceso
    pub pid: Pid,
    /// Instante de llegada
    pub arrival_time: u64,
    /// Ráfaga de CPU
    pub burst_time: u64,
    /// Primera vez que el proceso obtuvo la CPU
    pub start_time: u64,
    /// Instante en que terminó
    pub completion_time: u64,
    /// Tiempo listo pero sin CPU
    pub waiting_time: u64,
    /// Tiempo desde la llegada hasta la finalización
    pub turnaround_time: u64,
    /// Tiempo desde la llegada hasta la primera ejecución
    pub response_time: u64,
}

/// Una concesión de CPU: fila de la traza de ejecución.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionSlice {
    pub pid: Pid,
    pub arrival_time: u64,
    pub burst_time: u64,
    /// Inicio de la concesión
    pub start_time: u64,
    /// Reloj al terminar la concesión
    pub current_time: u64,
    /// Ráfaga pendiente tras la concesión
    pub remaining_time: u64,
    /// Espera acumulada hasta el inicio de la concesión
    pub waiting_time: u64,
    /// Turnaround, solo cuando la concesión completa el proceso
    pub turnaround_time: Option<u64>,
}

impl ExecutionSlice {
    /// Duración de la concesión.
    pub fn duration(&self) -> u64 {
        self.current_time - self.start_time
    }
}

/// Métricas agregadas de una ejecución completa.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationMetrics {
    /// Algoritmo ejecutado
    pub algorithm: SchedulingAlgorithm,
    /// Métricas de cada proceso, en orden de finalización
    pub processes: Vec<ProcessMetrics>,
    /// Traza de concesiones de CPU en orden cronológico
    pub slices: Vec<ExecutionSlice>,
    /// PIDs en orden de finalización
    pub completion_order: Vec<Pid>,
    /// Suma exacta de los tiempos de espera
    pub total_waiting_time: u64,
    /// Suma exacta de los turnaround
    pub total_turnaround_time: u64,
    /// Tiempo promedio de espera
    pub average_waiting_time: f64,
    /// Tiempo promedio de turnaround
    pub average_turnaround_time: f64,
    /// Desde la primera llegada hasta la última finalización
    pub schedule_span: u64,
    /// Tiempo sin procesos listos dentro del intervalo anterior
    pub idle_time: u64,
    /// Procesos completados por unidad de tiempo
    pub throughput: f64,
    /// Fracción del intervalo con la CPU ocupada
    pub cpu_utilization: f64,
}

impl SimulationMetrics {
    /// Busca las métricas de un proceso por PID.
    pub fn process(&self, pid: &Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|record| &record.pid == pid)
    }

    /// Instante de la última finalización.
    pub fn makespan(&self) -> u64 {
        self.processes
            .iter()
            .map(|record| record.completion_time)
            .max()
            .unwrap_or_default()
    }
}

/// Calculadora de métricas para la simulación.
///
/// Proporciona métodos para agregar las métricas de una ejecución y para
/// generar reportes formateados de los resultados.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Crea una nueva instancia del calculador de métricas.
    pub fn new() -> Self {
        Self
    }

    /// Calcula las métricas agregadas de una ejecución.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Algoritmo que produjo los resultados
    /// * `processes` - Métricas por proceso, una por cada proceso del lote
    /// * `slices` - Traza de concesiones de CPU
    ///
    /// # Returns
    ///
    /// `SimulationMetrics` con promedios sobre el número total de procesos
    pub fn calculate_simulation_metrics(
        &self,
        algorithm: SchedulingAlgorithm,
        processes: Vec<ProcessMetrics>,
        slices: Vec<ExecutionSlice>,
    ) -> SimulationMetrics {
        let count = processes.len();
        let total_waiting_time: u64 = processes.iter().map(|p| p.waiting_time).sum();
        let total_turnaround_time: u64 = processes.iter().map(|p| p.turnaround_time).sum();
        let total_burst_time: u64 = processes.iter().map(|p| p.burst_time).sum();

        let first_arrival = processes.iter().map(|p| p.arrival_time).min().unwrap_or_default();
        let last_completion = processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or_default();
        let schedule_span = last_completion.saturating_sub(first_arrival);

        let (throughput, cpu_utilization) = if schedule_span > 0 {
            (
                count as f64 / schedule_span as f64,
                total_burst_time as f64 / schedule_span as f64,
            )
        } else {
            (0.0, 0.0)
        };

        SimulationMetrics {
            algorithm,
            completion_order: processes.iter().map(|p| p.pid.clone()).collect(),
            average_waiting_time: Self::average(total_waiting_time, count),
            average_turnaround_time: Self::average(total_turnaround_time, count),
            total_waiting_time,
            total_turnaround_time,
            schedule_span,
            idle_time: schedule_span.saturating_sub(total_burst_time),
            throughput,
            cpu_utilization,
            processes,
            slices,
        }
    }

    /// Media aritmética con denominador `count`.
    pub fn average(total: u64, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        total as f64 / count as f64
    }

    /// Genera un reporte detallado de los resultados de una ejecución.
    pub fn generate_report(&self, metrics: &SimulationMetrics) -> String {
        let mut report = String::new();

        report.push_str(&format!("\n=== {} ===\n\n", metrics.algorithm.description()));

        report.push_str(&format!(
            "{:^8} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
            "PID", "Llegada", "Ráfaga", "Inicio", "Fin", "Espera", "Turnaround"
        ));
        report.push_str(&format!("{}\n", "-".repeat(76)));

        for record in &metrics.processes {
            report.push_str(&format!(
                "{:^8} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
                record.pid.as_str(),
                record.arrival_time,
                record.burst_time,
                record.start_time,
                record.completion_time,
                record.waiting_time,
                record.turnaround_time,
            ));
        }

        report.push_str("\n=== ESTADÍSTICAS RESUMIDAS ===\n");
        report.push_str(&format!("Procesos completados: {}\n", metrics.processes.len()));
        report.push_str(&format!(
            "Tiempo promedio de espera: {}\n",
            Self::format_average(metrics.average_waiting_time)
        ));
        report.push_str(&format!(
            "Tiempo promedio de turnaround: {}\n",
            Self::format_average(metrics.average_turnaround_time)
        ));
        report.push_str(&format!(
            "Intervalo de planificación: {} (ocioso: {})\n",
            metrics.schedule_span, metrics.idle_time
        ));
        report.push_str(&format!(
            "Throughput: {:.3} procesos/unidad\n",
            metrics.throughput
        ));
        report.push_str(&format!(
            "Utilización de CPU: {:.1}%\n",
            metrics.cpu_utilization * 100.0
        ));
        let order: Vec<&str> = metrics.completion_order.iter().map(Pid::as_str).collect();
        report.push_str(&format!("Orden de finalización: {:?}\n", order));

        report
    }

    /// Genera la tabla de la traza de ejecución.
    pub fn generate_trace_report(&self, metrics: &SimulationMetrics) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "{:^8} {:^10} {:^10} {:^10} {:^10} {:^12} {:^10}\n",
            "PID", "Llegada", "Ráfaga", "Restante", "Espera", "Turnaround", "Reloj"
        ));
        report.push_str(&format!("{}\n", "-".repeat(76)));

        for slice in &metrics.slices {
            let turnaround = slice
                .turnaround_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "{:^8} {:^10} {:^10} {:^10} {:^10} {:^12} {:^10}\n",
                slice.pid.as_str(),
                slice.arrival_time,
                slice.burst_time,
                slice.remaining_time,
                slice.waiting_time,
                turnaround,
                slice.current_time,
            ));
        }

        report
    }

    /// Genera una tabla comparando varias ejecuciones sobre el mismo lote.
    pub fn generate_comparison_report(&self, runs: &[SimulationMetrics]) -> String {
        let mut report = String::new();

        report.push_str("\n=== COMPARACIÓN DE ALGORITMOS ===\n\n");
        report.push_str(&format!(
            "{:<26} {:>14} {:>18} {:>12}\n",
            "Algoritmo", "Espera prom.", "Turnaround prom.", "Fin"
        ));
        report.push_str(&format!("{}\n", "-".repeat(73)));

        for metrics in runs {
            report.push_str(&format!(
                "{:<26} {:>14} {:>18} {:>12}\n",
                metrics.algorithm.to_string(),
                Self::format_average(metrics.average_waiting_time),
                Self::format_average(metrics.average_turnaround_time),
                metrics.makespan(),
            ));
        }

        report
    }

    /// Genera el resultado por proceso en formato CSV.
    pub fn generate_csv_report(&self, metrics: &SimulationMetrics) -> String {
        let mut csv = String::new();

        csv.push_str("PID,Arrival Time,Burst Time,Start Time,Completion Time,Waiting Time,Turnaround Time\n");

        for record in &metrics.processes {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                record.pid,
                record.arrival_time,
                record.burst_time,
                record.start_time,
                record.completion_time,
                record.waiting_time,
                record.turnaround_time,
            ));
        }

        csv
    }

    /// Genera la traza de ejecución en formato CSV.
    pub fn generate_trace_csv(&self, metrics: &SimulationMetrics) -> String {
        let mut csv = String::new();

        csv.push_str("PID,Arrival Time,Burst Time,Remaining Time,Waiting Time,Turnaround Time,Current Time\n");

        for slice in &metrics.slices {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                slice.pid,
                slice.arrival_time,
                slice.burst_time,
                slice.remaining_time,
                slice.waiting_time,
                slice.turnaround_time.unwrap_or_default(),
                slice.current_time,
            ));
        }

        csv
    }

    /// Formatea un promedio con dos decimales.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::MetricsCalculator;
    ///
    /// assert_eq!(MetricsCalculator::format_average(10.0 / 3.0), "3.33");
    /// ```
    pub fn format_average(value: f64) -> String {
        format!("{:.2}", value)
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
