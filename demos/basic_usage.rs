//! Ejemplo básico de uso del simulador de planificación

use cpu_scheduling_simulator::{
    config, MetricsCalculator, ProcessSet, SchedulingAlgorithm, SchedulerError, Simulation,
};

fn main() -> Result<(), SchedulerError> {
    println!("=== Ejemplo: Uso Básico del Simulador ===\n");

    let processes = ProcessSet::new(config::default_processes())?;

    // Ejecutar simulación con FCFS
    println!("1. Ejecutando simulación con FCFS...");
    let fcfs_simulation = Simulation::new(processes.clone(), SchedulingAlgorithm::fcfs());
    let fcfs_metrics = fcfs_simulation.run()?;
    println!("{}", fcfs_simulation.generate_report(&fcfs_metrics));

    // Ejecutar simulación con Round Robin
    println!("2. Ejecutando simulación con Round Robin (quantum 4)...");
    let rr_simulation = Simulation::new(processes.clone(), SchedulingAlgorithm::round_robin(4)?);
    let rr_metrics = rr_simulation.run()?;
    println!("{}", rr_simulation.generate_report(&rr_metrics));

    // Comparación de los cinco algoritmos
    let runs = Simulation::run_all(&processes, config::DEFAULT_QUANTUM)?;
    println!("{}", MetricsCalculator::new().generate_comparison_report(&runs));

    let best = runs
        .iter()
        .min_by(|a, b| a.average_waiting_time.total_cmp(&b.average_waiting_time));
    if let Some(best) = best {
        println!(
            "Menor espera promedio: {} ({})",
            best.algorithm,
            MetricsCalculator::format_average(best.average_waiting_time)
        );
    }

    Ok(())
}
