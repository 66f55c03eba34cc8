use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use cpu_scheduling_simulator::{
    config, input, MetricsCalculator, ProcessSet, SchedulingAlgorithm, Simulation,
    SimulationMetrics,
};

/// Simulador de algoritmos de planificación de CPU.
#[derive(Parser, Debug)]
#[command(name = "cpu-scheduling-simulator", version, about)]
struct Cli {
    /// Archivo de procesos (.json o .csv); sin él se usa el lote de ejemplo
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Algoritmo a ejecutar; sin él se abre el menú interactivo
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Quantum de Round Robin (al menos 1)
    #[arg(
        short,
        long,
        default_value_t = config::DEFAULT_QUANTUM,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    quantum: u64,

    /// Carpeta de salida de los resultados
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Formato de los archivos exportados
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// No escribir archivos, solo mostrar las tablas
    #[arg(long)]
    no_export: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Fcfs,
    SjfNp,
    SjfP,
    LjfP,
    Rr,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Operaciones que puede pedir el usuario.
enum Command {
    Run(SchedulingAlgorithm),
    CompareAll,
    Exit,
}

impl Command {
    fn from_arg(arg: AlgorithmArg, quantum: u64) -> Result<Self> {
        Ok(match arg {
            AlgorithmArg::Fcfs => Self::Run(SchedulingAlgorithm::Fcfs),
            AlgorithmArg::SjfNp => Self::Run(SchedulingAlgorithm::SjfNonPreemptive),
            AlgorithmArg::SjfP => Self::Run(SchedulingAlgorithm::SjfPreemptive),
            AlgorithmArg::LjfP => Self::Run(SchedulingAlgorithm::LjfPreemptive),
            AlgorithmArg::Rr => Self::Run(SchedulingAlgorithm::round_robin(quantum)?),
            AlgorithmArg::All => Self::CompareAll,
        })
    }

    fn from_menu_choice(choice: &str, quantum: u64) -> Result<Option<Self>> {
        let arg = match choice.trim() {
            "1" => AlgorithmArg::Fcfs,
            "2" => AlgorithmArg::SjfNp,
            "3" => AlgorithmArg::SjfP,
            "4" => AlgorithmArg::LjfP,
            "5" => AlgorithmArg::Rr,
            "6" => AlgorithmArg::All,
            "7" => return Ok(Some(Self::Exit)),
            _ => return Ok(None),
        };
        Self::from_arg(arg, quantum).map(Some)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    SchedulingAlgorithm::round_robin(cli.quantum)?;

    let processes = match &cli.input {
        Some(path) => input::load_processes(path)
            .with_context(|| format!("no se pudo cargar {}", path.display()))?,
        None => ProcessSet::new(config::default_processes())?,
    };

    match cli.algorithm {
        Some(arg) => execute(&cli, &processes, Command::from_arg(arg, cli.quantum)?),
        None => interactive(&cli, &processes),
    }
}

/// Menú interactivo: repite hasta que el usuario elige salir o cierra la entrada.
fn interactive(cli: &Cli, processes: &ProcessSet) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("=================");
        println!("     SCHEDULE    ");
        println!("=================");
        println!("1. First Come First Serve");
        println!("2. Shortest Job First (No preemptivo)");
        println!("3. Shortest Job First (Preemptivo)");
        println!("4. Longest Job First (Preemptivo)");
        println!("5. Round Robin (quantum = {})", cli.quantum);
        println!("6. Comparar todos los algoritmos");
        println!("7. Salir");
        print!("Seleccione una opción (1-7): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };

        match Command::from_menu_choice(&line?, cli.quantum)? {
            Some(Command::Exit) => {
                println!("Saliendo del programa.");
                return Ok(());
            }
            Some(command) => execute(cli, processes, command)?,
            None => println!("Opción inválida. Elija un número entre 1 y 7."),
        }
    }
}

fn execute(cli: &Cli, processes: &ProcessSet, command: Command) -> Result<()> {
    match command {
        Command::Run(algorithm) => {
            let simulation = Simulation::new(processes.clone(), algorithm);
            let metrics = simulation.run()?;

            if algorithm.is_preemptive() {
                println!("\nTraza de ejecución ({}):", algorithm);
                print!("{}", simulation.generate_trace_report(&metrics));
            }
            print!("{}", simulation.generate_report(&metrics));
            export(cli, &metrics)?;
        }
        Command::CompareAll => {
            let runs = Simulation::run_all(processes, cli.quantum)?;
            print!("{}", MetricsCalculator::new().generate_comparison_report(&runs));
            for metrics in &runs {
                export(cli, metrics)?;
            }
        }
        Command::Exit => {}
    }
    println!();
    Ok(())
}

/// Escribe los resultados en la carpeta de salida.
fn export(cli: &Cli, metrics: &SimulationMetrics) -> Result<()> {
    if cli.no_export {
        return Ok(());
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("no se pudo crear {}", cli.output_dir.display()))?;

    let calculator = MetricsCalculator::new();
    let stem = metrics.algorithm.file_stem();

    let (path, content) = match cli.format {
        ExportFormat::Csv => (
            cli.output_dir.join(format!("{}_scheduling_output.csv", stem)),
            calculator.generate_csv_report(metrics),
        ),
        ExportFormat::Json => (
            cli.output_dir.join(format!("{}_scheduling_output.json", stem)),
            serde_json::to_string_pretty(metrics)?,
        ),
    };
    fs::write(&path, content).with_context(|| format!("no se pudo escribir {}", path.display()))?;
    println!("Resultados de {} guardados en {}", metrics.algorithm, path.display());

    if cli.format == ExportFormat::Csv && metrics.algorithm.is_preemptive() {
        let trace_path = cli.output_dir.join(format!("{}_trace.csv", stem));
        fs::write(&trace_path, calculator.generate_trace_csv(metrics))
            .with_context(|| format!("no se pudo escribir {}", trace_path.display()))?;
        log::info!("Traza guardada en {}", trace_path.display());
    }

    Ok(())
}
