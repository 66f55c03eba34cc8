//! # Módulo de Entrada
//!
//! Lectura de lotes de procesos desde archivos JSON o CSV. Todos los
//! cargadores devuelven un `ProcessSet` ya validado.
//!
//! Formato JSON: un arreglo de objetos con `pid`, `arrival_time` y
//! `burst_time` (se aceptan también `PID`, `Arrival Time` y `Burst Time`).
//!
//! Formato CSV: una fila de encabezado con las columnas `PID`,
//! `Arrival Time` y `Burst Time` en cualquier orden.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::SchedulerError;
use crate::process::{Process, ProcessSet};

/// Errores al cargar un lote de procesos.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no se pudo leer {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV inválido en la línea {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("formato de archivo no soportado: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] SchedulerError),
}

/// Carga un lote de procesos eligiendo el formato por la extensión.
///
/// # Arguments
///
/// * `path` - Ruta a un archivo `.json` o `.csv`
///
/// # Returns
///
/// El lote validado, o un `LoadError` si no se puede leer o es inválido
pub fn load_processes(path: &Path) -> Result<ProcessSet, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let read = || {
        fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let processes = match extension.as_str() {
        "json" => parse_json(&read()?)?,
        "csv" => parse_csv(&read()?)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    log::info!("Cargados {} procesos desde {}", processes.len(), path.display());
    Ok(processes)
}

/// Lee un lote desde un arreglo JSON.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::input::parse_json;
///
/// let set = parse_json(r#"[{"pid": "P1", "arrival_time": 0, "burst_time": 5}]"#).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
pub fn parse_json(content: &str) -> Result<ProcessSet, LoadError> {
    let processes: Vec<Process> = serde_json::from_str(content)?;
    Ok(ProcessSet::new(processes)?)
}

/// Lee un lote desde texto CSV con encabezado.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::input::parse_csv;
///
/// let set = parse_csv("PID,Arrival Time,Burst Time\nP1,0,5\nP2,1,3\n").unwrap();
/// assert_eq!(set.len(), 2);
/// ```
pub fn parse_csv(content: &str) -> Result<ProcessSet, LoadError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(LoadError::Csv {
        line: 1,
        message: "falta el encabezado".to_string(),
    })?;
    let columns = CsvColumns::from_header(header_line, header)?;

    let mut processes = Vec::new();
    for (line, row) in lines {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() < columns.width {
            return Err(LoadError::Csv {
                line,
                message: format!(
                    "se esperaban {} columnas y hay {}",
                    columns.width,
                    fields.len()
                ),
            });
        }

        let arrival_time = parse_time(line, "Arrival Time", fields[columns.arrival])?;
        let burst_time = parse_time(line, "Burst Time", fields[columns.burst])?;
        let process = Process::try_new(fields[columns.pid], arrival_time, burst_time)
            .map_err(SchedulerError::from)?;
        processes.push(process);
    }

    Ok(ProcessSet::new(processes)?)
}

/// Posición de cada columna requerida en el encabezado.
struct CsvColumns {
    pid: usize,
    arrival: usize,
    burst: usize,
    width: usize,
}

impl CsvColumns {
    fn from_header(line: usize, header: &str) -> Result<Self, LoadError> {
        let names: Vec<String> = header.split(',').map(normalize_column).collect();
        let find = |aliases: &[&str], label: &str| {
            names
                .iter()
                .position(|name| aliases.contains(&name.as_str()))
                .ok_or_else(|| LoadError::Csv {
                    line,
                    message: format!("falta la columna {}", label),
                })
        };

        let pid = find(&["pid", "id"], "PID")?;
        let arrival = find(&["arrival_time", "arrival"], "Arrival Time")?;
        let burst = find(&["burst_time", "burst"], "Burst Time")?;

        Ok(Self {
            pid,
            arrival,
            burst,
            width: pid.max(arrival).max(burst) + 1,
        })
    }
}

fn normalize_column(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .split([' ', '_', '-'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn parse_time(line: usize, column: &str, value: &str) -> Result<i64, LoadError> {
    value.parse().map_err(|_| LoadError::Csv {
        line,
        message: format!("{} no es un entero: {:?}", column, value),
    })
}
