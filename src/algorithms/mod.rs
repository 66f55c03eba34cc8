//! Implementaciones de los cinco algoritmos.
//!
//! Cada función recibe el lote validado en modo lectura, construye su propia
//! `Timeline` y la ejecuta hasta que todos los procesos terminan. Ningún
//! algoritmo comparte estado con otro.

pub mod fcfs;
pub mod preemptive;
pub mod round_robin;
pub mod sjf;
