// src/lib.rs
//
// Calculatrice scientifique : noyau d’évaluation + état applicatif.

pub mod app;
pub mod noyau;

pub use noyau::{evaluate, validate, ErreurCalc, ModeAngle};
