// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// ---------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs, historique.rs, touches.rs)
// - Ré-exporter AppCalc (pour main.rs: use calculatrice_sci::app::AppCalc;)

pub mod etat;
pub mod historique;
pub mod touches;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;
pub use historique::{HistoryItem, Historique};
