//! Noyau d’évaluation exact
//!
//! Organisation interne :
//! - erreur.rs      : taxonomie des erreurs (ErreurCalc)
//! - config.rs      : configuration explicite (précision, affichage, plafonds)
//! - validation.rs  : pré-contrôle du texte brut
//! - jetons.rs      : tokenisation
//! - priorites.rs   : table des priorités (niveau, arité, fixité)
//! - rpn.rs         : shunting-yard + vérification de structure
//! - fixe.rs        : virgule fixe (π, exp, ln, atan, sin, cos, racines)
//! - trig.rs        : angles spéciaux + indéfini
//! - decimal.rs     : Reel + Contexte (arithmétique exacte / approchée)
//! - format.rs      : affichage final
//! - eval.rs        : pipeline complet + machine à pile

pub mod config;
pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod fixe;
pub mod format;
pub mod jetons;
pub mod priorites;
pub mod rpn;
pub mod trig;
pub mod validation;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::{Associativite, ConfigCalcul, ModeAngle};
pub use decimal::{Forme, Reel};
pub use erreur::{ErreurCalc, GenreErreur, ResultatCalc};
pub use eval::{eval_expression, evaluate, evaluate_avec, validate, Demarche, Evaluation};
