// src/noyau/config.rs
//
// Configuration explicite du calcul (aucun état global).
// Passée par référence à chaque évaluation.

use serde::{Deserialize, Serialize};

use super::erreur::{ErreurCalc, ResultatCalc};

/// Précision de travail par défaut (chiffres décimaux).
pub const CHIFFRES_DEFAUT: usize = 32;

/// Garde-fous : bornes de la précision de travail.
pub const CHIFFRES_MIN: usize = 30;
pub const CHIFFRES_MAX: usize = 200;

/// Plafond par défaut de la factorielle (170! reste fini en double, on garde la convention).
pub const PLAFOND_FACTORIELLE_DEFAUT: u32 = 170;

/// Plafond dur de la factorielle, quelle que soit la configuration.
pub const PLAFOND_FACTORIELLE_MAX: u32 = 3000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

/// Associativité de `^`.
/// - Droite : 2^3^2 = 2^(3^2) = 512
/// - Gauche : 2^3^2 = (2^3)^2 = 64
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Associativite {
    Gauche,
    #[default]
    Droite,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigCalcul {
    /// Précision de travail (chiffres après la virgule en virgule fixe).
    pub chiffres: usize,
    /// Nombre maximal de décimales affichées.
    pub max_decimales: usize,
    /// Un résultat à moins de 10^-epsilon_entier d’un entier s’affiche comme cet entier.
    pub epsilon_entier: u32,
    pub plafond_factorielle: u32,
    /// |x| >= 10^exposant_max est considéré comme non fini (dépassement).
    pub exposant_max: u32,
    pub associativite_puissance: Associativite,
}

impl Default for ConfigCalcul {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            max_decimales: 10,
            epsilon_entier: 12,
            plafond_factorielle: PLAFOND_FACTORIELLE_DEFAUT,
            exposant_max: 1000,
            associativite_puissance: Associativite::Droite,
        }
    }
}

impl ConfigCalcul {
    /// Garde-fou : ramène chaque champ dans ses bornes.
    pub fn normalise(mut self) -> Self {
        self.chiffres = self.chiffres.clamp(CHIFFRES_MIN, CHIFFRES_MAX);
        self.max_decimales = self.max_decimales.min(self.chiffres);
        self.epsilon_entier = self.epsilon_entier.clamp(1, self.chiffres as u32);
        self.exposant_max = self.exposant_max.clamp(10, 100_000);
        self.plafond_factorielle = self.plafond_factorielle.min(PLAFOND_FACTORIELLE_MAX);
        self
    }

    /// Lecture depuis un texte JSON (champs absents = valeurs par défaut).
    pub fn depuis_json(texte: &str) -> ResultatCalc<Self> {
        let cfg: ConfigCalcul = serde_json::from_str(texte)
            .map_err(|e| ErreurCalc::validation(format!("configuration illisible: {e}")))?;
        Ok(cfg.normalise())
    }
}
