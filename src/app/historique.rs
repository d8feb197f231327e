//! src/app/historique.rs
//!
//! Historique des calculs (côté appelant, jamais produit par le noyau).
//!
//! - plus récent en tête
//! - longueur bornée (les plus anciens sont oubliés)
//! - re-sélection d’une entrée par indice, effacement total
//! - aucune persistance entre sessions

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Longueur maximale par défaut.
pub const HISTORIQUE_MAX: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub expression: String,
    pub resultat: String,
    pub horodatage: DateTime<Local>,
}

impl HistoryItem {
    pub fn new(expression: impl Into<String>, resultat: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            resultat: resultat.into(),
            horodatage: Local::now(),
        }
    }

    /// Ligne lisible : "14:02:11  2+3 = 5"
    pub fn ligne(&self) -> String {
        format!(
            "{}  {} = {}",
            self.horodatage.format("%H:%M:%S"),
            self.expression,
            self.resultat
        )
    }
}

#[derive(Clone, Debug)]
pub struct Historique {
    items: Vec<HistoryItem>,
    max: usize,
}

impl Default for Historique {
    fn default() -> Self {
        Self::avec_max(HISTORIQUE_MAX)
    }
}

impl Historique {
    pub fn avec_max(max: usize) -> Self {
        Self {
            items: Vec::new(),
            max: max.max(1),
        }
    }

    /// Ajoute en tête ; tronque au-delà de `max`.
    pub fn ajoute(&mut self, item: HistoryItem) {
        self.items.insert(0, item);
        self.items.truncate(self.max);
    }

    /// Entrée `i` (0 = la plus récente).
    pub fn selectionne(&self, i: usize) -> Option<&HistoryItem> {
        self.items.get(i)
    }

    pub fn efface(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
