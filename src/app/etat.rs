//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir l’état (entrée, résultat, erreur, mode d’angle, configuration,
//! démarche, historique) et offrir des opérations simples (C/AC/=) sans logique d’affichage.
//!
//! Contrats :
//! - L’évaluation est déléguée au noyau, en une seule passe.
//! - Actions déterministes, sans effet de bord caché.
//! - Le mode d’angle et la configuration sont passés explicitement au noyau.

use log::info;

use super::historique::{HistoryItem, Historique};
use super::touches::traduit_touche;
use crate::noyau::{eval_expression, ConfigCalcul, Demarche, ModeAngle};

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // affichage arrondi
    pub erreur: String,   // message d’erreur (vide si aucun)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub mode_angle: ModeAngle,
    pub config: ConfigCalcul,

    pub historique: Historique,
}

impl AppCalc {
    pub fn avec_config(config: ConfigCalcul) -> Self {
        Self {
            config: config.normalise(),
            ..Self::default()
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats), historique conservé.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
    }

    /// Ajoute le fragment d’une touche du pavé. Renvoie false si la touche est inconnue.
    pub fn insere_touche(&mut self, touche: &str) -> bool {
        match traduit_touche(touche) {
            Some(t) => {
                self.entree.push_str(t);
                self.erreur.clear();
                true
            }
            None => false,
        }
    }

    /// Bascule radians <-> degrés.
    pub fn bascule_mode(&mut self) {
        self.mode_angle = match self.mode_angle {
            ModeAngle::Radians => ModeAngle::Degres,
            ModeAngle::Degres => ModeAngle::Radians,
        };
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
    }

    /* ------------------------ “=” ------------------------ */

    /// Évalue l’entrée courante ; en cas de succès, l’ajoute à l’historique.
    pub fn evalue(&mut self) {
        let expr = self.entree.trim().to_string();

        match eval_expression(&expr, self.mode_angle, &self.config) {
            Ok(ev) => {
                info!("{expr} = {}", ev.affichage);
                self.historique
                    .ajoute(HistoryItem::new(expr, ev.affichage.clone()));
                self.set_resultat(ev.affichage, ev.demarche);
            }
            Err(e) => {
                info!("{expr} : {} ({})", e, e.genre().tag());
                self.set_erreur(e.to_string());
            }
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Recharge l’expression d’une entrée d’historique dans l’entrée.
    pub fn selectionne_historique(&mut self, i: usize) -> bool {
        let Some(item) = self.historique.selectionne(i) else {
            return false;
        };
        self.entree = item.expression.clone();
        self.erreur.clear();
        true
    }

    pub fn efface_historique(&mut self) {
        self.historique.efface();
    }
}
