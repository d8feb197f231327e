// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Chaque erreur porte un message lisible + une étiquette de classe stable.

use thiserror::Error;

/// Classe d’erreur (étiquette stable, indépendante du message).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenreErreur {
    Syntaxe,
    Domaine,
    Arithmetique,
    Validation,
}

impl GenreErreur {
    /// Étiquette stable, utilisable par l’appelant (journal, tests, UI).
    pub fn tag(self) -> &'static str {
        match self {
            GenreErreur::Syntaxe => "SyntaxError",
            GenreErreur::Domaine => "DomainError",
            GenreErreur::Arithmetique => "ArithmeticError",
            GenreErreur::Validation => "ValidationError",
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalc {
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("erreur de domaine : {0}")]
    Domaine(String),

    #[error("erreur arithmétique : {0}")]
    Arithmetique(String),

    #[error("expression invalide : {0}")]
    Validation(String),
}

impl ErreurCalc {
    pub fn genre(&self) -> GenreErreur {
        match self {
            ErreurCalc::Syntaxe(_) => GenreErreur::Syntaxe,
            ErreurCalc::Domaine(_) => GenreErreur::Domaine,
            ErreurCalc::Arithmetique(_) => GenreErreur::Arithmetique,
            ErreurCalc::Validation(_) => GenreErreur::Validation,
        }
    }

    /// Message seul (sans préfixe de classe).
    pub fn message(&self) -> &str {
        match self {
            ErreurCalc::Syntaxe(m)
            | ErreurCalc::Domaine(m)
            | ErreurCalc::Arithmetique(m)
            | ErreurCalc::Validation(m) => m,
        }
    }

    /// Vrai pour les erreurs “de forme” (syntaxe ou validation).
    pub fn est_structurelle(&self) -> bool {
        matches!(self.genre(), GenreErreur::Syntaxe | GenreErreur::Validation)
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurCalc::Syntaxe(msg.into())
    }

    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalc::Domaine(msg.into())
    }

    pub(crate) fn arithmetique(msg: impl Into<String>) -> Self {
        ErreurCalc::Arithmetique(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ErreurCalc::Validation(msg.into())
    }
}

pub type ResultatCalc<T> = Result<T, ErreurCalc>;
