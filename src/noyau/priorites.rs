// src/noyau/priorites.rs
//
// Table statique des priorités : symbole -> (niveau, arité, fixité).
// Consultée par la conversion RPN et par la vérification de structure.
// Jamais modifiée à l’exécution.

use super::jetons::{GenreJeton, Jeton};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixite {
    /// Avant l’opérande : fonctions, √, n√, moins unaire.
    Prefixe,
    /// Entre deux opérandes.
    Infixe,
    /// Après l’opérande : ! et %.
    Postfixe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Priorite {
    pub niveau: u8,
    pub arite: u8,
    pub fixite: Fixite,
}

const fn p(niveau: u8, arite: u8, fixite: Fixite) -> Priorite {
    Priorite {
        niveau,
        arite,
        fixite,
    }
}

/// Noms de fonctions reconnus (toujours suivis de '(').
pub const FONCTIONS: [&str; 8] = ["sin", "cos", "tan", "asin", "acos", "atan", "log", "ln"];

/// Symbole interne du moins unaire (devant autre chose qu’un nombre).
pub const NEG: &str = "neg";

/// Symbole de la racine (préfixe ou précédé d’un indice).
pub const RACINE: &str = "√";

const TABLE: &[(&str, Priorite)] = &[
    ("+", p(1, 2, Fixite::Infixe)),
    ("-", p(1, 2, Fixite::Infixe)),
    ("×", p(2, 2, Fixite::Infixe)),
    ("÷", p(2, 2, Fixite::Infixe)),
    ("mod", p(2, 2, Fixite::Infixe)),
    ("%", p(2, 1, Fixite::Postfixe)),
    ("sin", p(3, 1, Fixite::Prefixe)),
    ("cos", p(3, 1, Fixite::Prefixe)),
    ("tan", p(3, 1, Fixite::Prefixe)),
    ("asin", p(3, 1, Fixite::Prefixe)),
    ("acos", p(3, 1, Fixite::Prefixe)),
    ("atan", p(3, 1, Fixite::Prefixe)),
    ("log", p(3, 1, Fixite::Prefixe)),
    ("ln", p(3, 1, Fixite::Prefixe)),
    (RACINE, p(3, 1, Fixite::Prefixe)),
    (NEG, p(3, 1, Fixite::Prefixe)),
    ("^", p(4, 2, Fixite::Infixe)),
    ("!", p(4, 1, Fixite::Postfixe)),
];

/// Priorité d’un symbole (opérateur ou fonction).
pub fn priorite(symbole: &str) -> Option<Priorite> {
    TABLE
        .iter()
        .find(|(s, _)| *s == symbole)
        .map(|(_, pr)| *pr)
}

/// Priorité d’un jeton ; la racine à indice (“3√”) partage celle des fonctions.
pub fn priorite_jeton(j: &Jeton) -> Option<Priorite> {
    match j.genre {
        GenreJeton::RacineDegre => priorite(RACINE),
        GenreJeton::Operateur | GenreJeton::Fonction => priorite(&j.texte),
        _ => None,
    }
}

pub fn est_fonction(nom: &str) -> bool {
    FONCTIONS.contains(&nom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordre_des_niveaux() {
        let plus = priorite("+").unwrap();
        let fois = priorite("×").unwrap();
        let sin = priorite("sin").unwrap();
        let puiss = priorite("^").unwrap();
        assert!(plus.niveau < fois.niveau);
        assert!(fois.niveau < sin.niveau);
        assert!(sin.niveau < puiss.niveau);
        assert_eq!(priorite("mod").unwrap().niveau, fois.niveau);
    }

    #[test]
    fn arites() {
        assert_eq!(priorite("%").unwrap().arite, 1);
        assert_eq!(priorite("!").unwrap().fixite, Fixite::Postfixe);
        assert_eq!(priorite(NEG).unwrap().fixite, Fixite::Prefixe);
        assert_eq!(priorite("÷").unwrap().arite, 2);
        assert!(priorite("(").is_none());
        assert!(priorite("x").is_none());
    }

    #[test]
    fn racine_a_indice() {
        let j = Jeton::racine("3");
        assert_eq!(priorite_jeton(&j), priorite(RACINE));
    }
}
