// src/noyau/jetons.rs

use super::erreur::{ErreurCalc, ResultatCalc};
use super::priorites::{est_fonction, priorite, NEG, RACINE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreJeton {
    Nombre,
    Constante, // π ou e
    Operateur,
    Fonction,
    ParG,
    ParD,
    RacineDegre, // "3√" : racine n-ième de l’opérande suivant
}

/// Jeton immuable : genre + texte normalisé + arité (0 pour les opérandes/parenthèses).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub genre: GenreJeton,
    pub texte: String,
    pub arite: u8,
}

impl Jeton {
    fn nouveau(genre: GenreJeton, texte: impl Into<String>, arite: u8) -> Self {
        Self {
            genre,
            texte: texte.into(),
            arite,
        }
    }

    pub fn nombre(texte: impl Into<String>) -> Self {
        Self::nouveau(GenreJeton::Nombre, texte, 0)
    }

    pub fn constante(texte: &str) -> Self {
        Self::nouveau(GenreJeton::Constante, texte, 0)
    }

    pub fn operateur(symbole: &str) -> Self {
        let arite = priorite(symbole).map_or(2, |p| p.arite);
        Self::nouveau(GenreJeton::Operateur, symbole, arite)
    }

    pub fn fonction(nom: &str) -> Self {
        Self::nouveau(GenreJeton::Fonction, nom, 1)
    }

    pub fn par_g() -> Self {
        Self::nouveau(GenreJeton::ParG, "(", 0)
    }

    pub fn par_d() -> Self {
        Self::nouveau(GenreJeton::ParD, ")", 0)
    }

    /// Racine à indice : `degre` est le littéral qui précède √.
    pub fn racine(degre: &str) -> Self {
        Self::nouveau(GenreJeton::RacineDegre, format!("{degre}{RACINE}"), 1)
    }

    /// Indice d’une racine “n√”.
    pub fn degre_racine(&self) -> Option<&str> {
        if self.genre == GenreJeton::RacineDegre {
            self.texte.strip_suffix(RACINE)
        } else {
            None
        }
    }

    pub fn est_operande(&self) -> bool {
        matches!(self.genre, GenreJeton::Nombre | GenreJeton::Constante)
    }
}

/// Le jeton précédent autorise-t-il un signe “-” collé au nombre suivant ?
/// Oui : début, après un opérateur, une fonction ou '(' ; sauf après ! et %.
fn signe_possible(prec: Option<&Jeton>) -> bool {
    match prec {
        None => true,
        Some(j) => match j.genre {
            GenreJeton::Operateur => j.texte != "!" && j.texte != "%",
            GenreJeton::Fonction | GenreJeton::ParG | GenreJeton::RacineDegre => true,
            _ => false,
        },
    }
}

fn debut_nombre(c: Option<&char>) -> bool {
    matches!(c, Some(c) if c.is_ascii_digit() || *c == '.')
}

/// Lit un littéral décimal à partir de `i`. Rejette les points multiples.
fn lit_nombre(chars: &[char], i: &mut usize) -> ResultatCalc<String> {
    let start = *i;
    let mut points = 0;
    while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '.') {
        if chars[*i] == '.' {
            if *i > start && chars[*i - 1] == '.' {
                return Err(ErreurCalc::syntaxe("points décimaux consécutifs"));
            }
            points += 1;
        }
        *i += 1;
    }
    let txt: String = chars[start..*i].iter().collect();
    if points > 1 {
        return Err(ErreurCalc::syntaxe(format!(
            "plusieurs points décimaux dans '{txt}'"
        )));
    }
    if txt == "." {
        return Err(ErreurCalc::syntaxe("nombre invalide: '.'"));
    }
    Ok(txt)
}

/// Mot alphabétique qui commence en `i` (sans avancer).
fn mot_a(chars: &[char], i: usize) -> String {
    chars[i..]
        .iter()
        .take_while(|c| c.is_alphabetic() && **c != 'π')
        .collect::<String>()
        .to_lowercase()
}

fn est_constante(mot: &str) -> bool {
    matches!(mot, "e" | "pi")
}

fn erreur_constante_chiffre(c: &str) -> ErreurCalc {
    ErreurCalc::syntaxe(format!(
        "constante {c} suivie d’un chiffre : insérez un ×, par exemple {c}×123"
    ))
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (12, 3.5, .5), signe collé selon le contexte
/// - opérateurs + - × ÷ ^ % ! mod (alias * et /)
/// - parenthèses ( )
/// - π / pi, e
/// - fonctions sin cos tan asin acos atan log ln, √ préfixe, “n√”
/// - multiplication implicite nombre-constante : 2π => 2 × π
pub fn tokenize(s: &str) -> ResultatCalc<Vec<Jeton>> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<Jeton> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Jeton::par_g());
                i += 1;
                continue;
            }
            ')' => {
                out.push(Jeton::par_d());
                i += 1;
                continue;
            }
            '-' => {
                if !signe_possible(out.last()) {
                    out.push(Jeton::operateur("-"));
                    i += 1;
                    continue;
                }
                if debut_nombre(chars.get(i + 1)) {
                    // signe collé : "-5" est un seul littéral
                    i += 1;
                    let txt = lit_nombre(&chars, &mut i)?;
                    if chars.get(i) == Some(&'√') {
                        // "-3√8" : le signe porte sur la racine entière
                        out.push(Jeton::operateur(NEG));
                        out.push(Jeton::racine(&txt));
                        i += 1;
                    } else {
                        out.push(Jeton::nombre(format!("-{txt}")));
                        implicite_constante(&chars, i, &mut out);
                    }
                } else {
                    out.push(Jeton::operateur(NEG));
                    i += 1;
                }
                continue;
            }
            '+' | '^' | '%' | '!' => {
                out.push(Jeton::operateur(&c.to_string()));
                i += 1;
                continue;
            }
            '×' | '*' => {
                out.push(Jeton::operateur("×"));
                i += 1;
                continue;
            }
            '÷' | '/' => {
                out.push(Jeton::operateur("÷"));
                i += 1;
                continue;
            }
            '√' => {
                out.push(Jeton::fonction(RACINE));
                i += 1;
                continue;
            }
            'π' => {
                if matches!(chars.get(i + 1), Some(d) if d.is_ascii_digit()) {
                    return Err(erreur_constante_chiffre("π"));
                }
                out.push(Jeton::constante("π"));
                i += 1;
                continue;
            }
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            let txt = lit_nombre(&chars, &mut i)?;
            if chars.get(i) == Some(&'√') {
                out.push(Jeton::racine(&txt));
                i += 1;
            } else {
                out.push(Jeton::nombre(txt));
                implicite_constante(&chars, i, &mut out);
            }
            continue;
        }

        if c.is_alphabetic() {
            let mot = mot_a(&chars, i);
            i += mot.chars().count();

            if est_constante(&mot) {
                let sym = if mot == "e" { "e" } else { "π" };
                if matches!(chars.get(i), Some(d) if d.is_ascii_digit()) {
                    return Err(erreur_constante_chiffre(sym));
                }
                out.push(Jeton::constante(sym));
            } else if est_fonction(&mot) {
                out.push(Jeton::fonction(&mot));
            } else if mot == "mod" {
                out.push(Jeton::operateur("mod"));
            } else {
                return Err(ErreurCalc::syntaxe(format!("identifiant inconnu: '{mot}'")));
            }
            continue;
        }

        return Err(ErreurCalc::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Après un nombre : si une constante suit immédiatement, on insère ×.
fn implicite_constante(chars: &[char], i: usize, out: &mut Vec<Jeton>) {
    let suit_constante = match chars.get(i) {
        Some('π') => true,
        Some(c) if c.is_alphabetic() => est_constante(&mot_a(chars, i)),
        _ => false,
    };
    if suit_constante {
        out.push(Jeton::operateur("×"));
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.texte.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
