// src/noyau/trig.rs
//
// Trig spéciale (angles “exactement reconnus”)
// -----------------------------------------------------------
// - Entrée : coefficient c de l’angle c·π
// - Réduction modulo période via mod_rationnel() (sin/cos: 2 ; tan: 1)
// - Table restreinte aux valeurs rationnelles : 0, ±1/2, ±1
// - Table inverse : asin/acos/atan de {0, ±1/2, ±1} -> c·π exact

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigInv {
    Asin,
    Acos,
    Atan,
}

impl TrigFn {
    pub fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
        }
    }
}

impl TrigInv {
    pub fn nom(self) -> &'static str {
        match self {
            TrigInv::Asin => "asin",
            TrigInv::Acos => "acos",
            TrigInv::Atan => "atan",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrigOutcome {
    Valeur(BigRational, String),
    Indefini(String),
}

/// r mod m (m entier > 0), résultat dans [0, m).
pub fn mod_rationnel(r: &BigRational, m: i64) -> BigRational {
    let m = BigRational::from_integer(BigInt::from(m));
    let q = (r / &m).floor();
    r - q * m
}

/// Reconnaît les angles spéciaux pour sin/cos/tan, l’angle valant `coeff`·π.
///
/// Retour:
/// - Some(Valeur(exact, preuve)) si la valeur est rationnelle
/// - Some(Indefini(preuve)) si indéfini (tan(π/2), tan(3π/2))
/// - None sinon (calcul par série)
pub fn trig_special(coeff: &BigRational, f: TrigFn) -> Option<TrigOutcome> {
    // 1) réduire modulo période
    let coeff_reduit = match f {
        TrigFn::Sin | TrigFn::Cos => mod_rationnel(coeff, 2),
        TrigFn::Tan => mod_rationnel(coeff, 1),
    };

    // 2) convertir en k/n "petit"
    let (k, n) = rational_to_small_kn(&coeff_reduit)?;

    // 3) k mod (2n) : tables codées sur [0,2π)
    let k_mod = k.rem_euclid(2 * n);

    let rat = |a: i64, b: i64| BigRational::new(BigInt::from(a), BigInt::from(b));
    let angle_txt = format_angle_kn_pi(k_mod, n);
    let nom = f.nom();
    let valeur = |a: i64, b: i64, txt: &str| {
        TrigOutcome::Valeur(rat(a, b), format!("{nom}({angle_txt}) = {txt}"))
    };

    let out = match f {
        TrigFn::Sin => match (k_mod, n) {
            (0, _) | (1, 1) => valeur(0, 1, "0"),
            (1, 6) | (5, 6) => valeur(1, 2, "1/2"),
            (7, 6) | (11, 6) => valeur(-1, 2, "-1/2"),
            (1, 2) => valeur(1, 1, "1"),
            (3, 2) => valeur(-1, 1, "-1"),
            _ => return None,
        },

        TrigFn::Cos => match (k_mod, n) {
            (0, _) => valeur(1, 1, "1"),
            (1, 1) => valeur(-1, 1, "-1"),
            (1, 3) | (5, 3) => valeur(1, 2, "1/2"),
            (2, 3) | (4, 3) => valeur(-1, 2, "-1/2"),
            (1, 2) | (3, 2) => valeur(0, 1, "0"),
            _ => return None,
        },

        TrigFn::Tan => match (k_mod, n) {
            (0, _) | (1, 1) => valeur(0, 1, "0"),
            (1, 4) | (5, 4) => valeur(1, 1, "1"),
            (3, 4) | (7, 4) => valeur(-1, 1, "-1"),
            (1, 2) | (3, 2) => TrigOutcome::Indefini(format!("tan({angle_txt}) = indéfini")),
            _ => return None,
        },
    };

    Some(out)
}

/// Angles exacts des fonctions inverses : renvoie le coefficient c (angle c·π).
pub fn trig_inverse_special(x: &BigRational, f: TrigInv) -> Option<(BigRational, String)> {
    // x ∈ {-1, -1/2, 0, 1/2, 1}  <=>  2x entier dans [-2, 2]
    let deux_x = x * BigRational::from_integer(BigInt::from(2));
    if !deux_x.is_integer() {
        return None;
    }
    let k = deux_x.to_integer().to_i64()?;

    let (a, b) = match (f, k) {
        (TrigInv::Asin, -2) => (-1, 2),
        (TrigInv::Asin, -1) => (-1, 6),
        (TrigInv::Asin, 0) => (0, 1),
        (TrigInv::Asin, 1) => (1, 6),
        (TrigInv::Asin, 2) => (1, 2),

        (TrigInv::Acos, -2) => (1, 1),
        (TrigInv::Acos, -1) => (2, 3),
        (TrigInv::Acos, 0) => (1, 2),
        (TrigInv::Acos, 1) => (1, 3),
        (TrigInv::Acos, 2) => (0, 1),

        (TrigInv::Atan, -2) => (-1, 4),
        (TrigInv::Atan, 0) => (0, 1),
        (TrigInv::Atan, 2) => (1, 4),

        _ => return None,
    };

    let x_txt = if x.is_integer() {
        x.to_integer().to_string()
    } else {
        format!("{}/{}", x.numer(), x.denom())
    };
    let angle_txt = if a < 0 {
        format!("-{}", format_angle_kn_pi(-a, b))
    } else {
        format_angle_kn_pi(a, b)
    };
    let c = BigRational::new(BigInt::from(a), BigInt::from(b));
    Some((c, format!("{}({x_txt}) = {angle_txt}", f.nom())))
}

/* ------------------------ Outils ------------------------ */

fn format_angle_kn_pi(k: i64, n: i64) -> String {
    if k == 0 {
        return "0".to_string();
    }
    if n == 1 {
        return match k {
            1 => "π".to_string(),
            _ => format!("{k}π"),
        };
    }
    if k == 1 {
        return format!("π/{n}");
    }
    format!("{k}π/{n}")
}

/// Convertit un rationnel en (k,n) i64 réduit.
/// Accepte seulement n ∈ {1,2,3,4,6}.
fn rational_to_small_kn(r: &BigRational) -> Option<(i64, i64)> {
    if r.is_zero() {
        return Some((0, 1));
    }
    let denom = r.denom().to_i64()?;
    let numer = r.numer().to_i64()?;

    let g = gcd_i64(numer.abs(), denom.abs());
    let k = numer / g;
    let n = denom / g;

    if n.is_positive() && [1, 2, 3, 4, 6].contains(&n) {
        Some((k, n))
    } else {
        None
    }
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}
