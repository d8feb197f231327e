// src/noyau/format.rs
//
// Projection d’affichage du résultat final.
// Ne modifie jamais la valeur : seule la chaîne affichée est arrondie.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::decimal::{Forme, Reel};
use super::fixe::{div_arrondi, pow10};

/* ------------------------ Décimal ------------------------ */

/// Entier “scalé” (×10^decimales) -> texte décimal, zéros de queue retirés.
fn scaled_to_decimal(scaled: BigInt, decimales: usize) -> String {
    let neg = scaled.is_negative();
    let scaled = scaled.abs();

    let scale = pow10(decimales);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };
    if decimales == 0 || frac_part.is_zero() {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < decimales {
        frac.insert(0, '0');
    }
    let frac = frac.trim_end_matches('0');

    format!("{signe}{int_part}.{frac}")
}

/// Affichage d’une valeur :
/// - à moins de 10^-epsilon_entier d’un entier -> cet entier
/// - sinon arrondi (demi : loin de zéro) à `max_decimales`, zéros de queue retirés
/// - jamais de “-0”
pub fn formate(x: &BigRational, max_decimales: usize, epsilon_entier: u32) -> String {
    let entier = div_arrondi(x.numer(), x.denom());
    let ecart = (x - BigRational::from_integer(entier.clone())).abs();
    let epsilon = BigRational::new(BigInt::one(), pow10(epsilon_entier as usize));
    if ecart < epsilon {
        return entier.to_string();
    }

    let scaled = div_arrondi(&(x.numer() * pow10(max_decimales)), x.denom());
    scaled_to_decimal(scaled, max_decimales)
}

/* ------------------------ Forme exacte (démarche) ------------------------ */

fn format_rat_pretty(r: &BigRational) -> String {
    if r.denom().is_one() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

/// coeff*π : affichage joli (π/2, 3π/2, -2π, etc.)
pub fn format_coeff_pi(coeff: &BigRational) -> String {
    let n = coeff.numer();
    let d = coeff.denom();

    if coeff.is_zero() {
        return "0".to_string();
    }

    let moins_un = BigInt::from(-1);
    let k = if n.is_one() {
        String::new()
    } else if n == &moins_un {
        "-".to_string()
    } else {
        n.to_string()
    };

    if d.is_one() {
        format!("{k}π")
    } else {
        format!("{k}π/{d}")
    }
}

/// Forme exacte d’une valeur, si elle en a une (None pour un résultat approché).
pub fn forme_exacte(v: &Reel) -> Option<String> {
    match v.forme() {
        Forme::Rationnel => Some(format_rat_pretty(v.valeur())),
        Forme::MultiplePi(c) => Some(format_coeff_pi(c)),
        Forme::E => Some("e".to_string()),
        Forme::Approche => None,
    }
}
