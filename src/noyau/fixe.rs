// src/noyau/fixe.rs
//
// Virgule fixe : un réel x est représenté par l’entier round(x × 10^chiffres).
// Toutes les séries (π, exp, ln, atan, sin, cos) travaillent ici, sans flottants.

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Chiffres de garde ajoutés à la précision de travail.
pub const GARDE: usize = 10;

/// Borne dure du nombre de termes d’une série.
pub const MAX_TERMES: usize = 512;

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Exposant décimal de |q| (q non nul), à une unité près : 10^k <= |q| < 10^(k+1).
/// Estimé par le nombre de bits, sans conversion en texte.
pub fn exposant_decimal(q: &BigRational) -> i64 {
    let nb = q.numer().bits() as i64;
    let db = q.denom().bits() as i64;
    // log10(2) ≈ 0.30103
    ((nb - db) * 30103).div_euclid(100_000)
}

/// q × 10^e (exact).
pub fn decale(q: &BigRational, e: i64) -> BigRational {
    let p = BigRational::from_integer(pow10(e.unsigned_abs() as usize));
    if e >= 0 {
        q * p
    } else {
        q / p
    }
}

/// a / b arrondi au plus proche (demi : loin de zéro). `b` non nul.
pub fn div_arrondi(a: &BigInt, b: &BigInt) -> BigInt {
    let (a, b) = if b.is_negative() {
        (-a, -b)
    } else {
        (a.clone(), b.clone())
    };
    let deux_b = &b * BigInt::from(2);
    if a.is_negative() {
        -((BigInt::from(-2) * a + &b) / deux_b)
    } else {
        (BigInt::from(2) * a + &b) / deux_b
    }
}

/// floor(a^(1/n)) pour a >= 0 (Newton entier).
pub fn racine_entiere(a: &BigInt, n: u32) -> BigInt {
    if a.is_zero() || n <= 1 || a.is_negative() {
        return if a.is_negative() { BigInt::zero() } else { a.clone() };
    }

    // point de départ >= racine
    let n64 = n as u64;
    let mut y = BigInt::one() << (a.bits().div_ceil(n64) + 1);
    let n_big = BigInt::from(n);
    let n_moins_1 = BigInt::from(n - 1);

    loop {
        let y_next = (&n_moins_1 * &y + a / y.pow(n - 1)) / &n_big;
        if y_next >= y {
            break;
        }
        y = y_next;
    }

    // ajustement final (floor)
    while y.pow(n) > *a {
        y -= 1u32;
    }
    while (&y + 1u32).pow(n) <= *a {
        y += 1u32;
    }
    y
}

/// Échelle de travail : 10^chiffres.
#[derive(Clone, Debug)]
pub struct Echelle {
    pub chiffres: usize,
    pub un: BigInt,
}

impl Echelle {
    pub fn new(chiffres: usize) -> Self {
        Self {
            chiffres,
            un: pow10(chiffres),
        }
    }

    pub fn depuis_rationnel(&self, r: &BigRational) -> BigInt {
        div_arrondi(&(r.numer() * &self.un), r.denom())
    }

    pub fn vers_rationnel(&self, x: BigInt) -> BigRational {
        BigRational::new(x, self.un.clone())
    }

    /// Arrondi de q à `chiffres` chiffres significatifs (et non décimales).
    pub fn arrondi_significatif(&self, q: &BigRational) -> BigRational {
        if q.is_zero() {
            return q.clone();
        }
        let places = self.chiffres as i64 - 1 - exposant_decimal(q);
        let p = pow10(places.unsigned_abs() as usize);
        if places >= 0 {
            let n = div_arrondi(&(q.numer() * &p), q.denom());
            BigRational::new(n, p)
        } else {
            let n = div_arrondi(q.numer(), &(q.denom() * &p));
            BigRational::from_integer(n * p)
        }
    }

    pub fn depuis_entier(&self, n: &BigInt) -> BigInt {
        n * &self.un
    }

    pub fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        div_arrondi(&(a * b), &self.un)
    }

    /// `b` non nul (vérifié par l’appelant).
    pub fn div(&self, a: &BigInt, b: &BigInt) -> BigInt {
        div_arrondi(&(a * &self.un), b)
    }

    /* ------------------------ π (Machin) ------------------------ */

    /// arctan(1/q) sur l’échelle `scale` via série:
    /// atan(z) = z - z^3/3 + z^5/5 - ...
    fn arctan_inv_q(q: i64, scale: &BigInt) -> BigInt {
        let q = BigInt::from(q);
        let q2 = &q * &q;

        let mut k: u64 = 0;
        let mut q_pow = q.clone(); // q^(2k+1)
        let mut sum = BigInt::zero();

        loop {
            let term = scale / (&q_pow * BigInt::from(2 * k + 1));
            if term.is_zero() {
                break;
            }
            if k % 2 == 0 {
                sum += &term;
            } else {
                sum -= &term;
            }
            q_pow *= &q2;
            k += 1;
        }

        sum
    }

    /// Machin : π = 16·atan(1/5) - 4·atan(1/239)
    pub fn pi(&self) -> BigInt {
        // extra pour amortir les erreurs de troncature
        let extra = 10usize;
        let scale = &self.un * pow10(extra);

        let a = Self::arctan_inv_q(5, &scale);
        let b = Self::arctan_inv_q(239, &scale);
        let pi = BigInt::from(16) * a - BigInt::from(4) * b;

        div_arrondi(&pi, &pow10(extra))
    }

    /* ------------------------ racines ------------------------ */

    /// √x pour x >= 0 (en virgule fixe).
    pub fn sqrt(&self, x: &BigInt) -> BigInt {
        racine_entiere(&(x * &self.un), 2)
    }

    /// x^(1/n) pour x >= 0 (en virgule fixe).
    pub fn racine_n(&self, x: &BigInt, n: u32) -> BigInt {
        if n <= 1 {
            return x.clone();
        }
        racine_entiere(&(x * self.un.pow(n - 1)), n)
    }

    /* ------------------------ exp / ln ------------------------ */

    /// e^x : réduction x/2^k jusqu’à |x| <= 1/2, Taylor, puis k mises au carré.
    /// L’appelant borne x (dépassement) avant l’appel.
    pub fn exp(&self, x: &BigInt) -> BigInt {
        if x.is_negative() {
            let inverse = self.exp(&-x);
            return self.div(&self.un, &inverse);
        }

        let demi = &self.un / 2u32;
        let deux = BigInt::from(2);
        let mut r = x.clone();
        let mut k = 0u32;
        while r > demi {
            r = div_arrondi(&r, &deux);
            k += 1;
        }

        let mut somme = self.un.clone();
        let mut terme = self.un.clone();
        let mut n = 1usize;
        while n <= MAX_TERMES {
            terme = div_arrondi(&(&terme * &r), &(&self.un * BigInt::from(n)));
            if terme.is_zero() {
                break;
            }
            somme += &terme;
            n += 1;
        }
        trace!("exp: {n} termes, {k} carrés");

        for _ in 0..k {
            somme = self.mul(&somme, &somme);
        }
        somme
    }

    /// atanh(z) pour |z| < 1 : z + z^3/3 + z^5/5 + ...
    fn atanh(&self, z: &BigInt) -> BigInt {
        let z2 = self.mul(z, z);
        let mut p = z.clone();
        let mut somme = z.clone();
        for j in 1..MAX_TERMES {
            p = self.mul(&p, &z2);
            let t = div_arrondi(&p, &BigInt::from(2 * j + 1));
            if t.is_zero() {
                break;
            }
            somme += t;
        }
        somme
    }

    /// ln 2 = 2·atanh(1/3)
    pub fn ln2(&self) -> BigInt {
        let tiers = div_arrondi(&self.un, &BigInt::from(3));
        self.atanh(&tiers) * 2u32
    }

    /// ln x pour x > 0 : x = m·2^k avec m ∈ [1, 2), ln m = 2·atanh((m-1)/(m+1)).
    pub fn ln(&self, x: &BigInt) -> BigInt {
        debug_assert!(x.is_positive());

        let deux_un = &self.un * 2u32;
        let mut k: i64 = x.bits() as i64 - self.un.bits() as i64;
        let mut m = if k > 0 {
            div_arrondi(x, &(BigInt::one() << (k as u64)))
        } else {
            x << ((-k) as u64)
        };
        while m >= deux_un {
            m = div_arrondi(&m, &BigInt::from(2));
            k += 1;
        }
        while m < self.un {
            m <<= 1u32;
            k -= 1;
        }

        let z = self.div(&(&m - &self.un), &(&m + &self.un));
        let ln_m = self.atanh(&z) * 2u32;
        ln_m + self.ln2() * BigInt::from(k)
    }

    /* ------------------------ trigonométrie (radians) ------------------------ */

    /// Ramène x dans [-π, π].
    fn reduit(&self, x: &BigInt, pi: &BigInt) -> BigInt {
        let deux_pi = pi * 2u32;
        let q = div_arrondi(x, &deux_pi);
        x - q * deux_pi
    }

    pub fn sin(&self, x: &BigInt, pi: &BigInt) -> BigInt {
        let x = self.reduit(x, pi);
        let x2 = self.mul(&x, &x);
        let mut terme = x.clone();
        let mut somme = x;
        let mut j = 1usize;
        while j <= MAX_TERMES {
            let d = BigInt::from((2 * j) * (2 * j + 1));
            terme = -div_arrondi(&(&terme * &x2), &(&self.un * d));
            if terme.is_zero() {
                break;
            }
            somme += &terme;
            j += 1;
        }
        trace!("sin: {j} termes");
        somme
    }

    pub fn cos(&self, x: &BigInt, pi: &BigInt) -> BigInt {
        let x = self.reduit(x, pi);
        let x2 = self.mul(&x, &x);
        let mut terme = self.un.clone();
        let mut somme = self.un.clone();
        let mut j = 1usize;
        while j <= MAX_TERMES {
            let d = BigInt::from((2 * j - 1) * (2 * j));
            terme = -div_arrondi(&(&terme * &x2), &(&self.un * d));
            if terme.is_zero() {
                break;
            }
            somme += &terme;
            j += 1;
        }
        trace!("cos: {j} termes");
        somme
    }

    /// atan(x) : symétrie, inversion au-delà de 1, demi-angles jusqu’à |x| <= 1/5, série.
    pub fn atan(&self, x: &BigInt, pi: &BigInt) -> BigInt {
        if x.is_negative() {
            return -self.atan(&-x, pi);
        }
        if x > &self.un {
            let inverse = self.div(&self.un, x);
            return div_arrondi(pi, &BigInt::from(2)) - self.atan(&inverse, pi);
        }

        let seuil = &self.un / 5u32;
        let mut y = x.clone();
        let mut doublements = 0u32;
        while y > seuil {
            let r = self.sqrt(&(&self.un + self.mul(&y, &y)));
            y = self.div(&y, &(&self.un + r));
            doublements += 1;
        }

        let y2 = self.mul(&y, &y);
        let mut p = y.clone();
        let mut somme = y;
        for j in 1..MAX_TERMES {
            p = -self.mul(&p, &y2);
            let t = div_arrondi(&p, &BigInt::from(2 * j + 1));
            if t.is_zero() {
                break;
            }
            somme += t;
        }
        somme << doublements
    }
}
