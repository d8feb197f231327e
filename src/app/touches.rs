// src/app/touches.rs
//
// Étiquette de touche -> texte inséré dans l’entrée.
// Sert seulement à composer l’expression ; le noyau ne voit que le texte final.

/// Traduit une touche du pavé en fragment d’expression.
/// Renvoie None pour une touche inconnue.
pub fn traduit_touche(touche: &str) -> Option<&'static str> {
    let t = match touche {
        "0" => "0",
        "1" => "1",
        "2" => "2",
        "3" => "3",
        "4" => "4",
        "5" => "5",
        "6" => "6",
        "7" => "7",
        "8" => "8",
        "9" => "9",
        "00" => "00",
        "." => ".",

        "+" => "+",
        "-" => "-",
        "x" | "×" | "*" => "×",
        "÷" | "/" => "÷",
        "(" => "(",
        ")" => ")",
        "%" => "%",
        "mod" => " mod ",

        "1/x" => "^(-1)",
        "X 2" => "^2",
        "X 3" => "^3",
        "^" | "X y" => "^(",
        "EXP" | "ex" => "e^(",
        "10x" => "10^(",

        "sin" => "sin(",
        "cos" => "cos(",
        "tan" => "tan(",
        "asin" => "asin(",
        "acos" => "acos(",
        "atan" => "atan(",
        "log" => "log(",
        "ln" => "ln(",

        "√" | "n√" | "y √x" => "√",
        "3√" => "3√",
        "n!" | "X!" => "!",
        "π" => "π",
        "e" => "e",
        "+/-" => "×(-1)",

        _ => return None,
    };
    Some(t)
}
