//! Brazilian number formatting for narratives.

use rust_decimal::Decimal;

/// `1234567.891` with 2 places -> `1.234.567,89`.
pub fn numero(valor: Decimal, casas: u32) -> String {
    let arredondado = valor.round_dp(casas);
    let texto = format!("{:.*}", casas as usize, arredondado.abs());
    let (inteiro, fracao) = match texto.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (texto, None),
    };

    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    let sinal = if arredondado.is_sign_negative() && !arredondado.is_zero() {
        "-"
    } else {
        ""
    };
    match fracao {
        Some(f) => format!("{sinal}{agrupado},{f}"),
        None => format!("{sinal}{agrupado}"),
    }
}

pub fn moeda(valor: Decimal) -> String {
    format!("R$ {}", numero(valor, 2))
}

pub fn pct(valor: Decimal) -> String {
    format!("{}%", numero(valor, 2))
}

pub fn pp(valor: Decimal) -> String {
    format!("{} p.p.", numero(valor, 2))
}
