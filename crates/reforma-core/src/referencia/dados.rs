//! Built-in reference data, current as of October 2025.
//!
//! ICMS modal rates follow each state's internal general rate (including
//! poverty-fund surcharges where they apply to the modal rate). GDP weights
//! are state shares of national GDP from the IBGE regional accounts, in
//! percent. The national reference is never written here: it is derived from
//! these rows when the table set is built.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::tabelas::{FaixaCarga, LinhaIcms, MarcoTransicao, PerfilSetor, TabelasBrutas};
use crate::dominio::{RegimeTributario, Setor, UF};

pub const VERSAO: &str = "2025.10";

/// (state, modal ICMS rate %, GDP share %)
const ICMS_2025: [(UF, Decimal, Decimal); 27] = [
    (UF::AC, dec!(19.0), dec!(0.2)),
    (UF::AL, dec!(20.0), dec!(0.7)),
    (UF::AP, dec!(18.0), dec!(0.2)),
    (UF::AM, dec!(20.0), dec!(1.4)),
    (UF::BA, dec!(20.5), dec!(3.9)),
    (UF::CE, dec!(20.0), dec!(2.1)),
    (UF::DF, dec!(20.0), dec!(3.2)),
    (UF::ES, dec!(17.0), dec!(2.0)),
    (UF::GO, dec!(19.0), dec!(3.1)),
    (UF::MA, dec!(23.0), dec!(1.3)),
    (UF::MT, dec!(17.0), dec!(2.6)),
    (UF::MS, dec!(17.0), dec!(1.6)),
    (UF::MG, dec!(18.0), dec!(9.1)),
    (UF::PA, dec!(19.0), dec!(2.6)),
    (UF::PB, dec!(20.0), dec!(0.8)),
    (UF::PR, dec!(19.5), dec!(6.4)),
    (UF::PE, dec!(20.5), dec!(2.5)),
    (UF::PI, dec!(22.5), dec!(0.7)),
    (UF::RJ, dec!(22.0), dec!(11.5)),
    (UF::RN, dec!(20.0), dec!(0.8)),
    (UF::RS, dec!(17.0), dec!(6.2)),
    (UF::RO, dec!(19.5), dec!(0.6)),
    (UF::RR, dec!(20.0), dec!(0.2)),
    (UF::SC, dec!(17.0), dec!(4.7)),
    (UF::SP, dec!(18.0), dec!(30.6)),
    (UF::SE, dec!(19.0), dec!(0.5)),
    (UF::TO, dec!(20.0), dec!(0.5)),
];

fn icms() -> BTreeMap<UF, LinhaIcms> {
    ICMS_2025
        .iter()
        .map(|(uf, aliquota, peso)| {
            (
                *uf,
                LinhaIcms {
                    aliquota_modal: *aliquota,
                    peso_pib: *peso,
                    fonte: format!("Legislação estadual de ICMS ({uf}), alíquota modal vigente em 2025"),
                },
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn perfil(
    tributado_icms: bool,
    fator_nova_carga: Decimal,
    reducao_aliquota: Decimal,
    regime_especifico: bool,
    sujeito_seletivo: bool,
    margem_bruta: Decimal,
    fator_efetividade: Decimal,
) -> PerfilSetor {
    PerfilSetor {
        tributado_icms,
        fator_nova_carga,
        reducao_aliquota,
        regime_especifico,
        sujeito_seletivo,
        margem_bruta,
        fator_efetividade,
    }
}

fn setores() -> BTreeMap<Setor, PerfilSetor> {
    use Setor::*;

    BTreeMap::from([
        // Goods: full credit chain, ICMS today
        (Varejo, perfil(true, dec!(1.00), dec!(0), false, false, dec!(0.30), dec!(0.82))),
        (Atacado, perfil(true, dec!(0.95), dec!(0), false, false, dec!(0.18), dec!(0.85))),
        (Industria, perfil(true, dec!(0.85), dec!(0), false, true, dec!(0.35), dec!(0.90))),
        (Agronegocio, perfil(true, dec!(0.50), dec!(0.60), false, false, dec!(0.25), dec!(0.78))),
        (Transporte, perfil(true, dec!(0.95), dec!(0), false, false, dec!(0.30), dec!(0.80))),
        (Alimentacao, perfil(true, dec!(1.05), dec!(0), true, false, dec!(0.40), dec!(0.70))),
        // Services: ISS today, few input credits
        (Servicos, perfil(false, dec!(1.20), dec!(0), false, false, dec!(0.55), dec!(0.80))),
        (Tecnologia, perfil(false, dec!(1.15), dec!(0), false, false, dec!(0.60), dec!(0.88))),
        (Saude, perfil(false, dec!(0.45), dec!(0.60), false, false, dec!(0.40), dec!(0.90))),
        (Educacao, perfil(false, dec!(0.45), dec!(0.60), false, false, dec!(0.45), dec!(0.92))),
        (Construcao, perfil(false, dec!(1.05), dec!(0), false, false, dec!(0.25), dec!(0.72))),
        (Imobiliario, perfil(false, dec!(0.70), dec!(0), true, false, dec!(0.50), dec!(0.85))),
    ])
}

fn faixa(atual_min: Decimal, atual_max: Decimal, projetada_min: Decimal, projetada_max: Decimal) -> FaixaCarga {
    FaixaCarga {
        atual_min,
        atual_max,
        projetada_min,
        projetada_max,
    }
}

fn regimes() -> BTreeMap<RegimeTributario, FaixaCarga> {
    BTreeMap::from([
        (RegimeTributario::Simples, faixa(dec!(4.0), dec!(16.0), dec!(4.0), dec!(16.5))),
        (RegimeTributario::LucroPresumido, faixa(dec!(9.0), dec!(15.0), dec!(11.0), dec!(16.0))),
        (RegimeTributario::LucroReal, faixa(dec!(14.0), dec!(22.0), dec!(12.0), dec!(20.0))),
    ])
}

fn cronograma() -> Vec<MarcoTransicao> {
    [
        (2026, "Ano de teste: CBS de 0,9% e IBS de 0,1% destacados na nota, compensáveis com PIS/Cofins"),
        (2027, "CBS em vigor plena, extinção de PIS e Cofins, início do Imposto Seletivo e IPI zerado fora da ZFM"),
        (2028, "CBS plena e IBS mantido em 0,1%; ICMS e ISS ainda integrais"),
        (2029, "Início da transição do ICMS e do ISS: alíquotas reduzidas em 10%"),
        (2030, "ICMS e ISS reduzidos em 20%, IBS cresce na mesma proporção"),
        (2031, "ICMS e ISS reduzidos em 30%"),
        (2032, "ICMS e ISS reduzidos em 40%"),
        (2033, "Extinção do ICMS e do ISS; IBS e CBS em vigor plena"),
    ]
    .into_iter()
    .map(|(ano, descricao)| MarcoTransicao {
        ano,
        descricao: descricao.to_string(),
    })
    .collect()
}

pub(crate) fn tabelas_brutas_padrao() -> TabelasBrutas {
    TabelasBrutas {
        versao: VERSAO.to_string(),
        atualizado_em: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap_or_default(),
        icms: icms(),
        setores: setores(),
        regimes: regimes(),
        cronograma: cronograma(),
    }
}
