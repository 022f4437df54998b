//! Static per-motif configuration table.
//!
//! One row per motif in the closed set: design bundle, text bundle, and
//! narrative-flow hint. Pure data, looked up at classification time and
//! never computed.

use fotolibro_models::{Motif, MotifDesign, MotifText, NarrativeFlow};

/// Owned configuration bundle for one motif.
#[derive(Debug, Clone)]
pub struct MotifConfig {
    pub design: MotifDesign,
    pub text: MotifText,
    pub flow: NarrativeFlow,
}

struct MotifRow {
    template: &'static str,
    palette: &'static [&'static str],
    decorations: &'static [&'static str],
    font: &'static str,
    mood: &'static str,
    title_prefix: &'static str,
    dedication: &'static str,
    quote: &'static str,
    structure: &'static str,
    key_moments: &'static [&'static str],
    pacing: &'static str,
}

const MOTIF_TABLE: &[(Motif, MotifRow)] = &[
    (
        Motif::Wedding,
        MotifRow {
            template: "boda-clasica",
            palette: &["#f5f0e8", "#d4af37", "#ffffff"],
            decorations: &["anillos", "flores-blancas", "lazos"],
            font: "serif-elegante",
            mood: "romantico",
            title_prefix: "Nuestra Boda",
            dedication: "Para {name}, el dia en que todo empezo.",
            quote: "El amor no se mira, se siente.",
            structure: "preparativos-ceremonia-fiesta",
            key_moments: &["llegada", "si-quiero", "primer-baile"],
            pacing: "pausado",
        },
    ),
    (
        Motif::Travel,
        MotifRow {
            template: "cuaderno-de-viaje",
            palette: &["#2e5266", "#e2c044", "#d3d0cb"],
            decorations: &["mapas", "sellos", "brujulas"],
            font: "sans-moderno",
            mood: "aventurero",
            title_prefix: "Nuestro Viaje",
            dedication: "Para {name}, por cada kilometro compartido.",
            quote: "Viajar es vivir dos veces.",
            structure: "ruta",
            key_moments: &["salida", "descubrimiento", "regreso"],
            pacing: "dinamico",
        },
    ),
    (
        Motif::BirthdayChild,
        MotifRow {
            template: "fiesta-infantil",
            palette: &["#ff6f61", "#ffd166", "#06d6a0"],
            decorations: &["globos", "confeti", "estrellas"],
            font: "redondeada",
            mood: "festivo",
            title_prefix: "Mi Cumple",
            dedication: "Para {name}, que nunca dejes de sonar.",
            quote: "Un ano mas de risas.",
            structure: "cronologico",
            key_moments: &["tarta", "velas", "regalos"],
            pacing: "dinamico",
        },
    ),
    (
        Motif::BirthdayTeen,
        MotifRow {
            template: "cumple-urbano",
            palette: &["#22223b", "#9a8c98", "#f2e9e4"],
            decorations: &["neon", "polaroids"],
            font: "sans-moderno",
            mood: "desenfadado",
            title_prefix: "Mis Anos",
            dedication: "Para {name}, por todo lo que viene.",
            quote: "Los mejores anos, con la mejor gente.",
            structure: "cronologico",
            key_moments: &["amigos", "fiesta"],
            pacing: "dinamico",
        },
    ),
    (
        Motif::BirthdayAdult,
        MotifRow {
            template: "celebracion-elegante",
            palette: &["#1d3557", "#a8dadc", "#e63946"],
            decorations: &["copas", "velas"],
            font: "serif-elegante",
            mood: "celebratorio",
            title_prefix: "Celebrando",
            dedication: "Para {name}, por los anos vividos y los que quedan.",
            quote: "La vida se celebra.",
            structure: "cronologico",
            key_moments: &["brindis", "tarta"],
            pacing: "pausado",
        },
    ),
    (
        Motif::MothersDay,
        MotifRow {
            template: "flores-para-mama",
            palette: &["#fde2e4", "#e2ece9", "#cddafd"],
            decorations: &["flores", "corazones"],
            font: "caligrafica",
            mood: "tierno",
            title_prefix: "Para Mama",
            dedication: "Para {name}, que nos dio todo sin pedir nada.",
            quote: "El primer amor de todos.",
            structure: "tematico",
            key_moments: &["abrazos", "juntas"],
            pacing: "pausado",
        },
    ),
    (
        Motif::FathersDay,
        MotifRow {
            template: "para-papa",
            palette: &["#283618", "#606c38", "#fefae0"],
            decorations: &["lineas-sobrias"],
            font: "sans-clasica",
            mood: "carinoso",
            title_prefix: "Para Papa",
            dedication: "Para {name}, nuestro primer heroe.",
            quote: "Las manos que nos sostuvieron.",
            structure: "tematico",
            key_moments: &["juegos", "ensenanzas"],
            pacing: "pausado",
        },
    ),
    (
        Motif::BabyShower,
        MotifRow {
            template: "esperandote",
            palette: &["#fff1e6", "#bee1e6", "#fad2e1"],
            decorations: &["nubes", "estrellitas", "patitos"],
            font: "redondeada",
            mood: "ilusionado",
            title_prefix: "Esperandote",
            dedication: "Para {name}, antes de conocerte ya te queriamos.",
            quote: "Pronto en nuestros brazos.",
            structure: "cronologico",
            key_moments: &["preparativos", "regalos"],
            pacing: "pausado",
        },
    ),
    (
        Motif::BabyFirstYear,
        MotifRow {
            template: "primer-ano",
            palette: &["#fdfcdc", "#fed9b7", "#00afb9"],
            decorations: &["huellas", "lunas", "osos"],
            font: "redondeada",
            mood: "tierno",
            title_prefix: "Mi Primer Ano",
            dedication: "Para {name}, doce meses que cambiaron todo.",
            quote: "Lo pequeno se hace grande.",
            structure: "mes-a-mes",
            key_moments: &["primer-dia", "primeros-pasos", "primer-cumple"],
            pacing: "pausado",
        },
    ),
    (
        Motif::Pregnancy,
        MotifRow {
            template: "dulce-espera",
            palette: &["#f8edeb", "#fcd5ce", "#fec89a"],
            decorations: &["acuarelas", "hojas"],
            font: "caligrafica",
            mood: "sereno",
            title_prefix: "Dulce Espera",
            dedication: "Para {name}, mientras crecias dentro de mi.",
            quote: "Nueve meses, un amor infinito.",
            structure: "semana-a-semana",
            key_moments: &["noticia", "primera-ecografia", "recta-final"],
            pacing: "pausado",
        },
    ),
    (
        Motif::AnniversaryCouple,
        MotifRow {
            template: "aniversario-romantico",
            palette: &["#590d22", "#ff4d6d", "#fff0f3"],
            decorations: &["corazones", "fechas"],
            font: "serif-elegante",
            mood: "romantico",
            title_prefix: "Seguimos Eligiendonos",
            dedication: "Para {name}, un ano mas a tu lado.",
            quote: "Contigo, siempre.",
            structure: "cronologico",
            key_moments: &["inicio", "hoy"],
            pacing: "pausado",
        },
    ),
    (
        Motif::AnniversaryOther,
        MotifRow {
            template: "aniversario-clasico",
            palette: &["#540b0e", "#9e2a2b", "#fff3b0"],
            decorations: &["laureles", "numeros"],
            font: "serif-clasica",
            mood: "solemne",
            title_prefix: "Aniversario",
            dedication: "Para {name}, por todo lo construido.",
            quote: "El tiempo confirma lo importante.",
            structure: "cronologico",
            key_moments: &["origen", "hitos"],
            pacing: "pausado",
        },
    ),
    (
        Motif::Graduation,
        MotifRow {
            template: "graduacion",
            palette: &["#03045e", "#0077b6", "#caf0f8"],
            decorations: &["birretes", "diplomas"],
            font: "serif-clasica",
            mood: "orgulloso",
            title_prefix: "Lo Logramos",
            dedication: "Para {name}, esto es solo el principio.",
            quote: "El esfuerzo siempre florece.",
            structure: "cronologico",
            key_moments: &["estudio", "ceremonia", "celebracion"],
            pacing: "dinamico",
        },
    ),
    (
        Motif::Artistic,
        MotifRow {
            template: "galeria",
            palette: &["#0d0d0d", "#f5f5f5", "#c9ada7"],
            decorations: &[],
            font: "minimal",
            mood: "contemplativo",
            title_prefix: "Miradas",
            dedication: "Para {name}, por ver lo que otros no ven.",
            quote: "La luz escribe.",
            structure: "tematico",
            key_moments: &["series", "contrastes"],
            pacing: "pausado",
        },
    ),
    (
        Motif::Pet,
        MotifRow {
            template: "mejor-amigo",
            palette: &["#606c38", "#fefae0", "#dda15e"],
            decorations: &["huellas", "huesitos"],
            font: "redondeada",
            mood: "jugueton",
            title_prefix: "Mi Mejor Amigo",
            dedication: "Para {name}, gracias por tanta compania.",
            quote: "La felicidad tiene cuatro patas.",
            structure: "tematico",
            key_moments: &["juegos", "siestas", "paseos"],
            pacing: "dinamico",
        },
    ),
    (
        Motif::Family,
        MotifRow {
            template: "familia",
            palette: &["#edede9", "#d6ccc2", "#d5bdaf"],
            decorations: &["marcos-calidos"],
            font: "sans-clasica",
            mood: "calido",
            title_prefix: "Nuestra Familia",
            dedication: "Para {name}, lo que somos juntos.",
            quote: "Donde la vida comienza y el amor nunca termina.",
            structure: "cronologico",
            key_moments: &["reuniones", "generaciones"],
            pacing: "pausado",
        },
    ),
    (Motif::Generic, GENERIC_ROW),
];

/// Neutral row, also the fallback for any motif missing from the table.
const GENERIC_ROW: MotifRow = MotifRow {
    template: "clasico",
    palette: &["#ffffff", "#cccccc", "#555555"],
    decorations: &[],
    font: "sans-clasica",
    mood: "neutro",
    title_prefix: "Recuerdos",
    dedication: "Para {name}, momentos que merecen papel.",
    quote: "Cada foto guarda una historia.",
    structure: "cronologico",
    key_moments: &[],
    pacing: "neutro",
};

/// Look up the configuration for a motif. Every motif in the closed set has
/// a row; a missing row (which would indicate a table gap) falls back to
/// the generic one.
pub fn motif_config(motif: Motif) -> MotifConfig {
    let row = MOTIF_TABLE
        .iter()
        .find(|(m, _)| *m == motif)
        .map(|(_, row)| row)
        .unwrap_or(&GENERIC_ROW);

    MotifConfig {
        design: MotifDesign {
            template: row.template.to_string(),
            color_palette: row.palette.iter().map(|s| s.to_string()).collect(),
            decorations: row.decorations.iter().map(|s| s.to_string()).collect(),
            font_style: row.font.to_string(),
            mood: row.mood.to_string(),
        },
        text: MotifText {
            title_prefix: row.title_prefix.to_string(),
            dedication_template: row.dedication.to_string(),
            back_cover_quote: row.quote.to_string(),
        },
        flow: NarrativeFlow {
            structure: row.structure.to_string(),
            key_moments: row.key_moments.iter().map(|s| s.to_string()).collect(),
            pacing: row.pacing.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_motif_has_a_complete_row() {
        for motif in Motif::ALL {
            let config = motif_config(motif);
            assert!(!config.design.template.is_empty(), "motif {}", motif);
            assert!(
                config.text.dedication_template.contains("{name}"),
                "motif {} dedication has no placeholder",
                motif
            );
        }
    }

    #[test]
    fn test_generic_row_is_neutral() {
        let config = motif_config(Motif::Generic);
        assert_eq!(config.design.template, "clasico");
        assert_eq!(config.design.mood, "neutro");
    }
}
