//! # Report Formatter
//!
//! Renders a study into the plain-text document handed to the client or
//! the supplier. Formatting is a pure function of the record: dates come
//! from the study's own timestamps, never from the clock, so the same
//! study always renders to the same bytes.
//!
//! Section order is fixed. For a technical sheet: general information,
//! room dimensions, floor covering, wall covering, fixtures, utilities,
//! quote breakdown, notes. For a heat pump study: general information,
//! building or zone detail, computed figures, economic analysis,
//! recommendations, notes.
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use pac_core::calculations::air_to_water::AirToWaterInput;
//! use pac_core::report::format_study;
//! use pac_core::study::Study;
//!
//! let created = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
//! let input = AirToWaterInput { surface_m2: 120.0, ..Default::default() };
//! let study = Study::new_air_to_water_at("M. Martin", "Tours", input, created);
//!
//! let text = format_study(&study);
//! assert!(text.contains("ETUDE PAC AIR/EAU"));
//! assert!(text.contains("15/03/2024"));
//! ```

use std::fmt::Write;

use crate::calculations::air_to_air::{AirToAirInput, AirToAirResult, SizingStrategy};
use crate::calculations::air_to_water::{AirToWaterInput, AirToWaterResult};
use crate::calculations::{CoveringSpec, SizingResult};
use crate::sheet::TechnicalSheet;
use crate::study::{Study, StudyData};

const COMPANY_NAME: &str = "AQUATHERM GESTION";
const COMPANY_TAGLINE: &str = "PLOMBERIE \u{2022} CHAUFFAGE \u{2022} CLIMATISATION";
const RULE: &str = "================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------";

/// Render any study to its report text
pub fn format_study(study: &Study) -> String {
    match &study.data {
        StudyData::AirToWater {
            input,
            result,
            sizing,
        } => format_air_to_water(study, input, result, sizing),
        StudyData::AirToAir {
            input,
            result,
            sizing,
        } => format_air_to_air(study, input, result, sizing),
        StudyData::TechnicalSheet(sheet) => format_technical_sheet(study, sheet),
    }
}

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{:^64}", COMPANY_NAME);
    let _ = writeln!(out, "{:^64}", COMPANY_TAGLINE);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:^64}", title);
    let _ = writeln!(out);
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", THIN_RULE);
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<28}{}", format!("{} :", label), value);
}

fn end_section(out: &mut String) {
    let _ = writeln!(out);
}

fn footer(out: &mut String, study: &Study) {
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "Document etabli le {} \u{2014} reference {}",
        study.modified.format("%d/%m/%Y"),
        study.id
    );
    let _ = writeln!(out, "{}", RULE);
}

fn general_info(out: &mut String, study: &Study) {
    section(out, "INFORMATIONS GENERALES");
    field(out, "Client", &study.client_name);
    field(out, "Adresse", &study.address);
    field(out, "Date de creation", study.created.format("%d/%m/%Y"));
    field(out, "Statut", study.status.display_name());
    end_section(out);
}

fn notes(out: &mut String, study: &Study) {
    if !study.notes.trim().is_empty() {
        section(out, "NOTES");
        for line in study.notes.lines() {
            let _ = writeln!(out, "  {}", line);
        }
        end_section(out);
    }
}

fn eur(value: f64) -> String {
    format!("{:.2} \u{20ac}", value)
}

fn covering_section(out: &mut String, title: &str, spec: &CoveringSpec) {
    section(out, title);
    field(out, "Format", &spec.format);
    field(out, "Couleur", &spec.color);
    field(out, "Finition", spec.finish.display_name());
    if let Some(height_cm) = spec.mounting_height_cm() {
        field(out, "Hauteur de pose", format!("{:.0} cm", height_cm));
    }
    field(out, "Surface nette", format!("{:.2} m2", spec.net_m2));
    field(
        out,
        "Surface avec chutes (10%)",
        format!("{:.2} m2", spec.with_waste_m2),
    );
    field(out, "Prix unitaire HT", format!("{}/m2", eur(spec.unit_price_eur_m2)));
    field(out, "Total ligne HT", eur(spec.line_total_ht_eur()));
    if !spec.supplier.is_empty() {
        field(out, "Fournisseur", &spec.supplier);
    }
    if !spec.reference.is_empty() {
        field(out, "Reference", &spec.reference);
    }
    end_section(out);
}

fn sizing_sections(out: &mut String, sizing: &SizingResult) {
    section(out, "ANALYSE ECONOMIQUE");
    field(out, "Modele recommande", &sizing.recommended_model);
    field(
        out,
        "Consommation annuelle",
        format!("{} kWh", sizing.annual_consumption_kwh),
    );
    field(out, "Cout d'installation", eur(sizing.install_cost_eur));
    field(out, "Economies annuelles", eur(sizing.annual_savings_eur));
    field(
        out,
        "Retour sur investissement",
        format!("{:.0} ans", sizing.payback_years),
    );
    end_section(out);

    section(out, "TRAVAUX ET OPTIONS RECOMMANDES");
    for work in &sizing.recommended_works {
        let _ = writeln!(out, "  - {}", work);
    }
    for option in &sizing.recommended_options {
        let _ = writeln!(out, "  - {}", option);
    }
    end_section(out);
}

/// Render an air/water sizing study
pub fn format_air_to_water(
    study: &Study,
    input: &AirToWaterInput,
    result: &AirToWaterResult,
    sizing: &SizingResult,
) -> String {
    let mut out = String::new();
    banner(&mut out, "ETUDE PAC AIR/EAU");
    general_info(&mut out, study);

    section(&mut out, "CARACTERISTIQUES DU LOGEMENT");
    field(&mut out, "Surface chauffee", format!("{:.1} m2", input.surface_m2));
    field(
        &mut out,
        "Hauteur sous plafond",
        format!("{:.2} m", input.ceiling_height_m),
    );
    field(&mut out, "Isolation des murs", input.wall_insulation.display_name());
    field(&mut out, "Vitrage", input.glazing.display_name());
    field(&mut out, "Emetteurs", input.emitter.display_name());
    field(
        &mut out,
        "Temperature de base",
        format!("{:.0} \u{b0}C", input.base_temperature_c),
    );
    field(
        &mut out,
        "Temperature ext. minimale",
        format!("{:.0} \u{b0}C", input.min_outdoor_temperature_c),
    );
    end_section(&mut out);

    section(&mut out, "RESULTAT DU DIMENSIONNEMENT");
    field(
        &mut out,
        "Puissance requise",
        format!("{} W ({:.1} kW)", result.power_w, result.power_w as f64 / 1000.0),
    );
    field(&mut out, "SCOP retenu", format!("{:.1}", result.scop));
    end_section(&mut out);

    sizing_sections(&mut out, sizing);
    notes(&mut out, study);
    footer(&mut out, study);
    out
}

/// Render an air/air sizing study
pub fn format_air_to_air(
    study: &Study,
    input: &AirToAirInput,
    result: &AirToAirResult,
    sizing: &SizingResult,
) -> String {
    let mut out = String::new();
    banner(&mut out, "ETUDE PAC AIR/AIR");
    general_info(&mut out, study);

    section(&mut out, "CARACTERISTIQUES DU LOGEMENT");
    field(&mut out, "Volume total", format!("{:.1} m3", input.volume_m3));
    field(
        &mut out,
        "Niveau d'isolation",
        format!("{}/5", input.insulation_level.level()),
    );
    field(&mut out, "Exposition", input.exposure.display_name());
    field(&mut out, "Type d'installation", input.installation.display_name());
    field(&mut out, "Unites interieures", input.indoor_unit_count);
    end_section(&mut out);

    if result.strategy == SizingStrategy::PerRoom && !result.zones.is_empty() {
        section(&mut out, "BILAN PAR PIECE");
        for zone in &result.zones {
            let _ = writeln!(
                &mut out,
                "  {:<20}{:>8.1} m2  froid {:>6} W  chaud {:>6} W",
                zone.name, zone.surface_m2, zone.cooling_w, zone.heating_w
            );
        }
        end_section(&mut out);
    }

    section(&mut out, "RESULTAT DU DIMENSIONNEMENT");
    field(
        &mut out,
        "Puissance froid",
        format!("{} W ({:.1} kW)", result.cooling_w, result.cooling_w as f64 / 1000.0),
    );
    field(
        &mut out,
        "Puissance chaud",
        format!("{} W ({:.1} kW)", result.heating_w, result.heating_w as f64 / 1000.0),
    );
    end_section(&mut out);

    sizing_sections(&mut out, sizing);
    notes(&mut out, study);
    footer(&mut out, study);
    out
}

/// Render a bathroom technical sheet
pub fn format_technical_sheet(study: &Study, sheet: &TechnicalSheet) -> String {
    let mut out = String::new();
    banner(&mut out, "FICHE TECHNIQUE SALLE DE BAINS");

    section(&mut out, "INFORMATIONS GENERALES");
    field(&mut out, "Client", &study.client_name);
    field(&mut out, "Adresse", &study.address);
    field(&mut out, "Date de creation", study.created.format("%d/%m/%Y"));
    field(&mut out, "Type de projet", sheet.project_type.display_name());
    field(&mut out, "Statut", study.status.display_name());
    end_section(&mut out);

    section(&mut out, "DIMENSIONS DE LA PIECE");
    field(&mut out, "Longueur", format!("{:.2} m", sheet.dimensions.length_m));
    field(&mut out, "Largeur", format!("{:.2} m", sheet.dimensions.width_m));
    field(
        &mut out,
        "Hauteur sous plafond",
        format!("{:.2} m", sheet.dimensions.height_m),
    );
    field(
        &mut out,
        "Surface au sol",
        format!("{:.2} m2", sheet.dimensions.surface_m2()),
    );
    if sheet.under_floor_height_cm > 0.0 {
        field(
            &mut out,
            "Hauteur sous plancher",
            format!("{:.0} cm", sheet.under_floor_height_cm),
        );
    }
    end_section(&mut out);

    covering_section(&mut out, "CARRELAGE SOL", &sheet.floor);
    covering_section(&mut out, "FAIENCE MURALE", &sheet.wall);

    section(&mut out, "EQUIPEMENTS");
    field(&mut out, "Douche", &sheet.fixtures.shower.kind);
    field(&mut out, "  Dimensions", &sheet.fixtures.shower.dimensions);
    field(&mut out, "  Evacuation", &sheet.fixtures.shower.drain);
    field(&mut out, "  Paroi", &sheet.fixtures.shower.screen);
    field(&mut out, "  Robinetterie", &sheet.fixtures.shower.tapware);
    field(&mut out, "Vasque", &sheet.fixtures.basin.kind);
    field(&mut out, "  Meuble", &sheet.fixtures.basin.cabinet);
    field(&mut out, "WC", &sheet.fixtures.toilet.kind);
    field(&mut out, "  Sortie", &sheet.fixtures.toilet.outlet);
    if sheet.fixtures.toilet.hand_basin {
        field(&mut out, "  Lave-mains", "oui");
    }
    for other in &sheet.fixtures.other {
        field(&mut out, "Autre", other);
    }
    end_section(&mut out);

    section(&mut out, "RESEAUX");
    field(&mut out, "Alimentation eau", &sheet.plumbing.water_supply);
    field(&mut out, "Evacuation", &sheet.plumbing.drainage);
    field(&mut out, "Ventilation", &sheet.plumbing.ventilation);
    field(&mut out, "Chauffage", &sheet.plumbing.heating);
    field(&mut out, "Eclairage principal", &sheet.electrical.main_lighting);
    field(&mut out, "Eclairage miroir", &sheet.electrical.mirror_lighting);
    field(&mut out, "Prises", sheet.electrical.outlet_count);
    field(&mut out, "Interrupteurs", sheet.electrical.switch_count);
    end_section(&mut out);

    section(&mut out, "DEVIS");
    field(
        &mut out,
        "Main d'oeuvre",
        format!(
            "{:.0} h x {} = {}",
            sheet.totals.labor_hours,
            eur(sheet.totals.hourly_rate_eur),
            eur(sheet.totals.labor_total_ht_eur())
        ),
    );
    field(&mut out, "Fournitures HT", eur(sheet.totals.material_total_ht_eur));
    field(&mut out, "Total HT", eur(sheet.totals.total_ht_eur));
    field(
        &mut out,
        format!("TVA {:.1} %", sheet.totals.tax_rate_percent).as_str(),
        eur(sheet.totals.tax_amount_eur()),
    );
    field(&mut out, "Total TTC", eur(sheet.totals.total_ttc_eur));
    end_section(&mut out);

    if !sheet.particularities.trim().is_empty() {
        section(&mut out, "PARTICULARITES");
        for line in sheet.particularities.lines() {
            let _ = writeln!(&mut out, "  {}", line);
        }
        end_section(&mut out);
    }
    if !sheet.constraints.trim().is_empty() {
        section(&mut out, "CONTRAINTES");
        for line in sheet.constraints.lines() {
            let _ = writeln!(&mut out, "  {}", line);
        }
        end_section(&mut out);
    }

    notes(&mut out, study);
    footer(&mut out, study);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::air_to_air::RoomZone;
    use crate::sheet::SheetDraft;
    use chrono::{TimeZone, Utc};

    fn fixed_instant() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn air_to_water_study() -> Study {
        let input = AirToWaterInput {
            surface_m2: 120.0,
            ..Default::default()
        };
        Study::new_air_to_water_at("M. Martin", "4 rue Pasteur, Tours", input, fixed_instant())
    }

    #[test]
    fn test_report_is_deterministic() {
        let study = air_to_water_study();
        assert_eq!(format_study(&study), format_study(&study));
    }

    #[test]
    fn test_air_to_water_report_content() {
        let text = format_study(&air_to_water_study());
        assert!(text.contains(COMPANY_NAME));
        assert!(text.contains("ETUDE PAC AIR/EAU"));
        assert!(text.contains("M. Martin"));
        assert!(text.contains("15/03/2024"));
        // 120 * 60 * 1.0 * 1.0 * 1.0 = 7200 W
        assert!(text.contains("7200 W (7.2 kW)"));
        assert!(text.contains("PAC Air/Eau"));
        // Footer carries the record id, not a fresh timestamp
        assert!(text.contains(&fixed_instant().timestamp_millis().to_string()));
    }

    #[test]
    fn test_air_to_air_report_lists_zones() {
        let input = AirToAirInput {
            zones: vec![
                RoomZone {
                    name: "Salon".to_string(),
                    length_m: 6.0,
                    width_m: 5.0,
                    height_m: 2.5,
                    ..Default::default()
                },
                RoomZone {
                    name: "Chambre".to_string(),
                    length_m: 4.0,
                    width_m: 3.0,
                    height_m: 2.5,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let study = Study::new_air_to_air_at("Mme Bernard", "Angers", input, fixed_instant());
        let text = format_study(&study);
        assert!(text.contains("ETUDE PAC AIR/AIR"));
        assert!(text.contains("BILAN PAR PIECE"));
        assert!(text.contains("Salon"));
        assert!(text.contains("Chambre"));
    }

    #[test]
    fn test_technical_sheet_report_sections_in_order() {
        let study = SheetDraft::new("Mme Laurent", "12 rue des Lilas, Lyon")
            .with_length_m(3.5)
            .with_width_m(2.8)
            .with_wall_mounting_height_cm(120.0)
            .finalize_at(fixed_instant())
            .unwrap();
        let text = format_study(&study);

        let order = [
            "INFORMATIONS GENERALES",
            "DIMENSIONS DE LA PIECE",
            "CARRELAGE SOL",
            "FAIENCE MURALE",
            "EQUIPEMENTS",
            "RESEAUX",
            "DEVIS",
        ];
        let mut last = 0;
        for title in order {
            let pos = text.find(title).unwrap_or_else(|| panic!("missing {}", title));
            assert!(pos > last, "{} out of order", title);
            last = pos;
        }

        assert!(text.contains("9.80 m2"));
        assert!(text.contains("16.63 m2"));
    }

    #[test]
    fn test_notes_section_only_when_present() {
        let mut study = air_to_water_study();
        let text = format_study(&study);
        assert!(!text.contains("NOTES"));

        study.notes = "Acces chantier par l'arriere".to_string();
        let text = format_study(&study);
        assert!(text.contains("NOTES"));
        assert!(text.contains("Acces chantier par l'arriere"));
    }
}
