//! # Pacalc CLI Application
//!
//! Terminal front-end for heat pump sizing studies. Prompts for the main
//! dwelling figures, runs the air/water sizing, prints the full client
//! report and the JSON record, and saves the study next to the current
//! directory.

use std::io::{self, BufRead, Write};
use std::path::Path;

use pac_core::calculations::air_to_water::AirToWaterInput;
use pac_core::coefficients::{Emitter, Glazing, WallInsulation};
use pac_core::report::format_study;
use pac_core::store;
use pac_core::study::Study;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Pacalc CLI - Etude PAC Air/Eau");
    println!("==============================");
    println!();

    let client = prompt_str("Nom du client [M. Dupont]: ", "M. Dupont");
    let address = prompt_str("Adresse [ ]: ", "");
    let surface_m2 = prompt_f64("Surface chauffee (m2) [120.0]: ", 120.0);
    let ceiling_m = prompt_f64("Hauteur sous plafond (m) [2.5]: ", 2.5);

    let insulation_code = prompt_str(
        "Isolation (ITE/Bien_isoles/Isoles/Pas_isoles) [Isoles]: ",
        "Isoles",
    );
    let insulation = WallInsulation::from_str_flexible(&insulation_code).unwrap_or_default();

    let glazing_code = prompt_str("Vitrage (Simple/Double/Triple) [Double]: ", "Double");
    let glazing = Glazing::from_str_flexible(&glazing_code).unwrap_or_default();

    let underfloor = prompt_str("Plancher chauffant (o/n) [n]: ", "n");
    let emitter = if underfloor.eq_ignore_ascii_case("o") {
        Emitter::UnderfloorHeating
    } else {
        Emitter::Radiators
    };

    let input = AirToWaterInput {
        surface_m2,
        ceiling_height_m: ceiling_m,
        wall_insulation: insulation,
        glazing,
        emitter,
        ..Default::default()
    };

    println!();
    println!("Calcul du dimensionnement...");
    println!();

    let study = Study::new_air_to_water(client, address, input);
    println!("{}", format_study(&study));

    println!();
    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(&study) {
        println!("{}", json);
    }

    let report_name = study.report_file_name();
    match store::write_report(Path::new("."), &report_name, &format_study(&study)) {
        Ok(path) => {
            println!();
            println!("Rapport enregistre : {}", path.display());
        }
        Err(e) => {
            eprintln!("Erreur d'enregistrement : {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
